//! Limited-memory BFGS minimizer.
//!
//! Minimizes a smooth objective given as a closure that evaluates the value
//! at a point and writes the gradient into a caller-provided buffer. Search
//! directions come from the two-loop recursion over the last `memory`
//! correction pairs; step lengths from a backtracking line search enforcing
//! the Armijo condition.
//!
//! Stops when the largest gradient component drops to `tolerance`, when the
//! relative decrease of the objective falls below `f_tolerance`, or after
//! `max_iter` iterations.

use std::collections::VecDeque;

use log::debug;

use crate::error::{Result, SentimentError};

const ARMIJO_C1: f64 = 1e-4;
const MAX_LINE_SEARCH_STEPS: usize = 50;
const MIN_CURVATURE: f64 = 1e-10;

/// Settings for [`minimize`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LbfgsConfig {
    /// Maximum number of iterations.
    pub max_iter: usize,
    /// Stop once `max |g_i| <= tolerance`.
    pub tolerance: f64,
    /// Stop once the relative objective decrease is at most this value.
    pub f_tolerance: f64,
    /// Number of correction pairs kept.
    pub memory: usize,
}

impl Default for LbfgsConfig {
    fn default() -> Self {
        LbfgsConfig {
            max_iter: 1000,
            tolerance: 1e-4,
            f_tolerance: 64.0 * f64::EPSILON,
            memory: 10,
        }
    }
}

/// Outcome of a minimization.
#[derive(Debug, Clone, PartialEq)]
pub struct LbfgsReport {
    /// The final point.
    pub x: Vec<f64>,
    /// Objective value at `x`.
    pub value: f64,
    /// Infinity norm of the gradient at `x`.
    pub gradient_norm: f64,
    /// Iterations performed.
    pub iterations: usize,
    /// Whether a stopping criterion other than `max_iter` was met.
    pub converged: bool,
}

/// Minimize `objective` starting from `x0`.
///
/// `objective(x, grad)` returns `f(x)` and stores `∇f(x)` in `grad`.
pub fn minimize<F>(mut objective: F, x0: Vec<f64>, config: &LbfgsConfig) -> Result<LbfgsReport>
where
    F: FnMut(&[f64], &mut [f64]) -> f64,
{
    if config.memory == 0 {
        return Err(SentimentError::invalid_config("L-BFGS memory must be positive"));
    }
    if !(config.tolerance >= 0.0) {
        return Err(SentimentError::invalid_config(
            "L-BFGS tolerance must be non-negative",
        ));
    }

    let n = x0.len();
    let mut x = x0;
    let mut grad = vec![0.0; n];
    let mut value = objective(&x, &mut grad);
    if !value.is_finite() {
        return Err(SentimentError::model("objective is not finite at the start point"));
    }

    let mut history: VecDeque<(Vec<f64>, Vec<f64>, f64)> = VecDeque::with_capacity(config.memory);
    let mut x_next = vec![0.0; n];
    let mut grad_next = vec![0.0; n];
    let mut iterations = 0;
    let mut converged = inf_norm(&grad) <= config.tolerance;

    while !converged && iterations < config.max_iter {
        iterations += 1;

        let mut direction = two_loop(&grad, &history);
        let mut slope = dot(&grad, &direction);
        if slope >= 0.0 {
            // Not a descent direction; restart from steepest descent.
            history.clear();
            direction = grad.iter().map(|g| -g).collect();
            slope = -dot(&grad, &grad);
        }

        let mut step = if history.is_empty() {
            (1.0 / norm(&grad)).min(1.0)
        } else {
            1.0
        };

        let mut accepted = None;
        for _ in 0..MAX_LINE_SEARCH_STEPS {
            for i in 0..n {
                x_next[i] = x[i] + step * direction[i];
            }
            let candidate = objective(&x_next, &mut grad_next);
            if candidate.is_finite() && candidate <= value + ARMIJO_C1 * step * slope {
                accepted = Some(candidate);
                break;
            }
            step *= 0.5;
        }

        let Some(next_value) = accepted else {
            debug!("L-BFGS line search failed at iteration {iterations}");
            break;
        };

        let s: Vec<f64> = x_next.iter().zip(&x).map(|(a, b)| a - b).collect();
        let y: Vec<f64> = grad_next.iter().zip(&grad).map(|(a, b)| a - b).collect();
        let sy = dot(&s, &y);
        if sy > MIN_CURVATURE {
            if history.len() == config.memory {
                history.pop_front();
            }
            history.push_back((s, y, 1.0 / sy));
        }

        let decrease = (value - next_value) / value.abs().max(next_value.abs()).max(1.0);

        std::mem::swap(&mut x, &mut x_next);
        std::mem::swap(&mut grad, &mut grad_next);
        value = next_value;

        converged = inf_norm(&grad) <= config.tolerance || decrease <= config.f_tolerance;
    }

    let gradient_norm = inf_norm(&grad);
    debug!(
        "L-BFGS finished after {iterations} iterations: f = {value:.6}, |g| = {gradient_norm:.3e}, converged = {converged}"
    );

    Ok(LbfgsReport {
        x,
        value,
        gradient_norm,
        iterations,
        converged,
    })
}

/// Approximate `H⁻¹ g` from the stored pairs and return the negated result.
fn two_loop(grad: &[f64], history: &VecDeque<(Vec<f64>, Vec<f64>, f64)>) -> Vec<f64> {
    let mut q = grad.to_vec();
    let mut alphas = Vec::with_capacity(history.len());

    for (s, y, rho) in history.iter().rev() {
        let alpha = rho * dot(s, &q);
        axpy(-alpha, y, &mut q);
        alphas.push(alpha);
    }

    if let Some((s, y, _)) = history.back() {
        let gamma = dot(s, y) / dot(y, y);
        q.iter_mut().for_each(|v| *v *= gamma);
    }

    for ((s, y, rho), alpha) in history.iter().zip(alphas.into_iter().rev()) {
        let beta = rho * dot(y, &q);
        axpy(alpha - beta, s, &mut q);
    }

    q.iter_mut().for_each(|v| *v = -*v);
    q
}

fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

fn norm(a: &[f64]) -> f64 {
    dot(a, a).sqrt()
}

fn inf_norm(a: &[f64]) -> f64 {
    a.iter().fold(0.0, |m, v| m.max(v.abs()))
}

fn axpy(alpha: f64, x: &[f64], y: &mut [f64]) {
    for (yi, xi) in y.iter_mut().zip(x) {
        *yi += alpha * xi;
    }
}
