//! Evaluation metrics for classifiers.
//!
//! All functions take encoded class indices. Rows of the confusion matrix are
//! true classes, columns predicted classes. Any ratio with a zero denominator
//! is reported as 0.0.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SentimentError};

fn check_lengths(y_true: &[usize], y_pred: &[usize]) -> Result<()> {
    if y_true.len() != y_pred.len() {
        return Err(SentimentError::model(format!(
            "label vectors differ in length: {} true vs {} predicted",
            y_true.len(),
            y_pred.len()
        )));
    }
    if y_true.is_empty() {
        return Err(SentimentError::model("cannot evaluate an empty label vector"));
    }
    Ok(())
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Fraction of positions where the prediction equals the truth.
pub fn accuracy(y_true: &[usize], y_pred: &[usize]) -> Result<f64> {
    check_lengths(y_true, y_pred)?;
    let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    Ok(correct as f64 / y_true.len() as f64)
}

/// Counts of (true, predicted) class pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    labels: Vec<String>,
    counts: Vec<Vec<usize>>,
}

impl ConfusionMatrix {
    /// Tabulate predictions over the classes `0..labels.len()`.
    pub fn new<S: AsRef<str>>(y_true: &[usize], y_pred: &[usize], labels: &[S]) -> Result<Self> {
        check_lengths(y_true, y_pred)?;

        let n = labels.len();
        let mut counts = vec![vec![0; n]; n];
        for (&t, &p) in y_true.iter().zip(y_pred) {
            if t >= n || p >= n {
                return Err(SentimentError::model(format!(
                    "class index {} out of range for {n} classes",
                    t.max(p)
                )));
            }
            counts[t][p] += 1;
        }

        Ok(ConfusionMatrix {
            labels: labels.iter().map(|l| l.as_ref().to_string()).collect(),
            counts,
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn n_classes(&self) -> usize {
        self.labels.len()
    }

    /// Number of samples of class `true_class` predicted as `predicted`.
    pub fn get(&self, true_class: usize, predicted: usize) -> usize {
        self.counts
            .get(true_class)
            .and_then(|row| row.get(predicted))
            .copied()
            .unwrap_or(0)
    }

    pub fn counts(&self) -> &[Vec<usize>] {
        &self.counts
    }

    pub fn total(&self) -> usize {
        self.counts.iter().flatten().sum()
    }

    /// Samples whose true class is `class`.
    pub fn support(&self, class: usize) -> usize {
        self.counts.get(class).map(|row| row.iter().sum()).unwrap_or(0)
    }

    /// Samples predicted as `class`.
    pub fn predicted(&self, class: usize) -> usize {
        self.counts.iter().map(|row| row.get(class).copied().unwrap_or(0)).sum()
    }

    /// Render the matrix as a shaded text heatmap.
    ///
    /// Each cell shows its count next to a block whose density grows with the
    /// count relative to the largest cell.
    pub fn render_heatmap(&self) -> String {
        const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];

        let max = self.counts.iter().flatten().copied().max().unwrap_or(0);
        let label_width = self.labels.iter().map(|l| l.len()).max().unwrap_or(0).max(4);
        let count_width = max.to_string().len();
        let cell_width = (count_width + 3).max(label_width);

        let mut out = String::new();
        out.push_str("Confusion Matrix (rows: true, columns: predicted)\n");
        out.push_str(&format!("{:>label_width$} ", ""));
        for label in &self.labels {
            out.push_str(&format!(" {label:>cell_width$}"));
        }
        out.push('\n');

        for (label, row) in self.labels.iter().zip(&self.counts) {
            out.push_str(&format!("{label:>label_width$} "));
            for &count in row {
                let level = if max == 0 {
                    0
                } else {
                    (count * (SHADES.len() - 1)).div_ceil(max)
                };
                let shade: String = std::iter::repeat_n(SHADES[level], 2).collect();
                let cell = format!("{shade} {count:>count_width$}");
                out.push_str(&format!(" {cell:>cell_width$}"));
            }
            out.push('\n');
        }

        out
    }
}

/// Precision, recall, F1 and support of one class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassMetrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-class metrics with macro and weighted averages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    labels: Vec<String>,
    per_class: Vec<ClassMetrics>,
    accuracy: f64,
    macro_avg: ClassMetrics,
    weighted_avg: ClassMetrics,
}

impl ClassificationReport {
    /// Build the report from a confusion matrix.
    pub fn from_confusion(matrix: &ConfusionMatrix) -> Self {
        let total = matrix.total();
        let n = matrix.n_classes();

        let per_class: Vec<ClassMetrics> = (0..n)
            .map(|k| {
                let tp = matrix.get(k, k) as f64;
                let support = matrix.support(k);
                let precision = ratio(tp, matrix.predicted(k) as f64);
                let recall = ratio(tp, support as f64);
                let f1 = ratio(2.0 * precision * recall, precision + recall);
                ClassMetrics {
                    precision,
                    recall,
                    f1,
                    support,
                }
            })
            .collect();

        let correct: usize = (0..n).map(|k| matrix.get(k, k)).sum();

        let macro_avg = average(&per_class, total, |_| 1.0);
        let weighted_avg = average(&per_class, total, |m| m.support as f64);

        ClassificationReport {
            labels: matrix.labels().to_vec(),
            per_class,
            accuracy: ratio(correct as f64, total as f64),
            macro_avg,
            weighted_avg,
        }
    }

    /// Build the report from label vectors.
    pub fn new<S: AsRef<str>>(y_true: &[usize], y_pred: &[usize], labels: &[S]) -> Result<Self> {
        Ok(Self::from_confusion(&ConfusionMatrix::new(
            y_true, y_pred, labels,
        )?))
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Metrics of the class at index `class`.
    pub fn class(&self, class: usize) -> Option<&ClassMetrics> {
        self.per_class.get(class)
    }

    pub fn per_class(&self) -> &[ClassMetrics] {
        &self.per_class
    }

    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn macro_avg(&self) -> &ClassMetrics {
        &self.macro_avg
    }

    pub fn weighted_avg(&self) -> &ClassMetrics {
        &self.weighted_avg
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .labels
            .iter()
            .map(|l| l.len())
            .chain(std::iter::once("weighted avg".len()))
            .max()
            .unwrap_or(0);

        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;

        for (label, metrics) in self.labels.iter().zip(&self.per_class) {
            write_row(f, width, label, metrics)?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>width$} {:>9} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", self.accuracy, self.macro_avg.support
        )?;
        write_row(f, width, "macro avg", &self.macro_avg)?;
        write_row(f, width, "weighted avg", &self.weighted_avg)
    }
}

fn average(
    per_class: &[ClassMetrics],
    total: usize,
    weight: impl Fn(&ClassMetrics) -> f64,
) -> ClassMetrics {
    let total_weight: f64 = per_class.iter().map(&weight).sum();
    let mean = |field: fn(&ClassMetrics) -> f64| {
        ratio(
            per_class.iter().map(|m| field(m) * weight(m)).sum(),
            total_weight,
        )
    };
    ClassMetrics {
        precision: mean(|m| m.precision),
        recall: mean(|m| m.recall),
        f1: mean(|m| m.f1),
        support: total,
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, width: usize, name: &str, m: &ClassMetrics) -> fmt::Result {
    writeln!(
        f,
        "{:>width$} {:>9.2} {:>9.2} {:>9.2} {:>9}",
        name, m.precision, m.recall, m.f1, m.support
    )
}

/// Everything computed on a held-out split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub accuracy: f64,
    pub report: ClassificationReport,
    pub confusion: ConfusionMatrix,
}

impl Evaluation {
    pub fn new<S: AsRef<str>>(y_true: &[usize], y_pred: &[usize], labels: &[S]) -> Result<Self> {
        let accuracy = accuracy(y_true, y_pred)?;
        let confusion = ConfusionMatrix::new(y_true, y_pred, labels)?;
        let report = ClassificationReport::from_confusion(&confusion);
        Ok(Evaluation {
            accuracy,
            report,
            confusion,
        })
    }
}
