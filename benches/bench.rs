//! Criterion benchmarks for tweet-sentiment.
//!
//! Covers the three hot paths of a run:
//! - Text preparation (normalization, stopword removal, lemmatization)
//! - TF-IDF fitting and transformation
//! - Classifier fitting and end-to-end prediction

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tweet_sentiment::analysis::preprocessor::Preprocessor;
use tweet_sentiment::ml::logistic::LogisticRegression;
use tweet_sentiment::ml::metrics::ClassificationReport;
use tweet_sentiment::ml::tfidf::TfIdfVectorizer;
use tweet_sentiment::pipeline::predictor::{ModelMetadata, SentimentPredictor};

/// Generate labelled posts for benchmarking.
fn generate_test_posts(count: usize) -> (Vec<String>, Vec<usize>) {
    let words = [
        ["scared", "virus", "worried", "panic", "hospital", "danger"],
        ["sad", "lonely", "crying", "miss", "lost", "grief"],
        ["angry", "furious", "queue", "rage", "unfair", "protest"],
        ["happy", "sunshine", "smile", "party", "love", "celebrate"],
    ];
    let filler = ["the", "lockdown", "today", "is", "and", "so", "people", "city"];

    let mut posts = Vec::with_capacity(count);
    let mut labels = Vec::with_capacity(count);
    for i in 0..count {
        let label = i % 4;
        let length = 8 + (i % 12); // Variable length posts
        let mut post = Vec::with_capacity(length + 2);
        post.push(format!("@user{i}"));
        for j in 0..length {
            if j % 3 == 0 {
                post.push(words[label][(i + j) % words[label].len()].to_string());
            } else {
                post.push(filler[(i * 7 + j * 13) % filler.len()].to_string());
            }
        }
        post.push(format!("https://t.co/{i}!!"));
        posts.push(post.join(" "));
        labels.push(label);
    }

    (posts, labels)
}

/// Benchmark text preparation.
fn bench_preprocessing(c: &mut Criterion) {
    let mut group = c.benchmark_group("preprocessing");

    let preprocessor = Preprocessor::new().unwrap();
    let (posts, _) = generate_test_posts(1000);

    group.bench_function("preprocess_single_post", |b| {
        b.iter(|| black_box(preprocessor.preprocess(black_box(&posts[0]))))
    });

    group.throughput(Throughput::Elements(100));
    group.bench_function("preprocess_batch_posts", |b| {
        b.iter(|| black_box(preprocessor.preprocess_all(black_box(&posts[..100]))))
    });

    group.finish();
}

/// Benchmark TF-IDF fitting and transformation.
fn bench_vectorizer(c: &mut Criterion) {
    let mut group = c.benchmark_group("tfidf");

    let preprocessor = Preprocessor::new().unwrap();
    let (posts, _) = generate_test_posts(1000);
    let documents = preprocessor.preprocess_all(&posts).unwrap();

    group.throughput(Throughput::Elements(documents.len() as u64));
    group.bench_function("fit", |b| {
        b.iter(|| {
            let mut vectorizer = TfIdfVectorizer::new(5000).unwrap();
            vectorizer.fit(black_box(&documents)).unwrap();
            black_box(vectorizer)
        })
    });

    let mut vectorizer = TfIdfVectorizer::new(5000).unwrap();
    vectorizer.fit(&documents).unwrap();
    group.throughput(Throughput::Elements(1));
    group.bench_function("transform", |b| {
        b.iter(|| black_box(vectorizer.transform(black_box(&documents[0]))))
    });

    group.finish();
}

/// Benchmark classifier fitting and prediction.
fn bench_classifier(c: &mut Criterion) {
    let mut group = c.benchmark_group("classifier");
    group.sample_size(20); // Fitting is comparatively slow

    let preprocessor = Preprocessor::new().unwrap();
    let (posts, labels) = generate_test_posts(800);
    let documents = preprocessor.preprocess_all(&posts).unwrap();
    let mut vectorizer = TfIdfVectorizer::new(5000).unwrap();
    let features = vectorizer.fit_transform(&documents).unwrap();

    group.bench_function("logistic_regression_fit", |b| {
        b.iter(|| {
            let mut model = LogisticRegression::default();
            model.fit(black_box(&features), black_box(&labels)).unwrap();
            black_box(model)
        })
    });

    let mut model = LogisticRegression::default();
    model.fit(&features, &labels).unwrap();

    let predictions = model.predict_batch(&features).unwrap();
    group.bench_function("classification_report", |b| {
        b.iter(|| {
            black_box(ClassificationReport::new(
                black_box(&labels),
                black_box(&predictions),
                &["fear", "sad", "anger", "joy"],
            ))
        })
    });

    let metadata = ModelMetadata::new(labels.len(), vectorizer.vocabulary_size());
    let predictor = SentimentPredictor::new(vectorizer, model, metadata).unwrap();
    group.bench_function("predict_end_to_end", |b| {
        b.iter(|| {
            black_box(predictor.predict(black_box(
                "I am feeling very sad about the lockdown situation.",
            )))
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_preprocessing,
    bench_vectorizer,
    bench_classifier
);

criterion_main!(benches);
