//! Trained classifiers used as the `model` prediction source

mod naive_bayes;

pub use naive_bayes::{DEFAULT_SMOOTHING, NaiveBayesClassifier};
