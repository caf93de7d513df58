//! Error handling
//!
//! Extraction and explanation are total and never produce these. Only the
//! readiness gate is user-visible; everything else comes from training.

use thiserror::Error;

use crate::logic::features::LayoutMismatchError;

pub type ClassifierResult<T> = Result<T, ClassifierError>;

#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Classification or stats requested before training finished
    #[error("Models not trained yet.")]
    NotReady,

    #[error("Models are already trained; the engine trains once per process")]
    AlreadyTrained,

    #[error("Training stats have already been recorded")]
    AlreadyRecorded,

    #[error(transparent)]
    LayoutMismatch(#[from] LayoutMismatchError),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Model error: {0}")]
    Model(String),
}

impl From<csv::Error> for ClassifierError {
    fn from(err: csv::Error) -> Self {
        ClassifierError::Dataset(err.to_string())
    }
}

impl From<std::io::Error> for ClassifierError {
    fn from(err: std::io::Error) -> Self {
        ClassifierError::Dataset(err.to_string())
    }
}

impl From<ndarray::ShapeError> for ClassifierError {
    fn from(err: ndarray::ShapeError) -> Self {
        ClassifierError::Model(format!("Array error: {}", err))
    }
}
