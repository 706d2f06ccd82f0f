use std::path::PathBuf;

use crate::features::Feature;

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to load the model from `{}`", path.display())]
    ModelLoad {
        path: PathBuf,

        #[source]
        source: BoxedError,
    },

    #[error("failed to load the dataset from `{}`", path.display())]
    DatasetLoad {
        path: PathBuf,

        #[source]
        source: BoxedError,
    },

    #[error("the model expects {expected} features, got {actual}")]
    InvalidInputShape { expected: usize, actual: usize },

    #[error("the model produced a non-finite prediction: {0}")]
    NonFinitePrediction(f64),

    #[error("insufficient data for the {0}")]
    EmptyDataset(&'static str),

    #[error("invalid `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("heatmap axes must be distinct, got `{0}` twice")]
    DuplicateAxis(Feature),
}

impl Error {
    pub(crate) fn model_load(path: impl Into<PathBuf>, source: impl Into<BoxedError>) -> Self {
        Self::ModelLoad {
            path: path.into(),
            source: source.into(),
        }
    }

    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    pub(crate) fn dataset_load(path: impl Into<PathBuf>, source: impl Into<BoxedError>) -> Self {
        Self::DatasetLoad {
            path: path.into(),
            source: source.into(),
        }
    }
}
