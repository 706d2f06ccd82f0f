use poem::error::ResponseError;
use poem::http::StatusCode;

use crate::error::Error;

impl ResponseError for Error {
    fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInputShape { .. } | Self::InvalidParameter { .. } | Self::DuplicateAxis(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::EmptyDataset(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NonFinitePrediction(_) | Self::ModelLoad { .. } | Self::DatasetLoad { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
