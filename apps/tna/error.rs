use crate::store::StoreError;
use axum::{Json, extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse};
use recommender::RecommendError;
use thiserror::Error;
use tracing::{error, warn};
use utils::errors::{EMBEDDING_PROVIDER_UNAVAILABLE, EMPTY_SKILL_CATALOG, NO_OBJECTIVES_PROVIDED};
use utils::types::ErrorBody;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body could not be extracted; keeps the extractor's status
    #[error("invalid request body: {message}")]
    InvalidBody { status: StatusCode, message: String },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("unprocessable: {0}")]
    Unprocessable(String),
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody { status, .. } => *status,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to return to clients; server-side details stay in the logs.
    pub fn public_message(&self) -> &str {
        match self {
            ApiError::InvalidBody { message, .. } => message,
            ApiError::NotFound(message)
            | ApiError::Conflict(message)
            | ApiError::Unprocessable(message) => message,
            ApiError::ServiceUnavailable(_) => EMBEDDING_PROVIDER_UNAVAILABLE,
            ApiError::Internal(_) => "Internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(status = %status, error = %self, "api_error");
        } else {
            warn!(status = %status, error = %self, "api_error");
        }

        let body = Json(ErrorBody {
            error: self.public_message().to_string(),
        });

        (status, body).into_response()
    }
}

impl From<RecommendError> for ApiError {
    fn from(err: RecommendError) -> Self {
        match err {
            RecommendError::NoObjectivesProvided => {
                ApiError::Unprocessable(NO_OBJECTIVES_PROVIDED.to_string())
            }
            RecommendError::EmptyCatalog => ApiError::Internal(EMPTY_SKILL_CATALOG.to_string()),
            RecommendError::EmbeddingProviderUnavailable(e) => {
                ApiError::ServiceUnavailable(e.to_string())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recommender::EmbeddingError;

    #[test]
    fn test_recommend_errors_map_to_statuses() {
        let no_objectives = ApiError::from(RecommendError::NoObjectivesProvided);
        assert_eq!(no_objectives.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(no_objectives.public_message(), "No objectives provided");

        let empty = ApiError::from(RecommendError::EmptyCatalog);
        assert_eq!(empty.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let unavailable = ApiError::from(RecommendError::EmbeddingProviderUnavailable(
            EmbeddingError::Unavailable("connection refused to http://10.0.0.5".to_string()),
        ));
        assert_eq!(unavailable.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(!unavailable.public_message().contains("10.0.0.5"));
    }
}
