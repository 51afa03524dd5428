use crate::store::StoreError;
use ntex::http::StatusCode;
use ntex::web::{HttpResponse, WebResponseError};
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Store(StoreError),
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Message safe to hand back to the client. Server-side details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Store(_) => "Score storage error".into(),
            AppError::Internal(_) => "Internal error".into(),
            AppError::NotFound(msg) | AppError::BadRequest(msg) => msg.clone(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Store(e) => write!(f, "Store error: {}", e),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl WebResponseError for AppError {
    fn error_response(&self, _: &ntex::web::HttpRequest) -> HttpResponse {
        HttpResponse::build(self.status()).json(&serde_json::json!({
            "success": false,
            "message": self.public_message(),
        }))
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Internal(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_are_hidden_from_clients() {
        let err = AppError::from(StoreError::StorageUnavailable {
            path: "/secret/scores.json".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        });
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.public_message().contains("/secret"));
        assert!(err.to_string().contains("/secret/scores.json"));
    }

    #[test]
    fn test_client_errors_keep_their_message() {
        let err = AppError::BadRequest("Missing deck parameter".into());
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "Missing deck parameter");
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
    }
}
