use actix_web::http::StatusCode;

use crate::store::StoreError;

/// Every handler error ends up here; the `ResponseError` impl is the single
/// place where failures are turned into HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("not found")]
    NotFound,
    #[error("malformatted id")]
    MalformattedId,
    #[error("{0}")]
    Validation(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::MalformattedId => ApiError::MalformattedId,
            StoreError::Validation(message) => ApiError::Validation(message),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl actix_web::ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::MalformattedId | ApiError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let mut response = actix_web::HttpResponse::build(self.status_code());
        match self {
            ApiError::NotFound => response.finish(),
            ApiError::Internal(cause) => {
                log::error!("request failed: {}", cause);
                response.json(common::ErrorPayload::new("internal server error"))
            }
            other => response.json(common::ErrorPayload::new(other.to_string())),
        }
    }
}

/// Error handler for `web::JsonConfig`: a body that does not deserialize is a
/// validation failure carrying the deserializer's message.
pub(crate) fn json_error_handler(
    error: actix_web::error::JsonPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    ApiError::Validation(error.to_string()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::MessageBody, ResponseError};

    fn body_of(error: ApiError) -> (StatusCode, String) {
        let response = error.error_response();
        let status = response.status();
        let bytes = response.into_body().try_into_bytes().unwrap_or_default();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[test]
    fn malformatted_id_is_a_bad_request() {
        let (status, body) = body_of(StoreError::MalformattedId.into());
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"malformatted id"}"#);
    }

    #[test]
    fn validation_carries_store_message() {
        let (status, body) = body_of(StoreError::Validation("content is too short".into()).into());
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, r#"{"error":"content is too short"}"#);
    }

    #[test]
    fn not_found_has_empty_body() {
        let (status, body) = body_of(ApiError::NotFound);
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.is_empty());
    }

    #[test]
    fn unclassified_store_errors_are_opaque() {
        let (status, body) = body_of(StoreError::Unsupported("update").into());
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"error":"internal server error"}"#);
    }
}
