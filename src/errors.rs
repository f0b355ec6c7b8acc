use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use derive_more::Display;
use mongodb::error::{Error as MongoError, ErrorKind, WriteFailure};
use serde_json::json;

use crate::filters::FilterError;

const DUPLICATE_KEY_CODE: i32 = 11000;

#[derive(Debug, Display)]
pub enum ApiError {
    #[display(fmt = "Internal server error")]
    InternalError,

    #[display(fmt = "Bad request: {}", _0)]
    BadRequest(String),

    #[display(fmt = "Not found: {}", _0)]
    NotFound(String),

    #[display(fmt = "Conflict: {}", _0)]
    Conflict(String),

    #[display(fmt = "Payload too large: {}", _0)]
    PayloadTooLarge(String),

    #[display(fmt = "Unsupported media type: {}", _0)]
    UnsupportedMediaType(String),

    #[display(fmt = "Database error: {}", _0)]
    DatabaseError(String),

    #[display(fmt = "Unauthorized: {}", _0)]
    Unauthorized(String),
}

impl std::error::Error for ApiError {}

pub(crate) fn is_duplicate_key(error: &MongoError) -> bool {
    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => {
            write_error.code == DUPLICATE_KEY_CODE
        }
        _ => false,
    }
}

impl From<MongoError> for ApiError {
    fn from(error: MongoError) -> Self {
        if is_duplicate_key(&error) {
            log::warn!("Duplicate key rejected: {}", error);
            return ApiError::Conflict("Resource already exists".to_string());
        }
        log::error!("MongoDB error: {}", error);
        ApiError::DatabaseError(error.to_string())
    }
}

impl From<bson::oid::Error> for ApiError {
    fn from(error: bson::oid::Error) -> Self {
        ApiError::BadRequest(format!("Invalid id: {}", error))
    }
}

impl From<FilterError> for ApiError {
    fn from(error: FilterError) -> Self {
        ApiError::BadRequest(error.to_string())
    }
}

/// Services report failures through `anyhow`; the typed cause is recovered here
impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        let error = match error.downcast::<ApiError>() {
            Ok(api_error) => return api_error,
            Err(other) => other,
        };
        let error = match error.downcast::<MongoError>() {
            Ok(mongo_error) => return ApiError::from(mongo_error),
            Err(other) => other,
        };
        match error.downcast::<FilterError>() {
            Ok(filter_error) => ApiError::from(filter_error),
            Err(other) => {
                log::error!("Anyhow error: {}", other);
                ApiError::InternalError
            }
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InternalError | ApiError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            ApiError::InternalError => "Internal server error".to_string(),
            ApiError::DatabaseError(ref message) => format!("Database error: {}", message),
            ApiError::BadRequest(ref message)
            | ApiError::NotFound(ref message)
            | ApiError::Conflict(ref message)
            | ApiError::PayloadTooLarge(ref message)
            | ApiError::UnsupportedMediaType(ref message)
            | ApiError::Unauthorized(ref message) => message.clone(),
        };

        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::BadRequest("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::PayloadTooLarge("x".into()).status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ApiError::DatabaseError("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[actix_web::test]
    async fn test_error_body_shape() {
        let response = ApiError::NotFound("Product abc not found".into()).error_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "Product abc not found");
    }

    #[test]
    fn test_anyhow_recovers_api_error() {
        let error: anyhow::Error = ApiError::Conflict("sku taken".into()).into();
        match ApiError::from(error) {
            ApiError::Conflict(message) => assert_eq!(message, "sku taken"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_anyhow_recovers_filter_error() {
        let error: anyhow::Error = FilterError::UnknownSort("cheapest".into()).into();
        assert!(matches!(ApiError::from(error), ApiError::BadRequest(_)));
    }

    #[test]
    fn test_anyhow_falls_back_to_internal() {
        let error = anyhow::anyhow!("disk on fire");
        assert!(matches!(ApiError::from(error), ApiError::InternalError));
    }
}
