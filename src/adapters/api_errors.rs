use {
    crate::domain::{
        error::ServiceError,
        message::{Locale, LocalizedMessage, MessageKey, constraint_message_key},
    },
    axum::{
        Json,
        http::StatusCode,
        response::{IntoResponse, Response},
    },
};

/// A domain error paired with the locale its message is rendered in.
pub struct ApiError {
    pub error: ServiceError,
    pub locale: Locale,
}

impl ApiError {
    pub fn new(error: ServiceError, locale: Locale) -> Self {
        Self { error, locale }
    }
}

/// Single translation point from error kind to HTTP status and body.
pub fn translate(error: &ServiceError, locale: Locale) -> (StatusCode, LocalizedMessage) {
    match error {
        ServiceError::NotFound(key) => (StatusCode::NOT_FOUND, LocalizedMessage::new(locale, *key)),
        ServiceError::Validation(key) => {
            (StatusCode::BAD_REQUEST, LocalizedMessage::new(locale, *key))
        }
        ServiceError::UniqueConstraintViolation { constraint, detail } => {
            let body = match constraint.as_deref().and_then(constraint_message_key) {
                Some(key) => LocalizedMessage::new(locale, key),
                None => LocalizedMessage::raw(detail.clone()),
            };
            (StatusCode::BAD_REQUEST, body)
        }
        ServiceError::Database(err) => {
            tracing::error!(error = %err, "database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                LocalizedMessage::new(locale, MessageKey::INTERNAL),
            )
        }
        ServiceError::Serialization(err) => {
            tracing::error!(error = %err, "serialization error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                LocalizedMessage::new(locale, MessageKey::INTERNAL),
            )
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = translate(&self.error, self.locale);
        (status, Json(body)).into_response()
    }
}
