use {super::message::MessageKey, thiserror::Error};

/// Postgres SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(MessageKey),

    #[error("validation: {0}")]
    Validation(MessageKey),

    #[error("unique constraint violation: {detail}")]
    UniqueConstraintViolation {
        constraint: Option<String>,
        detail: String,
    },

    #[error("database: {0}")]
    Database(#[source] sqlx::Error),

    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                Self::UniqueConstraintViolation {
                    constraint: db.constraint().map(str::to_string),
                    detail: db.message().to_string(),
                }
            }
            _ => Self::Database(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn database_error_keeps_sqlx_source() {
        let err = ServiceError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, ServiceError::Database(_)));
        let source = err.source().expect("sqlx error is the source");
        assert!(source.downcast_ref::<sqlx::Error>().is_some());
    }
}
