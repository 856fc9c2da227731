use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, validation_messages};
use sea_orm::DbErr;
use strum::Display;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

/// The record kinds a lookup can miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Resource {
    Project,
    Engineer,
    Assignment,
}

#[derive(Debug, Error)]
pub enum StaffingError {
    #[error("{0} not found: {1}")]
    NotFound(Resource, Uuid),

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type StaffingResult<T> = Result<T, StaffingError>;

impl StaffingError {
    pub fn validation(message: impl Into<String>) -> Self {
        StaffingError::Validation(vec![message.into()])
    }
}

impl From<ValidationErrors> for StaffingError {
    fn from(errors: ValidationErrors) -> Self {
        StaffingError::Validation(validation_messages(&errors))
    }
}

/// Convert StaffingError to AppError for standardized error responses
impl From<StaffingError> for AppError {
    fn from(err: StaffingError) -> Self {
        match err {
            StaffingError::NotFound(resource, _) => {
                AppError::NotFound(format!("{} not found", resource))
            }
            StaffingError::Validation(messages) => AppError::Validation(messages),
            StaffingError::Database(e) => AppError::Database(e),
            StaffingError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for StaffingError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_the_resource() {
        let id = Uuid::nil();
        let err = StaffingError::NotFound(Resource::Engineer, id);
        assert_eq!(err.to_string(), format!("Engineer not found: {}", id));

        match AppError::from(err) {
            AppError::NotFound(msg) => assert_eq!(msg, "Engineer not found"),
            other => panic!("unexpected mapping: {:?}", other),
        }
    }

    #[test]
    fn test_validation_keeps_every_message() {
        let err = StaffingError::Validation(vec!["a".into(), "b".into()]);
        assert_eq!(err.to_string(), "Validation failed: a; b");

        match AppError::from(err) {
            AppError::Validation(messages) => assert_eq!(messages, vec!["a", "b"]),
            other => panic!("unexpected mapping: {:?}", other),
        }
    }
}
