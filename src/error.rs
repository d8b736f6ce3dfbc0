use thiserror::Error;

/// Failures raised while talking to the course service or wiring it up.
///
/// Views never let these escape: each is caught at the view boundary and
/// converted into the view's single human-readable error message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Course ID is missing")]
    MissingCourseId,

    #[error("Course not found: {0}")]
    NotFound(String),

    #[error("Course service error: {0}")]
    Service(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Service(err.to_string())
    }
}
