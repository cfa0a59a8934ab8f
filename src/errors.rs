use axum::http::StatusCode;

/// Failures raised by the tracker core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    #[error("user already exists")]
    DuplicateUser,

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("username must not be empty")]
    EmptyUsername,

    #[error("username contains control characters: {0:?}")]
    InvalidUsername(String),

    #[error("comment index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no active session")]
    NotLoggedIn,

    #[error("invalid date: {0:?}")]
    InvalidDate(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("export error: {0}")]
    Export(String),
}

impl TrackerError {
    pub fn storage<E: std::fmt::Display>(err: E) -> Self {
        Self::Storage(err.to_string())
    }

    pub fn export<E: std::fmt::Display>(err: E) -> Self {
        Self::Export(err.to_string())
    }
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl From<TrackerError> for AppError {
    fn from(err: TrackerError) -> Self {
        let status = match err {
            TrackerError::DuplicateUser => StatusCode::CONFLICT,
            TrackerError::InvalidCredentials | TrackerError::NotLoggedIn => {
                StatusCode::UNAUTHORIZED
            }
            TrackerError::EmptyUsername
            | TrackerError::InvalidUsername(_)
            | TrackerError::IndexOutOfRange { .. }
            | TrackerError::InvalidDate(_) => StatusCode::BAD_REQUEST,
            TrackerError::Storage(_) | TrackerError::Export(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_errors_map_to_statuses() {
        assert_eq!(
            AppError::from(TrackerError::DuplicateUser).status,
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(TrackerError::InvalidCredentials).status,
            StatusCode::UNAUTHORIZED
        );
        let err = AppError::from(TrackerError::IndexOutOfRange { index: 3, len: 1 });
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "comment index 3 out of range (len 1)");
        assert_eq!(
            AppError::from(TrackerError::storage("disk full")).status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
