use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No active file found")]
    NoActiveDocument,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Remote service returned {status}: {message}")]
    RemoteService { status: i32, message: String },

    #[error("Remote service rejected the credentials ({status}), check your settings")]
    Auth { status: i32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Settings error: {0}")]
    Settings(String),
}

impl AppError {
    /// Map a non-success HTTP status to the matching error variant.
    pub fn from_status(status: i32, message: impl Into<String>) -> Self {
        match status {
            401 | 403 => AppError::Auth { status },
            _ => AppError::RemoteService {
                status,
                message: message.into(),
            },
        }
    }

    /// A malformed body is reported as a remote failure with the status it came with.
    pub fn malformed(status: i32, what: &str) -> Self {
        AppError::RemoteService {
            status,
            message: format!("malformed response: {}", what),
        }
    }
}

impl From<minreq::Error> for AppError {
    fn from(err: minreq::Error) -> Self {
        match err {
            // Raised while encoding a request body, before anything is sent.
            minreq::Error::SerdeJsonError(e) => AppError::Json(e),
            other => AppError::Network(other.to_string()),
        }
    }
}

/// Convenience type alias for Results with AppError
pub type Result<T> = std::result::Result<T, AppError>;
