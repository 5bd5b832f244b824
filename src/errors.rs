use thiserror::Error;

/// Errors that can occur while checking drug interactions.
#[derive(Error, Debug)]
pub enum RxCheckError {
    #[error("unknown drug(s): {}", .names.join(", "))]
    UnknownDrug { names: Vec<String> },

    #[error("identical drugs: cannot check '{name}' against itself")]
    IdenticalDrug { name: String },

    #[error("reference tables are not loaded")]
    NotInitialized,

    #[error("config error: {message}")]
    Config { message: String },

    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RxCheckError {
    /// Returns `true` for errors caused by the caller's input rather than by
    /// the service's own state.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownDrug { .. } | Self::IdenticalDrug { .. } | Self::InvalidInput { .. }
        )
    }
}

/// Convenience alias for results using `RxCheckError`.
pub type Result<T> = std::result::Result<T, RxCheckError>;
