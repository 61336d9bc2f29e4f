use thiserror::Error;

/// Errors reported by paginators and pages.
///
/// Every variant is returned to the immediate caller; nothing is retried.
#[derive(Error, Debug)]
pub enum PaginationError {
    #[error("Invalid limit or offset (limit: {limit}, offset: {offset})")]
    InvalidParameters { limit: i64, offset: i64 },

    #[error("Invalid pagination options: {message}")]
    InvalidOptions { message: String },

    #[error("No previous page")]
    NoPreviousPage,

    #[error("No next page")]
    NoNextPage,

    #[error("No previous page in cursor mode")]
    NoPreviousPageCursorMode,

    #[error("Cursor unavailable: current page has no last item to continue from")]
    CursorUnavailable,

    #[error(transparent)]
    StoreFetchFailed(#[from] anyhow::Error),
}

impl PaginationError {
    pub fn invalid_options(message: impl Into<String>) -> Self {
        Self::InvalidOptions {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PaginationError>;
