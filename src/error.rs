use anyhow::{anyhow, Error};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;

use crate::pagination::PaginationError;

#[derive(Debug)]
pub struct AppError((Option<StatusCode>, Error));

impl AppError {
    pub fn new(err: Error) -> Self {
        Self((None, err))
    }

    pub fn status<E: Into<anyhow::Error>>(status: StatusCode, err: E) -> Self {
        Self((Some(status), err.into()))
    }

    pub fn not_found() -> Self {
        Self::status(StatusCode::NOT_FOUND, anyhow!("Not Found"))
    }

    /// Status the error is reported with. Pagination errors map to client
    /// errors, store failures and anything else to 500.
    pub fn status_code(&self) -> StatusCode {
        if let Some(status) = self.0 .0 {
            return status;
        }
        match self.0 .1.downcast_ref::<PaginationError>() {
            Some(PaginationError::InvalidParameters { .. })
            | Some(PaginationError::CursorUnavailable) => StatusCode::BAD_REQUEST,
            Some(PaginationError::NoPreviousPage)
            | Some(PaginationError::NoNextPage)
            | Some(PaginationError::NoPreviousPageCursorMode) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {:#}", self.0 .1);
        }
        (status, format!("{}", self.0 .1)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self((None, err.into()))
    }
}
