// Error kinds surfaced by the directory and their HTTP mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::business::ValidationError;

pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Everything that can go wrong while serving a request.
///
/// Only two kinds reach the caller: client errors (400) and server
/// errors (500). Database details stay in `source()` for logging.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("invalid request body")]
    InvalidBody(String),

    #[error("invalid request body")]
    MissingField(#[from] ValidationError),

    #[error("invalid business id")]
    InvalidId(String),

    #[error("invalid query string")]
    InvalidQuery(String),

    #[error("failed to acquire database connection")]
    Pool(#[from] r2d2::Error),

    #[error("failed to prepare SQL statement")]
    Prepare(#[source] rusqlite::Error),

    #[error("failed to insert data to database")]
    Insert(#[source] rusqlite::Error),

    #[error("failed to update data to database")]
    Update(#[source] rusqlite::Error),

    #[error("failed to delete data from database")]
    Delete(#[source] rusqlite::Error),

    #[error("failed to query data from database")]
    Query(#[source] rusqlite::Error),

    #[error("failed to parse data from database")]
    Scan(#[source] rusqlite::Error),

    #[error("internal server error")]
    Task(#[from] tokio::task::JoinError),
}

impl DirectoryError {
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            DirectoryError::InvalidBody(_)
                | DirectoryError::MissingField(_)
                | DirectoryError::InvalidId(_)
                | DirectoryError::InvalidQuery(_)
        )
    }

    pub fn status(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    /// Text logged next to the generic message; never sent to the caller
    fn detail(&self) -> String {
        match self {
            DirectoryError::InvalidBody(reason) => reason.clone(),
            DirectoryError::MissingField(err) => err.to_string(),
            DirectoryError::InvalidId(reason) | DirectoryError::InvalidQuery(reason) => reason.clone(),
            DirectoryError::Pool(err) => err.to_string(),
            DirectoryError::Prepare(err)
            | DirectoryError::Insert(err)
            | DirectoryError::Update(err)
            | DirectoryError::Delete(err)
            | DirectoryError::Query(err)
            | DirectoryError::Scan(err) => err.to_string(),
            DirectoryError::Task(err) => err.to_string(),
        }
    }
}

/// Body shared by every error response
#[derive(Debug, serde::Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
}

impl IntoResponse for DirectoryError {
    fn into_response(self) -> Response {
        let status = self.status();

        if self.is_client_error() {
            tracing::debug!(detail = %self.detail(), "rejected request: {}", self);
        } else {
            tracing::error!(detail = %self.detail(), "request failed: {}", self);
        }

        let body = ErrorBody {
            status: "error",
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
