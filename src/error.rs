use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::Message;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("You must include a first name, last name and email")]
    MissingFields,

    #[error("User not found")]
    NotFound,

    #[error("{0}")]
    InvalidBody(String),

    /// Insert failed; the database text is logged but not sent to the client.
    #[error("Failed to create contact")]
    Create(#[source] sqlx::Error),

    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFields | ApiError::InvalidBody(_) | ApiError::Create(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Create(err) | ApiError::Database(err) = &self {
            tracing::error!("{}: {}", self, err);
        }

        (self.status(), Json(Message::new(self.to_string()))).into_response()
    }
}
