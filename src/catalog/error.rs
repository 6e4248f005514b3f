use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use super::query::QueryError;
use super::types::ErrorBody;
use crate::db::DbError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadQuery(#[from] QueryError),
    #[error(transparent)]
    Database(#[from] DbError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::BadQuery(e) => e.to_string(),
            ApiError::Database(e) => {
                error!("Catalog query failed: {}", e);
                "internal database error".to_string()
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
