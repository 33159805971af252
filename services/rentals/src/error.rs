//! Custom error types for the rentals service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::DatabaseError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::catalog::UnknownBikeType;
use crate::models::RelationError;
use crate::payments::PaymentError;
use crate::workflow::RentalError;

/// Custom error type for the rentals service
#[derive(Error, Debug)]
pub enum ApiError {
    /// Requested record does not exist
    #[error("{0}")]
    NotFound(String),

    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Rental workflow error
    #[error(transparent)]
    Rental(#[from] RentalError),

    /// Related record lookup error
    #[error(transparent)]
    Relation(#[from] RelationError),

    /// Stored listing outside the catalog
    #[error(transparent)]
    Catalog(#[from] UnknownBikeType),
}

impl ApiError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            ApiError::Database(err) => database_status(err),
            ApiError::Rental(err) => match err {
                RentalError::NoPaymentSource
                | RentalError::AnonymousCardRequired
                | RentalError::NoPayoutAccount => (StatusCode::BAD_REQUEST, err.to_string()),
                RentalError::Payment(payment) => payment_status(payment),
                RentalError::Database(db) => database_status(db),
                RentalError::OwnerNotFound(_) | RentalError::UnknownBikeType(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                ),
            },
            ApiError::Relation(RelationError::Database(db)) => database_status(db),
            ApiError::Relation(RelationError::Missing { .. }) | ApiError::Catalog(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        }
    }
}

fn database_status(err: &DatabaseError) -> (StatusCode, String) {
    match err {
        DatabaseError::Constraint(msg) => (StatusCode::CONFLICT, msg.clone()),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Database error".to_string(),
        ),
    }
}

fn payment_status(err: &PaymentError) -> (StatusCode, String) {
    match err {
        // Credential failures are ours; other 4xx reject what the caller sent
        PaymentError::Api {
            status: 401 | 403,
            ..
        } => (
            StatusCode::BAD_GATEWAY,
            "Payments provider rejected credentials".to_string(),
        ),
        PaymentError::Api {
            status: 400..=499,
            description,
            ..
        } => (StatusCode::UNPROCESSABLE_ENTITY, description.clone()),
        PaymentError::Api { description, .. } => (StatusCode::BAD_GATEWAY, description.clone()),
        PaymentError::NoDefaultSource(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        PaymentError::Transport(_) => (
            StatusCode::BAD_GATEWAY,
            "Payments provider unavailable".to_string(),
        ),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = self.status_and_message();
        if status.is_server_error() {
            error!("Request failed: {}", self);
        }

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
