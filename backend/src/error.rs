use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::models::{ErrorResponse, MISSING_CREDENTIAL_MESSAGE};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{}", MISSING_CREDENTIAL_MESSAGE)]
    MissingCredential,
    #[error("Invalid request body: {0}")]
    InvalidRequest(String),
    #[error("{0}")]
    Remote(String),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::MissingCredential | GatewayError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            GatewayError::Remote(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
