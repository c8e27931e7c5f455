use axum::Json;
use serde::{Deserialize, Serialize};

use crate::authentication::Authenticated;

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub authenticated: bool,
    pub message: String,
}

/// Simple endpoint to verify the configured credentials work.
///
/// The extractor only resolves once the gate middleware has tagged the
/// request, so reaching the body means authentication succeeded.
pub async fn status(_auth: Authenticated) -> Json<StatusResponse> {
    Json(StatusResponse {
        authenticated: true,
        message: "Authentication successful".to_string(),
    })
}
