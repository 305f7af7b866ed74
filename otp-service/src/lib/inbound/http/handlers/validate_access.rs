use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::domain::otp::models::AccessStatus;
use crate::domain::otp::ports::OtpServicePort;
use crate::inbound::http::bearer::extract_bearer_token;
use crate::inbound::http::router::AppState;

/// Report whether the bearer access token is usable.
///
/// Failures only ever say "invalid"; the reason stays in the debug log.
pub async fn validate_access(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> (StatusCode, Json<ValidateAccessResponseData>) {
    let status = state
        .otp_service
        .validate_access(extract_bearer_token(&headers));

    let (code, data) = ValidateAccessResponseData::from_status(&status);
    (code, Json(data))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidateAccessResponseData {
    pub valid: bool,
    pub message: String,
}

impl ValidateAccessResponseData {
    fn from_status(status: &AccessStatus) -> (StatusCode, Self) {
        let (code, valid, message) = match status {
            AccessStatus::Valid { .. } => (StatusCode::OK, true, "Token is valid"),
            AccessStatus::Invalid => (StatusCode::UNAUTHORIZED, false, "Invalid token"),
            AccessStatus::NoToken => (StatusCode::UNAUTHORIZED, false, "No token provided"),
        };

        (
            code,
            Self {
                valid,
                message: message.to_string(),
            },
        )
    }
}
