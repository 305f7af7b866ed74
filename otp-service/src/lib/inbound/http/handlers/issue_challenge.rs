use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::otp::models::IssuedChallenge;
use crate::domain::otp::models::PhoneNumber;
use crate::domain::otp::ports::OtpServicePort;
use crate::inbound::http::router::AppState;
use crate::otp::errors::OtpError;

pub async fn issue_challenge(
    State(state): State<AppState>,
    body: Result<Json<IssueChallengeRequest>, JsonRejection>,
) -> Result<ApiSuccess<IssueChallengeResponseData>, ApiError> {
    let Json(body) = body?;

    state
        .otp_service
        .issue_challenge(body.try_into_phone_number()?)
        .await
        .map_err(ApiError::from)
        .map(|ref issued| ApiSuccess::new(StatusCode::OK, issued.into()))
}

/// HTTP request body for issuing a challenge (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueChallengeRequest {
    phone_number: Option<String>,
}

impl IssueChallengeRequest {
    fn try_into_phone_number(self) -> Result<PhoneNumber, OtpError> {
        let phone_number = PhoneNumber::new(self.phone_number.unwrap_or_default())?;
        Ok(phone_number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueChallengeResponseData {
    pub challenge_token: String,
    pub expires_in: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passcode: Option<String>,
}

impl From<&IssuedChallenge> for IssueChallengeResponseData {
    fn from(issued: &IssuedChallenge) -> Self {
        Self {
            challenge_token: issued.challenge_token.clone(),
            expires_in: issued.expires_in.num_seconds(),
            message: "OTP sent successfully".to_string(),
            passcode: issued.passcode.as_ref().map(|p| p.as_str().to_string()),
        }
    }
}
