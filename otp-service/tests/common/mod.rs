use std::sync::Arc;

use auth::Claims;
use auth::TokenCodec;
use otp_service::domain::otp::models::ChallengeClaims;
use otp_service::domain::otp::models::CHALLENGE_AUDIENCE;
use otp_service::domain::otp::service::OtpService;
use otp_service::domain::otp::service::OtpSettings;
use otp_service::inbound::http::router::create_router;
use otp_service::outbound::sms::LoggingPasscodeSender;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub codec: TokenCodec,
}

impl TestApp {
    /// Spawn the application with default settings (passcode echo off)
    pub async fn spawn() -> Self {
        Self::spawn_with(OtpSettings::default()).await
    }

    /// Spawn the application in a background task and return TestApp
    pub async fn spawn_with(settings: OtpSettings) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let otp_service = Arc::new(OtpService::new(
            Arc::new(TokenCodec::new(TEST_SECRET)),
            Arc::new(LoggingPasscodeSender::new()),
            settings,
        ));

        let router = create_router(otp_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            codec: TokenCodec::new(TEST_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Read the passcode out of a challenge token, standing in for the SMS
    pub fn passcode_of(&self, challenge_token: &str) -> String {
        let claims: Claims<ChallengeClaims> = self
            .codec
            .decode(CHALLENGE_AUDIENCE, challenge_token)
            .expect("Challenge token should decode");
        claims.custom.passcode
    }

    /// Request a challenge and return the challenge token
    pub async fn issue_challenge(&self, phone_number: &str) -> String {
        let response = self
            .post("/api/send-otp")
            .json(&serde_json::json!({ "phoneNumber": phone_number }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["challengeToken"]
            .as_str()
            .expect("challengeToken should be a string")
            .to_string()
    }

    /// Run the issue and verify steps and return an access token
    pub async fn login(&self, phone_number: &str) -> String {
        let challenge_token = self.issue_challenge(phone_number).await;
        let passcode = self.passcode_of(&challenge_token);

        let response = self
            .post("/api/verify-otp")
            .json(&serde_json::json!({
                "challengeToken": challenge_token,
                "passcode": passcode
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["accessToken"]
            .as_str()
            .expect("accessToken should be a string")
            .to_string()
    }
}
