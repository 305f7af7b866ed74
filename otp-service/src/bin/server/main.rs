use std::sync::Arc;

use auth::TokenCodec;
use otp_service::config::Config;
use otp_service::config::SecretSource;
use otp_service::domain::otp::service::OtpService;
use otp_service::domain::otp::service::OtpSettings;
use otp_service::inbound::http::router::create_router;
use otp_service::outbound::sms::LoggingPasscodeSender;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "otp_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "otp-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    let (secret, secret_source) = config.jwt.signing_secret()?;

    tracing::info!(
        http_port = config.server.http_port,
        challenge_ttl_seconds = config.otp.challenge_ttl_seconds,
        access_ttl_seconds = config.otp.access_ttl_seconds,
        echo_passcode = config.otp.echo_passcode,
        secret_source = ?secret_source,
        "Configuration loaded"
    );

    if secret_source == SecretSource::Fallback {
        tracing::warn!("No jwt.secret configured, signing with the public fallback secret");
    }
    if config.otp.echo_passcode {
        tracing::warn!("Passcode echo is enabled, responses reveal one-time passcodes");
    }

    let codec = Arc::new(TokenCodec::new(secret.as_bytes()));
    let passcode_sender = Arc::new(LoggingPasscodeSender::new());
    let otp_service = Arc::new(OtpService::new(
        codec,
        passcode_sender,
        OtpSettings::from(&config.otp),
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(otp_service);
    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
