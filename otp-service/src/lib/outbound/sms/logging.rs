use async_trait::async_trait;

use crate::domain::otp::models::Passcode;
use crate::domain::otp::models::PhoneNumber;
use crate::otp::errors::DeliveryError;
use crate::otp::ports::PasscodeSender;

/// Passcode sender that writes the passcode to the service log.
///
/// Stands in for an SMS gateway during development. Anyone with log access
/// can read passcodes, so production deployments must swap in real delivery.
#[derive(Debug, Clone, Default)]
pub struct LoggingPasscodeSender;

impl LoggingPasscodeSender {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PasscodeSender for LoggingPasscodeSender {
    async fn send_passcode(
        &self,
        phone_number: &PhoneNumber,
        passcode: &Passcode,
    ) -> Result<(), DeliveryError> {
        tracing::info!(
            phone_number = %phone_number,
            passcode = %passcode.as_str(),
            channel = "log",
            "Passcode delivered"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_logging_sender_always_succeeds() {
        let sender = LoggingPasscodeSender::new();
        let phone_number = PhoneNumber::new("+14155551234".to_string()).unwrap();
        let passcode = Passcode::new("123456".to_string()).unwrap();

        assert!(sender.send_passcode(&phone_number, &passcode).await.is_ok());
    }
}
