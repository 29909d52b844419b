//! SMTP dispatch via lettre.

use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use crate::error::NotifyError;
use crate::notify::Dispatcher;

/// SMTP relay configuration, built from environment variables.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    pub from_address: String,
}

impl SmtpConfig {
    /// Build config from environment variables.
    /// Returns `None` if `SMTP_HOST` is not set (dispatch disabled).
    pub fn from_env() -> Option<Self> {
        let host = std::env::var("SMTP_HOST").ok()?;

        let port: u16 = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(587);

        let username = std::env::var("SMTP_USERNAME").unwrap_or_default();
        let password = SecretString::from(std::env::var("SMTP_PASSWORD").unwrap_or_default());
        let from_address = std::env::var("SMTP_FROM").unwrap_or_else(|_| username.clone());

        Some(Self {
            host,
            port,
            username,
            password,
            from_address,
        })
    }
}

/// Sends the run report as a single email, recipients on BCC.
pub struct SmtpDispatcher {
    config: SmtpConfig,
}

impl SmtpDispatcher {
    pub fn new(config: SmtpConfig) -> Self {
        Self { config }
    }
}

/// Build the outgoing message. Split out of the transport call so address
/// handling is testable without a relay.
fn build_message(
    config: &SmtpConfig,
    subject: &str,
    body: &str,
    recipients: &[String],
) -> Result<Message, NotifyError> {
    let from: Mailbox =
        config
            .from_address
            .parse()
            .map_err(|e| NotifyError::InvalidAddress {
                address: config.from_address.clone(),
                reason: format!("{e}"),
            })?;

    // Subscribers go on BCC so the list is not disclosed to itself.
    let mut builder = Message::builder().from(from.clone()).to(from);
    for address in recipients {
        let mailbox: Mailbox = address.parse().map_err(|e| NotifyError::InvalidAddress {
            address: address.clone(),
            reason: format!("{e}"),
        })?;
        builder = builder.bcc(mailbox);
    }

    builder
        .subject(subject)
        .body(body.to_string())
        .map_err(|e| NotifyError::Dispatch(format!("Failed to build email: {e}")))
}

#[async_trait]
impl Dispatcher for SmtpDispatcher {
    async fn dispatch(
        &self,
        subject: &str,
        body: &str,
        recipients: &[String],
    ) -> Result<(), NotifyError> {
        let email = build_message(&self.config, subject, body, recipients)?;

        let creds = Credentials::new(
            self.config.username.clone(),
            self.config.password.expose_secret().to_string(),
        );
        let transport = SmtpTransport::relay(&self.config.host)
            .map_err(|e| NotifyError::Dispatch(format!("SMTP relay error: {e}")))?
            .port(self.config.port)
            .credentials(creds)
            .build();

        // lettre's SmtpTransport blocks; keep it off the async executor.
        let sent_to = recipients.len();
        tokio::task::spawn_blocking(move || {
            transport
                .send(&email)
                .map(|_| ())
                .map_err(|e| NotifyError::Dispatch(format!("SMTP send failed: {e}")))
        })
        .await
        .map_err(|e| NotifyError::Dispatch(format!("Send task panicked: {e}")))??;

        info!(recipients = sent_to, "Email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SmtpConfig {
        SmtpConfig {
            host: "smtp.example.com".into(),
            port: 587,
            username: "promo@example.com".into(),
            password: SecretString::from("hunter2".to_string()),
            from_address: "promo@example.com".into(),
        }
    }

    #[test]
    fn builds_message_with_bcc_recipients() {
        let recipients = vec!["a@example.com".to_string(), "b@example.com".to_string()];
        let message = build_message(&config(), "2 promotions active", "body", &recipients);
        assert!(message.is_ok());
    }

    #[test]
    fn invalid_recipient_is_reported_with_address() {
        let recipients = vec!["not-an-address".to_string()];
        match build_message(&config(), "s", "b", &recipients) {
            Err(NotifyError::InvalidAddress { address, .. }) => {
                assert_eq!(address, "not-an-address");
            }
            other => panic!("expected InvalidAddress, got {other:?}"),
        }
    }

    #[test]
    fn invalid_from_address_is_an_error() {
        let mut config = config();
        config.from_address = "broken".into();
        let result = build_message(&config, "s", "b", &["a@example.com".to_string()]);
        assert!(matches!(result, Err(NotifyError::InvalidAddress { .. })));
    }
}
