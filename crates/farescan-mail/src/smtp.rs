//! SMTP notifier.

use async_trait::async_trait;
use farescan_core::{AlertMessage, Notifier, NotifyError, SmtpConfig};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

/// Port on which the relay expects TLS from the first byte.
pub const SMTPS_PORT: u16 = 465;

/// How the SMTP session is encrypted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpSecurity {
    /// TLS wrapper from connect (SMTPS).
    Implicit,
    /// Plain connect upgraded with STARTTLS (submission ports such as 587).
    StartTls,
}

impl SmtpSecurity {
    pub fn for_port(port: u16) -> Self {
        if port == SMTPS_PORT {
            Self::Implicit
        } else {
            Self::StartTls
        }
    }
}

/// Sends each alert from the configured address to itself.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    mailbox: Mailbox,
}

impl SmtpNotifier {
    /// Build the transport. No connection is opened until the first send.
    pub fn new(config: &SmtpConfig) -> Result<Self, NotifyError> {
        let mailbox = parse_mailbox(&config.address)?;

        let security = SmtpSecurity::for_port(config.port);
        let builder = match security {
            SmtpSecurity::Implicit => AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host),
            SmtpSecurity::StartTls => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            }
        };

        let transport = builder
            .map_err(|e| NotifyError::Transport(e.to_string()))?
            .port(config.port)
            .credentials(Credentials::new(
                config.address.clone(),
                config.password.clone(),
            ))
            .timeout(Some(config.timeout()))
            .build();

        debug!(host = %config.host, port = config.port, ?security, "SMTP transport ready");

        Ok(Self { transport, mailbox })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self, alert: &AlertMessage) -> Result<(), NotifyError> {
        let message = build_message(&self.mailbox, alert)?;

        let response = self
            .transport
            .send(message)
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        info!(code = %response.code(), to = %self.mailbox, "Alert email sent");
        Ok(())
    }
}

/// Build a plain-text message from and to `mailbox`.
pub fn build_message(mailbox: &Mailbox, alert: &AlertMessage) -> Result<Message, NotifyError> {
    Message::builder()
        .from(mailbox.clone())
        .to(mailbox.clone())
        .subject(alert.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(alert.body.clone())
        .map_err(|e| NotifyError::Message(e.to_string()))
}

fn parse_mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address
        .parse()
        .map_err(|e| NotifyError::Message(format!("invalid email address '{}': {}", address, e)))
}
