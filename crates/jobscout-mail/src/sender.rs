use crate::error::{MailError, Result};
use crate::templates::{render_digest, EmailTemplate};
use async_trait::async_trait;
use jobscout_core::{NotificationConfig, Notifier, Posting};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox> {
    address.parse().map_err(|e: lettre::address::AddressError| MailError::InvalidAddress {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

/// Build the HTML message for `email`.
pub fn build_message(email: &EmailTemplate, from: &str) -> Result<Message> {
    Message::builder()
        .from(parse_mailbox(from)?)
        .to(parse_mailbox(&email.to)?)
        .subject(&email.subject)
        .header(ContentType::TEXT_HTML)
        .body(email.body.clone())
        .map_err(|e| MailError::Build(e.to_string()))
}

/// Sends digests over implicit-TLS SMTP.
pub struct SmtpNotifier {
    from: String,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpNotifier {
    pub fn new(from: impl Into<String>, config: &SmtpConfig) -> Result<Self> {
        let creds = Credentials::new(config.username.clone(), config.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
            .map_err(|e| MailError::Transport(format!("SMTP relay error: {e}")))?
            .port(config.port)
            .credentials(creds)
            .build();
        Ok(Self {
            from: from.into(),
            transport,
        })
    }

    /// Build a notifier from the `[notifications]` section.
    pub fn from_config(config: &NotificationConfig) -> Result<Self> {
        let password = config
            .smtp_password
            .clone()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| MailError::NotConfigured("SMTP password is not set".into()))?;
        if config.smtp_username.is_empty() {
            return Err(MailError::NotConfigured("SMTP username is not set".into()));
        }
        let smtp = SmtpConfig {
            host: config.smtp_host.clone(),
            port: config.smtp_port,
            username: config.smtp_username.clone(),
            password,
        };
        Self::new(config.sender(), &smtp)
    }

    pub async fn send(&self, email: &EmailTemplate) -> Result<()> {
        let message = build_message(email, &self.from)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify_new_postings(
        &self,
        recipient: &str,
        postings: &[Posting],
    ) -> jobscout_core::Result<()> {
        if postings.is_empty() {
            return Ok(());
        }
        if recipient.trim().is_empty() {
            return Err(MailError::NotConfigured("no recipient configured".into()).into());
        }
        self.send(&render_digest(recipient, postings)).await?;
        tracing::info!(count = postings.len(), "Email sent successfully");
        Ok(())
    }
}

/// Used when notifications are switched off; only logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNotifier;

#[async_trait]
impl Notifier for DisabledNotifier {
    async fn notify_new_postings(
        &self,
        _recipient: &str,
        postings: &[Posting],
    ) -> jobscout_core::Result<()> {
        if !postings.is_empty() {
            tracing::info!(
                count = postings.len(),
                "Notifications disabled, not sending digest"
            );
        }
        Ok(())
    }
}
