use jobscout_core::JobScoutError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Mail is not configured: {0}")]
    NotConfigured(String),

    #[error("Bad address {address}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("Failed to build message: {0}")]
    Build(String),

    #[error("SMTP send failed: {0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, MailError>;

impl From<MailError> for JobScoutError {
    fn from(err: MailError) -> Self {
        JobScoutError::Notification(err.to_string())
    }
}
