//! Digest e-mails for newly found postings.

pub mod error;
pub mod sender;
pub mod templates;

pub use error::{MailError, Result};
pub use sender::{DisabledNotifier, SmtpConfig, SmtpNotifier};
pub use templates::{render_digest, EmailTemplate};
