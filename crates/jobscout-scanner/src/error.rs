use jobscout_core::JobScoutError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("A scrape run is already in progress")]
    RunInProgress,

    #[error("Invalid selector {selector}: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("Page at {url} could not be read: {reason}")]
    UnreadablePage { url: String, reason: String },

    #[error("Browser error: {0}")]
    Browser(#[from] jobscout_browser::BrowserError),

    #[error("Store error: {0}")]
    Store(#[from] JobScoutError),
}

pub type Result<T> = std::result::Result<T, ScanError>;
