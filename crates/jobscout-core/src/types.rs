//! Domain types shared between the scanner and its collaborators.
//!
//! `Target` and `RoleFilter` are owned by the persistence layer and only read
//! by the scanner. `Posting` is produced by the scanner and handed to the
//! persistence layer exactly once.

use crate::error::JobScoutError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default `kind` recorded for targets added without one.
pub const DEFAULT_TARGET_KIND: &str = "generic";

/// One employer career page configured for monitoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Store-assigned identifier
    pub id: String,
    /// Display name, also used for name-based strategy rules
    pub name: String,
    /// Absolute URL of the careers page
    pub url: String,
    /// Only active targets are scraped
    pub active: bool,
    /// Free-form label kept for display; strategy resolution ignores it
    pub kind: String,
}

impl Target {
    /// Create an active target after checking that `url` is absolute.
    ///
    /// # Errors
    /// Returns a validation error if the URL cannot be parsed or has no host.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<Self, JobScoutError> {
        let url = url.into();
        Self::validate_url(&url)?;
        Ok(Self {
            id: id.into(),
            name: name.into(),
            url,
            active: true,
            kind: DEFAULT_TARGET_KIND.to_string(),
        })
    }

    /// Set the `kind` label.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Check that a careers URL is absolute.
    pub fn validate_url(url: &str) -> Result<(), JobScoutError> {
        let parsed = url::Url::parse(url)
            .map_err(|e| JobScoutError::Validation(format!("invalid target URL '{url}': {e}")))?;
        if parsed.host_str().is_none() {
            return Err(JobScoutError::Validation(format!(
                "invalid target URL '{url}': no host"
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.url)
    }
}

/// One keyword used to decide whether an extracted posting is relevant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleFilter {
    /// Store-assigned identifier
    pub id: String,
    /// Keyword matched case-insensitively as a substring
    pub keyword: String,
    /// Only active filters take part in a run
    pub active: bool,
}

impl RoleFilter {
    /// Create an active role filter.
    ///
    /// # Errors
    /// Returns a validation error if the keyword is blank.
    pub fn new(id: impl Into<String>, keyword: impl Into<String>) -> Result<Self, JobScoutError> {
        let keyword = keyword.into();
        if keyword.trim().is_empty() {
            return Err(JobScoutError::Validation(
                "role keyword must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id: id.into(),
            keyword,
            active: true,
        })
    }
}

/// One extracted job listing.
///
/// `url` is the identity key: two postings with the same `url` are the same
/// posting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    /// Display title, trimmed to its first line
    pub title: String,
    /// Display name of the target the posting came from
    pub company_name: String,
    /// Absolute link to the posting
    pub url: String,
    /// When the extraction pass found it
    pub discovered_at: DateTime<Utc>,
    /// Provisional flag; the store decides what is really new
    pub is_new: bool,
}

impl Posting {
    /// Create a posting discovered at `discovered_at`, flagged as new.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        company_name: impl Into<String>,
        url: impl Into<String>,
        discovered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            company_name: company_name.into(),
            url: url.into(),
            discovered_at,
            is_new: true,
        }
    }
}

impl fmt::Display for Posting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {} <{}>", self.title, self.company_name, self.url)
    }
}
