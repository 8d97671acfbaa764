//! Collaborator traits the scanner calls into.
//!
//! The scanner never talks to a database or mail server directly. The
//! application wires concrete implementations (`jobscout-db`, `jobscout-mail`)
//! behind these traits; tests use in-memory doubles.

use crate::error::Result;
use crate::types::{Posting, RoleFilter, Target};
use async_trait::async_trait;

/// Storage of targets, role filters and postings.
#[async_trait]
pub trait JobStore: Send + Sync {
    /// All configured targets, active or not.
    async fn list_targets(&self) -> Result<Vec<Target>>;

    /// All configured role filters, active or not.
    async fn list_role_filters(&self) -> Result<Vec<RoleFilter>>;

    /// Store a posting unless one with the same `url` already exists.
    ///
    /// Returns `Some` with the stored posting when it was new, `None` when the
    /// url was already known.
    async fn upsert_posting(&self, posting: &Posting) -> Result<Option<Posting>>;
}

/// Delivery of the end-of-run digest.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Tell `recipient` about newly stored postings.
    async fn notify_new_postings(&self, recipient: &str, postings: &[Posting]) -> Result<()>;
}
