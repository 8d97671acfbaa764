//! In-memory collaborators for orchestrator tests.

#![allow(dead_code)]

use async_trait::async_trait;
use jobscout_core::{JobScoutError, JobStore, Notifier, Posting, Result, RoleFilter, Target};
use std::collections::HashSet;
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryStore {
    pub targets: Vec<Target>,
    pub roles: Vec<RoleFilter>,
    stored: Mutex<Vec<Posting>>,
    seen: Mutex<HashSet<String>>,
    failing_urls: HashSet<String>,
    fail_listing: bool,
}

impl MemoryStore {
    pub fn new(targets: Vec<Target>, keywords: &[&str]) -> Self {
        let roles = keywords
            .iter()
            .enumerate()
            .map(|(i, k)| RoleFilter::new(i.to_string(), *k).unwrap())
            .collect();
        Self {
            targets,
            roles,
            ..Self::default()
        }
    }

    /// Make `upsert_posting` fail for this url.
    pub fn failing_on(mut self, url: &str) -> Self {
        self.failing_urls.insert(url.to_string());
        self
    }

    pub fn failing_listing(mut self) -> Self {
        self.fail_listing = true;
        self
    }

    /// Pretend `url` was stored by an earlier run.
    pub fn already_known(self, url: &str) -> Self {
        self.seen.lock().unwrap().insert(url.to_string());
        self
    }

    pub fn stored(&self) -> Vec<Posting> {
        self.stored.lock().unwrap().clone()
    }
}

#[async_trait]
impl JobStore for MemoryStore {
    async fn list_targets(&self) -> Result<Vec<Target>> {
        if self.fail_listing {
            return Err(JobScoutError::Database("database is locked".into()));
        }
        Ok(self.targets.clone())
    }

    async fn list_role_filters(&self) -> Result<Vec<RoleFilter>> {
        Ok(self.roles.clone())
    }

    async fn upsert_posting(&self, posting: &Posting) -> Result<Option<Posting>> {
        if self.failing_urls.contains(&posting.url) {
            return Err(JobScoutError::Database("disk I/O error".into()));
        }
        if !self.seen.lock().unwrap().insert(posting.url.clone()) {
            return Ok(None);
        }
        self.stored.lock().unwrap().push(posting.clone());
        Ok(Some(posting.clone()))
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    calls: Mutex<Vec<(String, Vec<Posting>)>>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, Vec<Posting>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify_new_postings(&self, recipient: &str, postings: &[Posting]) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push((recipient.to_string(), postings.to_vec()));
        if self.fail {
            return Err(JobScoutError::Notification("535 authentication failed".into()));
        }
        Ok(())
    }
}

pub fn target(id: &str, name: &str, url: &str) -> Target {
    Target::new(id, name, url).unwrap()
}
