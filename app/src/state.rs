//! Application state shared by the HTTP handlers.

use jobscout_db::Database;
use jobscout_scanner::RunSummary;
use jobscout_scheduler::RunQueue;

/// Handles the endpoints need.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Serialises manual and scheduled runs
    pub runs: RunQueue<RunSummary>,
    /// Companies, roles and stored postings
    pub db: Database,
}

impl AppState {
    pub fn new(runs: RunQueue<RunSummary>, db: Database) -> Self {
        Self { runs, db }
    }
}
