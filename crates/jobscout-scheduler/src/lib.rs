pub mod jobs;
pub mod queue;
pub mod scheduler;

pub use jobs::{RunRecord, TriggerSource};
pub use queue::{QueueError, RunQueue};
pub use scheduler::{next_daily_run, spawn_daily};
