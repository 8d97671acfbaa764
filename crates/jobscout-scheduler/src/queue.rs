//! Single-worker run queue.
//!
//! Triggers are submitted to a bounded channel served by one worker task, so
//! runs never overlap and at most one run waits behind the active one. The
//! latest finished run is published on a watch channel. Each run executes
//! in its own task, so a panicking run is logged and the worker keeps going.

use crate::jobs::{RunRecord, TriggerSource};
use chrono::Utc;
use std::future::Future;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Pending triggers allowed behind the active run.
const QUEUE_CAPACITY: usize = 1;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    #[error("A run is already queued")]
    Busy,

    #[error("The run worker has stopped")]
    Closed,
}

/// Handle for submitting runs and observing their results.
#[derive(Debug, Clone)]
pub struct RunQueue<T> {
    tx: mpsc::Sender<TriggerSource>,
    last: watch::Receiver<Option<RunRecord<T>>>,
}

impl<T> RunQueue<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Start the worker. Each accepted trigger calls `job` once.
    pub fn spawn<F, Fut>(job: F) -> (Self, JoinHandle<()>)
    where
        F: Fn(TriggerSource) -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        let (tx, mut rx) = mpsc::channel(QUEUE_CAPACITY);
        let (last_tx, last) = watch::channel(None);

        let worker = tokio::spawn(async move {
            while let Some(source) = rx.recv().await {
                let id = uuid::Uuid::new_v4().to_string();
                tracing::info!(run_id = %id, ?source, "Run started");
                let started_at = Utc::now();
                let outcome = match tokio::spawn(job(source)).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        tracing::error!(run_id = %id, "Run aborted: {}", e);
                        continue;
                    }
                };
                let record = RunRecord {
                    id,
                    source,
                    started_at,
                    finished_at: Utc::now(),
                    outcome,
                };
                tracing::info!(run_id = %record.id, "Run finished");
                last_tx.send_replace(Some(record));
            }
            tracing::debug!("Run queue closed");
        });

        (Self { tx, last }, worker)
    }

    /// Queue a run without waiting.
    pub fn submit(&self, source: TriggerSource) -> Result<(), QueueError> {
        self.tx.try_send(source).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => QueueError::Busy,
            mpsc::error::TrySendError::Closed(_) => QueueError::Closed,
        })
    }

    /// The most recently finished run.
    pub fn last_run(&self) -> Option<RunRecord<T>> {
        self.last.borrow().clone()
    }

    /// Receiver that changes whenever a run finishes.
    pub fn subscribe(&self) -> watch::Receiver<Option<RunRecord<T>>> {
        self.last.clone()
    }
}
