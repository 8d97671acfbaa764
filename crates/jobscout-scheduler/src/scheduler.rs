//! Daily scheduling: when the next run is due, and the task that submits it.

use crate::jobs::TriggerSource;
use crate::queue::{QueueError, RunQueue};
use chrono::{DateTime, Duration, Local, NaiveDateTime, NaiveTime, TimeZone};
use tokio::task::JoinHandle;

/// The first instant strictly after `now` whose wall-clock time is `at`.
pub fn next_daily_run<Tz: TimeZone>(now: &DateTime<Tz>, at: NaiveTime) -> DateTime<Tz> {
    let tz = now.timezone();
    let today = now.date_naive().and_time(at);
    let candidate = localize(&tz, today);
    if candidate > *now {
        candidate
    } else {
        localize(&tz, today + Duration::days(1))
    }
}

/// Map a wall-clock time onto `tz`, skipping forward over DST gaps.
fn localize<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    tz.from_local_datetime(&naive)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .unwrap_or_else(|| tz.from_utc_datetime(&naive))
}

/// Submit a scheduled run every day at local time `at`.
pub fn spawn_daily<T>(queue: RunQueue<T>, at: NaiveTime) -> JoinHandle<()>
where
    T: Clone + Send + Sync + 'static,
{
    tokio::spawn(async move {
        loop {
            let next = next_daily_run(&Local::now(), at);
            tracing::info!("Next scheduled run at {}", next.to_rfc3339());
            let wait = (next - Local::now()).to_std().unwrap_or_default();
            tokio::time::sleep(wait).await;

            // The wall clock may have been moved back while we slept.
            if Local::now() < next {
                continue;
            }

            match queue.submit(TriggerSource::Scheduled) {
                Ok(()) => tracing::info!("Scheduled run submitted"),
                Err(QueueError::Busy) => {
                    tracing::warn!("Skipping scheduled run: a run is already queued");
                }
                Err(QueueError::Closed) => {
                    tracing::error!("Run queue closed, stopping schedule");
                    break;
                }
            }
        }
    })
}
