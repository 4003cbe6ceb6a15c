//! Polling over the single-shot status query. Job durations are unbounded
//! and server-controlled, so cadence and deadline stay caller choices; the
//! client never embeds a wait loop of its own.

use std::time::Duration;

use log::debug;
use tokio::time::{sleep, Instant};
use tokio_util::sync::CancellationToken;

use crate::api::migrate::MigrationStatus;
use crate::client::Cloud;
use crate::error::Error;

/// Cadence and bounds for [`wait_for_migration`].
#[derive(Debug, Clone)]
pub struct PollOptions {
    /// Delay between consecutive status queries.
    pub interval: Duration,
    /// Give up with [`Error::DeadlineExceeded`] after this long; `None`
    /// polls until the job is terminal or the token fires.
    pub timeout: Option<Duration>,
}

impl Default for PollOptions {
    fn default() -> PollOptions {
        PollOptions {
            interval: Duration::from_secs(1),
            timeout: None,
        }
    }
}

/// Polls a migration job until it reports a terminal status.
///
/// One status query per interval, nothing in between. Status strings the
/// service may add in the future are treated as still running, never as
/// terminal. Cancellation drops any in-flight query and returns
/// [`Error::Cancelled`]; the remote job is only ever read, so abandoning
/// the poll has no side effects.
pub async fn wait_for_migration(
    cloud: &Cloud,
    job_id: i64,
    options: PollOptions,
    cancel: &CancellationToken,
) -> Result<MigrationStatus, Error> {
    let deadline = options.timeout.map(|t| Instant::now() + t);

    loop {
        if let Some(deadline) = deadline {
            if Instant::now() >= deadline {
                return Err(Error::DeadlineExceeded);
            }
        }

        let status = tokio::select! {
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            res = cloud.migrate_status(job_id) => res?,
        };

        if status.is_terminal() {
            debug!("job {} reached terminal status {:?}", job_id, status.status);
            return Ok(status);
        }
        debug!(
            "job {} still {:?}, next query in {:?}",
            job_id, status.status, options.interval
        );

        // Never sleep past the deadline.
        let pause = match deadline {
            Some(deadline) => options
                .interval
                .min(deadline.saturating_duration_since(Instant::now())),
            None => options.interval,
        };
        tokio::select! {
            _ = cancel.cancelled() => return Err(Error::Cancelled),
            _ = sleep(pause) => {}
        }
    }
}
