//! Scheduler for running periodic trading cycles.
//!
//! The scheduler is configured with an optional anchor time and an
//! execution interval. Tick times are aligned to the anchor, so an
//! `every = 1h` schedule anchored on the hour keeps firing on the hour no
//! matter when the process started.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::{Instrument as _, Level, event, span};

/// Configuration for scheduling periodic trading cycles.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Scheduler {
    /// An RFC3339 timestamp to anchor the schedule to (defaults to now)
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub from: Option<OffsetDateTime>,
    /// How often to execute a cycle; if unset, nothing is scheduled
    #[serde(default, with = "humantime_serde::option")]
    pub every: Option<Duration>,
}

impl Scheduler {
    /// Schedule and execute a function at regular intervals.
    ///
    /// Computes the first tick at or after now that is aligned with the
    /// anchor, sleeps until then, and thereafter invokes `f` once per
    /// interval with the tick's nominal timestamp.
    ///
    /// # Returns
    ///
    /// * `Ok(())` immediately if no interval is configured
    /// * `Err(E)` as soon as the scheduled function returns an error
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::time::Duration;
    /// use time::OffsetDateTime;
    /// use mgxdemo::Scheduler;
    ///
    /// # fn main() -> Result<(), String> {
    /// let scheduler = Scheduler {
    ///     from: Some(OffsetDateTime::now_utc()),
    ///     every: Some(Duration::from_secs(3600)), // Every hour
    /// };
    ///
    /// # tokio_test::block_on(async {
    /// scheduler.schedule(|timestamp| async move {
    ///     println!("Settling cycle at {}", timestamp);
    ///     Ok::<(), String>(())
    /// }).await?;
    /// # Ok(())
    /// # })
    /// # }
    /// ```
    pub async fn schedule<T, E>(
        &self,
        f: impl AsyncFn(OffsetDateTime) -> Result<T, E>,
    ) -> Result<(), E> {
        // extract the interval or return immediately
        let Some(delta) = self.every else {
            return Ok(());
        };

        let now = OffsetDateTime::now_utc();

        // advance the anchor to the first tick at or after now
        let mut anchor = if let Some(mut from) = self.from {
            if from < now {
                let skipped = ((now - from) / delta).ceil() as u32;
                from += delta * skipped;
            }
            from
        } else {
            now
        };

        // align the clock to the first tick
        {
            let until_first: std::time::Duration = (anchor - now)
                .try_into()
                .expect("anchor too far in the future");

            tokio::time::sleep(until_first).await;
        };

        let mut interval = tokio::time::interval(delta);

        loop {
            interval.tick().await;

            let span = span!(Level::INFO, "scheduled trading cycle");
            async {
                event!(Level::INFO, cycle_time = anchor.format(&Rfc3339).unwrap());
                f(anchor).await
            }
            .instrument(span)
            .await?;

            anchor += delta;
        }
    }
}
