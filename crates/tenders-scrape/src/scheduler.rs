//! Periodic pipeline runs.

use std::{sync::Arc, time::Duration};

use tenders_core::RecordStore;
use tokio::{
  sync::oneshot,
  task::JoinHandle,
  time::{Instant, MissedTickBehavior},
};

use crate::{PageSource, Pipeline};

/// The default period between scheduled scrapes.
pub const DEFAULT_PERIOD: Duration = Duration::from_secs(6 * 60 * 60);

/// Owns the background task that runs a [`Pipeline`] every `period`.
///
/// The first run happens one full period after [`Scheduler::start`]. A run
/// already in progress is allowed to finish when the scheduler is stopped.
/// Dropping a scheduler without calling [`Scheduler::stop`] aborts the task.
pub struct Scheduler {
  shutdown: Option<oneshot::Sender<()>>,
  task:     JoinHandle<()>,
}

impl Scheduler {
  /// Spawn the timer task on the current tokio runtime.
  pub fn start<S, F>(pipeline: Arc<Pipeline<S, F>>, period: Duration) -> Self
  where
    S: RecordStore + 'static,
    F: PageSource + 'static,
  {
    let (shutdown, mut stop) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
      let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
      ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

      loop {
        tokio::select! {
          _ = &mut stop => break,
          _ = ticker.tick() => {
            pipeline.run().await;
          }
        }
      }
      tracing::debug!("scheduler task exited");
    });

    tracing::info!(period_secs = period.as_secs(), "scheduler started");
    Self { shutdown: Some(shutdown), task }
  }

  /// Signal the task to exit and wait for it.
  pub async fn stop(mut self) {
    if let Some(tx) = self.shutdown.take() {
      let _ = tx.send(());
    }
    if let Err(e) = (&mut self.task).await {
      tracing::warn!(error = %e, "scheduler task did not exit cleanly");
    }
    tracing::info!("scheduler stopped");
  }
}

impl Drop for Scheduler {
  fn drop(&mut self) { self.task.abort(); }
}
