//! Status Poller
//!
//! Periodically queries the backend processing status. Each run is a
//! [`PollHandle`]; the [`StatusPoller`] holds at most one, so starting a new
//! run always cancels the previous one.

use crate::api::DocumentApi;
use crate::controller::AppEvent;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

/// A running poll task. Dropping the handle cancels the task.
#[derive(Debug)]
pub struct PollHandle {
    session: u64,
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

pub struct StatusPoller {
    period: Duration,
    next_session: u64,
    active: Option<PollHandle>,
}

impl StatusPoller {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_session: 1,
            active: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Start a new poll session, canceling any running one first.
    ///
    /// The first tick fires one period after the call. The task stops on its
    /// own after sending a terminal result (completed, failed, or an error).
    pub fn start(&mut self, api: Arc<dyn DocumentApi>, events: UnboundedSender<AppEvent>) -> u64 {
        self.cancel();

        let session = self.next_session;
        self.next_session += 1;
        let period = self.period;

        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                debug!(session, "Polling processing status");

                let result = api.processing_status().await;
                let terminal = match &result {
                    Ok(status) => status.is_terminal(),
                    Err(_) => true,
                };

                if events.send(AppEvent::PollTick { session, result }).is_err() || terminal {
                    break;
                }
            }
        });

        self.active = Some(PollHandle { session, task });
        session
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.active.take() {
            debug!(session = handle.session(), "Canceling poll session");
            handle.cancel();
        }
    }

    pub fn active_session(&self) -> Option<u64> {
        self.active.as_ref().map(PollHandle::session)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}
