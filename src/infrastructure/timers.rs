use crate::domain::ports::TimerService;
use crate::domain::wizard::Timer;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;

/// Sleeps on the tokio runtime and sends each elapsed timer on a channel.
///
/// Must be used from within a tokio runtime.
#[derive(Clone)]
pub struct TokioTimerService {
    tx: mpsc::UnboundedSender<Timer>,
}

impl TokioTimerService {
    /// Creates the service and the receiving end that delivers elapsed timers.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Timer>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl TimerService for TokioTimerService {
    fn schedule(&self, timer: Timer, delay: Duration) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(timer).is_err() {
                tracing::debug!(session = timer.session, kind = ?timer.kind, "Timer receiver dropped");
            }
        });
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledTimer {
    pub timer: Timer,
    pub delay: Duration,
}

/// Records scheduled timers without running them; the caller decides when
/// each one elapses.
#[derive(Default, Clone)]
pub struct ManualTimerService {
    scheduled: Arc<Mutex<VecDeque<ScheduledTimer>>>,
}

impl ManualTimerService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns the oldest scheduled timer.
    pub fn pop(&self) -> Option<ScheduledTimer> {
        self.scheduled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }

    pub fn pending(&self) -> Vec<ScheduledTimer> {
        self.scheduled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .copied()
            .collect()
    }
}

impl TimerService for ManualTimerService {
    fn schedule(&self, timer: Timer, delay: Duration) {
        self.scheduled
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(ScheduledTimer { timer, delay });
    }
}
