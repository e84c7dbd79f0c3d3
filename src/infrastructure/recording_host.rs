use crate::domain::ports::PaymentHost;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCall {
    PaymentSucceeded,
    Closed,
}

/// How a session ended, as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Paid,
    Cancelled,
    Open,
}

impl SessionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionOutcome::Paid => "paid",
            SessionOutcome::Cancelled => "cancelled",
            SessionOutcome::Open => "open",
        }
    }
}

/// A host that keeps every callback it receives, in order.
///
/// Clones share the same log, so one clone can be handed to the wizard and
/// another kept for inspection.
#[derive(Default, Clone)]
pub struct RecordingHost {
    calls: Arc<RwLock<Vec<HostCall>>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn calls(&self) -> Vec<HostCall> {
        self.calls.read().await.clone()
    }

    pub async fn outcome(&self) -> SessionOutcome {
        let calls = self.calls.read().await;
        if calls.contains(&HostCall::PaymentSucceeded) {
            SessionOutcome::Paid
        } else if calls.contains(&HostCall::Closed) {
            SessionOutcome::Cancelled
        } else {
            SessionOutcome::Open
        }
    }
}

#[async_trait]
impl PaymentHost for RecordingHost {
    async fn on_payment_success(&self) {
        self.calls.write().await.push(HostCall::PaymentSucceeded);
    }

    async fn on_close(&self) {
        self.calls.write().await.push(HostCall::Closed);
    }
}
