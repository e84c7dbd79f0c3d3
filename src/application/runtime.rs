use super::wizard::PaymentWizard;
use crate::domain::wizard::{Timer, WizardEvent, WizardStep};
use crate::error::{Result, WizardError};
use tokio::sync::mpsc;
use tracing::debug;

/// Couples a wizard with the channel its timers are delivered on.
pub struct WizardRuntime {
    wizard: PaymentWizard,
    timers: mpsc::UnboundedReceiver<Timer>,
}

impl WizardRuntime {
    pub fn new(wizard: PaymentWizard, timers: mpsc::UnboundedReceiver<Timer>) -> Self {
        Self { wizard, timers }
    }

    pub fn wizard(&self) -> &PaymentWizard {
        &self.wizard
    }

    pub fn wizard_mut(&mut self) -> &mut PaymentWizard {
        &mut self.wizard
    }

    pub async fn dispatch(&mut self, event: WizardEvent) -> Result<()> {
        self.wizard.dispatch(event).await
    }

    /// Delivers elapsed timers until the session is no longer in
    /// `Processing` or `Success`. Returns at once for any other step.
    pub async fn settle(&mut self) -> Result<()> {
        while matches!(
            self.wizard.step(),
            Some(WizardStep::Processing | WizardStep::Success)
        ) {
            let timer = self.timers.recv().await.ok_or(WizardError::ChannelClosed)?;
            self.deliver(timer).await?;
        }
        Ok(())
    }

    async fn deliver(&mut self, timer: Timer) -> Result<()> {
        let current = self.wizard.session().map(|s| s.id());
        if current != Some(timer.session) {
            debug!(session = timer.session, kind = ?timer.kind, "Dropping timer of a closed session");
            return Ok(());
        }
        self.wizard.dispatch(WizardEvent::TimerElapsed(timer)).await
    }
}
