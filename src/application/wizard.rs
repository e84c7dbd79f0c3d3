use crate::config::WizardConfig;
use crate::domain::ports::{ClockBox, PaymentHostBox, TimerServiceBox};
use crate::domain::trip::TripContext;
use crate::domain::wizard::{Effect, SessionId, Transition, WizardEvent, WizardSession, WizardStep, transition};
use crate::error::{Result, WizardError};
use tracing::{debug, info, warn};

/// The payment dialog as seen by its host.
pub struct PaymentWizard {
    config: WizardConfig,
    timers: TimerServiceBox,
    clock: ClockBox,
    host: PaymentHostBox,
    session: Option<WizardSession>,
    next_id: SessionId,
}

impl PaymentWizard {
    /// Creates a closed wizard.
    ///
    /// # Arguments
    ///
    /// * `config` - Delays of the simulated settlement.
    /// * `timers` - Where deferred timers are scheduled.
    /// * `clock` - Source of the current date for card expiry checks.
    /// * `host` - Receives the success and close callbacks.
    pub fn new(config: WizardConfig, timers: TimerServiceBox, clock: ClockBox, host: PaymentHostBox) -> Self {
        Self {
            config,
            timers,
            clock,
            host,
            session: None,
            next_id: 1,
        }
    }

    /// Opens the wizard with default state. Opening an already open wizard
    /// keeps the current session.
    pub fn open(&mut self, trip: Option<TripContext>) -> SessionId {
        if let Some(session) = &self.session {
            return session.id();
        }
        let id = self.next_id;
        self.next_id += 1;
        let session = WizardSession::new(id, trip);
        info!(session = id, amount_due = ?session.amount_due(), "Payment wizard opened");
        self.session = Some(session);
        id
    }

    /// The host closed the dialog itself. State is discarded without callbacks.
    pub fn dismiss(&mut self) -> Option<WizardSession> {
        let session = self.session.take();
        if let Some(session) = &session {
            info!(session = session.id(), step = %session.step(), "Payment wizard dismissed by host");
        }
        session
    }

    /// The host's trip changed while the wizard is open.
    ///
    /// Only allowed before payment is accepted; once settlement has begun the
    /// amount being charged is fixed.
    pub fn update_trip(&mut self, trip: Option<TripContext>) -> Result<()> {
        let session = self.session.as_mut().ok_or(WizardError::NotOpen)?;
        if !session.is_closable() {
            warn!(session = session.id(), step = %session.step(), "Trip change rejected");
            return Err(WizardError::TripLocked(session.step()));
        }
        session.set_trip(trip);
        debug!(session = session.id(), amount_due = ?session.amount_due(), "Trip updated");
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&WizardSession> {
        self.session.as_ref()
    }

    pub fn step(&self) -> Option<WizardStep> {
        self.session.as_ref().map(WizardSession::step)
    }

    /// Whether the host should show its close control.
    pub fn can_close(&self) -> bool {
        self.session.as_ref().is_some_and(WizardSession::is_closable)
    }

    /// Applies one event and runs its effects.
    ///
    /// A rejected payment returns `WizardError::Validation` after the
    /// session has been updated with the new messages.
    pub async fn dispatch(&mut self, event: WizardEvent) -> Result<()> {
        let session = self.session.as_ref().ok_or(WizardError::NotOpen)?;
        let id = session.id();
        let from = session.step();

        if let WizardEvent::Edit { field, input } = &event {
            if field.is_sensitive() {
                debug!(session = id, %field, "Field edited");
            } else {
                debug!(session = id, %field, input = %input, "Field edited");
            }
        }

        let Transition { session, effects } = transition(session, event, self.clock.today())
            .inspect_err(|e| warn!(session = id, step = %from, error = %e, "Event rejected"))?;

        if session.step() != from {
            info!(session = id, %from, to = %session.step(), "Wizard step changed");
        }
        self.session = Some(session);

        let mut rejected = None;
        for effect in effects {
            match effect {
                Effect::StartTimer(timer) => {
                    let delay = self.config.delay_for(timer.kind);
                    debug!(session = id, kind = ?timer.kind, ?delay, "Timer scheduled");
                    self.timers.schedule(timer, delay);
                }
                Effect::RejectPayment(errors) => {
                    let fields: Vec<String> = errors.fields().map(|f| f.to_string()).collect();
                    warn!(session = id, errors = ?fields, "Payment details invalid");
                    rejected = Some(errors);
                }
                Effect::PaymentSucceeded => {
                    info!(session = id, "Payment settled");
                    self.host.on_payment_success().await;
                }
                Effect::Close => {
                    self.session = None;
                    self.host.on_close().await;
                    info!(session = id, "Payment wizard closed");
                }
            }
        }

        match rejected {
            Some(errors) => Err(WizardError::Validation(errors)),
            None => Ok(()),
        }
    }
}
