use super::amount::{AmountBreakdown, PaymentType, Rupees};
use super::details::{CardDetails, Field, PaymentMethod, UpiDetails};
use super::trip::TripContext;
use super::validation::{ValidationErrors, validate};
use crate::error::{Result, WizardError};
use chrono::NaiveDate;
use std::fmt;

pub type SessionId = u64;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum WizardStep {
    MethodSelection,
    DetailEntry,
    Processing,
    Success,
}

impl WizardStep {
    /// Whether the host may offer a close control in this step.
    pub fn is_closable(&self) -> bool {
        matches!(self, WizardStep::MethodSelection | WizardStep::DetailEntry)
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WizardStep::MethodSelection => "method_selection",
            WizardStep::DetailEntry => "detail_entry",
            WizardStep::Processing => "processing",
            WizardStep::Success => "success",
        };
        f.write_str(name)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TimerKind {
    /// Simulated settlement; ends `Processing`.
    Settlement,
    /// Pause on the success screen before the host is notified.
    Confirmation,
}

/// A deferred event, tagged with the session that scheduled it.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Timer {
    pub session: SessionId,
    pub kind: TimerKind,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum WizardEvent {
    SelectMethod(PaymentMethod),
    Continue,
    Back,
    ChangePaymentType(PaymentType),
    Edit { field: Field, input: String },
    Pay,
    TimerElapsed(Timer),
    Close,
}

impl WizardEvent {
    pub fn edit(field: Field, input: impl Into<String>) -> Self {
        WizardEvent::Edit {
            field,
            input: input.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WizardEvent::SelectMethod(_) => "select_method",
            WizardEvent::Continue => "continue",
            WizardEvent::Back => "back",
            WizardEvent::ChangePaymentType(_) => "payment_type",
            WizardEvent::Edit { .. } => "edit",
            WizardEvent::Pay => "pay",
            WizardEvent::TimerElapsed(_) => "timer_elapsed",
            WizardEvent::Close => "close",
        }
    }
}

/// Work the driver performs after a transition, in order.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Effect {
    StartTimer(Timer),
    /// Payment blocked; show the inline messages and one aggregate notice.
    RejectPayment(ValidationErrors),
    PaymentSucceeded,
    Close,
}

/// All mutable state of one open wizard.
#[derive(Debug, Clone, PartialEq)]
pub struct WizardSession {
    id: SessionId,
    step: WizardStep,
    trip: Option<TripContext>,
    method: PaymentMethod,
    payment_type: PaymentType,
    amount_due: Option<Rupees>,
    card: CardDetails,
    upi: UpiDetails,
    errors: ValidationErrors,
}

impl WizardSession {
    /// A freshly opened session with every field at its default.
    pub fn new(id: SessionId, trip: Option<TripContext>) -> Self {
        let mut session = Self {
            id,
            step: WizardStep::MethodSelection,
            trip: None,
            method: PaymentMethod::default(),
            payment_type: PaymentType::default(),
            amount_due: None,
            card: CardDetails::default(),
            upi: UpiDetails::default(),
            errors: ValidationErrors::new(),
        };
        session.set_trip(trip);
        session
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn trip(&self) -> Option<&TripContext> {
        self.trip.as_ref()
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn payment_type(&self) -> PaymentType {
        self.payment_type
    }

    /// Amount charged on `Pay`; `None` until a trip is known.
    pub fn amount_due(&self) -> Option<Rupees> {
        self.amount_due
    }

    pub fn breakdown(&self) -> Option<AmountBreakdown> {
        self.trip
            .as_ref()
            .map(|trip| AmountBreakdown::for_total(trip.total_amount))
    }

    pub fn card(&self) -> &CardDetails {
        &self.card
    }

    pub fn upi(&self) -> &UpiDetails {
        &self.upi
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn is_closable(&self) -> bool {
        self.step.is_closable()
    }

    /// Replaces the trip and re-derives the amount for the current payment type.
    pub fn set_trip(&mut self, trip: Option<TripContext>) {
        self.trip = trip;
        self.refresh_amount();
    }

    fn set_payment_type(&mut self, payment_type: PaymentType) {
        self.payment_type = payment_type;
        self.refresh_amount();
    }

    fn refresh_amount(&mut self) {
        self.amount_due = self.breakdown().map(|b| b.due(self.payment_type));
    }

    fn timer(&self, kind: TimerKind) -> Timer {
        Timer {
            session: self.id,
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub session: WizardSession,
    pub effects: Vec<Effect>,
}

/// Applies `event` to `session`.
///
/// Returns the next session together with the effects to run. Events the
/// current step does not accept are rejected and leave the session as it
/// was. A timer scheduled by another session is ignored.
pub fn transition(session: &WizardSession, event: WizardEvent, today: NaiveDate) -> Result<Transition> {
    use WizardStep::*;

    let mut next = session.clone();
    let mut effects = Vec::new();

    match (session.step, event) {
        (_, WizardEvent::TimerElapsed(timer)) if timer.session != session.id => {}
        (MethodSelection, WizardEvent::SelectMethod(method)) => next.method = method,
        (MethodSelection, WizardEvent::Continue) => next.step = DetailEntry,
        (DetailEntry, WizardEvent::Back) => next.step = MethodSelection,
        (MethodSelection | DetailEntry, WizardEvent::ChangePaymentType(payment_type)) => {
            next.set_payment_type(payment_type)
        }
        (DetailEntry, WizardEvent::Edit { field, input }) => {
            if field.method() != next.method {
                return Err(WizardError::InactiveField {
                    field,
                    method: next.method,
                });
            }
            match next.method {
                PaymentMethod::Card => next.card.edit(field, &input),
                PaymentMethod::Upi => next.upi.edit(field, &input),
            }
        }
        (DetailEntry, WizardEvent::Pay) => {
            next.errors = validate(next.method, &next.card, &next.upi, today);
            if next.errors.is_empty() {
                next.step = Processing;
                effects.push(Effect::StartTimer(next.timer(TimerKind::Settlement)));
            } else {
                effects.push(Effect::RejectPayment(next.errors.clone()));
            }
        }
        (
            Processing,
            WizardEvent::TimerElapsed(Timer {
                kind: TimerKind::Settlement,
                ..
            }),
        ) => {
            next.step = Success;
            effects.push(Effect::StartTimer(next.timer(TimerKind::Confirmation)));
        }
        (
            Success,
            WizardEvent::TimerElapsed(Timer {
                kind: TimerKind::Confirmation,
                ..
            }),
        ) => {
            effects.push(Effect::PaymentSucceeded);
            effects.push(Effect::Close);
        }
        (MethodSelection | DetailEntry, WizardEvent::Close) => effects.push(Effect::Close),
        (step @ (Processing | Success), WizardEvent::Close) => {
            return Err(WizardError::CloseLocked(step));
        }
        (step, event) => {
            return Err(WizardError::InvalidTransition {
                step,
                event: event.name().to_string(),
            });
        }
    }

    Ok(Transition {
        session: next,
        effects,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
    }

    fn trip(total: u64) -> TripContext {
        TripContext::new("Pune - Goa", "12 Jan - 14 Jan", 450.0, total)
    }

    fn apply(session: &WizardSession, event: WizardEvent) -> Transition {
        transition(session, event, today()).unwrap()
    }

    fn detail_entry(method: PaymentMethod) -> WizardSession {
        let session = WizardSession::new(1, Some(trip(1000)));
        let session = apply(&session, WizardEvent::SelectMethod(method)).session;
        apply(&session, WizardEvent::Continue).session
    }

    fn fill_valid_card(mut session: WizardSession) -> WizardSession {
        for (field, input) in [
            (Field::CardNumber, "4111111111111111"),
            (Field::Expiry, "1227"),
            (Field::Cvv, "123"),
            (Field::CardholderName, "Asha Rao"),
        ] {
            session = apply(&session, WizardEvent::edit(field, input)).session;
        }
        session
    }

    #[test]
    fn test_new_session_defaults() {
        let session = WizardSession::new(7, Some(trip(1000)));
        assert_eq!(session.id(), 7);
        assert_eq!(session.step(), WizardStep::MethodSelection);
        assert_eq!(session.method(), PaymentMethod::Card);
        assert_eq!(session.payment_type(), PaymentType::Advance);
        assert_eq!(session.amount_due(), Some(Rupees(300)));
        assert!(session.errors().is_empty());
    }

    #[test]
    fn test_no_trip_means_no_amount() {
        let session = WizardSession::new(1, None);
        assert_eq!(session.amount_due(), None);

        let next = apply(&session, WizardEvent::ChangePaymentType(PaymentType::Full)).session;
        assert_eq!(next.payment_type(), PaymentType::Full);
        assert_eq!(next.amount_due(), None);
    }

    #[test]
    fn test_payment_type_switching() {
        let session = detail_entry(PaymentMethod::Card);
        let full = apply(&session, WizardEvent::ChangePaymentType(PaymentType::Full)).session;
        assert_eq!(full.amount_due(), Some(Rupees(1000)));

        let again = apply(&full, WizardEvent::ChangePaymentType(PaymentType::Full)).session;
        assert_eq!(again.amount_due(), Some(Rupees(1000)));

        let advance = apply(&again, WizardEvent::ChangePaymentType(PaymentType::Advance)).session;
        assert_eq!(advance.amount_due(), Some(Rupees(300)));
    }

    #[test]
    fn test_trip_change_recomputes_amount() {
        let mut session = detail_entry(PaymentMethod::Card);
        session = apply(&session, WizardEvent::ChangePaymentType(PaymentType::Full)).session;
        session.set_trip(Some(trip(2500)));
        assert_eq!(session.amount_due(), Some(Rupees(2500)));
        session.set_trip(None);
        assert_eq!(session.amount_due(), None);
    }

    #[test]
    fn test_back_returns_to_method_selection() {
        let session = detail_entry(PaymentMethod::Upi);
        let back = apply(&session, WizardEvent::Back).session;
        assert_eq!(back.step(), WizardStep::MethodSelection);
        assert_eq!(back.method(), PaymentMethod::Upi);
    }

    #[test]
    fn test_method_is_fixed_outside_method_selection() {
        let session = detail_entry(PaymentMethod::Card);
        let result = transition(&session, WizardEvent::SelectMethod(PaymentMethod::Upi), today());
        assert!(matches!(
            result,
            Err(WizardError::InvalidTransition {
                step: WizardStep::DetailEntry,
                ..
            })
        ));
    }

    #[test]
    fn test_edits_are_formatted() {
        let session = detail_entry(PaymentMethod::Card);
        let next = apply(&session, WizardEvent::edit(Field::CardNumber, "4111111111111111extra")).session;
        assert_eq!(next.card().card_number, "4111 1111 1111 1111");

        let next = apply(&next, WizardEvent::edit(Field::Expiry, "1225")).session;
        assert_eq!(next.card().expiry, "12/25");
    }

    #[test]
    fn test_inactive_field_rejected() {
        let session = detail_entry(PaymentMethod::Upi);
        let result = transition(&session, WizardEvent::edit(Field::Cvv, "123"), today());
        assert!(matches!(
            result,
            Err(WizardError::InactiveField {
                field: Field::Cvv,
                method: PaymentMethod::Upi
            })
        ));
    }

    #[test]
    fn test_edit_not_accepted_on_method_selection() {
        let session = WizardSession::new(1, None);
        assert!(transition(&session, WizardEvent::edit(Field::Cvv, "1"), today()).is_err());
    }

    #[test]
    fn test_failed_pay_stays_in_detail_entry() {
        let mut session = detail_entry(PaymentMethod::Card);
        for (field, input) in [
            (Field::CardNumber, "411111111111111"),
            (Field::Expiry, "1225"),
            (Field::Cvv, "12"),
            (Field::CardholderName, "A"),
        ] {
            session = apply(&session, WizardEvent::edit(field, input)).session;
        }
        let late = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let Transition { session, effects } = transition(&session, WizardEvent::Pay, late).unwrap();

        assert_eq!(session.step(), WizardStep::DetailEntry);
        assert_eq!(session.errors().len(), 4);
        assert_eq!(effects, vec![Effect::RejectPayment(session.errors().clone())]);
    }

    #[test]
    fn test_errors_recomputed_on_each_attempt() {
        let session = detail_entry(PaymentMethod::Upi);
        let session = apply(&session, WizardEvent::edit(Field::UpiId, "notanid")).session;
        let failed = apply(&session, WizardEvent::Pay).session;
        assert_eq!(failed.errors().fields().collect::<Vec<_>>(), vec![Field::UpiId]);

        let fixed = apply(&failed, WizardEvent::edit(Field::UpiId, "9876543210@upi")).session;
        let Transition { session, effects } = apply(&fixed, WizardEvent::Pay);
        assert!(session.errors().is_empty());
        assert_eq!(session.step(), WizardStep::Processing);
        assert_eq!(
            effects,
            vec![Effect::StartTimer(Timer {
                session: 1,
                kind: TimerKind::Settlement
            })]
        );
    }

    #[test]
    fn test_timers_drive_processing_to_close() {
        let session = fill_valid_card(detail_entry(PaymentMethod::Card));
        let processing = apply(&session, WizardEvent::Pay).session;

        let settlement = Timer {
            session: 1,
            kind: TimerKind::Settlement,
        };
        let Transition { session, effects } = apply(&processing, WizardEvent::TimerElapsed(settlement));
        assert_eq!(session.step(), WizardStep::Success);
        assert_eq!(
            effects,
            vec![Effect::StartTimer(Timer {
                session: 1,
                kind: TimerKind::Confirmation
            })]
        );

        let confirmation = Timer {
            session: 1,
            kind: TimerKind::Confirmation,
        };
        let done = apply(&session, WizardEvent::TimerElapsed(confirmation));
        assert_eq!(done.effects, vec![Effect::PaymentSucceeded, Effect::Close]);
    }

    #[test]
    fn test_no_interaction_while_processing() {
        let processing = apply(&fill_valid_card(detail_entry(PaymentMethod::Card)), WizardEvent::Pay).session;
        for event in [
            WizardEvent::Pay,
            WizardEvent::Back,
            WizardEvent::ChangePaymentType(PaymentType::Full),
            WizardEvent::edit(Field::Cvv, "999"),
        ] {
            assert!(transition(&processing, event, today()).is_err());
        }
        assert!(matches!(
            transition(&processing, WizardEvent::Close, today()),
            Err(WizardError::CloseLocked(WizardStep::Processing))
        ));
    }

    #[test]
    fn test_stale_timer_ignored() {
        let processing = apply(&fill_valid_card(detail_entry(PaymentMethod::Card)), WizardEvent::Pay).session;
        let stale = Timer {
            session: 99,
            kind: TimerKind::Settlement,
        };
        let Transition { session, effects } = apply(&processing, WizardEvent::TimerElapsed(stale));
        assert_eq!(session, processing);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_close_allowed_before_payment() {
        let session = WizardSession::new(1, None);
        assert_eq!(apply(&session, WizardEvent::Close).effects, vec![Effect::Close]);

        let session = detail_entry(PaymentMethod::Upi);
        assert_eq!(apply(&session, WizardEvent::Close).effects, vec![Effect::Close]);
    }
}
