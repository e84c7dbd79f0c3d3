//! Application layer driving one payment wizard for a hosting screen.
//!
//! `PaymentWizard` owns the open session, runs the effects produced by the
//! domain transition function and guarantees the host sees
//! `on_payment_success` then `on_close` at most once per session.
//! `WizardRuntime` pairs it with the tokio timer channel so deferred
//! settlement events are delivered back into the same sequential flow.

pub mod runtime;
pub mod wizard;
