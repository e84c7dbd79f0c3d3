//! Adapters for the domain ports: timers, clocks and a host that records
//! what the wizard reported.

pub mod clock;
pub mod recording_host;
pub mod timers;
