//! Domain layer: the payment wizard's values, rules and ports.
//!
//! Nothing in here performs I/O. The session value and its transition
//! function can be exercised without a timer, a clock or a host.

pub mod amount;
pub mod details;
pub mod ports;
pub mod trip;
pub mod validation;
pub mod wizard;
