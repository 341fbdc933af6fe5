#![cfg_attr(not(test), no_std)]

//! tern - configuration storage and telemetry streaming core for a small
//! flight controller.
//!
//! The crate owns two pieces of flight-critical state:
//!
//! - [`parameters`]: the fixed table of typed configuration values, durably
//!   stored in non-volatile memory behind an integrity envelope
//! - [`scheduler`]: the periodic telemetry stream table with
//!   drift-correcting rescheduling
//!
//! The rest is the MAVLink-facing boundary: [`communication`] routes decoded
//! messages to the parameter store and builds semantic outbound messages,
//! and [`platform`] defines the traits the board must provide (non-volatile
//! storage, reset, sensor hooks) together with in-memory mocks for host
//! testing.
//!
//! The crate is `no_std` outside of tests and never performs wire encoding;
//! frames are parsed and serialized by the transport layer that owns the
//! serial link.

pub mod communication;
pub mod logging;
pub mod parameters;
pub mod platform;
pub mod scheduler;
