//! Platform abstraction layer
//!
//! Traits for the board services this crate consumes, plus in-memory mock
//! implementations for host testing.

pub mod error;
pub mod mock;
pub mod traits;

pub use error::{Result, StorageError};
pub use traits::{BoardInterface, EepromInterface, Sensors};
