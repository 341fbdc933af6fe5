//! Mock platform implementations for host testing

pub mod board;
pub mod sensors;
pub mod storage;

pub use board::MockBoard;
pub use sensors::MockSensors;
pub use storage::{MockEeprom, MOCK_EEPROM_CAPACITY};
