//! Non-volatile parameter storage trait

use crate::platform::Result;

/// Byte-addressed non-volatile storage for the parameter blob.
///
/// Implementations wrap whatever the board actually has (EEPROM, a flash
/// sector, a file on the SITL host). All calls are synchronous and
/// bounded-time; there is no partial-success state. An `Err` means the
/// operation must be treated as not having happened.
pub trait EepromInterface {
    /// Bring the device up. Called once before any other access.
    fn init(&mut self);

    /// Erase the entire parameter region (all bytes to the erased state).
    fn erase(&mut self) -> Result<()>;

    /// Read `buf.len()` bytes starting at `offset`.
    fn read(&mut self, offset: usize, buf: &mut [u8]) -> Result<()>;

    /// Write `data` starting at `offset`.
    fn write(&mut self, offset: usize, data: &[u8]) -> Result<()>;

    /// Usable capacity in bytes.
    fn capacity(&self) -> usize;
}
