//! Board-level services trait

/// Services provided by the board support package.
pub trait BoardInterface {
    /// Microseconds since boot (monotonic).
    fn now_us(&self) -> u64;

    /// Busy-wait for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);

    /// Reset the processor, optionally into the bootloader.
    ///
    /// On real hardware this does not return; callers must not rely on any
    /// code running after it.
    fn system_reset(&mut self, to_bootloader: bool);
}
