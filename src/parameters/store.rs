//! Persistent parameter store
//!
//! Ties the in-memory table to a non-volatile storage backend. The table is
//! written back only on explicit request; a mutation that is never followed
//! by a write reverts on the next boot.

use crate::parameters::blob;
use crate::parameters::error::ParamError;
use crate::parameters::notifier::ParamNotifier;
use crate::parameters::registry::{ParamId, ParamTable, ParamType, PARAM_NAME_LEN};
use crate::platform::EepromInterface;

/// Byte offset of the parameter record inside the storage device
const BLOB_OFFSET: usize = 0;

/// The single parameter store instance for one board.
///
/// Constructed once at startup and passed by reference to the components
/// that need it; there is deliberately no hidden global.
pub struct ParamStore<E: EepromInterface> {
    table: ParamTable,
    eeprom: E,
}

impl<E: EepromInterface> ParamStore<E> {
    /// Create a store over a backend. The table starts at the compiled-in
    /// defaults until [`ParamStore::init`] runs.
    pub fn new(eeprom: E) -> Self {
        Self {
            table: ParamTable::new(),
            eeprom,
        }
    }

    /// Bring the store up at boot.
    ///
    /// Initializes the backend and restores the persisted table; when no
    /// valid record exists the defaults are kept and persisted immediately.
    /// Either way the notifier's side-effect hook then runs once for every
    /// parameter in ascending id order, wiring dependent subsystems with a
    /// deterministic ordering.
    pub fn init<N: ParamNotifier>(&mut self, notifier: &mut N) {
        self.eeprom.init();
        if self.read().is_err() {
            self.table.set_defaults();
            if self.write().is_err() {
                crate::log_warn!("parameter defaults not persisted; running from RAM");
            }
        }
        for id in ParamId::ALL {
            notifier.on_changed(id, &self.table);
        }
    }

    /// Replace the live table from non-volatile memory.
    ///
    /// The live table is untouched unless the whole record reads back and
    /// validates.
    pub fn read(&mut self) -> Result<(), ParamError> {
        let mut buf = [0u8; blob::BLOB_LEN];
        self.eeprom.read(BLOB_OFFSET, &mut buf)?;
        self.table = blob::decode(&buf)?;
        Ok(())
    }

    /// Persist the live table with a freshly computed envelope.
    pub fn write(&mut self) -> Result<(), ParamError> {
        let buf = blob::encode(&self.table);
        self.eeprom.erase()?;
        self.eeprom.write(BLOB_OFFSET, &buf)?;
        Ok(())
    }

    /// Reset the live table to defaults (no notification, no persist).
    pub fn set_defaults(&mut self) {
        self.table.set_defaults();
    }

    /// Read-only view of the table
    pub fn table(&self) -> &ParamTable {
        &self.table
    }

    /// Backend access (tests and diagnostics)
    pub fn eeprom(&self) -> &E {
        &self.eeprom
    }

    /// Mutable backend access (tests and diagnostics)
    pub fn eeprom_mut(&mut self) -> &mut E {
        &mut self.eeprom
    }

    pub fn get_int(&self, id: ParamId) -> i32 {
        self.table.get_int(id)
    }

    pub fn get_float(&self, id: ParamId) -> f32 {
        self.table.get_float(id)
    }

    pub fn name_str(&self, id: ParamId) -> &str {
        self.table.name_str(id)
    }

    pub fn name(&self, id: ParamId) -> &[u8; PARAM_NAME_LEN] {
        self.table.name(id)
    }

    pub fn param_type(&self, id: ParamId) -> ParamType {
        self.table.param_type(id)
    }

    pub fn lookup(&self, name: &str) -> Option<ParamId> {
        self.table.lookup(name)
    }

    pub fn set_int<N: ParamNotifier>(&mut self, id: ParamId, value: i32, notifier: &mut N) -> bool {
        self.table.set_int(id, value, notifier)
    }

    pub fn set_float<N: ParamNotifier>(
        &mut self,
        id: ParamId,
        value: f32,
        notifier: &mut N,
    ) -> bool {
        self.table.set_float(id, value, notifier)
    }

    pub fn set_by_name_int<N: ParamNotifier>(
        &mut self,
        name: &str,
        value: i32,
        notifier: &mut N,
    ) -> bool {
        self.table.set_by_name_int(name, value, notifier)
    }

    pub fn set_by_name_float<N: ParamNotifier>(
        &mut self,
        name: &str,
        value: f32,
        notifier: &mut N,
    ) -> bool {
        self.table.set_by_name_float(name, value, notifier)
    }
}
