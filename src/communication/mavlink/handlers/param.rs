//! Parameter protocol handler
//!
//! Implements the GCS-facing parameter protocol:
//!
//! - **PARAM_REQUEST_LIST**: arms a cursor; the full table then drains one
//!   PARAM_VALUE per low-priority stream firing instead of bursting onto
//!   the link
//! - **PARAM_REQUEST_READ**: answered immediately, by index or by name
//! - **PARAM_SET**: resolved by name; the reply is the push-on-change
//!   announcement, so an unchanged value produces no traffic
//!
//! Integer parameters travel byte-wise inside the f32 `param_value` field
//! (bit reinterpretation, not numeric conversion), in both directions.

use mavlink::common::{
    MavMessage, MavParamType, PARAM_REQUEST_LIST_DATA, PARAM_REQUEST_READ_DATA, PARAM_SET_DATA,
    PARAM_VALUE_DATA,
};

use crate::parameters::{ParamId, ParamNotifier, ParamStore, ParamTable, ParamType, PARAM_COUNT};
use crate::platform::EepromInterface;

/// Build the PARAM_VALUE message announcing one parameter's current value.
pub fn param_value_message(table: &ParamTable, id: ParamId) -> MavMessage {
    let param_type = match table.param_type(id) {
        ParamType::Int32 => MavParamType::MAV_PARAM_TYPE_INT32,
        ParamType::Float => MavParamType::MAV_PARAM_TYPE_REAL32,
    };
    MavMessage::PARAM_VALUE(PARAM_VALUE_DATA {
        param_value: f32::from_bits(table.get_int(id) as u32),
        param_count: PARAM_COUNT as u16,
        param_index: id.index(),
        param_id: *table.name(id),
        param_type,
    })
}

/// Parameter protocol handler; owns the deferred list-drain cursor.
#[derive(Debug, Default)]
pub struct ParamHandler {
    /// Next table index to announce, when a list request is draining
    list_cursor: Option<u16>,
}

impl ParamHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle PARAM_REQUEST_LIST: restart the deferred drain from the top.
    pub fn handle_request_list(&mut self, _data: &PARAM_REQUEST_LIST_DATA) {
        self.list_cursor = Some(0);
    }

    /// Handle PARAM_REQUEST_READ.
    ///
    /// A non-negative index takes precedence over the name, mirroring the
    /// wire protocol. Unknown index or name yields no reply.
    pub fn handle_request_read(
        &self,
        table: &ParamTable,
        data: &PARAM_REQUEST_READ_DATA,
    ) -> Option<MavMessage> {
        if data.param_index >= 0 {
            let id = ParamId::from_index(data.param_index as u16)?;
            return Some(param_value_message(table, id));
        }

        let name = decode_param_id(&data.param_id)?;
        let id = table.lookup(name)?;
        Some(param_value_message(table, id))
    }

    /// Handle PARAM_SET. Returns true when a value actually changed.
    pub fn handle_set<E: EepromInterface, N: ParamNotifier>(
        &self,
        data: &PARAM_SET_DATA,
        store: &mut ParamStore<E>,
        notifier: &mut N,
    ) -> bool {
        let name = match decode_param_id(&data.param_id) {
            Some(name) => name,
            None => return false,
        };

        match data.param_type {
            MavParamType::MAV_PARAM_TYPE_REAL32 => {
                store.set_by_name_float(name, data.param_value, notifier)
            }
            MavParamType::MAV_PARAM_TYPE_INT32
            | MavParamType::MAV_PARAM_TYPE_UINT32
            | MavParamType::MAV_PARAM_TYPE_INT16
            | MavParamType::MAV_PARAM_TYPE_UINT16
            | MavParamType::MAV_PARAM_TYPE_INT8
            | MavParamType::MAV_PARAM_TYPE_UINT8 => {
                store.set_by_name_int(name, data.param_value.to_bits() as i32, notifier)
            }
            _ => {
                crate::log_warn!("unsupported param type in PARAM_SET");
                false
            }
        }
    }

    /// Emit the next deferred announcement, at most one per call.
    ///
    /// Called from the low-priority stream firing; returns None once the
    /// drain is complete.
    pub fn next_announcement(&mut self, table: &ParamTable) -> Option<MavMessage> {
        let index = self.list_cursor?;
        let id = ParamId::from_index(index)?;
        self.list_cursor = if usize::from(index) + 1 < PARAM_COUNT {
            Some(index + 1)
        } else {
            None
        };
        Some(param_value_message(table, id))
    }

    /// True while a list request is still draining
    pub fn announcing(&self) -> bool {
        self.list_cursor.is_some()
    }
}

/// Decode the fixed-width param_id field: UTF-8, trailing NULs stripped.
fn decode_param_id(raw: &[u8; 16]) -> Option<&str> {
    core::str::from_utf8(raw).ok().map(|s| s.trim_end_matches('\0'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::NullNotifier;
    use crate::platform::mock::MockEeprom;

    fn encoded_name(name: &str) -> [u8; 16] {
        let mut raw = [0u8; 16];
        raw[..name.len()].copy_from_slice(name.as_bytes());
        raw
    }

    fn store() -> ParamStore<MockEeprom> {
        let mut store = ParamStore::new(MockEeprom::new());
        store.init(&mut NullNotifier);
        store
    }

    #[test]
    fn test_request_read_by_index() {
        let store = store();
        let handler = ParamHandler::new();

        let reply = handler
            .handle_request_read(
                store.table(),
                &PARAM_REQUEST_READ_DATA {
                    param_index: ParamId::BaudRate.index() as i16,
                    target_system: 1,
                    target_component: 1,
                    param_id: [0; 16],
                },
            )
            .unwrap();

        match reply {
            MavMessage::PARAM_VALUE(data) => {
                assert_eq!(data.param_index, ParamId::BaudRate.index());
                assert_eq!(data.param_count, PARAM_COUNT as u16);
                assert_eq!(data.param_value.to_bits(), 921_600u32);
                assert_eq!(data.param_type, MavParamType::MAV_PARAM_TYPE_INT32);
            }
            other => panic!("unexpected reply {:?}", other),
        }
    }

    #[test]
    fn test_request_read_by_name() {
        let store = store();
        let handler = ParamHandler::new();

        let reply = handler
            .handle_request_read(
                store.table(),
                &PARAM_REQUEST_READ_DATA {
                    param_index: -1,
                    target_system: 1,
                    target_component: 1,
                    param_id: encoded_name("FILTER_KP"),
                },
            )
            .unwrap();

        match reply {
            MavMessage::PARAM_VALUE(data) => {
                assert_eq!(data.param_index, ParamId::FilterKp.index());
                assert_eq!(data.param_value, 1.0);
                assert_eq!(data.param_type, MavParamType::MAV_PARAM_TYPE_REAL32);
            }
            other => panic!("unexpected reply {:?}", other),
        }
    }

    #[test]
    fn test_request_read_unknown_yields_nothing() {
        let store = store();
        let handler = ParamHandler::new();

        assert!(handler
            .handle_request_read(
                store.table(),
                &PARAM_REQUEST_READ_DATA {
                    param_index: PARAM_COUNT as i16,
                    target_system: 1,
                    target_component: 1,
                    param_id: [0; 16],
                },
            )
            .is_none());

        assert!(handler
            .handle_request_read(
                store.table(),
                &PARAM_REQUEST_READ_DATA {
                    param_index: -1,
                    target_system: 1,
                    target_component: 1,
                    param_id: encoded_name("BAUD"),
                },
            )
            .is_none());
    }

    #[test]
    fn test_set_float_param() {
        let mut store = store();
        let handler = ParamHandler::new();

        let changed = handler.handle_set(
            &PARAM_SET_DATA {
                param_value: 2.5,
                target_system: 1,
                target_component: 1,
                param_id: encoded_name("FILTER_KP"),
                param_type: MavParamType::MAV_PARAM_TYPE_REAL32,
            },
            &mut store,
            &mut NullNotifier,
        );

        assert!(changed);
        assert_eq!(store.get_float(ParamId::FilterKp), 2.5);
    }

    #[test]
    fn test_set_int_param_travels_as_bits() {
        let mut store = store();
        let handler = ParamHandler::new();

        let changed = handler.handle_set(
            &PARAM_SET_DATA {
                param_value: f32::from_bits(57_600),
                target_system: 1,
                target_component: 1,
                param_id: encoded_name("BAUD_RATE"),
                param_type: MavParamType::MAV_PARAM_TYPE_INT32,
            },
            &mut store,
            &mut NullNotifier,
        );

        assert!(changed);
        assert_eq!(store.get_int(ParamId::BaudRate), 57_600);
    }

    #[test]
    fn test_set_unknown_name_is_noop() {
        let mut store = store();
        let handler = ParamHandler::new();

        let changed = handler.handle_set(
            &PARAM_SET_DATA {
                param_value: 1.0,
                target_system: 1,
                target_component: 1,
                param_id: encoded_name("NO_SUCH_PARAM"),
                param_type: MavParamType::MAV_PARAM_TYPE_REAL32,
            },
            &mut store,
            &mut NullNotifier,
        );

        assert!(!changed);
    }

    #[test]
    fn test_list_drains_one_per_call_ascending() {
        let store = store();
        let mut handler = ParamHandler::new();

        assert!(handler.next_announcement(store.table()).is_none());

        handler.handle_request_list(&PARAM_REQUEST_LIST_DATA {
            target_system: 1,
            target_component: 1,
        });

        for expected in 0..PARAM_COUNT as u16 {
            let msg = handler.next_announcement(store.table()).unwrap();
            match msg {
                MavMessage::PARAM_VALUE(data) => assert_eq!(data.param_index, expected),
                other => panic!("unexpected message {:?}", other),
            }
        }
        assert!(handler.next_announcement(store.table()).is_none());
        assert!(!handler.announcing());
    }

    #[test]
    fn test_list_request_restarts_drain() {
        let store = store();
        let mut handler = ParamHandler::new();

        handler.handle_request_list(&PARAM_REQUEST_LIST_DATA {
            target_system: 1,
            target_component: 1,
        });
        handler.next_announcement(store.table()).unwrap();
        handler.next_announcement(store.table()).unwrap();

        handler.handle_request_list(&PARAM_REQUEST_LIST_DATA {
            target_system: 1,
            target_component: 1,
        });
        match handler.next_announcement(store.table()).unwrap() {
            MavMessage::PARAM_VALUE(data) => assert_eq!(data.param_index, 0),
            other => panic!("unexpected message {:?}", other),
        }
    }
}
