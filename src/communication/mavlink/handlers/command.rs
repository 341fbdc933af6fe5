//! Command protocol handler
//!
//! Handles COMMAND_LONG messages for parameter persistence, sensor
//! calibration and reboot.
//!
//! Every command is acknowledged with COMMAND_ACK. Reboot is deliberately
//! fatal: the handler only reports the request; the task acknowledges
//! first, then lets the acknowledgment flush before resetting the board.

use mavlink::common::{MavCmd, MavResult, COMMAND_ACK_DATA, COMMAND_LONG_DATA};

use crate::parameters::ParamStore;
use crate::platform::{EepromInterface, Sensors};

/// A reboot requested over the link, executed by the task after the
/// acknowledgment is queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RebootRequest {
    pub to_bootloader: bool,
}

/// Command handler for COMMAND_LONG messages
#[derive(Debug, Default)]
pub struct CommandHandler;

impl CommandHandler {
    pub fn new() -> Self {
        Self
    }

    /// Handle one COMMAND_LONG message.
    ///
    /// Returns the acknowledgment and, for reboot commands, the deferred
    /// reset request.
    pub fn handle_command_long<E: EepromInterface, S: Sensors>(
        &mut self,
        data: &COMMAND_LONG_DATA,
        store: &mut ParamStore<E>,
        sensors: &mut S,
    ) -> (COMMAND_ACK_DATA, Option<RebootRequest>) {
        let mut reboot = None;

        let result = match data.command {
            MavCmd::MAV_CMD_PREFLIGHT_STORAGE => self.handle_storage(data, store),
            MavCmd::MAV_CMD_PREFLIGHT_CALIBRATION => self.handle_calibration(data, sensors),
            MavCmd::MAV_CMD_PREFLIGHT_REBOOT_SHUTDOWN => match data.param1 as i32 {
                1 => {
                    reboot = Some(RebootRequest { to_bootloader: false });
                    MavResult::MAV_RESULT_ACCEPTED
                }
                3 => {
                    reboot = Some(RebootRequest { to_bootloader: true });
                    MavResult::MAV_RESULT_ACCEPTED
                }
                _ => MavResult::MAV_RESULT_UNSUPPORTED,
            },
            _ => {
                crate::log_warn!("unsupported command {}", data.command as u32);
                MavResult::MAV_RESULT_UNSUPPORTED
            }
        };

        let ack = COMMAND_ACK_DATA {
            command: data.command,
            result,
            ..Default::default()
        };

        (ack, reboot)
    }

    /// MAV_CMD_PREFLIGHT_STORAGE: param1 selects the operation.
    ///
    /// 0 reloads the table from non-volatile memory, 1 persists it, 2 resets
    /// the live table to defaults (RAM only). Persistence failures collapse
    /// to a failed acknowledgment; the cause is logged, not reported.
    fn handle_storage<E: EepromInterface>(
        &mut self,
        data: &COMMAND_LONG_DATA,
        store: &mut ParamStore<E>,
    ) -> MavResult {
        match data.param1 as i32 {
            0 => match store.read() {
                Ok(()) => MavResult::MAV_RESULT_ACCEPTED,
                Err(_e) => {
                    crate::log_error!("parameter reload failed");
                    MavResult::MAV_RESULT_FAILED
                }
            },
            1 => match store.write() {
                Ok(()) => MavResult::MAV_RESULT_ACCEPTED,
                Err(_e) => {
                    crate::log_error!("parameter save failed");
                    MavResult::MAV_RESULT_FAILED
                }
            },
            2 => {
                store.set_defaults();
                MavResult::MAV_RESULT_ACCEPTED
            }
            _ => MavResult::MAV_RESULT_UNSUPPORTED,
        }
    }

    /// MAV_CMD_PREFLIGHT_CALIBRATION: param1 requests gyro calibration,
    /// param5 accelerometer calibration.
    fn handle_calibration<S: Sensors>(
        &mut self,
        data: &COMMAND_LONG_DATA,
        sensors: &mut S,
    ) -> MavResult {
        let gyro = data.param1 as i32 >= 1;
        let accel = data.param5 as i32 >= 1;

        if !gyro && !accel {
            return MavResult::MAV_RESULT_UNSUPPORTED;
        }

        let mut ok = true;
        if gyro {
            ok &= sensors.start_gyro_calibration();
        }
        if accel {
            ok &= sensors.start_imu_calibration();
        }

        if ok {
            MavResult::MAV_RESULT_ACCEPTED
        } else {
            MavResult::MAV_RESULT_FAILED
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::{NullNotifier, ParamId};
    use crate::platform::mock::{MockEeprom, MockSensors};

    fn command(cmd: MavCmd, param1: f32, param5: f32) -> COMMAND_LONG_DATA {
        COMMAND_LONG_DATA {
            param1,
            param2: 0.0,
            param3: 0.0,
            param4: 0.0,
            param5,
            param6: 0.0,
            param7: 0.0,
            command: cmd,
            target_system: 1,
            target_component: 1,
            confirmation: 0,
        }
    }

    fn store() -> ParamStore<MockEeprom> {
        let mut store = ParamStore::new(MockEeprom::new());
        store.init(&mut NullNotifier);
        store
    }

    #[test]
    fn test_storage_write_then_read_roundtrip() {
        let mut store = store();
        let mut sensors = MockSensors::new();
        let mut handler = CommandHandler::new();

        store.set_int(ParamId::SystemId, 7, &mut NullNotifier);
        let (ack, reboot) = handler.handle_command_long(
            &command(MavCmd::MAV_CMD_PREFLIGHT_STORAGE, 1.0, 0.0),
            &mut store,
            &mut sensors,
        );
        assert_eq!(ack.result, MavResult::MAV_RESULT_ACCEPTED);
        assert_eq!(ack.command, MavCmd::MAV_CMD_PREFLIGHT_STORAGE);
        assert!(reboot.is_none());

        store.set_int(ParamId::SystemId, 99, &mut NullNotifier);
        let (ack, _) = handler.handle_command_long(
            &command(MavCmd::MAV_CMD_PREFLIGHT_STORAGE, 0.0, 0.0),
            &mut store,
            &mut sensors,
        );
        assert_eq!(ack.result, MavResult::MAV_RESULT_ACCEPTED);
        assert_eq!(store.get_int(ParamId::SystemId), 7);
    }

    #[test]
    fn test_storage_failure_reports_failed() {
        let mut store = store();
        let mut sensors = MockSensors::new();
        let mut handler = CommandHandler::new();

        store.eeprom_mut().set_fail_writes(true);
        let (ack, _) = handler.handle_command_long(
            &command(MavCmd::MAV_CMD_PREFLIGHT_STORAGE, 1.0, 0.0),
            &mut store,
            &mut sensors,
        );
        assert_eq!(ack.result, MavResult::MAV_RESULT_FAILED);

        store.eeprom_mut().set_fail_writes(false);
        store.eeprom_mut().set_fail_reads(true);
        let (ack, _) = handler.handle_command_long(
            &command(MavCmd::MAV_CMD_PREFLIGHT_STORAGE, 0.0, 0.0),
            &mut store,
            &mut sensors,
        );
        assert_eq!(ack.result, MavResult::MAV_RESULT_FAILED);
    }

    #[test]
    fn test_storage_reset_to_defaults() {
        let mut store = store();
        let mut sensors = MockSensors::new();
        let mut handler = CommandHandler::new();

        store.set_float(ParamId::FilterKp, 5.0, &mut NullNotifier);
        let (ack, _) = handler.handle_command_long(
            &command(MavCmd::MAV_CMD_PREFLIGHT_STORAGE, 2.0, 0.0),
            &mut store,
            &mut sensors,
        );
        assert_eq!(ack.result, MavResult::MAV_RESULT_ACCEPTED);
        assert_eq!(store.get_float(ParamId::FilterKp), 1.0);
    }

    #[test]
    fn test_calibration_routing() {
        let mut store = store();
        let mut sensors = MockSensors::new();
        let mut handler = CommandHandler::new();

        let (ack, _) = handler.handle_command_long(
            &command(MavCmd::MAV_CMD_PREFLIGHT_CALIBRATION, 1.0, 0.0),
            &mut store,
            &mut sensors,
        );
        assert_eq!(ack.result, MavResult::MAV_RESULT_ACCEPTED);
        assert_eq!(sensors.gyro_calibrations(), 1);
        assert_eq!(sensors.imu_calibrations(), 0);

        let (ack, _) = handler.handle_command_long(
            &command(MavCmd::MAV_CMD_PREFLIGHT_CALIBRATION, 0.0, 1.0),
            &mut store,
            &mut sensors,
        );
        assert_eq!(ack.result, MavResult::MAV_RESULT_ACCEPTED);
        assert_eq!(sensors.imu_calibrations(), 1);
    }

    #[test]
    fn test_calibration_failure_reports_failed() {
        let mut store = store();
        let mut sensors = MockSensors::new();
        sensors.set_calibration_result(false);
        let mut handler = CommandHandler::new();

        let (ack, _) = handler.handle_command_long(
            &command(MavCmd::MAV_CMD_PREFLIGHT_CALIBRATION, 1.0, 0.0),
            &mut store,
            &mut sensors,
        );
        assert_eq!(ack.result, MavResult::MAV_RESULT_FAILED);
    }

    #[test]
    fn test_reboot_variants() {
        let mut store = store();
        let mut sensors = MockSensors::new();
        let mut handler = CommandHandler::new();

        let (ack, reboot) = handler.handle_command_long(
            &command(MavCmd::MAV_CMD_PREFLIGHT_REBOOT_SHUTDOWN, 1.0, 0.0),
            &mut store,
            &mut sensors,
        );
        assert_eq!(ack.result, MavResult::MAV_RESULT_ACCEPTED);
        assert_eq!(reboot, Some(RebootRequest { to_bootloader: false }));

        let (_, reboot) = handler.handle_command_long(
            &command(MavCmd::MAV_CMD_PREFLIGHT_REBOOT_SHUTDOWN, 3.0, 0.0),
            &mut store,
            &mut sensors,
        );
        assert_eq!(reboot, Some(RebootRequest { to_bootloader: true }));

        let (ack, reboot) = handler.handle_command_long(
            &command(MavCmd::MAV_CMD_PREFLIGHT_REBOOT_SHUTDOWN, 2.0, 0.0),
            &mut store,
            &mut sensors,
        );
        assert_eq!(ack.result, MavResult::MAV_RESULT_UNSUPPORTED);
        assert!(reboot.is_none());
    }

    #[test]
    fn test_unsupported_command() {
        let mut store = store();
        let mut sensors = MockSensors::new();
        let mut handler = CommandHandler::new();

        let (ack, reboot) = handler.handle_command_long(
            &command(MavCmd::MAV_CMD_NAV_TAKEOFF, 0.0, 0.0),
            &mut store,
            &mut sensors,
        );
        assert_eq!(ack.result, MavResult::MAV_RESULT_UNSUPPORTED);
        assert!(reboot.is_none());
    }
}
