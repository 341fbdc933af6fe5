//! MAVLink task
//!
//! Single-threaded coordinator owning the parameter store, protocol
//! handlers and telemetry streamer. The surrounding firmware loop feeds it
//! decoded inbound messages, advances it with the monotonic clock and
//! drains its outbound queue into the transport; nothing in here suspends
//! or blocks beyond the synchronous storage calls.

use mavlink::common::{MavMessage, TIMESYNC_DATA};

use crate::communication::mavlink::handlers::{CommandHandler, ParamHandler};
use crate::communication::mavlink::notifier::ConfigNotifier;
use crate::communication::mavlink::outbox::Outbox;
use crate::communication::mavlink::state::{LinkIdentity, VehicleState};
use crate::communication::mavlink::telemetry::TelemetryStreamer;
use crate::parameters::ParamStore;
use crate::platform::{BoardInterface, EepromInterface, Sensors};
use crate::scheduler::StreamScheduler;

/// Delay before a commanded reset, letting the acknowledgment flush
const REBOOT_ACK_DELAY_MS: u32 = 20;

/// The per-board MAVLink task.
///
/// One instance exists per board; it is constructed explicitly and passed
/// around by reference rather than living behind a global.
pub struct MavlinkTask<E: EepromInterface, B: BoardInterface, S: Sensors> {
    store: ParamStore<E>,
    param_handler: ParamHandler,
    command_handler: CommandHandler,
    streamer: TelemetryStreamer,
    state: VehicleState,
    link: LinkIdentity,
    board: B,
    sensors: S,
    outbox: Outbox,
}

impl<E: EepromInterface, B: BoardInterface, S: Sensors> MavlinkTask<E, B, S> {
    pub fn new(eeprom: E, board: B, sensors: S) -> Self {
        Self {
            store: ParamStore::new(eeprom),
            param_handler: ParamHandler::new(),
            command_handler: CommandHandler::new(),
            streamer: TelemetryStreamer::new(),
            state: VehicleState::default(),
            link: LinkIdentity::default(),
            board,
            sensors,
            outbox: Outbox::new(),
        }
    }

    /// Boot-time initialization: restore (or default and persist) the
    /// parameter table, then apply every parameter's side effect in id
    /// order. This is what loads the configured stream rates and system id
    /// into the scheduler and link.
    pub fn init(&mut self) {
        let mut notifier = ConfigNotifier::new(
            self.streamer.scheduler_mut(),
            &mut self.link,
            &mut self.sensors,
            &mut self.outbox,
        );
        self.store.init(&mut notifier);
    }

    /// Route one decoded inbound message.
    pub fn handle_message(&mut self, msg: &MavMessage) {
        match msg {
            MavMessage::PARAM_REQUEST_LIST(data) => {
                self.param_handler.handle_request_list(data);
            }
            MavMessage::PARAM_REQUEST_READ(data) => {
                if let Some(reply) = self.param_handler.handle_request_read(self.store.table(), data)
                {
                    self.outbox.push(reply);
                }
            }
            MavMessage::PARAM_SET(data) => {
                let mut notifier = ConfigNotifier::new(
                    self.streamer.scheduler_mut(),
                    &mut self.link,
                    &mut self.sensors,
                    &mut self.outbox,
                );
                self.param_handler
                    .handle_set(data, &mut self.store, &mut notifier);
            }
            MavMessage::COMMAND_LONG(data) => {
                let (ack, reboot) =
                    self.command_handler
                        .handle_command_long(data, &mut self.store, &mut self.sensors);
                self.outbox.push(MavMessage::COMMAND_ACK(ack));

                if let Some(req) = reboot {
                    crate::log_info!("rebooting by command");
                    self.board.delay_ms(REBOOT_ACK_DELAY_MS);
                    self.board.system_reset(req.to_bootloader);
                }
            }
            MavMessage::TIMESYNC(data) => {
                // only requests (tc1 == 0) get an answer
                if data.tc1 == 0 {
                    let now_ns = self.board.now_us() as i64 * 1000;
                    self.outbox.push(MavMessage::TIMESYNC(TIMESYNC_DATA {
                        tc1: now_ns,
                        ts1: data.ts1,
                        ..Default::default()
                    }));
                }
            }
            _ => {}
        }
    }

    /// Advance the telemetry streams to `now_us`.
    pub fn tick(&mut self, now_us: u64) {
        self.streamer.run(
            now_us,
            &self.state,
            self.store.table(),
            &mut self.param_handler,
            &mut self.outbox,
        );
    }

    /// Take the oldest outbound message for transmission.
    pub fn next_outbound(&mut self) -> Option<MavMessage> {
        self.outbox.pop()
    }

    /// Set a parameter by name from local (non-protocol) code, with full
    /// notification and push-on-change semantics.
    pub fn set_param_by_name_int(&mut self, name: &str, value: i32) -> bool {
        let mut notifier = ConfigNotifier::new(
            self.streamer.scheduler_mut(),
            &mut self.link,
            &mut self.sensors,
            &mut self.outbox,
        );
        self.store.set_by_name_int(name, value, &mut notifier)
    }

    /// Float counterpart of [`MavlinkTask::set_param_by_name_int`].
    pub fn set_param_by_name_float(&mut self, name: &str, value: f32) -> bool {
        let mut notifier = ConfigNotifier::new(
            self.streamer.scheduler_mut(),
            &mut self.link,
            &mut self.sensors,
            &mut self.outbox,
        );
        self.store.set_by_name_float(name, value, &mut notifier)
    }

    pub fn params(&self) -> &ParamStore<E> {
        &self.store
    }

    pub fn params_mut(&mut self) -> &mut ParamStore<E> {
        &mut self.store
    }

    pub fn scheduler(&self) -> &StreamScheduler {
        self.streamer.scheduler()
    }

    pub fn link(&self) -> LinkIdentity {
        self.link
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    pub fn sensors(&self) -> &S {
        &self.sensors
    }

    pub fn vehicle_state_mut(&mut self) -> &mut VehicleState {
        &mut self.state
    }

    pub fn pending_outbound(&self) -> usize {
        self.outbox.len()
    }
}
