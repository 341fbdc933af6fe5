//! Telemetry streaming
//!
//! Owns the stream scheduler and turns firings into outbound messages:
//!
//! - **HEARTBEAT**: liveness beacon
//! - **ATTITUDE**: estimator attitude and body rates
//! - **SCALED_IMU**: latest IMU sample
//! - low-priority: drains at most one deferred parameter announcement per
//!   firing, keeping a full-table dump from saturating the link

use mavlink::common::{
    MavAutopilot, MavMessage, MavModeFlag, MavState, MavType, ATTITUDE_DATA, HEARTBEAT_DATA,
    SCALED_IMU_DATA,
};

use crate::communication::mavlink::handlers::ParamHandler;
use crate::communication::mavlink::outbox::Outbox;
use crate::communication::mavlink::state::VehicleState;
use crate::parameters::ParamTable;
use crate::scheduler::{StreamId, StreamScheduler, StreamSink};

/// Standard gravity, for accelerometer scaling to milli-g
const GRAVITY_MSS: f32 = 9.80665;

/// Periodic telemetry sender
#[derive(Debug, Default)]
pub struct TelemetryStreamer {
    scheduler: StreamScheduler,
}

impl TelemetryStreamer {
    pub fn new() -> Self {
        Self {
            scheduler: StreamScheduler::new(),
        }
    }

    pub fn scheduler(&self) -> &StreamScheduler {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut StreamScheduler {
        &mut self.scheduler
    }

    /// Advance the stream table to `now_us`, queueing a message for every
    /// stream that fires.
    pub fn run(
        &mut self,
        now_us: u64,
        state: &VehicleState,
        table: &ParamTable,
        params: &mut ParamHandler,
        outbox: &mut Outbox,
    ) {
        let mut sink = MessageSink {
            now_us,
            state,
            table,
            params,
            outbox,
        };
        self.scheduler.advance(now_us, &mut sink);
    }
}

/// Sink translating stream firings into queued messages
struct MessageSink<'a> {
    now_us: u64,
    state: &'a VehicleState,
    table: &'a ParamTable,
    params: &'a mut ParamHandler,
    outbox: &'a mut Outbox,
}

impl StreamSink for MessageSink<'_> {
    fn send(&mut self, stream: StreamId) {
        match stream {
            StreamId::Heartbeat => self.outbox.push(build_heartbeat()),
            StreamId::Attitude => self.outbox.push(build_attitude(self.state, self.now_us)),
            StreamId::Imu => self.outbox.push(build_imu(self.state)),
            StreamId::LowPriority => {
                if let Some(msg) = self.params.next_announcement(self.table) {
                    self.outbox.push(msg);
                }
            }
        }
    }
}

fn build_heartbeat() -> MavMessage {
    MavMessage::HEARTBEAT(HEARTBEAT_DATA {
        custom_mode: 0,
        mavtype: MavType::MAV_TYPE_GENERIC,
        autopilot: MavAutopilot::MAV_AUTOPILOT_GENERIC,
        base_mode: MavModeFlag::empty(),
        system_status: MavState::MAV_STATE_STANDBY,
        mavlink_version: 3,
    })
}

fn build_attitude(state: &VehicleState, now_us: u64) -> MavMessage {
    let (roll, pitch, yaw) = state.attitude.euler_angles();
    MavMessage::ATTITUDE(ATTITUDE_DATA {
        time_boot_ms: (now_us / 1000) as u32,
        roll,
        pitch,
        yaw,
        rollspeed: state.angular_rate.x,
        pitchspeed: state.angular_rate.y,
        yawspeed: state.angular_rate.z,
    })
}

fn build_imu(state: &VehicleState) -> MavMessage {
    MavMessage::SCALED_IMU(SCALED_IMU_DATA {
        time_boot_ms: (state.imu_time_us / 1000) as u32,
        xacc: (state.accel.x / GRAVITY_MSS * 1000.0) as i16,
        yacc: (state.accel.y / GRAVITY_MSS * 1000.0) as i16,
        zacc: (state.accel.z / GRAVITY_MSS * 1000.0) as i16,
        xgyro: (state.angular_rate.x * 1000.0) as i16,
        ygyro: (state.angular_rate.y * 1000.0) as i16,
        zgyro: (state.angular_rate.z * 1000.0) as i16,
        ..Default::default()
    })
}
