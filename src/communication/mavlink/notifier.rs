//! Configuration change notifier
//!
//! Maps parameter ids to their side effects on other subsystems: link
//! identity, telemetry stream rates and the camera frame rate. Parameters
//! without a defined effect fall through silently.

use crate::communication::mavlink::handlers::param_value_message;
use crate::communication::mavlink::outbox::Outbox;
use crate::communication::mavlink::state::LinkIdentity;
use crate::parameters::{ParamId, ParamNotifier, ParamTable};
use crate::platform::Sensors;
use crate::scheduler::{StreamId, StreamScheduler};

/// Notifier wiring parameter changes into the owning subsystems.
///
/// Borrows its targets for the duration of one store operation, so the
/// parameter store never holds references into the subsystems it
/// configures.
pub struct ConfigNotifier<'a, S: Sensors> {
    scheduler: &'a mut StreamScheduler,
    link: &'a mut LinkIdentity,
    sensors: &'a mut S,
    outbox: &'a mut Outbox,
}

impl<'a, S: Sensors> ConfigNotifier<'a, S> {
    pub fn new(
        scheduler: &'a mut StreamScheduler,
        link: &'a mut LinkIdentity,
        sensors: &'a mut S,
        outbox: &'a mut Outbox,
    ) -> Self {
        Self {
            scheduler,
            link,
            sensors,
            outbox,
        }
    }
}

impl<S: Sensors> ParamNotifier for ConfigNotifier<'_, S> {
    fn on_changed(&mut self, id: ParamId, params: &ParamTable) {
        match id {
            ParamId::SystemId => {
                self.link.system_id = params.get_int(id) as u8;
            }
            ParamId::StreamHeartbeatRate => {
                self.scheduler
                    .set_rate(StreamId::Heartbeat, params.get_int(id) as u32);
            }
            ParamId::StreamAttitudeRate => {
                self.scheduler
                    .set_rate(StreamId::Attitude, params.get_int(id) as u32);
            }
            ParamId::StreamImuRate => {
                self.scheduler
                    .set_rate(StreamId::Imu, params.get_int(id) as u32);
            }
            ParamId::CameraFrameRate => {
                self.sensors.set_frame_rate(params.get_float(id));
            }
            _ => {
                // no action needed for this parameter
            }
        }
    }

    fn announce(&mut self, id: ParamId, params: &ParamTable) {
        self.outbox.push(param_value_message(params, id));
    }
}
