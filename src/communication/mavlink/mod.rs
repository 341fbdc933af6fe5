//! MAVLink boundary layer
//!
//! Routes decoded inbound messages to the parameter store and command
//! handlers, and builds semantic outbound messages for the transport to
//! encode. Frame parsing and serialization live outside this crate.

pub mod handlers;
pub mod notifier;
pub mod outbox;
pub mod state;
pub mod task;
pub mod telemetry;

pub use handlers::{CommandHandler, ParamHandler, RebootRequest};
pub use notifier::ConfigNotifier;
pub use outbox::{Outbox, OUTBOX_CAPACITY};
pub use state::{LinkIdentity, VehicleState};
pub use task::MavlinkTask;
pub use telemetry::TelemetryStreamer;
