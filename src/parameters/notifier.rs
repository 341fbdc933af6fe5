//! Parameter change notification
//!
//! Setters complete both hooks before returning, so a caller that observes
//! a successful set can rely on the side effects and the remote
//! announcement having happened.

use crate::parameters::registry::{ParamId, ParamTable};

/// Receiver for parameter change events.
///
/// `on_changed` maps a parameter id to its side effect on other subsystems
/// (stream rates, link identity, camera frame rate); ids without a defined
/// effect are ignored, which is not an error. `announce` reports the new
/// value to the remote peer, independent of any telemetry stream.
pub trait ParamNotifier {
    /// Apply the side effect for a changed parameter.
    fn on_changed(&mut self, id: ParamId, params: &ParamTable);

    /// Report the parameter's current value to the remote peer.
    fn announce(&mut self, id: ParamId, params: &ParamTable);
}

/// Notifier that ignores every event.
pub struct NullNotifier;

impl ParamNotifier for NullNotifier {
    fn on_changed(&mut self, _id: ParamId, _params: &ParamTable) {}

    fn announce(&mut self, _id: ParamId, _params: &ParamTable) {}
}
