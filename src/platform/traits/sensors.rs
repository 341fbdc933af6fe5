//! Sensor subsystem trait

/// Hooks into the sensor subsystem consumed by configuration changes and
/// preflight commands.
///
/// The sensor pipeline itself (IMU drivers, estimation) lives outside this
/// crate; these are the only entry points the configuration core needs.
pub trait Sensors {
    /// Apply a new camera trigger frame rate in frames per second.
    fn set_frame_rate(&mut self, fps: f32);

    /// Begin gyro bias calibration. Returns false if it cannot start.
    fn start_gyro_calibration(&mut self) -> bool;

    /// Begin accelerometer calibration. Returns false if it cannot start.
    fn start_imu_calibration(&mut self) -> bool;
}
