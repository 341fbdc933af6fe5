//! Mock sensor subsystem for testing

use crate::platform::traits::Sensors;

/// Mock sensor hub recording configuration and calibration calls.
#[derive(Debug)]
pub struct MockSensors {
    frame_rate: Option<f32>,
    gyro_calibrations: u32,
    imu_calibrations: u32,
    calibration_result: bool,
}

impl MockSensors {
    /// Create a new mock with calibration set to succeed
    pub fn new() -> Self {
        Self {
            frame_rate: None,
            gyro_calibrations: 0,
            imu_calibrations: 0,
            calibration_result: true,
        }
    }

    /// Last frame rate applied, if any
    pub fn frame_rate(&self) -> Option<f32> {
        self.frame_rate
    }

    /// Number of gyro calibration starts
    pub fn gyro_calibrations(&self) -> u32 {
        self.gyro_calibrations
    }

    /// Number of accelerometer calibration starts
    pub fn imu_calibrations(&self) -> u32 {
        self.imu_calibrations
    }

    /// Make subsequent calibration starts fail
    pub fn set_calibration_result(&mut self, ok: bool) {
        self.calibration_result = ok;
    }
}

impl Default for MockSensors {
    fn default() -> Self {
        Self::new()
    }
}

impl Sensors for MockSensors {
    fn set_frame_rate(&mut self, fps: f32) {
        self.frame_rate = Some(fps);
    }

    fn start_gyro_calibration(&mut self) -> bool {
        self.gyro_calibrations += 1;
        self.calibration_result
    }

    fn start_imu_calibration(&mut self) -> bool {
        self.imu_calibrations += 1;
        self.calibration_result
    }
}
