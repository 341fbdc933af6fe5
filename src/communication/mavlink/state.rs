//! Link identity and vehicle state snapshot

use nalgebra::{UnitQuaternion, Vector3};

/// MAVLink identity used when framing outbound messages.
///
/// The system id follows the SYS_ID parameter through the configuration
/// notifier; the transport layer reads it when encoding headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkIdentity {
    pub system_id: u8,
    pub component_id: u8,
}

impl Default for LinkIdentity {
    fn default() -> Self {
        Self {
            system_id: 1,
            component_id: 1,
        }
    }
}

/// Snapshot of estimator and IMU outputs consumed by telemetry builders.
///
/// The estimation pipeline lives outside this crate and refreshes these
/// fields from the main loop; builders only ever read them.
#[derive(Debug, Clone)]
pub struct VehicleState {
    /// Attitude estimate (body to world)
    pub attitude: UnitQuaternion<f32>,
    /// Body angular rates in rad/s
    pub angular_rate: Vector3<f32>,
    /// Specific force in m/s^2
    pub accel: Vector3<f32>,
    /// Timestamp of the latest IMU sample, microseconds since boot
    pub imu_time_us: u64,
    /// IMU die temperature in degrees C
    pub imu_temperature: f32,
}

impl Default for VehicleState {
    fn default() -> Self {
        Self {
            attitude: UnitQuaternion::identity(),
            angular_rate: Vector3::zeros(),
            accel: Vector3::zeros(),
            imu_time_us: 0,
            imu_temperature: 0.0,
        }
    }
}
