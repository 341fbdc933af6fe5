//! Parameter registry
//!
//! The fixed, compile-time-enumerated table of typed configuration values.
//! Every parameter has a stable ordinal identity, a short uppercase name and
//! a 4-byte value cell holding either an `i32` or the bit pattern of an
//! `f32`, discriminated by a type tag.

use crate::parameters::notifier::ParamNotifier;

/// Maximum parameter name length in bytes (MAVLink param_id field width)
pub const PARAM_NAME_LEN: usize = 16;

/// Number of parameters in the table
pub const PARAM_COUNT: usize = 22;

/// Parameter identity
///
/// The ordinal (`id as usize`) is the array index into the table and the
/// index reported over the parameter protocol. The enumeration is closed:
/// raw indices from the wire must pass through [`ParamId::from_index`], so
/// an out-of-range id cannot reach the accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ParamId {
    // hardware configuration
    BoardRevision = 0,
    BaudRate,
    // link configuration
    SystemId,
    StreamHeartbeatRate,
    StreamAttitudeRate,
    StreamImuRate,
    // estimator configuration
    InitTime,
    FilterKp,
    FilterKi,
    GyroAlpha,
    AccAlpha,
    AccelScale,
    GyroXBias,
    GyroYBias,
    GyroZBias,
    AccXBias,
    AccYBias,
    AccZBias,
    AccXTempComp,
    AccYTempComp,
    AccZTempComp,
    // camera configuration
    CameraFrameRate,
}

impl ParamId {
    /// All parameters in ascending ordinal order
    pub const ALL: [ParamId; PARAM_COUNT] = [
        ParamId::BoardRevision,
        ParamId::BaudRate,
        ParamId::SystemId,
        ParamId::StreamHeartbeatRate,
        ParamId::StreamAttitudeRate,
        ParamId::StreamImuRate,
        ParamId::InitTime,
        ParamId::FilterKp,
        ParamId::FilterKi,
        ParamId::GyroAlpha,
        ParamId::AccAlpha,
        ParamId::AccelScale,
        ParamId::GyroXBias,
        ParamId::GyroYBias,
        ParamId::GyroZBias,
        ParamId::AccXBias,
        ParamId::AccYBias,
        ParamId::AccZBias,
        ParamId::AccXTempComp,
        ParamId::AccYTempComp,
        ParamId::AccZTempComp,
        ParamId::CameraFrameRate,
    ];

    /// Resolve a raw table index, e.g. from a protocol request
    pub fn from_index(index: u16) -> Option<ParamId> {
        Self::ALL.get(index as usize).copied()
    }

    /// Table index of this parameter
    pub fn index(self) -> u16 {
        self as u16
    }
}

/// Parameter value type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// 32-bit signed integer
    Int32,
    /// 32-bit IEEE-754 float
    Float,
}

impl ParamType {
    /// Type discriminant for serialization
    pub fn to_u8(self) -> u8 {
        match self {
            ParamType::Int32 => 0,
            ParamType::Float => 1,
        }
    }

    /// Decode a serialized type discriminant
    pub fn from_u8(value: u8) -> Option<ParamType> {
        match value {
            0 => Some(ParamType::Int32),
            1 => Some(ParamType::Float),
            _ => None,
        }
    }
}

/// Pack a name into the fixed-length field: truncated to
/// [`PARAM_NAME_LEN`] bytes, zero-padded, no terminator when full length.
fn pack_name(name: &str) -> [u8; PARAM_NAME_LEN] {
    let mut packed = [0u8; PARAM_NAME_LEN];
    let bytes = name.as_bytes();
    let len = bytes.len().min(PARAM_NAME_LEN);
    packed[..len].copy_from_slice(&bytes[..len]);
    packed
}

/// The in-memory parameter table
///
/// Values, names and types are kept in parallel arrays mirroring the
/// persisted layout. A freshly constructed table already carries the
/// compiled-in defaults; it is never observable uninitialized.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamTable {
    values: [i32; PARAM_COUNT],
    names: [[u8; PARAM_NAME_LEN]; PARAM_COUNT],
    types: [ParamType; PARAM_COUNT],
}

impl ParamTable {
    /// Create a table populated with defaults
    pub fn new() -> Self {
        let mut table = Self {
            values: [0; PARAM_COUNT],
            names: [[0; PARAM_NAME_LEN]; PARAM_COUNT],
            types: [ParamType::Int32; PARAM_COUNT],
        };
        table.set_defaults();
        table
    }

    /// Rebuild a table from its raw parts (persistence layer only)
    pub(crate) fn from_raw(
        values: [i32; PARAM_COUNT],
        names: [[u8; PARAM_NAME_LEN]; PARAM_COUNT],
        types: [ParamType; PARAM_COUNT],
    ) -> Self {
        Self {
            values,
            names,
            types,
        }
    }

    pub(crate) fn values(&self) -> &[i32; PARAM_COUNT] {
        &self.values
    }

    pub(crate) fn names(&self) -> &[[u8; PARAM_NAME_LEN]; PARAM_COUNT] {
        &self.names
    }

    pub(crate) fn types(&self) -> &[ParamType; PARAM_COUNT] {
        &self.types
    }

    /// Reset every parameter to its compiled-in default.
    ///
    /// Covers each id exactly once; the completeness test below keeps the
    /// list honest.
    pub fn set_defaults(&mut self) {
        // hardware configuration
        self.init_int(ParamId::BoardRevision, "BOARD_REV", 2);
        self.init_int(ParamId::BaudRate, "BAUD_RATE", 921_600);

        // link configuration
        self.init_int(ParamId::SystemId, "SYS_ID", 1);
        self.init_int(ParamId::StreamHeartbeatRate, "STRM_HRTBT", 1);
        self.init_int(ParamId::StreamAttitudeRate, "STRM_ATTITUDE", 100);
        self.init_int(ParamId::StreamImuRate, "STRM_IMU", 500);

        // estimator configuration
        self.init_int(ParamId::InitTime, "FILTER_INIT_T", 3000);
        self.init_float(ParamId::FilterKp, "FILTER_KP", 1.0);
        self.init_float(ParamId::FilterKi, "FILTER_KI", 0.1);
        self.init_float(ParamId::GyroAlpha, "GYRO_LPF_ALPHA", 0.888);
        self.init_float(ParamId::AccAlpha, "ACC_LPF_ALPHA", 0.888);
        self.init_float(ParamId::AccelScale, "ACCEL_SCALE", 1.0);
        self.init_float(ParamId::GyroXBias, "GYRO_X_BIAS", 0.0);
        self.init_float(ParamId::GyroYBias, "GYRO_Y_BIAS", 0.0);
        self.init_float(ParamId::GyroZBias, "GYRO_Z_BIAS", 0.0);
        self.init_float(ParamId::AccXBias, "ACC_X_BIAS", 0.0);
        self.init_float(ParamId::AccYBias, "ACC_Y_BIAS", 0.0);
        self.init_float(ParamId::AccZBias, "ACC_Z_BIAS", 0.0);
        self.init_float(ParamId::AccXTempComp, "ACC_X_TEMP_COMP", 0.0);
        self.init_float(ParamId::AccYTempComp, "ACC_Y_TEMP_COMP", 0.0);
        self.init_float(ParamId::AccZTempComp, "ACC_Z_TEMP_COMP", 0.0);

        // camera configuration
        self.init_float(ParamId::CameraFrameRate, "CAMERA_FRAME_RATE", 28.0);
    }

    fn init_int(&mut self, id: ParamId, name: &str, value: i32) {
        let idx = id as usize;
        self.names[idx] = pack_name(name);
        self.values[idx] = value;
        self.types[idx] = ParamType::Int32;
    }

    fn init_float(&mut self, id: ParamId, name: &str, value: f32) {
        let idx = id as usize;
        self.names[idx] = pack_name(name);
        self.values[idx] = value.to_bits() as i32;
        self.types[idx] = ParamType::Float;
    }

    /// Find a parameter by name.
    ///
    /// Names compare byte-for-byte up to the stored name's terminator or the
    /// full field length; a query that is a strict prefix of a stored name
    /// (or the other way around) does not match.
    pub fn lookup(&self, name: &str) -> Option<ParamId> {
        let query = pack_name(name);
        'ids: for id in ParamId::ALL {
            let stored = &self.names[id as usize];
            for i in 0..PARAM_NAME_LEN {
                if query[i] != stored[i] {
                    continue 'ids;
                }
                if stored[i] == 0 {
                    break;
                }
            }
            return Some(id);
        }
        None
    }

    /// Read a parameter cell as an integer.
    ///
    /// The cell is reinterpreted without consulting the type tag; callers
    /// use the accessor matching the stored type.
    pub fn get_int(&self, id: ParamId) -> i32 {
        self.values[id as usize]
    }

    /// Read a parameter cell as a float (same narrow contract as
    /// [`ParamTable::get_int`]).
    pub fn get_float(&self, id: ParamId) -> f32 {
        f32::from_bits(self.values[id as usize] as u32)
    }

    /// Raw name field of a parameter
    pub fn name(&self, id: ParamId) -> &[u8; PARAM_NAME_LEN] {
        &self.names[id as usize]
    }

    /// Name of a parameter as a string slice (up to the terminator)
    pub fn name_str(&self, id: ParamId) -> &str {
        let raw = &self.names[id as usize];
        let len = raw.iter().position(|&b| b == 0).unwrap_or(PARAM_NAME_LEN);
        core::str::from_utf8(&raw[..len]).unwrap_or("")
    }

    /// Type tag of a parameter
    pub fn param_type(&self, id: ParamId) -> ParamType {
        self.types[id as usize]
    }

    /// Set an integer parameter.
    ///
    /// A no-op returning false when the stored bit pattern already equals
    /// `value`. On change, the notifier's side-effect hook and the remote
    /// announcement both run before this returns.
    pub fn set_int<N: ParamNotifier>(
        &mut self,
        id: ParamId,
        value: i32,
        notifier: &mut N,
    ) -> bool {
        let idx = id as usize;
        if value == self.values[idx] {
            return false;
        }
        self.values[idx] = value;
        notifier.on_changed(id, self);
        notifier.announce(id, self);
        true
    }

    /// Set a float parameter (bit-pattern change check, same contract as
    /// [`ParamTable::set_int`]).
    pub fn set_float<N: ParamNotifier>(
        &mut self,
        id: ParamId,
        value: f32,
        notifier: &mut N,
    ) -> bool {
        self.set_int(id, value.to_bits() as i32, notifier)
    }

    /// Set an integer parameter by name. An unknown name is a silent no-op
    /// reporting "unchanged"; callers that need to distinguish must call
    /// [`ParamTable::lookup`] themselves.
    pub fn set_by_name_int<N: ParamNotifier>(
        &mut self,
        name: &str,
        value: i32,
        notifier: &mut N,
    ) -> bool {
        match self.lookup(name) {
            Some(id) => self.set_int(id, value, notifier),
            None => false,
        }
    }

    /// Set a float parameter by name (see [`ParamTable::set_by_name_int`]).
    pub fn set_by_name_float<N: ParamNotifier>(
        &mut self,
        name: &str,
        value: f32,
        notifier: &mut N,
    ) -> bool {
        self.set_by_name_int(name, value.to_bits() as i32, notifier)
    }
}

impl Default for ParamTable {
    fn default() -> Self {
        Self::new()
    }
}
