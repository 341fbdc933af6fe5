//! Parameter management
//!
//! The typed configuration table, its change-notification contract and the
//! durable on-device record format.

pub mod blob;
pub mod error;
pub mod notifier;
pub mod registry;
pub mod store;

pub use blob::{BlobError, BLOB_LEN};
pub use error::ParamError;
pub use notifier::{NullNotifier, ParamNotifier};
pub use registry::{ParamId, ParamTable, ParamType, PARAM_COUNT, PARAM_NAME_LEN};
pub use store::ParamStore;
