//! Protocol handlers

pub mod command;
pub mod param;

pub use command::{CommandHandler, RebootRequest};
pub use param::{param_value_message, ParamHandler};
