//! Communication protocols

pub mod mavlink;
