//! Durable parameter blob format
//!
//! The entire table persists as one fixed-size record bracketed by sentinel
//! magics and closed with a single-byte XOR checksum:
//!
//! ```text
//! version:u8 | size:u16 le | 0xBE | values 22x4 le | names 22x16 |
//! types 22x1 | 0xEF | chk:u8
//! ```
//!
//! `size` declares the payload length and bounds the read; `chk` is the XOR
//! of every preceding byte, magics included. A record is accepted only when
//! every check passes; anything else is treated as absent.

use core::fmt;

use crate::parameters::registry::{ParamTable, ParamType, PARAM_COUNT, PARAM_NAME_LEN};

/// Blob format version
pub const BLOB_VERSION: u8 = 1;

/// Sentinel byte before the payload
pub const MAGIC_LEAD: u8 = 0xBE;

/// Sentinel byte after the payload
pub const MAGIC_TRAIL: u8 = 0xEF;

/// Header length: version, declared size, leading magic
const HEADER_LEN: usize = 4;

/// Payload length: value cells, name fields, type tags
pub const PAYLOAD_LEN: usize = PARAM_COUNT * (4 + PARAM_NAME_LEN + 1);

/// Total record length including trailing magic and checksum
pub const BLOB_LEN: usize = HEADER_LEN + PAYLOAD_LEN + 2;

/// Reasons a persisted record was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlobError {
    /// Buffer shorter than a full record
    Truncated,
    /// Unknown format version
    BadVersion,
    /// Declared payload size does not match this format
    BadSize,
    /// A sentinel byte does not match
    BadMagic,
    /// Checksum mismatch
    BadChecksum,
    /// A type tag decodes to no known parameter type
    BadType,
}

impl fmt::Display for BlobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlobError::Truncated => write!(f, "record truncated"),
            BlobError::BadVersion => write!(f, "unknown format version"),
            BlobError::BadSize => write!(f, "declared size mismatch"),
            BlobError::BadMagic => write!(f, "sentinel byte mismatch"),
            BlobError::BadChecksum => write!(f, "checksum mismatch"),
            BlobError::BadType => write!(f, "invalid parameter type tag"),
        }
    }
}

fn xor_checksum(data: &[u8]) -> u8 {
    data.iter().fold(0, |acc, &b| acc ^ b)
}

/// Serialize the table with fresh magics and checksum.
pub fn encode(table: &ParamTable) -> [u8; BLOB_LEN] {
    let mut buf = [0u8; BLOB_LEN];
    buf[0] = BLOB_VERSION;
    buf[1..3].copy_from_slice(&(PAYLOAD_LEN as u16).to_le_bytes());
    buf[3] = MAGIC_LEAD;

    let mut off = HEADER_LEN;
    for value in table.values() {
        buf[off..off + 4].copy_from_slice(&value.to_le_bytes());
        off += 4;
    }
    for name in table.names() {
        buf[off..off + PARAM_NAME_LEN].copy_from_slice(name);
        off += PARAM_NAME_LEN;
    }
    for ty in table.types() {
        buf[off] = ty.to_u8();
        off += 1;
    }

    buf[off] = MAGIC_TRAIL;
    off += 1;
    buf[off] = xor_checksum(&buf[..off]);
    buf
}

/// Parse and validate a persisted record.
///
/// All-or-nothing: a table is returned only when the version, declared
/// size, both magics, every type tag and the checksum validate.
pub fn decode(buf: &[u8]) -> Result<ParamTable, BlobError> {
    if buf.len() < BLOB_LEN {
        return Err(BlobError::Truncated);
    }
    if buf[0] != BLOB_VERSION {
        return Err(BlobError::BadVersion);
    }
    let declared = u16::from_le_bytes([buf[1], buf[2]]) as usize;
    if declared != PAYLOAD_LEN {
        return Err(BlobError::BadSize);
    }
    if buf[3] != MAGIC_LEAD || buf[HEADER_LEN + PAYLOAD_LEN] != MAGIC_TRAIL {
        return Err(BlobError::BadMagic);
    }
    if xor_checksum(&buf[..BLOB_LEN - 1]) != buf[BLOB_LEN - 1] {
        return Err(BlobError::BadChecksum);
    }

    let mut off = HEADER_LEN;
    let mut values = [0i32; PARAM_COUNT];
    for value in &mut values {
        *value = i32::from_le_bytes([buf[off], buf[off + 1], buf[off + 2], buf[off + 3]]);
        off += 4;
    }

    let mut names = [[0u8; PARAM_NAME_LEN]; PARAM_COUNT];
    for name in &mut names {
        name.copy_from_slice(&buf[off..off + PARAM_NAME_LEN]);
        off += PARAM_NAME_LEN;
    }

    let mut types = [ParamType::Int32; PARAM_COUNT];
    for ty in &mut types {
        *ty = ParamType::from_u8(buf[off]).ok_or(BlobError::BadType)?;
        off += 1;
    }

    Ok(ParamTable::from_raw(values, names, types))
}
