use std::io;

use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Errors surfaced by the session, the framer and the record decoders
#[derive(Debug, Error)]
pub enum Error {
    /// The transport could not be opened (device absent, permission denied, already claimed)
    #[error("device unavailable: {source}")]
    DeviceUnavailable {
        #[source]
        source: io::Error,
    },

    /// Commands must begin with `[`
    #[error("command does not start with '['")]
    InvalidCommand,

    #[error("malformed message: {0}")]
    MalformedMessage(#[from] MalformedMessage),

    /// A decoder was used on a message of another type
    #[error("unsupported mnemonic {mnemonic}, expected {expected}")]
    UnsupportedMnemonic {
        mnemonic: String,
        expected: &'static str,
    },

    #[error("checksum mismatch, expect {expected:04X}, got {computed:04X}")]
    IntegrityFailure { expected: u16, computed: u16 },

    /// A transport read failed. `received` bytes are left in the receive buffer.
    #[error("transport read failed after {received} bytes: {source}")]
    Io {
        received: usize,
        #[source]
        source: io::Error,
    },

    /// The transport reported end of stream before the terminator arrived.
    /// `received` bytes are left in the receive buffer.
    #[error("stream ended after {received} bytes without a terminator")]
    Truncated { received: usize },

    #[error("transport write failed: {0}")]
    Write(#[source] io::Error),

    #[error("receive buffer overflow, capacity {capacity}, needed {needed}")]
    BufferOverflow { capacity: usize, needed: usize },

    #[error("session is closed")]
    SessionClosed,
}

/// Reasons a message could not be framed or decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedMessage {
    #[error("message is empty")]
    Empty,
    #[error("message starts with {found:#04x} instead of '['")]
    MissingStartMarker { found: u8 },
    #[error("mnemonic has no closing ']'")]
    UnterminatedMnemonic,
    #[error("mnemonic is not ASCII")]
    NonAsciiMnemonic,
    #[error("field at offset {offset} needs {needed} bytes, message holds {available}")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("message carries no checksum trailer")]
    MissingChecksum,
    #[error("checksum field is not hexadecimal")]
    InvalidChecksumField,
}

impl Error {
    /// Number of bytes left in the receive buffer by an interrupted read
    pub fn received(&self) -> Option<usize> {
        match self {
            Error::Io { received, .. } | Error::Truncated { received } => Some(*received),
            _ => None,
        }
    }
}
