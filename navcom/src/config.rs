#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_BUFFER_CAPACITY, DEFAULT_CHUNK_SIZE};

/// What a session does with a message whose checksum trailer does not match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum IntegrityPolicy {
    /// Drop the message and return [`crate::Error::IntegrityFailure`]
    #[default]
    Discard,
    /// Keep the message, log a warning and set [`crate::MessageFlags::CHECKSUM_FAILED`]
    Flag,
    /// Do not check the trailer at all
    Ignore,
}

/// Tunables of a [`crate::Session`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Size of the receive buffer, fixed for the life of the session
    pub buffer_capacity: usize,
    /// Upper bound of a single transport read
    pub chunk_size: usize,
    pub integrity: IntegrityPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            chunk_size: DEFAULT_CHUNK_SIZE,
            integrity: IntegrityPolicy::default(),
        }
    }
}

impl SessionConfig {
    pub fn with_buffer_capacity(mut self, buffer_capacity: usize) -> Self {
        self.buffer_capacity = buffer_capacity;
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_integrity(mut self, integrity: IntegrityPolicy) -> Self {
        self.integrity = integrity;
        self
    }
}
