//! Byte-stream access to the receiver.
//!
//! The kernel driver exposes the receiver's bulk endpoints as a character
//! device, so on Linux the receiver is reached by opening that node. Anything
//! else that can hand out a blocking `Read + Write` handle can stand in for it.

use std::{
    fs::{File, OpenOptions},
    io::{self, Read, Write},
    path::{Path, PathBuf},
};

use crate::constants::{DEFAULT_DEVICE_PATH, DEVICE_NODE_PREFIX};

#[cfg(feature = "serialport")]
mod serial;
#[cfg(feature = "serialport")]
pub use serial::SerialTransport;

/// Source of byte-stream handles to one receiver
pub trait Transport {
    type Handle: Read + Write;

    /// Acquires a handle, failing if the device is absent, not accessible or
    /// already claimed
    fn open(&mut self) -> io::Result<Self::Handle>;

    /// Releases a handle obtained from [`Transport::open`]
    fn close(&mut self, handle: Self::Handle) {
        drop(handle);
    }
}

/// Character device created by the kernel driver for an attached receiver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceFile {
    path: PathBuf,
}

impl Default for DeviceFile {
    fn default() -> Self {
        Self::new(DEFAULT_DEVICE_PATH)
    }
}

impl DeviceFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Node the driver creates for the `index`th attached receiver
    pub fn with_index(index: usize) -> Self {
        Self::new(format!("{DEVICE_NODE_PREFIX}{index}"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Transport for DeviceFile {
    type Handle = File;

    fn open(&mut self) -> io::Result<File> {
        OpenOptions::new().read(true).write(true).open(&self.path)
    }
}
