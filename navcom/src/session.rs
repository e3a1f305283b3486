use std::io::Write;

use bitflags::bitflags;
use tracing::{debug, warn};

use crate::{
    config::{IntegrityPolicy, SessionConfig},
    constants::COMMAND_START,
    error::{Error, MalformedMessage, Result},
    parser::{buffer::ReceiveBuffer, checksum, framer::MessageFramer, parse_mnemonic},
    records::{self, Pvt1b, Record, Velocity},
    transport::Transport,
};

bitflags! {
    /// State of the message held in the receive buffer
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MessageFlags: u8 {
        /// The message ended with CR LF
        const TERMINATED = 0x01;
        /// The checksum trailer was checked and matched
        const CHECKSUM_VERIFIED = 0x02;
        /// The checksum trailer did not match and the message was kept anyway
        const CHECKSUM_FAILED = 0x04;
    }
}

/// One open conversation with a receiver.
///
/// The session owns the transport handle and the receive buffer. Each
/// [`Session::read_message`] overwrites the buffer, and every decoded view
/// borrows it, so a view cannot survive the next read.
///
/// Dropping the session closes the handle.
pub struct Session<T: Transport> {
    transport: T,
    handle: Option<T::Handle>,
    buffer: ReceiveBuffer,
    framer: MessageFramer,
    config: SessionConfig,
    flags: MessageFlags,
}

impl<T: Transport> Session<T> {
    /// Builds a closed session
    pub fn new(transport: T, config: SessionConfig) -> Self {
        Self {
            transport,
            handle: None,
            buffer: ReceiveBuffer::with_capacity(config.buffer_capacity),
            framer: MessageFramer::new(config.chunk_size),
            config,
            flags: MessageFlags::empty(),
        }
    }

    /// Builds a session and opens it
    pub fn connect(transport: T, config: SessionConfig) -> Result<Self> {
        let mut session = Self::new(transport, config);
        session.open()?;
        Ok(session)
    }

    /// Acquires the transport handle, a no-op if the session is already open
    pub fn open(&mut self) -> Result<()> {
        if self.handle.is_some() {
            return Ok(());
        }
        let handle = self
            .transport
            .open()
            .map_err(|source| Error::DeviceUnavailable { source })?;
        self.handle = Some(handle);
        debug!("session opened");
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Releases the transport handle. Closing a closed session does nothing.
    pub fn close(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.transport.close(handle);
            debug!("session closed");
        }
    }

    /// Sends a command such as `[PVT1B]` and returns how many bytes the
    /// transport accepted
    pub fn write_command(&mut self, command: &[u8]) -> Result<usize> {
        let handle = self.handle.as_mut().ok_or(Error::SessionClosed)?;
        if command.first() != Some(&COMMAND_START) {
            return Err(Error::InvalidCommand);
        }
        let written = handle.write(command).map_err(Error::Write)?;
        handle.flush().map_err(Error::Write)?;
        debug!(
            command = %String::from_utf8_lossy(command),
            written,
            "command sent"
        );
        Ok(written)
    }

    /// Reads the next CR LF terminated message into the receive buffer and
    /// returns its length.
    ///
    /// The checksum trailer is then handled according to the configured
    /// [`IntegrityPolicy`]. On [`Error::Io`] and [`Error::Truncated`] the
    /// partial message stays in the buffer.
    pub fn read_message(&mut self) -> Result<usize> {
        self.flags = MessageFlags::empty();
        let handle = self.handle.as_mut().ok_or(Error::SessionClosed)?;
        let len = self.framer.read_message(handle, &mut self.buffer)?;
        self.flags.insert(MessageFlags::TERMINATED);
        debug!(len, "message received");

        match self.config.integrity {
            IntegrityPolicy::Ignore => {},
            IntegrityPolicy::Discard => match checksum::verify(&self.buffer) {
                Ok(()) => self.flags.insert(MessageFlags::CHECKSUM_VERIFIED),
                Err(e) => {
                    self.buffer.clear();
                    self.flags = MessageFlags::empty();
                    return Err(e);
                },
            },
            IntegrityPolicy::Flag => match checksum::verify(&self.buffer) {
                Ok(()) => self.flags.insert(MessageFlags::CHECKSUM_VERIFIED),
                Err(e) => {
                    warn!(error = %e, "keeping message that failed verification");
                    self.flags.insert(MessageFlags::CHECKSUM_FAILED);
                },
            },
        }
        Ok(len)
    }

    /// Bytes of the most recent message
    pub fn buffer(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    pub fn flags(&self) -> MessageFlags {
        self.flags
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn message(&self) -> Result<&[u8]> {
        if self.buffer.is_empty() {
            return Err(MalformedMessage::Empty.into());
        }
        Ok(self.buffer.as_slice())
    }

    pub fn mnemonic(&self) -> Result<&str> {
        parse_mnemonic(self.message()?)
    }

    pub fn record(&self) -> Result<Record<'_>> {
        records::decode(self.message()?)
    }

    pub fn pvt1b(&self) -> Result<Pvt1b<'_>> {
        Pvt1b::from_message(self.message()?)
    }

    /// Latitude in \[deg\] of the PVT1B message in the buffer
    pub fn latitude(&self) -> Result<f64> {
        self.pvt1b().map(|pvt| pvt.latitude())
    }

    /// Longitude in \[deg\] of the PVT1B message in the buffer
    pub fn longitude(&self) -> Result<f64> {
        self.pvt1b().map(|pvt| pvt.longitude())
    }

    /// North, east and up velocity in \[m/s\] of the PVT1B message in the buffer
    pub fn velocities(&self) -> Result<Velocity> {
        self.pvt1b().map(|pvt| pvt.velocity())
    }

    /// Checks the checksum trailer of the message in the buffer
    pub fn verify(&self) -> Result<()> {
        checksum::verify(self.message()?)
    }
}

impl<T: Transport> Drop for Session<T> {
    fn drop(&mut self) {
        self.close();
    }
}
