//! # navcom
//!
//! A pure-rust I/O library for NavCom SF-3050 GPS receivers.
//!
//! The receiver takes ASCII commands such as `[PVT1B]` and answers with a
//! message that starts with the same bracketed mnemonic, carries a binary or
//! ASCII payload, a `*HHHH` CRC16 trailer, and ends in CR LF. There is no
//! length prefix, so messages are framed by reading until the terminator.
//!
//! Talking to a device
//! ===================
//!
//! A [`Session`] owns the handle produced by a [`Transport`] and the receive
//! buffer. On Linux the kernel driver exposes the receiver as a character
//! device, reachable through [`DeviceFile`]:
//! ```no_run
//! use navcom::{DeviceFile, Session, SessionConfig};
//!
//! # fn main() -> navcom::Result<()> {
//! let mut session = Session::connect(DeviceFile::default(), SessionConfig::default())?;
//! session.write_command(b"[PVT1B]")?;
//! session.read_message()?;
//! let pvt = session.pvt1b()?;
//! println!("{} {} {:?}", pvt.latitude(), pvt.longitude(), pvt.velocity());
//! # Ok(())
//! # }
//! ```
//!
//! Decoding without a device
//! =========================
//!
//! The decoders work on any byte slice holding one message:
//! ```
//! use navcom::{records::{decode, Record}, parser::checksum};
//!
//! let mut message = b"[PVT1B]".to_vec();
//! message.resize(51, 0);
//! message[17..21].copy_from_slice(&(2048i32 * 3600 * 30).to_le_bytes());
//! checksum::append_trailer(&mut message);
//!
//! assert!(checksum::verify(&message).is_ok());
//! match decode(&message).unwrap() {
//!     Record::Pvt1b(pvt) => assert_eq!(pvt.latitude(), 30.0),
//!     Record::Other { .. } => unreachable!(),
//! }
//! ```

#[cfg(feature = "serde")]
extern crate serde;

pub use crate::{
    config::{IntegrityPolicy, SessionConfig},
    error::{Error, MalformedMessage, Result},
    parser::{buffer::ReceiveBuffer, framer::MessageFramer, parse_mnemonic},
    records::{Pvt1b, PvtSolution, Record, Velocity},
    session::{MessageFlags, Session},
    transport::{DeviceFile, Transport},
};

#[cfg(feature = "serialport")]
pub use crate::transport::SerialTransport;

pub mod config;
pub mod constants;
mod error;
pub mod parser;
pub mod records;
mod session;
pub mod transport;
