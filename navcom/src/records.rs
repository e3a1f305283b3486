pub mod fields;
pub mod pvt1b;

pub use pvt1b::{Pvt1b, PvtSolution, Velocity};

use crate::{error::Result, parser::parse_mnemonic};

/// A received message, interpreted according to its mnemonic
#[derive(Debug, Clone, Copy)]
pub enum Record<'a> {
    Pvt1b(Pvt1b<'a>),
    /// Well-formed message whose payload layout is not known to this crate
    Other { mnemonic: &'a str, message: &'a [u8] },
}

impl<'a> Record<'a> {
    pub fn mnemonic(&self) -> &'a str {
        match *self {
            Record::Pvt1b(_) => Pvt1b::MNEMONIC,
            Record::Other { mnemonic, .. } => mnemonic,
        }
    }
}

/// Dispatches on the mnemonic of `message`
pub fn decode(message: &[u8]) -> Result<Record<'_>> {
    let mnemonic = parse_mnemonic(message)?;
    if mnemonic == Pvt1b::MNEMONIC {
        Pvt1b::from_message(message).map(Record::Pvt1b)
    } else {
        Ok(Record::Other { mnemonic, message })
    }
}

/// Latitude in \[deg\] of a PVT1B message
pub fn decode_latitude(message: &[u8]) -> Result<f64> {
    Pvt1b::from_message(message).map(|pvt| pvt.latitude())
}

/// Longitude in \[deg\] of a PVT1B message
pub fn decode_longitude(message: &[u8]) -> Result<f64> {
    Pvt1b::from_message(message).map(|pvt| pvt.longitude())
}

/// North, east and up velocity in \[m/s\] of a PVT1B message
pub fn decode_velocities(message: &[u8]) -> Result<Velocity> {
    Pvt1b::from_message(message).map(|pvt| pvt.velocity())
}
