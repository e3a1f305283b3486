#[cfg(feature = "serde")]
use serde::Serialize;

use super::fields::{read_i24_le, read_i32_le, read_u8};
use crate::{
    constants::{
        ARC_SECONDS_PER_DEGREE, LAT_LON_FRACTION_SCALE, LAT_LON_SCALE, PVT1B_FRACTION_OFFSET,
        PVT1B_LATITUDE_OFFSET, PVT1B_LONGITUDE_OFFSET, PVT1B_MIN_LEN, PVT1B_MNEMONIC,
        PVT1B_VEL_EAST_OFFSET, PVT1B_VEL_NORTH_OFFSET, PVT1B_VEL_UP_OFFSET, VELOCITY_SCALE,
    },
    error::{Error, MalformedMessage, Result},
    parser::parse_mnemonic,
};

/// Velocity components in \[m/s\], in the order the receiver reports them
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Velocity {
    pub north: f64,
    pub east: f64,
    pub up: f64,
}

impl Velocity {
    pub fn as_array(&self) -> [f64; 3] {
        [self.north, self.east, self.up]
    }
}

/// Owned copy of a decoded PVT1B record, independent of the receive buffer
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PvtSolution {
    /// Latitude in \[deg\], negative south of the equator
    pub latitude: f64,
    /// Longitude in \[deg\], negative west of Greenwich
    pub longitude: f64,
    pub velocity: Velocity,
}

/// Position/velocity record tagged `[PVT1B]`.
///
/// Latitude and longitude are signed counts of 2^-11 arc-seconds, refined by
/// one extra nibble each (2^-15 arc-seconds) packed into a shared byte: high
/// nibble for latitude, low nibble for longitude. Velocities are signed 24-bit
/// counts of 2^-10 m/s.
///
/// The record borrows the message it was decoded from, so it cannot outlive
/// the next read into the same buffer.
#[derive(Debug, Clone, Copy)]
pub struct Pvt1b<'a> {
    message: &'a [u8],
    raw_latitude: i32,
    raw_longitude: i32,
    fraction: u8,
    raw_velocity: [i32; 3],
}

impl<'a> Pvt1b<'a> {
    pub const MNEMONIC: &'static str = PVT1B_MNEMONIC;

    /// Checks the mnemonic and the length, then pulls out the raw fields
    pub fn from_message(message: &'a [u8]) -> Result<Self> {
        let mnemonic = parse_mnemonic(message)?;
        if mnemonic != Self::MNEMONIC {
            return Err(Error::UnsupportedMnemonic {
                mnemonic: mnemonic.to_owned(),
                expected: Self::MNEMONIC,
            });
        }
        if message.len() < PVT1B_MIN_LEN {
            return Err(MalformedMessage::Truncated {
                offset: 0,
                needed: PVT1B_MIN_LEN,
                available: message.len(),
            }
            .into());
        }
        Ok(Self {
            message,
            raw_latitude: read_i32_le(message, PVT1B_LATITUDE_OFFSET)?,
            raw_longitude: read_i32_le(message, PVT1B_LONGITUDE_OFFSET)?,
            fraction: read_u8(message, PVT1B_FRACTION_OFFSET)?,
            raw_velocity: [
                read_i24_le(message, PVT1B_VEL_NORTH_OFFSET)?,
                read_i24_le(message, PVT1B_VEL_EAST_OFFSET)?,
                read_i24_le(message, PVT1B_VEL_UP_OFFSET)?,
            ],
        })
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.message
    }

    pub fn raw_latitude(&self) -> i32 {
        self.raw_latitude
    }

    pub fn raw_longitude(&self) -> i32 {
        self.raw_longitude
    }

    pub fn latitude_fraction(&self) -> u8 {
        self.fraction >> 4
    }

    pub fn longitude_fraction(&self) -> u8 {
        self.fraction & 0x0f
    }

    /// Latitude in \[deg\]
    pub fn latitude(&self) -> f64 {
        to_degrees(self.raw_latitude, self.latitude_fraction())
    }

    /// Longitude in \[deg\]
    pub fn longitude(&self) -> f64 {
        to_degrees(self.raw_longitude, self.longitude_fraction())
    }

    pub fn raw_velocity(&self) -> [i32; 3] {
        self.raw_velocity
    }

    pub fn velocity(&self) -> Velocity {
        let [north, east, up] = self.raw_velocity.map(|v| f64::from(v) / VELOCITY_SCALE);
        Velocity { north, east, up }
    }

    pub fn to_solution(&self) -> PvtSolution {
        PvtSolution {
            latitude: self.latitude(),
            longitude: self.longitude(),
            velocity: self.velocity(),
        }
    }
}

fn to_degrees(raw: i32, fraction: u8) -> f64 {
    (f64::from(raw) / LAT_LON_SCALE + f64::from(fraction) / LAT_LON_FRACTION_SCALE)
        / ARC_SECONDS_PER_DEGREE
}
