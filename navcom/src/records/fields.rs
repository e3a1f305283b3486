//! Little-endian fixed-width field extraction with bounds checks.

use crate::error::{MalformedMessage, Result};

const SIGN_BIT_24: u32 = 0x0080_0000;
const SIGN_EXTEND_24: u32 = 0xff00_0000;

fn field<const N: usize>(buf: &[u8], offset: usize) -> Result<[u8; N]> {
    offset
        .checked_add(N)
        .and_then(|end| buf.get(offset..end))
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(|| {
            MalformedMessage::Truncated {
                offset,
                needed: N,
                available: buf.len(),
            }
            .into()
        })
}

pub fn read_u8(buf: &[u8], offset: usize) -> Result<u8> {
    field::<1>(buf, offset).map(|[b]| b)
}

pub fn read_u32_le(buf: &[u8], offset: usize) -> Result<u32> {
    field(buf, offset).map(u32::from_le_bytes)
}

pub fn read_i32_le(buf: &[u8], offset: usize) -> Result<i32> {
    field(buf, offset).map(i32::from_le_bytes)
}

/// Unsigned 3-byte little-endian field
pub fn read_u24_le(buf: &[u8], offset: usize) -> Result<u32> {
    field::<3>(buf, offset).map(|[b0, b1, b2]| u32::from_le_bytes([b0, b1, b2, 0]))
}

/// Signed 3-byte little-endian field, two's complement
pub fn read_i24_le(buf: &[u8], offset: usize) -> Result<i32> {
    read_u24_le(buf, offset).map(sign_extend_24)
}

/// Widens a 24-bit two's complement value held in the low bytes of `raw`
pub const fn sign_extend_24(raw: u32) -> i32 {
    if raw & SIGN_BIT_24 != 0 {
        (raw | SIGN_EXTEND_24) as i32
    } else {
        raw as i32
    }
}
