use crate::{
    constants::{CHECKSUM_DIGITS, CHECKSUM_MARKER, CHECKSUM_TRAILER_LEN, TERMINATOR},
    error::{Error, MalformedMessage, Result},
};

const CRC_CCITT_POLY: u16 = 0x1021;

/// Lookup table for [`crc16`], one entry per possible high byte of the accumulator
const CRC_TABLE: [u16; 256] = build_table();

const fn build_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = (i as u16) << 8;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ CRC_CCITT_POLY
            } else {
                crc << 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

/// Table driven CRC16-CCITT calculator (polynomial 0x1021, zero initial value,
/// no reflection, no final XOR), usable for streaming and single-shot checks
#[derive(Default, Debug, Clone, Copy)]
pub struct Crc16Calc {
    accum: u16,
}

impl Crc16Calc {
    pub const fn new() -> Self {
        Self { accum: 0 }
    }

    /// Update checksum with new bytes
    pub const fn update(&mut self, bytes: &[u8]) {
        let mut i = 0;
        while i < bytes.len() {
            self.update_byte(bytes[i]);
            i += 1;
        }
    }

    /// Update checksum with a single byte
    pub const fn update_byte(&mut self, byte: u8) {
        let index = ((self.accum >> 8) as u8 ^ byte) as usize;
        self.accum = (self.accum << 8) ^ CRC_TABLE[index];
    }

    pub const fn result(self) -> u16 {
        self.accum
    }
}

/// CRC16-CCITT over `bytes`
pub const fn crc16(bytes: &[u8]) -> u16 {
    let mut calc = Crc16Calc::new();
    calc.update(bytes);
    calc.result()
}

const fn hex_digit(nibble: u8) -> u8 {
    match nibble {
        0..=9 => nibble + b'0',
        10..=15 => nibble - 10 + b'A',
        _ => 0,
    }
}

const fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        _ => None,
    }
}

/// Expands a checksum into four ASCII hex digits, lowest nibble first: nibble
/// `i` lands in byte `i` of the result. Read as big-endian bytes the result is
/// the checksum spelled out most significant digit first, as the receiver
/// transmits it.
pub const fn to_ascii_hex(crc: u16) -> u32 {
    let mut accum = 0u32;
    let mut word = crc;
    let mut i = 0;
    while i < CHECKSUM_DIGITS {
        let digit = hex_digit((word & 0x000f) as u8);
        accum |= (digit as u32) << (8 * i);
        word >>= 4;
        i += 1;
    }
    accum
}

/// Inverse of [`to_ascii_hex`], `None` if any byte is not a hex digit
pub const fn from_ascii_hex(packed: u32) -> Option<u16> {
    let mut crc = 0u16;
    let mut i = 0;
    while i < CHECKSUM_DIGITS {
        let digit = (packed >> (8 * i)) as u8;
        match hex_value(digit) {
            Some(nibble) => crc |= (nibble as u16) << (4 * i),
            None => return None,
        }
        i += 1;
    }
    Some(crc)
}

/// The four checksum digits in wire order
pub const fn ascii_hex_bytes(crc: u16) -> [u8; CHECKSUM_DIGITS] {
    to_ascii_hex(crc).to_be_bytes()
}

/// Splits a terminated message into the checksummed body and its packed
/// trailer digits, upper-cased. The trailer is `'*' H H H H CR LF` at the
/// very end.
fn split_trailer(message: &[u8]) -> Result<(&[u8], u32)> {
    if message.len() < CHECKSUM_TRAILER_LEN || !message.ends_with(&TERMINATOR) {
        return Err(MalformedMessage::MissingChecksum.into());
    }
    let marker = message.len() - CHECKSUM_TRAILER_LEN;
    if message[marker] != CHECKSUM_MARKER {
        return Err(MalformedMessage::MissingChecksum.into());
    }
    let mut digits = [0u8; CHECKSUM_DIGITS];
    digits.copy_from_slice(&message[marker + 1..marker + 1 + CHECKSUM_DIGITS]);
    digits.make_ascii_uppercase();
    let packed = u32::from_be_bytes(digits);
    Ok((&message[..marker], packed))
}

/// Checks the trailing checksum of a complete, terminated message
pub fn verify(message: &[u8]) -> Result<()> {
    let (body, received) = split_trailer(message)?;
    let computed = crc16(body);
    if to_ascii_hex(computed) == received {
        return Ok(());
    }
    match from_ascii_hex(received) {
        Some(expected) => Err(Error::IntegrityFailure { expected, computed }),
        None => Err(MalformedMessage::InvalidChecksumField.into()),
    }
}

/// Appends `*HHHH\r\n` computed over the current contents of `message`
pub fn append_trailer(message: &mut Vec<u8>) {
    let crc = crc16(message);
    message.push(CHECKSUM_MARKER);
    message.extend_from_slice(&ascii_hex_bytes(crc));
    message.extend_from_slice(&TERMINATOR);
}
