pub mod buffer;
pub mod checksum;
pub mod framer;

use crate::{
    constants::{COMMAND_START, MNEMONIC_END},
    error::{MalformedMessage, Result},
};

/// Returns the bracket-delimited mnemonic that opens `message`, brackets
/// included, e.g. `"[PVT1B]"`.
///
/// The scan never goes past the end of `message`: a missing `]` is reported
/// as [`MalformedMessage::UnterminatedMnemonic`].
pub fn parse_mnemonic(message: &[u8]) -> Result<&str> {
    let first = *message.first().ok_or(MalformedMessage::Empty)?;
    if first != COMMAND_START {
        return Err(MalformedMessage::MissingStartMarker { found: first }.into());
    }
    let end = message
        .iter()
        .position(|&b| b == MNEMONIC_END)
        .ok_or(MalformedMessage::UnterminatedMnemonic)?;
    let mnemonic = &message[..=end];
    if !mnemonic.is_ascii() {
        return Err(MalformedMessage::NonAsciiMnemonic.into());
    }
    core::str::from_utf8(mnemonic).map_err(|_| MalformedMessage::NonAsciiMnemonic.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn malformed(message: &[u8]) -> MalformedMessage {
        match parse_mnemonic(message) {
            Err(Error::MalformedMessage(reason)) => reason,
            other => panic!("expected a malformed message, got {other:?}"),
        }
    }

    #[test]
    fn test_mnemonic_with_binary_payload() {
        let message = b"[PVT1B]\x00\xff]\x80extra\r\n";
        assert_eq!(parse_mnemonic(message).unwrap(), "[PVT1B]");
    }

    #[test]
    fn test_mnemonic_only() {
        assert_eq!(parse_mnemonic(b"[OK]").unwrap(), "[OK]");
        assert_eq!(parse_mnemonic(b"[]").unwrap(), "[]");
    }

    #[test]
    fn test_empty() {
        assert_eq!(malformed(b""), MalformedMessage::Empty);
    }

    #[test]
    fn test_missing_start_marker() {
        assert_eq!(
            malformed(b"PVT1B]"),
            MalformedMessage::MissingStartMarker { found: b'P' }
        );
        assert_eq!(
            malformed(b"\r\n[PVT1B]"),
            MalformedMessage::MissingStartMarker { found: b'\r' }
        );
    }

    #[test]
    fn test_unterminated() {
        assert_eq!(
            malformed(b"[PVT1B\r\n"),
            MalformedMessage::UnterminatedMnemonic
        );
        assert_eq!(malformed(b"["), MalformedMessage::UnterminatedMnemonic);
    }

    #[test]
    fn test_non_ascii() {
        assert_eq!(malformed(b"[PV\xc3\xa9]"), MalformedMessage::NonAsciiMnemonic);
    }
}
