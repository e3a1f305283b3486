use crate::{
    constants::TERMINATOR,
    error::{Error, Result},
};

/// Fixed capacity byte buffer filled by the framer during one read cycle.
///
/// The capacity is chosen when the buffer is built and never grows: appending
/// more than fits is an error and leaves the buffer untouched.
#[derive(Debug, Clone)]
pub struct ReceiveBuffer {
    buffer: Box<[u8]>,
    len: usize,
}

impl ReceiveBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: vec![0; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    /// Removes all elements from the buffer
    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Appends `other`, or fails with [`Error::BufferOverflow`] if it does not fit
    pub fn extend_from_slice(&mut self, other: &[u8]) -> Result<()> {
        let needed = self.len + other.len();
        if needed > self.buffer.len() {
            return Err(Error::BufferOverflow {
                capacity: self.buffer.len(),
                needed,
            });
        }
        self.buffer[self.len..needed].copy_from_slice(other);
        self.len = needed;
        Ok(())
    }

    /// True once the last two bytes are CR LF. Never true with fewer than two bytes.
    pub fn ends_with_terminator(&self) -> bool {
        self.len >= TERMINATOR.len() && self.as_slice().ends_with(&TERMINATOR)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer[..self.len]
    }
}

impl core::ops::Deref for ReceiveBuffer {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl AsRef<[u8]> for ReceiveBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rb_empty() {
        let buf = ReceiveBuffer::with_capacity(16);
        assert!(buf.is_empty());
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), 16);
        assert_eq!(buf.as_slice(), &[] as &[u8]);
    }

    #[test]
    fn rb_extend_and_clear() {
        let mut buf = ReceiveBuffer::with_capacity(8);
        buf.extend_from_slice(&[1, 2, 3]).unwrap();
        buf.extend_from_slice(&[4]).unwrap();
        assert_eq!(&buf[..], &[1, 2, 3, 4]);

        buf.clear();
        assert!(buf.is_empty());
        buf.extend_from_slice(&[9]).unwrap();
        assert_eq!(&buf[..], &[9]);
    }

    #[test]
    fn rb_fill_to_capacity() {
        let mut buf = ReceiveBuffer::with_capacity(4);
        buf.extend_from_slice(&[1, 2, 3, 4]).unwrap();
        assert_eq!(buf.len(), 4);
    }

    #[test]
    fn rb_overflow_is_an_error() {
        let mut buf = ReceiveBuffer::with_capacity(4);
        buf.extend_from_slice(&[1, 2, 3]).unwrap();
        let err = buf.extend_from_slice(&[4, 5]).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferOverflow {
                capacity: 4,
                needed: 5
            }
        ));
        assert_eq!(&buf[..], &[1, 2, 3]);
    }

    #[test]
    fn rb_terminator_needs_two_bytes() {
        let mut buf = ReceiveBuffer::with_capacity(8);
        assert!(!buf.ends_with_terminator());
        buf.extend_from_slice(b"\n").unwrap();
        assert!(!buf.ends_with_terminator());
        buf.clear();
        buf.extend_from_slice(b"\r").unwrap();
        assert!(!buf.ends_with_terminator());
        buf.extend_from_slice(b"\n").unwrap();
        assert!(buf.ends_with_terminator());
    }

    #[test]
    fn rb_terminator_only_at_end() {
        let mut buf = ReceiveBuffer::with_capacity(8);
        buf.extend_from_slice(b"\r\nab").unwrap();
        assert!(!buf.ends_with_terminator());
        buf.extend_from_slice(b"\n\r").unwrap();
        assert!(!buf.ends_with_terminator());
    }
}
