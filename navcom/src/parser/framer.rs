use std::io::{self, Read};

use tracing::trace;

use crate::{
    constants::DEFAULT_CHUNK_SIZE,
    error::{Error, Result},
    parser::buffer::ReceiveBuffer,
};

/// Pulls one CR LF terminated message out of a byte stream.
///
/// The stream carries no length prefix, so the framer keeps reading chunks of
/// at most `chunk_size` bytes until the accumulated bytes end with the
/// terminator.
#[derive(Debug, Clone)]
pub struct MessageFramer {
    chunk: Vec<u8>,
}

impl Default for MessageFramer {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE)
    }
}

impl MessageFramer {
    /// A `chunk_size` of zero is bumped to one byte per read
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk: vec![0; chunk_size.max(1)],
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk.len()
    }

    /// Clears `buf` and fills it from `reader` until the terminator is seen.
    ///
    /// Returns the number of bytes accumulated. On a failed or empty read the
    /// bytes received so far stay in `buf` and the error carries their count.
    pub fn read_message<R>(&mut self, reader: &mut R, buf: &mut ReceiveBuffer) -> Result<usize>
    where
        R: Read + ?Sized,
    {
        buf.clear();
        loop {
            let nbytes = match reader.read(&mut self.chunk) {
                Ok(0) => {
                    return Err(Error::Truncated {
                        received: buf.len(),
                    })
                },
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(Error::Io {
                        received: buf.len(),
                        source,
                    })
                },
            };
            buf.extend_from_slice(&self.chunk[..nbytes])?;
            trace!(nbytes, total = buf.len(), "chunk read");

            if buf.ends_with_terminator() {
                return Ok(buf.len());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    /// Hands out the scripted chunks one read at a time
    struct Chunks(VecDeque<io::Result<Vec<u8>>>);

    impl Chunks {
        fn new(chunks: Vec<io::Result<Vec<u8>>>) -> Self {
            Self(chunks.into())
        }
    }

    impl Read for Chunks {
        fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
            match self.0.pop_front() {
                None => Ok(0),
                Some(Err(e)) => Err(e),
                Some(Ok(mut chunk)) => {
                    let n = chunk.len().min(out.len());
                    out[..n].copy_from_slice(&chunk[..n]);
                    if n < chunk.len() {
                        self.0.push_front(Ok(chunk.split_off(n)));
                    }
                    Ok(n)
                },
            }
        }
    }

    #[test]
    fn test_single_chunk() {
        let mut framer = MessageFramer::default();
        let mut buf = ReceiveBuffer::with_capacity(64);
        let mut reader = Chunks::new(vec![Ok(b"[OK]\r\n".to_vec())]);
        assert_eq!(framer.read_message(&mut reader, &mut buf).unwrap(), 6);
        assert_eq!(&buf[..], b"[OK]\r\n");
    }

    #[test]
    fn test_terminator_split_across_reads() {
        let mut framer = MessageFramer::default();
        let mut buf = ReceiveBuffer::with_capacity(64);
        let mut reader = Chunks::new(vec![Ok(b"[A]xy\r".to_vec()), Ok(b"\n".to_vec())]);
        assert_eq!(framer.read_message(&mut reader, &mut buf).unwrap(), 7);
        assert_eq!(&buf[..], b"[A]xy\r\n");
    }

    #[test]
    fn test_lone_line_feed_is_not_a_terminator() {
        let mut framer = MessageFramer::default();
        let mut buf = ReceiveBuffer::with_capacity(64);
        let mut reader = Chunks::new(vec![
            Ok(b"\n".to_vec()),
            Ok(b"[A]\n".to_vec()),
            Ok(b"\r".to_vec()),
            Ok(b"\n".to_vec()),
        ]);
        assert_eq!(framer.read_message(&mut reader, &mut buf).unwrap(), 7);
        assert_eq!(&buf[..], b"\n[A]\n\r\n");
    }

    #[test]
    fn test_chunk_size_bounds_each_read() {
        let mut framer = MessageFramer::new(2);
        let mut buf = ReceiveBuffer::with_capacity(64);
        let mut reader = Chunks::new(vec![Ok(b"[PVT1B]\r\n".to_vec())]);
        assert_eq!(framer.chunk_size(), 2);
        assert_eq!(framer.read_message(&mut reader, &mut buf).unwrap(), 9);
    }

    #[test]
    fn test_zero_chunk_size() {
        let framer = MessageFramer::new(0);
        assert_eq!(framer.chunk_size(), 1);
    }

    #[test]
    fn test_buffer_reset_between_messages() {
        let mut framer = MessageFramer::default();
        let mut buf = ReceiveBuffer::with_capacity(64);
        let mut reader = Chunks::new(vec![Ok(b"[A]\r\n".to_vec()), Ok(b"[BB]\r\n".to_vec())]);
        framer.read_message(&mut reader, &mut buf).unwrap();
        framer.read_message(&mut reader, &mut buf).unwrap();
        assert_eq!(&buf[..], b"[BB]\r\n");
    }

    #[test]
    fn test_end_of_stream_keeps_partial_data() {
        let mut framer = MessageFramer::default();
        let mut buf = ReceiveBuffer::with_capacity(64);
        let mut reader = Chunks::new(vec![Ok(b"[PVT1B]\x01".to_vec())]);
        let err = framer.read_message(&mut reader, &mut buf).unwrap_err();
        assert!(matches!(err, Error::Truncated { received: 8 }));
        assert_eq!(&buf[..], b"[PVT1B]\x01");
    }

    #[test]
    fn test_read_error_keeps_partial_data() {
        let mut framer = MessageFramer::default();
        let mut buf = ReceiveBuffer::with_capacity(64);
        let mut reader = Chunks::new(vec![
            Ok(b"[PV".to_vec()),
            Err(io::Error::new(io::ErrorKind::TimedOut, "usb timeout")),
        ]);
        let err = framer.read_message(&mut reader, &mut buf).unwrap_err();
        assert_eq!(err.received(), Some(3));
        assert!(matches!(err, Error::Io { source, .. } if source.kind() == io::ErrorKind::TimedOut));
        assert_eq!(&buf[..], b"[PV");
    }

    #[test]
    fn test_interrupted_read_is_retried() {
        let mut framer = MessageFramer::default();
        let mut buf = ReceiveBuffer::with_capacity(64);
        let mut reader = Chunks::new(vec![
            Ok(b"[A]".to_vec()),
            Err(io::Error::from(io::ErrorKind::Interrupted)),
            Ok(b"\r\n".to_vec()),
        ]);
        assert_eq!(framer.read_message(&mut reader, &mut buf).unwrap(), 5);
    }

    #[test]
    fn test_overflow() {
        let mut framer = MessageFramer::default();
        let mut buf = ReceiveBuffer::with_capacity(4);
        let mut reader = Chunks::new(vec![Ok(b"[PVT1B]\r\n".to_vec())]);
        let err = framer.read_message(&mut reader, &mut buf).unwrap_err();
        assert!(matches!(err, Error::BufferOverflow { capacity: 4, .. }));
    }
}
