#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::VecDeque,
    io::{self, Read, Write},
    rc::Rc,
};

use byteorder::{LittleEndian, WriteBytesExt};
use navcom::{parser::checksum, Transport};

/// What the fake receiver has seen and still has to say
#[derive(Default)]
pub struct DeviceState {
    responses: VecDeque<io::Result<Vec<u8>>>,
    written: Vec<u8>,
    opened: usize,
    closed: usize,
    unavailable: bool,
}

/// In-memory receiver: every scripted chunk is handed out by one read call
/// (split further if the caller's buffer is smaller). Once the script runs
/// dry reads return 0, like a device that went away.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    state: Rc<RefCell<DeviceState>>,
}

pub struct ScriptedHandle {
    state: Rc<RefCell<DeviceState>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        let transport = Self::default();
        transport.state.borrow_mut().unavailable = true;
        transport
    }

    pub fn respond(&self, chunk: impl Into<Vec<u8>>) -> &Self {
        self.state.borrow_mut().responses.push_back(Ok(chunk.into()));
        self
    }

    /// Queues `message` split into reads of `chunk_len` bytes
    pub fn respond_in_chunks(&self, message: &[u8], chunk_len: usize) -> &Self {
        for chunk in message.chunks(chunk_len) {
            self.respond(chunk);
        }
        self
    }

    pub fn fail_read(&self, kind: io::ErrorKind) -> &Self {
        self.state
            .borrow_mut()
            .responses
            .push_back(Err(io::Error::new(kind, "scripted failure")));
        self
    }

    pub fn written(&self) -> Vec<u8> {
        self.state.borrow().written.clone()
    }

    pub fn opened(&self) -> usize {
        self.state.borrow().opened
    }

    pub fn closed(&self) -> usize {
        self.state.borrow().closed
    }
}

impl Transport for ScriptedTransport {
    type Handle = ScriptedHandle;

    fn open(&mut self) -> io::Result<ScriptedHandle> {
        let mut state = self.state.borrow_mut();
        if state.unavailable {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "device already claimed",
            ));
        }
        state.opened += 1;
        Ok(ScriptedHandle {
            state: Rc::clone(&self.state),
        })
    }

    fn close(&mut self, handle: ScriptedHandle) {
        self.state.borrow_mut().closed += 1;
        drop(handle);
    }
}

impl Read for ScriptedHandle {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        let mut state = self.state.borrow_mut();
        match state.responses.pop_front() {
            None => Ok(0),
            Some(Err(e)) => Err(e),
            Some(Ok(mut chunk)) => {
                let n = chunk.len().min(out.len());
                out[..n].copy_from_slice(&chunk[..n]);
                if n < chunk.len() {
                    state.responses.push_front(Ok(chunk.split_off(n)));
                }
                Ok(n)
            },
        }
    }
}

impl Write for ScriptedHandle {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.state.borrow_mut().written.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Raw PVT1B field values, before scaling
#[derive(Debug, Clone, Copy, Default)]
pub struct Pvt1bFields {
    pub latitude: i32,
    pub longitude: i32,
    /// High nibble refines latitude, low nibble longitude
    pub fraction: u8,
    /// North, east, up; only the low 24 bits are transmitted
    pub velocity: [i32; 3],
}

impl Pvt1bFields {
    /// `[PVT1B]` header and payload, without trailer
    pub fn to_body(&self) -> Vec<u8> {
        let mut wtr = b"[PVT1B]".to_vec();
        wtr.resize(17, 0);
        wtr.write_i32::<LittleEndian>(self.latitude).unwrap();
        wtr.write_i32::<LittleEndian>(self.longitude).unwrap();
        wtr.write_u8(self.fraction).unwrap();
        wtr.resize(42, 0);
        for v in self.velocity {
            wtr.write_i24::<LittleEndian>(v).unwrap();
        }
        wtr
    }

    /// Complete message as the receiver sends it
    pub fn to_message(&self) -> Vec<u8> {
        let mut message = self.to_body();
        checksum::append_trailer(&mut message);
        message
    }
}
