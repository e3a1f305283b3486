use std::{io, time::Duration};

use super::Transport;

/// Receiver reached through a serial port
#[derive(Debug, Clone)]
pub struct SerialTransport {
    path: String,
    baud_rate: u32,
    timeout: Duration,
}

impl SerialTransport {
    pub fn new(path: impl Into<String>, baud_rate: u32) -> Self {
        Self {
            path: path.into(),
            baud_rate,
            timeout: Duration::from_secs(10),
        }
    }

    /// Bound on each blocking read, 10 seconds unless changed
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Transport for SerialTransport {
    type Handle = Box<dyn serialport::SerialPort>;

    fn open(&mut self) -> io::Result<Self::Handle> {
        serialport::new(&self.path, self.baud_rate)
            .data_bits(serialport::DataBits::Eight)
            .flow_control(serialport::FlowControl::None)
            .parity(serialport::Parity::None)
            .stop_bits(serialport::StopBits::One)
            .timeout(self.timeout)
            .open()
            .map_err(io::Error::from)
    }
}
