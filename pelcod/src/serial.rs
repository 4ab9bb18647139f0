//! Transport for Pelco-D over a serial port (usually an RS-485 adapter).
use crate::{Error, Result, Transport};
use serialport::{DataBits, Parity, SerialPort, StopBits};
use std::{
    io::{Read, Write},
    sync::Mutex,
    time::Duration,
};

/// Pelco-D devices default to 2400 baud, 8N1.
pub const DEFAULT_BAUD_RATE: u32 = 2400;

const TIMEOUT: Duration = Duration::from_millis(500);

/// Serial port transport.
///
/// The port is behind a [Mutex], so frames from concurrent callers are
/// written one at a time, in the order the lock is acquired.
pub struct PelcoDSerialChannel {
    port: Mutex<Box<dyn SerialPort>>,
}

impl PelcoDSerialChannel {
    /// Opens the serial port at `path` (eg: `/dev/ttyUSB0` or `COM3`).
    pub fn open(path: &str, baud_rate: u32) -> Result<Self> {
        let port = serialport::new(path, baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .timeout(TIMEOUT)
            .open()?;
        debug!("opened serial port {path} at {baud_rate} baud");
        Ok(Self::from_port(port))
    }

    /// Wraps an already-open serial port.
    pub fn from_port(port: Box<dyn SerialPort>) -> Self {
        Self {
            port: Mutex::new(port),
        }
    }
}

impl Transport for PelcoDSerialChannel {
    fn send(&self, data: &[u8]) -> Result {
        let mut port = self.port.lock().map_err(|_| {
            error!("serial port lock poisoned");
            Error::Internal
        })?;
        port.write_all(data)?;
        port.flush()?;
        Ok(())
    }

    fn receive(&self, buf: &mut [u8]) -> Result<usize> {
        let mut port = self.port.lock().map_err(|_| {
            error!("serial port lock poisoned");
            Error::Internal
        })?;
        Ok(port.read(buf)?)
    }
}
