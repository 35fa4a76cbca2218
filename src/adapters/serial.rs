//! Serial line transport adapter
//!
//! Sends record lines over a serial port, for stations wired to the
//! dashboard host through a USB-serial link.

use std::io::Write;
use std::time::Duration;

use crate::ports::transport::{TransportError, TransportPort};

/// Default line rate for the telemetry link
pub const DEFAULT_BAUD_RATE: u32 = 115_200;

/// Line transport backed by a serial port
pub struct SerialTransport {
    port: Box<dyn serialport::SerialPort>,
}

impl SerialTransport {
    /// Open a serial port at the default telemetry baud rate
    pub fn open(path: &str) -> Result<Self, serialport::Error> {
        Self::open_with_baud(path, DEFAULT_BAUD_RATE)
    }

    /// Open a serial port at a specific baud rate
    pub fn open_with_baud(path: &str, baud: u32) -> Result<Self, serialport::Error> {
        let port = serialport::new(path, baud)
            .timeout(Duration::from_millis(1000))
            .flow_control(serialport::FlowControl::None)
            .open()?;
        Ok(Self { port })
    }
}

impl TransportPort for SerialTransport {
    async fn send_line(&mut self, line: &str) -> Result<(), TransportError> {
        self.port.write_all(line.as_bytes())?;
        self.port.flush()?;
        Ok(())
    }
}
