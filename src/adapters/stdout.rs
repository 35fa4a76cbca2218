//! Stdout transport adapter
//!
//! Writes each record line to standard output and flushes, so a host
//! process reading the pipe sees whole lines only.

use std::io::Write;

use crate::ports::transport::{TransportError, TransportPort};

/// Line transport backed by standard output
pub struct StdoutTransport {
    out: std::io::Stdout,
}

impl StdoutTransport {
    /// Create a stdout transport
    pub fn new() -> Self {
        Self {
            out: std::io::stdout(),
        }
    }
}

impl Default for StdoutTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl TransportPort for StdoutTransport {
    async fn send_line(&mut self, line: &str) -> Result<(), TransportError> {
        let mut handle = self.out.lock();
        handle.write_all(line.as_bytes())?;
        handle.flush()?;
        Ok(())
    }
}
