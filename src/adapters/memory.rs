//! In-memory transport adapter
//!
//! Collects record lines instead of sending them anywhere. Used by the
//! test suites and handy for diagnosing what a station would emit.

use crate::ports::transport::{TransportError, TransportPort};

/// Line transport that buffers every line it is handed
#[derive(Debug, Default)]
pub struct MemoryTransport {
    lines: Vec<String>,
}

impl MemoryTransport {
    /// Create an empty buffer transport
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines sent so far, in order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Drop the buffered lines
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl TransportPort for MemoryTransport {
    async fn send_line(&mut self, line: &str) -> Result<(), TransportError> {
        self.lines.push(line.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lines_are_kept_in_order() {
        let mut transport = MemoryTransport::new();
        transport.send_line("{\"a\":1}\n").await.unwrap();
        transport.send_line("{\"b\":2}\n").await.unwrap();
        assert_eq!(transport.lines(), ["{\"a\":1}\n", "{\"b\":2}\n"]);
        transport.clear();
        assert!(transport.lines().is_empty());
    }
}
