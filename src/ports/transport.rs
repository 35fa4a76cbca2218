//! Transport port - line-delimited telemetry sink
//!
//! The acquisition core emits one complete record per cycle and never a
//! partial record; the transport's only job is to deliver each
//! already-terminated line as an atomic unit.

use core::future::Future;
use thiserror::Error;

/// Errors that can occur while emitting a record
#[derive(Debug, Error)]
pub enum TransportError {
    /// The sink rejected or truncated the write
    #[error("send failed")]
    SendFailed,
    /// The sink is gone (device unplugged, pipe closed)
    #[error("transport disconnected")]
    Disconnected,
    /// Underlying I/O failure
    #[error("transport I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Port for the byte-oriented, line-delimited output sink.
///
/// `line` arrives with its `\n` terminator already in place; an
/// implementation must write the whole line or fail, never flush a
/// fragment.
pub trait TransportPort {
    /// Deliver one complete record line
    fn send_line(&mut self, line: &str) -> impl Future<Output = Result<(), TransportError>>;
}
