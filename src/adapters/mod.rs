//! Adapters - concrete implementations of ports
//!
//! Adapters connect the acquisition core to the outside world by
//! implementing the port traits. Each adapter knows how to work with a
//! specific technology.
//!
//! # Available Adapters
//!
//! - **sim**: simulated sensor trio, no hardware required
//! - **stdout**: line transport to standard output
//! - **memory**: line transport into a buffer (tests, diagnostics)
//! - **serial**: line transport over a serial port
//!   (feature `transport_serial`)

pub mod memory;
#[cfg(feature = "transport_serial")]
pub mod serial;
pub mod sim;
pub mod stdout;

pub use memory::MemoryTransport;
#[cfg(feature = "transport_serial")]
pub use serial::SerialTransport;
pub use sim::{SimLuminositySensor, SimSpectralSensor, SimUvSensor};
pub use stdout::StdoutTransport;
