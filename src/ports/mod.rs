//! Ports (interfaces) defining the boundaries of the application
//!
//! Ports are traits that define how the acquisition core interacts with
//! external systems. They allow the core to remain independent of
//! specific implementations.
//!
//! # Hexagonal Architecture
//!
//! In hexagonal architecture, ports define the "holes" in the hexagon
//! where adapters plug in:
//!
//! - **SpectralSensorPort**: the 8-channel spectral bank (AS7341, sim)
//! - **UvSensorPort / LuminositySensorPort**: the single-value light
//!   sensors (LTR390, TSL2591, sim)
//! - **TransportPort**: where telemetry lines go (stdout, serial, memory)

pub mod light;
pub mod spectral;
pub mod transport;

pub use light::{LightSensorError, LuminositySensorPort, UvSensorPort};
pub use spectral::{SpectralSensorError, SpectralSensorPort};
pub use transport::{TransportError, TransportPort};
