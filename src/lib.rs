//! Lumistation - multi-sensor light station core
//!
//! This library implements the acquisition-and-control loop for a
//! three-sensor light station: an 8-channel spectral bank (AS7341), a
//! UV/ambient sensor (LTR390), and a broadband luminosity sensor
//! (TSL2591). Each cycle reads the sensors that booted successfully,
//! keeps the spectral bank inside its usable dynamic range with a
//! bounded auto-gain search, and emits one line-delimited telemetry
//! record for a dashboard host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                                 │
//! │  - SensorId, readings, TelemetryFrame                           │
//! │  - ReadinessRegistry, AutoGainController, LuxCalibration        │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Ports (Traits)                               │
//! │  - SpectralSensorPort: init / read channels / set gain          │
//! │  - UvSensorPort, LuminositySensorPort: init / read              │
//! │  - TransportPort: line-delimited record sink                    │
//! └─────────────────────────────────────────────────────────────────┘
//!                               │
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Adapters                                     │
//! │  - Sim* sensors: hardware-free, gain-responsive                 │
//! │  - StdoutTransport / MemoryTransport / SerialTransport          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Properties
//!
//! - **Degrades, never dies** - a sensor failing at boot is excluded;
//!   a read failing mid-flight costs that cycle's field, nothing more
//! - **Bounded cycles** - the gain search retries at most 5 times, so
//!   each cycle stays inside its soft time budget
//! - **Whole records only** - a line is encoded completely before any
//!   byte reaches the transport

// ============================================================================
// Telemetry protocol (shared between station and host)
// ============================================================================

pub mod telemetry;

pub use telemetry::{
    encode_line, BootRecord, DashboardState, TelemetryError, TelemetryRecord, FW_VERSION,
};

// ============================================================================
// Hexagonal Architecture
// ============================================================================

/// Domain layer - pure acquisition logic
pub mod domain;

/// Ports - traits defining boundaries
pub mod ports;

/// Adapters - concrete implementations
pub mod adapters;

/// Application services - boot sequencing and the acquisition loop
pub mod app;

// Re-export key domain types
pub use domain::{
    AutoGainController, GainAdjust, LuminosityReading, LuxCalibration, Readiness,
    ReadinessRegistry, SensorId, SpectralReading, TelemetryFrame, UvAmbientReading,
};

// Re-export key port traits
pub use ports::{
    LuminositySensorPort, SpectralSensorPort, TransportPort, UvSensorPort,
};

// Re-export application services
pub use app::{run_boot_sequence, AcquisitionCycle, StationConfig};
