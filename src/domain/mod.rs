//! Domain layer - pure acquisition logic independent of infrastructure
//!
//! This module contains the core domain entities and services: sensor
//! identities and readings, the readiness registry, the auto-gain
//! policy, lux derivation, and the per-cycle telemetry frame.

pub mod frame;
pub mod gain;
pub mod lux;
pub mod reading;
pub mod readiness;

pub use frame::TelemetryFrame;
pub use gain::{AutoGainController, GainAdjust, DEFAULT_GAIN_INDEX, MAX_GAIN_INDEX};
pub use lux::LuxCalibration;
pub use reading::{LuminosityReading, SensorId, SpectralReading, UvAmbientReading};
pub use readiness::{Readiness, ReadinessRegistry};
