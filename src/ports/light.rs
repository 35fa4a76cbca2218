//! Light sensor ports - UV/ambient and broadband luminosity
//!
//! These ports cover the two single-value light sensors. Both expose
//! the same capability shape as the spectral port: one boot-time
//! `initialize`, then a bounded read per cycle.

use crate::domain::UvAmbientReading;
use core::future::Future;
use thiserror::Error;

/// Errors shared by the single-value light sensor ports
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LightSensorError {
    /// Sensor not responding or not detected on the bus
    #[error("sensor not detected")]
    NotDetected,
    /// Sensor has not been initialized
    #[error("sensor not initialized")]
    NotInitialized,
    /// Read operation failed
    #[error("read failed")]
    ReadFailed,
    /// Bus transaction error
    #[error("bus error")]
    BusError,
    /// Operation timed out
    #[error("operation timed out")]
    Timeout,
}

/// Port trait for the UV/ambient sensor.
///
/// The sensor hardware alternates between UV and ambient-light modes;
/// toggling every cycle doubles settling time and produces stale pairs,
/// so implementations commit to one mode. A UV-committed implementation
/// returns readings with `ambient` unset.
pub trait UvSensorPort {
    /// Attempt to bring the sensor up
    fn initialize(&mut self) -> impl Future<Output = Result<(), LightSensorError>>;

    /// Read the current UV (and, mode permitting, ambient) value
    fn read(&mut self) -> impl Future<Output = Result<UvAmbientReading, LightSensorError>>;
}

/// Port trait for the broadband luminosity sensor.
///
/// The sensor reports one combined 32-bit value per measurement:
/// infrared counts in the high half, full-spectrum counts in the low
/// half. Splitting and lux derivation are domain concerns, not the
/// port's.
pub trait LuminositySensorPort {
    /// Attempt to bring the sensor up
    fn initialize(&mut self) -> impl Future<Output = Result<(), LightSensorError>>;

    /// Read the combined full+infrared raw value
    fn read_combined(&mut self) -> impl Future<Output = Result<u32, LightSensorError>>;
}
