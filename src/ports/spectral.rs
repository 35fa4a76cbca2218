//! Spectral sensor port - interface for the 8-channel spectral bank
//!
//! This port defines how the acquisition core interacts with a
//! multi-channel spectral sensor such as the AS7341. Register-level
//! protocol details (I2C transactions, SMUX setup, integration timing)
//! live entirely behind the implementation.

use crate::domain::SpectralReading;
use core::future::Future;
use thiserror::Error;

/// Errors that can occur during spectral sensor operations
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SpectralSensorError {
    /// Sensor not responding or not detected on the bus
    #[error("sensor not detected")]
    NotDetected,
    /// Sensor has not been initialized
    #[error("sensor not initialized")]
    NotInitialized,
    /// Channel read operation failed
    #[error("channel read failed")]
    ReadFailed,
    /// Bus transaction error
    #[error("bus error")]
    BusError,
    /// Invalid configuration parameter (e.g. gain index off the ladder)
    #[error("invalid configuration")]
    InvalidConfig,
    /// Operation timed out
    #[error("operation timed out")]
    Timeout,
}

/// Port trait for the spectral bank.
///
/// `initialize` is called exactly once, during boot; a failure excludes
/// the sensor for the process lifetime. Each `initialize` and `read` is
/// expected to return within a bounded time - that is the capability's
/// contract, and the acquisition loop's timing budget depends on it.
pub trait SpectralSensorPort {
    /// Attempt to bring the sensor up
    fn initialize(&mut self) -> impl Future<Output = Result<(), SpectralSensorError>>;

    /// Read all 8 channels as one measurement
    fn read(&mut self) -> impl Future<Output = Result<SpectralReading, SpectralSensorError>>;

    /// Apply a gain index from the 11-step ladder (0..=10, 0.5x to 512x)
    fn set_gain(&mut self, gain_index: u8) -> impl Future<Output = Result<(), SpectralSensorError>>;
}
