//! Application services - boot sequencing and the acquisition loop
//!
//! This layer wires the domain logic to the ports: a one-shot boot
//! sequence that populates the readiness registry, and the per-tick
//! acquisition cycle that turns sensor reads into telemetry records.

pub mod boot;
pub mod cycle;

pub use boot::run_boot_sequence;
pub use cycle::{AcquisitionCycle, MAX_GAIN_ATTEMPTS};

/// Configuration for the acquisition loop cadence
#[derive(Clone, Copy, Debug)]
pub struct StationConfig {
    /// Fixed delay after each completed cycle (milliseconds)
    pub cycle_interval_ms: u64,
}

impl Default for StationConfig {
    fn default() -> Self {
        Self {
            cycle_interval_ms: 500,
        }
    }
}

impl StationConfig {
    /// Config for high-rate sampling
    pub const fn high_rate() -> Self {
        Self {
            cycle_interval_ms: 100,
        }
    }

    /// Config for low-power operation
    pub const fn low_power() -> Self {
        Self {
            cycle_interval_ms: 5000,
        }
    }
}
