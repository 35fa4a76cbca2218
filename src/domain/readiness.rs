//! Per-sensor readiness tracking
//!
//! Readiness is established once during boot and consulted every cycle
//! to decide whether a sensor is read at all. A sensor that fails its
//! one initialization attempt stays excluded for the process lifetime:
//! re-probing a dead bus every cycle would add blocking calls to a
//! timing-sensitive loop.

use crate::domain::SensorId;

/// Boot outcome of a single sensor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Readiness {
    /// Initialization has not been attempted yet
    #[default]
    NotAttempted,
    /// Initialization succeeded; the sensor is read every cycle
    Ready,
    /// Initialization failed; the sensor is excluded until restart
    Failed,
}

/// Registry of per-sensor readiness flags.
///
/// Each flag is recorded exactly once during the boot sequence; the
/// first recording wins and later recordings are ignored. A flag never
/// reverts from `Failed` to `Ready` without a full process restart.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReadinessRegistry {
    spectral: Readiness,
    uv_ambient: Readiness,
    luminosity: Readiness,
}

impl ReadinessRegistry {
    /// Create a registry with every sensor not yet attempted
    pub const fn new() -> Self {
        Self {
            spectral: Readiness::NotAttempted,
            uv_ambient: Readiness::NotAttempted,
            luminosity: Readiness::NotAttempted,
        }
    }

    /// Record a sensor's boot outcome.
    ///
    /// Only the first recording for a sensor takes effect.
    pub fn record(&mut self, id: SensorId, outcome: Readiness) {
        let slot = match id {
            SensorId::SpectralBank => &mut self.spectral,
            SensorId::UvAmbient => &mut self.uv_ambient,
            SensorId::Luminosity => &mut self.luminosity,
        };
        if *slot == Readiness::NotAttempted {
            *slot = outcome;
        }
    }

    /// Current readiness of a sensor
    pub const fn get(&self, id: SensorId) -> Readiness {
        match id {
            SensorId::SpectralBank => self.spectral,
            SensorId::UvAmbient => self.uv_ambient,
            SensorId::Luminosity => self.luminosity,
        }
    }

    /// Whether a sensor booted successfully
    pub fn is_ready(&self, id: SensorId) -> bool {
        self.get(id) == Readiness::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_not_attempted() {
        let registry = ReadinessRegistry::new();
        for id in SensorId::BOOT_ORDER {
            assert_eq!(registry.get(id), Readiness::NotAttempted);
            assert!(!registry.is_ready(id));
        }
    }

    #[test]
    fn test_first_recording_wins() {
        let mut registry = ReadinessRegistry::new();
        registry.record(SensorId::SpectralBank, Readiness::Failed);
        registry.record(SensorId::SpectralBank, Readiness::Ready);
        assert_eq!(registry.get(SensorId::SpectralBank), Readiness::Failed);
    }

    #[test]
    fn test_flags_are_independent() {
        let mut registry = ReadinessRegistry::new();
        registry.record(SensorId::UvAmbient, Readiness::Ready);
        assert!(registry.is_ready(SensorId::UvAmbient));
        assert_eq!(registry.get(SensorId::SpectralBank), Readiness::NotAttempted);
        assert_eq!(registry.get(SensorId::Luminosity), Readiness::NotAttempted);
    }
}
