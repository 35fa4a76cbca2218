//! Lux calibration domain service
//!
//! This module converts the luminosity sensor's raw full-spectrum and
//! infrared counts into a lux value using the TSL2591 datasheet formula.

/// Lux derivation parameters for the TSL2591.
///
/// The sensor's counts-per-lux coefficient depends on the configured
/// integration time and analog gain:
/// `cpl = (integration_time_ms * gain) / 408.0`
/// `lux = (full - ir) * (1 - ir / full) / cpl`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LuxCalibration {
    /// ADC integration time in milliseconds
    pub integration_time_ms: f32,
    /// Analog gain multiplier
    pub gain: f32,
}

impl LuxCalibration {
    /// Device factor from the TSL2591 datasheet lux equation
    pub const LUX_DF: f32 = 408.0;

    /// Default configuration: 100 ms integration, medium gain (25x)
    pub const TSL2591_DEFAULT: Self = Self {
        integration_time_ms: 100.0,
        gain: 25.0,
    };

    /// Low-light configuration: 600 ms integration, high gain (428x)
    pub const TSL2591_LOW_LIGHT: Self = Self {
        integration_time_ms: 600.0,
        gain: 428.0,
    };

    /// Create a calibration with custom parameters
    pub const fn new(integration_time_ms: f32, gain: f32) -> Self {
        Self {
            integration_time_ms,
            gain,
        }
    }

    /// Derive lux from full-spectrum and infrared counts.
    ///
    /// A dark sensor (`full == 0`) makes the `ir / full` term non-finite;
    /// callers are expected to clamp non-finite results before using them.
    pub fn lux(&self, full: u16, ir: u16) -> f32 {
        let cpl = (self.integration_time_ms * self.gain) / Self::LUX_DF;
        let full = full as f32;
        let ir = ir as f32;
        (full - ir) * (1.0 - ir / full) / cpl
    }
}

impl Default for LuxCalibration {
    fn default() -> Self {
        Self::TSL2591_DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_lux_formula() {
        let cal = LuxCalibration::TSL2591_DEFAULT;
        // cpl = 100 * 25 / 408 ~ 6.127
        // full=1000, ir=200: (800) * (1 - 0.2) / 6.127 ~ 104.4
        let lux = cal.lux(1000, 200);
        assert!((lux - 104.4).abs() < 0.5, "lux = {lux}");
    }

    #[test]
    fn test_dark_sensor_is_non_finite() {
        let cal = LuxCalibration::TSL2591_DEFAULT;
        // 0/0 in the IR ratio term
        assert!(!cal.lux(0, 0).is_finite());
    }

    #[test]
    fn test_ir_dominated_reading_stays_finite() {
        let cal = LuxCalibration::TSL2591_DEFAULT;
        let lux = cal.lux(100, 400);
        assert!(lux.is_finite());
    }
}
