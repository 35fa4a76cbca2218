//! Sensor reading domain entities
//!
//! This module defines the sensor identities and the per-cycle reading
//! entities. It has no knowledge of how readings are acquired or
//! transmitted.

use crate::domain::lux::LuxCalibration;

/// Identifier for one of the three light-sensing subsystems.
///
/// The set is fixed: the station carries exactly one 8-channel spectral
/// bank (AS7341), one UV/ambient sensor (LTR390), and one broadband
/// luminosity sensor (TSL2591).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SensorId {
    /// AS7341 8-channel spectral bank
    SpectralBank,
    /// LTR390 UV / ambient-light sensor
    UvAmbient,
    /// TSL2591 broadband luminosity sensor
    Luminosity,
}

impl SensorId {
    /// Fixed initialization order.
    ///
    /// Later failures never block earlier successful sensors, so the
    /// order only has to be stable, not clever.
    pub const BOOT_ORDER: [SensorId; 3] = [
        SensorId::SpectralBank,
        SensorId::UvAmbient,
        SensorId::Luminosity,
    ];

    /// Wire/display name of this sensor
    pub const fn as_str(&self) -> &'static str {
        match self {
            SensorId::SpectralBank => "as7341",
            SensorId::UvAmbient => "ltr390",
            SensorId::Luminosity => "tsl2591",
        }
    }
}

/// A spectral reading from the 8-channel bank.
///
/// Channels cover 415 nm (violet) through 680 nm (red) in the AS7341's
/// F1..F8 arrangement. One instance is produced per read attempt and
/// owned by the current cycle only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpectralReading {
    /// F1: 415nm - Violet
    pub f1_415nm: u16,
    /// F2: 445nm - Indigo
    pub f2_445nm: u16,
    /// F3: 480nm - Blue
    pub f3_480nm: u16,
    /// F4: 515nm - Cyan
    pub f4_515nm: u16,
    /// F5: 555nm - Green
    pub f5_555nm: u16,
    /// F6: 590nm - Yellow
    pub f6_590nm: u16,
    /// F7: 630nm - Orange
    pub f7_630nm: u16,
    /// F8: 680nm - Red
    pub f8_680nm: u16,
}

impl SpectralReading {
    /// Create a reading from a wavelength-ordered channel array
    pub const fn from_channels(ch: [u16; 8]) -> Self {
        Self {
            f1_415nm: ch[0],
            f2_445nm: ch[1],
            f3_480nm: ch[2],
            f4_515nm: ch[3],
            f5_555nm: ch[4],
            f6_590nm: ch[5],
            f7_630nm: ch[6],
            f8_680nm: ch[7],
        }
    }

    /// Get all channels as an array (wavelength ordered)
    ///
    /// Order: F1, F2, F3, F4, F5, F6, F7, F8
    pub const fn channels(&self) -> [u16; 8] {
        [
            self.f1_415nm,
            self.f2_445nm,
            self.f3_480nm,
            self.f4_515nm,
            self.f5_555nm,
            self.f6_590nm,
            self.f7_630nm,
            self.f8_680nm,
        ]
    }

    /// Largest channel value in this reading.
    ///
    /// This is the quantity the gain policy evaluates: one clipped
    /// channel corrupts the whole bank, so the maximum is what matters.
    pub fn max_channel(&self) -> u16 {
        self.channels().iter().copied().max().unwrap_or(0)
    }

    /// Channel names for display/logging
    pub const CHANNEL_NAMES: [&'static str; 8] = [
        "F1_415nm", "F2_445nm", "F3_480nm", "F4_515nm", "F5_555nm", "F6_590nm", "F7_630nm",
        "F8_680nm",
    ];

    /// Channel center wavelengths in nm
    pub const CHANNEL_WAVELENGTHS_NM: [u16; 8] = [415, 445, 480, 515, 555, 590, 630, 680];
}

/// A reading from the UV/ambient sensor.
///
/// The sensor measures either UV or ambient light depending on its
/// operating mode; the station commits to UV mode, so `ambient` is
/// populated only when a mode that provides it is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UvAmbientReading {
    /// UV index count
    pub uv_index: u32,
    /// Ambient-light count, when the sensor mode permits it
    pub ambient: Option<u32>,
}

impl UvAmbientReading {
    /// Create a UV-only reading (the committed operating mode)
    pub const fn uv_only(uv_index: u32) -> Self {
        Self {
            uv_index,
            ambient: None,
        }
    }
}

/// A reading from the broadband luminosity sensor.
///
/// The sensor reports one combined 32-bit value: infrared counts in the
/// high half, full-spectrum counts in the low half. Lux is derived from
/// the two halves via [`LuxCalibration`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LuminosityReading {
    /// Full-spectrum channel count (low half of the raw value)
    pub full: u16,
    /// Infrared channel count (high half of the raw value)
    pub ir: u16,
    /// Derived lux value, always finite (non-finite results clamp to 0.0)
    pub lux: f32,
}

impl LuminosityReading {
    /// Split a combined raw value and derive lux.
    ///
    /// The lux formula divides by the full-spectrum count, so a dark
    /// sensor produces a non-finite result; that is clamped to 0.0 here
    /// so it can never reach a telemetry frame.
    pub fn from_raw(raw: u32, calibration: &LuxCalibration) -> Self {
        let full = (raw & 0xFFFF) as u16;
        let ir = (raw >> 16) as u16;
        let lux = calibration.lux(full, ir);
        Self {
            full,
            ir,
            lux: if lux.is_finite() { lux } else { 0.0 },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boot_order_is_fixed() {
        assert_eq!(
            SensorId::BOOT_ORDER,
            [
                SensorId::SpectralBank,
                SensorId::UvAmbient,
                SensorId::Luminosity
            ]
        );
        assert_eq!(SensorId::SpectralBank.as_str(), "as7341");
        assert_eq!(SensorId::UvAmbient.as_str(), "ltr390");
        assert_eq!(SensorId::Luminosity.as_str(), "tsl2591");
    }

    #[test]
    fn test_channels_round_trip() {
        let ch = [100, 200, 300, 400, 500, 600, 700, 800];
        let reading = SpectralReading::from_channels(ch);
        assert_eq!(reading.channels(), ch);
        assert_eq!(reading.max_channel(), 800);
    }

    #[test]
    fn test_raw_luminosity_split() {
        // IR in the high half, full-spectrum in the low half
        let raw = (0x1234u32 << 16) | 0x5678;
        let reading = LuminosityReading::from_raw(raw, &LuxCalibration::TSL2591_DEFAULT);
        assert_eq!(reading.ir, 0x1234);
        assert_eq!(reading.full, 0x5678);
        assert!(reading.lux.is_finite());
    }

    #[test]
    fn test_dark_sensor_lux_clamps_to_zero() {
        let reading = LuminosityReading::from_raw(0, &LuxCalibration::TSL2591_DEFAULT);
        assert_eq!(reading.full, 0);
        assert_eq!(reading.ir, 0);
        assert_eq!(reading.lux, 0.0);
    }
}
