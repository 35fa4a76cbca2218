//! Simulated sensor adapters
//!
//! Hardware-free implementations of the three sensor ports, used by the
//! demo binary and anywhere the station runs without a physical bus.
//! The spectral simulation responds to `set_gain`, so the auto-gain
//! search behaves the same way it does against real hardware.

use rand::Rng;

use crate::domain::gain::{DEFAULT_GAIN_INDEX, GAIN_MULTIPLIERS, MAX_GAIN_INDEX};
use crate::domain::{SpectralReading, UvAmbientReading};
use crate::ports::light::{LightSensorError, LuminositySensorPort, UvSensorPort};
use crate::ports::spectral::{SpectralSensorError, SpectralSensorPort};

/// Relative channel response of the simulated scene, F1..F8.
///
/// A daylight-ish profile: stronger in the green/yellow bands, weaker
/// at the violet and red edges.
const CHANNEL_PROFILE: [f32; 8] = [0.45, 0.65, 0.85, 1.0, 0.95, 0.8, 0.7, 0.55];

/// Simulated 8-channel spectral bank.
///
/// Channel output scales linearly with the applied gain multiplier and
/// clips at the sensor's 16-bit ceiling, which is what makes the
/// auto-gain search converge in simulation.
pub struct SimSpectralSensor {
    /// Scene brightness in counts at 1x gain
    base_level: f32,
    gain_index: u8,
    ready: bool,
}

impl SimSpectralSensor {
    /// Create a simulated bank with a mid-range scene
    pub fn new() -> Self {
        Self::with_base_level(1800.0)
    }

    /// Create a simulated bank with a specific scene brightness
    /// (counts at 1x gain)
    pub fn with_base_level(base_level: f32) -> Self {
        Self {
            base_level,
            gain_index: DEFAULT_GAIN_INDEX,
            ready: false,
        }
    }
}

impl Default for SimSpectralSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl SpectralSensorPort for SimSpectralSensor {
    async fn initialize(&mut self) -> Result<(), SpectralSensorError> {
        self.ready = true;
        Ok(())
    }

    async fn read(&mut self) -> Result<SpectralReading, SpectralSensorError> {
        if !self.ready {
            return Err(SpectralSensorError::NotInitialized);
        }
        let mut rng = rand::thread_rng();
        let gain = GAIN_MULTIPLIERS[self.gain_index as usize];
        let mut channels = [0u16; 8];
        for (ch, profile) in channels.iter_mut().zip(CHANNEL_PROFILE) {
            let jitter: f32 = rng.gen_range(0.97..1.03);
            let value = self.base_level * profile * gain * jitter;
            *ch = value.min(u16::MAX as f32) as u16;
        }
        Ok(SpectralReading::from_channels(channels))
    }

    async fn set_gain(&mut self, gain_index: u8) -> Result<(), SpectralSensorError> {
        if gain_index > MAX_GAIN_INDEX {
            return Err(SpectralSensorError::InvalidConfig);
        }
        self.gain_index = gain_index;
        Ok(())
    }
}

/// Simulated UV sensor, committed to UV mode
pub struct SimUvSensor {
    uv_level: u32,
    ready: bool,
}

impl SimUvSensor {
    /// Create a simulated UV sensor around a moderate UV index
    pub fn new() -> Self {
        Self::with_level(3)
    }

    /// Create a simulated UV sensor around a specific UV count
    pub fn with_level(uv_level: u32) -> Self {
        Self {
            uv_level,
            ready: false,
        }
    }
}

impl Default for SimUvSensor {
    fn default() -> Self {
        Self::new()
    }
}

impl UvSensorPort for SimUvSensor {
    async fn initialize(&mut self) -> Result<(), LightSensorError> {
        self.ready = true;
        Ok(())
    }

    async fn read(&mut self) -> Result<UvAmbientReading, LightSensorError> {
        if !self.ready {
            return Err(LightSensorError::NotInitialized);
        }
        let mut rng = rand::thread_rng();
        let jitter = rng.gen_range(0..=1);
        Ok(UvAmbientReading::uv_only(self.uv_level + jitter))
    }
}

/// Simulated broadband luminosity sensor.
///
/// Produces the combined raw value the real part reports: infrared in
/// the high half (~30% of full-spectrum), full-spectrum in the low half.
pub struct SimLuminositySensor {
    full_level: u16,
    ready: bool,
}

impl SimLuminositySensor {
    /// Create a simulated sensor around indoor light levels
    pub fn new() -> Self {
        Self::with_level(4200)
    }

    /// Create a simulated sensor around a specific full-spectrum count
    pub fn with_level(full_level: u16) -> Self {
        Self {
            full_level,
            ready: false,
        }
    }
}

impl Default for SimLuminositySensor {
    fn default() -> Self {
        Self::new()
    }
}

impl LuminositySensorPort for SimLuminositySensor {
    async fn initialize(&mut self) -> Result<(), LightSensorError> {
        self.ready = true;
        Ok(())
    }

    async fn read_combined(&mut self) -> Result<u32, LightSensorError> {
        if !self.ready {
            return Err(LightSensorError::NotInitialized);
        }
        let mut rng = rand::thread_rng();
        let jitter: f32 = rng.gen_range(0.95..1.05);
        let full = (self.full_level as f32 * jitter) as u32 & 0xFFFF;
        let ir = (full * 3) / 10;
        Ok((ir << 16) | full)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_before_init_fails() {
        let mut spectral = SimSpectralSensor::new();
        assert_eq!(
            spectral.read().await,
            Err(SpectralSensorError::NotInitialized)
        );

        let mut uv = SimUvSensor::new();
        assert_eq!(uv.read().await, Err(LightSensorError::NotInitialized));

        let mut lum = SimLuminositySensor::new();
        assert_eq!(
            lum.read_combined().await,
            Err(LightSensorError::NotInitialized)
        );
    }

    #[tokio::test]
    async fn test_spectral_output_scales_with_gain() {
        let mut sensor = SimSpectralSensor::with_base_level(100.0);
        sensor.initialize().await.unwrap();

        sensor.set_gain(0).await.unwrap();
        let low = sensor.read().await.unwrap().max_channel();
        sensor.set_gain(10).await.unwrap();
        let high = sensor.read().await.unwrap().max_channel();
        assert!(high > low * 100, "low={low} high={high}");
    }

    #[tokio::test]
    async fn test_spectral_rejects_gain_off_the_ladder() {
        let mut sensor = SimSpectralSensor::new();
        sensor.initialize().await.unwrap();
        assert_eq!(
            sensor.set_gain(11).await,
            Err(SpectralSensorError::InvalidConfig)
        );
    }

    #[tokio::test]
    async fn test_luminosity_halves_are_consistent() {
        let mut sensor = SimLuminositySensor::with_level(4000);
        sensor.initialize().await.unwrap();
        let raw = sensor.read_combined().await.unwrap();
        let full = raw & 0xFFFF;
        let ir = raw >> 16;
        assert!(ir < full);
        assert!(full >= 3000 && full <= 5000, "full={full}");
    }
}
