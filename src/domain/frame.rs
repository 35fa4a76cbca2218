//! Per-cycle telemetry frame
//!
//! One frame aggregates whatever the current cycle managed to acquire,
//! plus the gain index the spectral bank is running at. Frames are fully
//! transient: created by the acquisition cycle, consumed by the encoder,
//! then discarded.

use crate::domain::{LuminosityReading, SpectralReading, UvAmbientReading};

/// One sampling cycle's aggregated sensor snapshot.
///
/// A reading slot is `None` when that sensor was not ready or its read
/// failed this cycle. The frame never carries spectral data from a
/// failed read, and a contained lux value is always finite.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TelemetryFrame {
    /// Spectral bank reading, present only if this cycle's read succeeded
    pub spectral: Option<SpectralReading>,
    /// UV/ambient reading, present only if this cycle's read succeeded
    pub uv: Option<UvAmbientReading>,
    /// Luminosity reading, present only if this cycle's read succeeded
    pub luminosity: Option<LuminosityReading>,
    /// Gain index the spectral bank is currently running at
    pub gain_index: u8,
}

impl TelemetryFrame {
    /// UV count for the wire record (0 when the sensor gave nothing)
    pub fn uv_or_default(&self) -> u32 {
        self.uv.map(|r| r.uv_index).unwrap_or(0)
    }

    /// Ambient-light count for the wire record (0 when unavailable)
    pub fn ambient_or_default(&self) -> u32 {
        self.uv.and_then(|r| r.ambient).unwrap_or(0)
    }

    /// Lux for the wire record (0.0 when the sensor gave nothing)
    pub fn lux_or_default(&self) -> f32 {
        self.luminosity.map(|r| r.lux).unwrap_or(0.0)
    }

    /// Infrared count for the wire record (0 when the sensor gave nothing)
    pub fn ir_or_default(&self) -> u16 {
        self.luminosity.map(|r| r.ir).unwrap_or(0)
    }

    /// Full-spectrum count for the wire record (0 when the sensor gave nothing)
    pub fn full_or_default(&self) -> u16 {
        self.luminosity.map(|r| r.full).unwrap_or(0)
    }
}
