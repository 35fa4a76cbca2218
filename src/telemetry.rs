//! Telemetry wire protocol shared between the station and the host
//!
//! One UTF-8 JSON object per line, each line independently parseable.
//! The station emits two record shapes: boot-phase records
//! (`{"status":...}`, `{"error":...}`, and the readiness summary) and
//! the per-cycle telemetry record. Consumers treat every line
//! independently, ignore lines that do not parse, and merge only the
//! fields present in a record into their last-known state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::gain::GAIN_LABELS;
use crate::domain::{ReadinessRegistry, SensorId, TelemetryFrame};

/// Firmware identity string carried in every telemetry record
pub const FW_VERSION: &str = concat!("lumistation-", env!("CARGO_PKG_VERSION"));

/// Errors that can occur while encoding a record
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Record could not be serialized; the whole line is withheld
    #[error("record encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Encode any record as one complete line, `\n`-terminated.
///
/// Serialization happens entirely before any byte is handed to a
/// transport, so a failure here aborts the record without a fragment
/// ever being flushed.
pub fn encode_line<T: Serialize>(record: &T) -> Result<String, TelemetryError> {
    let mut line = serde_json::to_string(record)?;
    line.push('\n');
    Ok(line)
}

// ============================================================================
// Per-Cycle Telemetry Record
// ============================================================================

/// One cycle's telemetry record in canonical field order.
///
/// Field presence follows two different rules, preserved from the
/// protocol this dashboard was built against: the spectral channels
/// F1..F8 are omitted entirely when the spectral read did not succeed,
/// while the UV/ALS/TSL fields are always present and zero-defaulted
/// when their sensor gave nothing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    /// Firmware identity
    pub fw: String,
    /// Gain label the spectral bank is running at ("16x")
    pub gain: String,
    /// F1 415nm channel, present only when the spectral read succeeded
    #[serde(rename = "F1", skip_serializing_if = "Option::is_none", default)]
    pub f1: Option<u16>,
    /// F2 445nm channel
    #[serde(rename = "F2", skip_serializing_if = "Option::is_none", default)]
    pub f2: Option<u16>,
    /// F3 480nm channel
    #[serde(rename = "F3", skip_serializing_if = "Option::is_none", default)]
    pub f3: Option<u16>,
    /// F4 515nm channel
    #[serde(rename = "F4", skip_serializing_if = "Option::is_none", default)]
    pub f4: Option<u16>,
    /// F5 555nm channel
    #[serde(rename = "F5", skip_serializing_if = "Option::is_none", default)]
    pub f5: Option<u16>,
    /// F6 590nm channel
    #[serde(rename = "F6", skip_serializing_if = "Option::is_none", default)]
    pub f6: Option<u16>,
    /// F7 630nm channel
    #[serde(rename = "F7", skip_serializing_if = "Option::is_none", default)]
    pub f7: Option<u16>,
    /// F8 680nm channel
    #[serde(rename = "F8", skip_serializing_if = "Option::is_none", default)]
    pub f8: Option<u16>,
    /// UV index count, 0 when the sensor is not ready
    #[serde(rename = "UV")]
    pub uv: u32,
    /// Ambient-light count, 0 when unavailable
    #[serde(rename = "ALS")]
    pub als: u32,
    /// Derived lux, always finite (0.0 when not ready or sanitized)
    #[serde(rename = "TSL_Lux")]
    pub tsl_lux: f32,
    /// Infrared count, 0 when the sensor is not ready
    #[serde(rename = "TSL_IR")]
    pub tsl_ir: u16,
    /// Full-spectrum count, 0 when the sensor is not ready
    #[serde(rename = "TSL_Full")]
    pub tsl_full: u16,
}

impl TelemetryRecord {
    /// Build the wire record for one frame.
    ///
    /// A non-finite lux in the frame is sanitized to 0.0 here as well:
    /// the encoder must never emit an invalid numeric literal no matter
    /// how the frame was constructed.
    pub fn from_frame(frame: &TelemetryFrame) -> Self {
        let ch = frame.spectral.map(|s| s.channels());
        let lux = frame.lux_or_default();
        Self {
            fw: FW_VERSION.to_string(),
            gain: GAIN_LABELS[usize::from(frame.gain_index.min(10))].to_string(),
            f1: ch.map(|c| c[0]),
            f2: ch.map(|c| c[1]),
            f3: ch.map(|c| c[2]),
            f4: ch.map(|c| c[3]),
            f5: ch.map(|c| c[4]),
            f6: ch.map(|c| c[5]),
            f7: ch.map(|c| c[6]),
            f8: ch.map(|c| c[7]),
            uv: frame.uv_or_default(),
            als: frame.ambient_or_default(),
            tsl_lux: if lux.is_finite() { lux } else { 0.0 },
            tsl_ir: frame.ir_or_default(),
            tsl_full: frame.full_or_default(),
        }
    }
}

// ============================================================================
// Boot-Phase Records
// ============================================================================

/// Boot-phase records use a distinct minimal shape per outcome.
///
/// The summary variant must stay first: deserialization tries variants
/// in order, and a summary line also matches the plain status shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BootRecord {
    /// Final readiness summary for all three sensors
    Summary {
        /// Always the literal "ready"
        status: String,
        /// Spectral bank readiness
        as7341: bool,
        /// UV/ambient sensor readiness
        ltr390: bool,
        /// Luminosity sensor readiness
        tsl2591: bool,
    },
    /// Progress message for one successful step
    Status {
        /// Human-readable step description
        status: String,
    },
    /// One step's failure, non-fatal
    Error {
        /// Human-readable failure description
        error: String,
    },
}

impl BootRecord {
    /// Progress record for a sensor that came up
    pub fn online(id: SensorId) -> Self {
        BootRecord::Status {
            status: format!("{} online", id.as_str()),
        }
    }

    /// Failure record for a sensor that did not come up
    pub fn init_failed(id: SensorId, detail: &str) -> Self {
        BootRecord::Error {
            error: format!("{} init failed: {}", id.as_str(), detail),
        }
    }

    /// Readiness summary across all three sensors
    pub fn summary(registry: &ReadinessRegistry) -> Self {
        BootRecord::Summary {
            status: "ready".to_string(),
            as7341: registry.is_ready(SensorId::SpectralBank),
            ltr390: registry.is_ready(SensorId::UvAmbient),
            tsl2591: registry.is_ready(SensorId::Luminosity),
        }
    }
}

// ============================================================================
// Consumer-Side Merge
// ============================================================================

/// Last-known dashboard state, built by merging record lines.
///
/// Every line is handled independently: lines that do not parse as a
/// JSON object are ignored, and only the fields present in a record
/// update the state - fields absent from a record retain their prior
/// values. This is the merge behavior the wire protocol's per-field
/// presence rules were designed against.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DashboardState {
    /// Last firmware identity seen
    pub fw: Option<String>,
    /// Last gain label seen
    pub gain: Option<String>,
    /// Last value per spectral channel F1..F8
    pub channels: [Option<u64>; 8],
    /// Last UV count seen
    pub uv: Option<u64>,
    /// Last ambient-light count seen
    pub als: Option<u64>,
    /// Last lux value seen
    pub tsl_lux: Option<f64>,
    /// Last infrared count seen
    pub tsl_ir: Option<u64>,
    /// Last full-spectrum count seen
    pub tsl_full: Option<u64>,
    /// Last boot/status message seen
    pub last_status: Option<String>,
    /// Last error message seen
    pub last_error: Option<String>,
}

impl DashboardState {
    /// Create an empty state with no fields known yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one received line into the state.
    ///
    /// Returns `false` for lines that do not parse as a complete JSON
    /// object; such lines leave the state untouched.
    pub fn apply_line(&mut self, line: &str) -> bool {
        let value: serde_json::Value = match serde_json::from_str(line.trim()) {
            Ok(v) => v,
            Err(_) => return false,
        };
        let obj = match value.as_object() {
            Some(obj) => obj,
            None => return false,
        };

        if let Some(fw) = obj.get("fw").and_then(|v| v.as_str()) {
            self.fw = Some(fw.to_string());
        }
        if let Some(gain) = obj.get("gain").and_then(|v| v.as_str()) {
            self.gain = Some(gain.to_string());
        }
        for (i, key) in ["F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8"]
            .iter()
            .enumerate()
        {
            if let Some(v) = obj.get(*key).and_then(|v| v.as_u64()) {
                self.channels[i] = Some(v);
            }
        }
        if let Some(v) = obj.get("UV").and_then(|v| v.as_u64()) {
            self.uv = Some(v);
        }
        if let Some(v) = obj.get("ALS").and_then(|v| v.as_u64()) {
            self.als = Some(v);
        }
        if let Some(v) = obj.get("TSL_Lux").and_then(|v| v.as_f64()) {
            self.tsl_lux = Some(v);
        }
        if let Some(v) = obj.get("TSL_IR").and_then(|v| v.as_u64()) {
            self.tsl_ir = Some(v);
        }
        if let Some(v) = obj.get("TSL_Full").and_then(|v| v.as_u64()) {
            self.tsl_full = Some(v);
        }
        if let Some(s) = obj.get("status").and_then(|v| v.as_str()) {
            self.last_status = Some(s.to_string());
        }
        if let Some(s) = obj.get("error").and_then(|v| v.as_str()) {
            self.last_error = Some(s.to_string());
        }

        true
    }
}
