//! Acquisition cycle - the per-tick orchestrator
//!
//! Each tick reads every sensor the registry marks ready, drives the
//! bounded auto-gain search over the spectral bank, assembles one
//! telemetry frame, and hands the encoded record to the transport.
//! Read failures degrade the frame instead of the loop: the field is
//! omitted or defaulted for that cycle and the sensor stays ready.

use log::{debug, warn};
use tokio::time::{sleep, Duration};

use crate::app::StationConfig;
use crate::domain::{
    AutoGainController, GainAdjust, LuminosityReading, LuxCalibration, ReadinessRegistry,
    SensorId, SpectralReading, TelemetryFrame,
};
use crate::ports::light::{LuminositySensorPort, UvSensorPort};
use crate::ports::spectral::SpectralSensorPort;
use crate::ports::transport::{TransportError, TransportPort};
use crate::telemetry::{encode_line, TelemetryRecord};

/// Upper bound on read-adjust iterations per cycle.
///
/// Each re-read costs real acquisition time inside the cycle's soft
/// time budget. After the bound, the last reading is accepted whatever
/// its saturation state.
pub const MAX_GAIN_ATTEMPTS: u8 = 5;

/// The per-tick orchestrator.
///
/// Owns the sensor and transport ports, the readiness registry, and
/// the gain controller; the gain index is the only state carried from
/// one cycle to the next.
pub struct AcquisitionCycle<S, U, L, T> {
    spectral: S,
    uv: U,
    luminosity: L,
    transport: T,
    readiness: ReadinessRegistry,
    gain: AutoGainController,
    lux_calibration: LuxCalibration,
    config: StationConfig,
}

impl<S, U, L, T> AcquisitionCycle<S, U, L, T>
where
    S: SpectralSensorPort,
    U: UvSensorPort,
    L: LuminositySensorPort,
    T: TransportPort,
{
    /// Create a cycle from booted ports and their readiness registry
    pub fn new(
        spectral: S,
        uv: U,
        luminosity: L,
        transport: T,
        readiness: ReadinessRegistry,
        config: StationConfig,
    ) -> Self {
        Self {
            spectral,
            uv,
            luminosity,
            transport,
            readiness,
            gain: AutoGainController::new(),
            lux_calibration: LuxCalibration::default(),
            config,
        }
    }

    /// Override the luminosity calibration
    pub fn with_lux_calibration(mut self, calibration: LuxCalibration) -> Self {
        self.lux_calibration = calibration;
        self
    }

    /// Current gain index of the spectral bank
    pub fn gain_index(&self) -> u8 {
        self.gain.index()
    }

    /// The readiness registry populated at boot
    pub fn readiness(&self) -> &ReadinessRegistry {
        &self.readiness
    }

    /// Borrow the transport (e.g. to inspect a buffering transport)
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Tear down into the transport, discarding the sensor ports
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Run the loop forever: one cycle to completion, then the fixed
    /// post-cycle delay. Send failures are logged and do not stop the
    /// loop.
    pub async fn run(&mut self) {
        loop {
            if let Err(e) = self.tick().await {
                warn!("telemetry send failed: {e}");
            }
            sleep(Duration::from_millis(self.config.cycle_interval_ms)).await;
        }
    }

    /// Perform one acquisition cycle and emit its record.
    ///
    /// An encoding failure withholds the whole record (never a
    /// fragment) and is not an error at this level; only transport
    /// failures surface to the caller.
    pub async fn tick(&mut self) -> Result<(), TransportError> {
        let frame = self.acquire().await;
        let record = TelemetryRecord::from_frame(&frame);
        let line = match encode_line(&record) {
            Ok(line) => line,
            Err(e) => {
                warn!("cycle record withheld: {e}");
                return Ok(());
            }
        };
        self.transport.send_line(&line).await
    }

    /// Read every ready sensor and assemble this cycle's frame
    async fn acquire(&mut self) -> TelemetryFrame {
        let mut frame = TelemetryFrame::default();

        if self.readiness.is_ready(SensorId::SpectralBank) {
            frame.spectral = self.read_spectral().await;
        }
        frame.gain_index = self.gain.index();

        if self.readiness.is_ready(SensorId::UvAmbient) {
            match self.uv.read().await {
                Ok(reading) => frame.uv = Some(reading),
                Err(e) => warn!("uv read failed: {e}"),
            }
        }

        if self.readiness.is_ready(SensorId::Luminosity) {
            match self.luminosity.read_combined().await {
                Ok(raw) => {
                    frame.luminosity =
                        Some(LuminosityReading::from_raw(raw, &self.lux_calibration));
                }
                Err(e) => warn!("luminosity read failed: {e}"),
            }
        }

        frame
    }

    /// Read the spectral bank, running the bounded gain search.
    ///
    /// After every `Changed` verdict the new index is pushed to the
    /// sensor and the bank is re-read, up to [`MAX_GAIN_ATTEMPTS`]
    /// read-adjust iterations. A set-gain or re-read failure mid-search
    /// stops the search and keeps the last good reading: partial
    /// telemetry beats none.
    async fn read_spectral(&mut self) -> Option<SpectralReading> {
        let mut reading = match self.spectral.read().await {
            Ok(reading) => reading,
            Err(e) => {
                warn!("spectral read failed: {e}");
                return None;
            }
        };

        let mut attempts: u8 = 1;
        while self.gain.adjust(&reading) == GainAdjust::Changed {
            debug!(
                "gain stepped to {} ({}), max channel {}",
                self.gain.index(),
                self.gain.label(),
                reading.max_channel()
            );
            if let Err(e) = self.spectral.set_gain(self.gain.index()).await {
                warn!("gain apply failed: {e}");
                break;
            }
            if attempts >= MAX_GAIN_ATTEMPTS {
                debug!("gain search bound reached, accepting last reading");
                break;
            }
            match self.spectral.read().await {
                Ok(next) => reading = next,
                Err(e) => {
                    warn!("spectral re-read failed: {e}");
                    break;
                }
            }
            attempts += 1;
        }

        Some(reading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryTransport;
    use crate::domain::{Readiness, UvAmbientReading};
    use crate::ports::light::LightSensorError;
    use crate::ports::spectral::SpectralSensorError;
    use std::collections::VecDeque;

    /// Spectral fake fed a script of read results; repeats the last
    /// entry once the script runs out.
    struct ScriptedSpectral {
        script: VecDeque<Result<[u16; 8], SpectralSensorError>>,
        last: Result<[u16; 8], SpectralSensorError>,
        reads: usize,
        gains_applied: Vec<u8>,
    }

    impl ScriptedSpectral {
        fn new(script: Vec<Result<[u16; 8], SpectralSensorError>>) -> Self {
            Self {
                script: script.into(),
                last: Err(SpectralSensorError::ReadFailed),
                reads: 0,
                gains_applied: Vec::new(),
            }
        }
    }

    impl SpectralSensorPort for ScriptedSpectral {
        async fn initialize(&mut self) -> Result<(), SpectralSensorError> {
            Ok(())
        }

        async fn read(&mut self) -> Result<SpectralReading, SpectralSensorError> {
            self.reads += 1;
            if let Some(next) = self.script.pop_front() {
                self.last = next;
            }
            self.last.map(SpectralReading::from_channels)
        }

        async fn set_gain(&mut self, gain_index: u8) -> Result<(), SpectralSensorError> {
            self.gains_applied.push(gain_index);
            Ok(())
        }
    }

    struct FixedUv {
        value: Result<u32, LightSensorError>,
    }

    impl UvSensorPort for FixedUv {
        async fn initialize(&mut self) -> Result<(), LightSensorError> {
            Ok(())
        }

        async fn read(&mut self) -> Result<UvAmbientReading, LightSensorError> {
            self.value.map(UvAmbientReading::uv_only)
        }
    }

    struct FixedLuminosity {
        value: Result<u32, LightSensorError>,
    }

    impl LuminositySensorPort for FixedLuminosity {
        async fn initialize(&mut self) -> Result<(), LightSensorError> {
            Ok(())
        }

        async fn read_combined(&mut self) -> Result<u32, LightSensorError> {
            self.value
        }
    }

    fn all_ready() -> ReadinessRegistry {
        let mut registry = ReadinessRegistry::new();
        registry.record(SensorId::SpectralBank, Readiness::Ready);
        registry.record(SensorId::UvAmbient, Readiness::Ready);
        registry.record(SensorId::Luminosity, Readiness::Ready);
        registry
    }

    fn cycle_with(
        spectral: ScriptedSpectral,
        registry: ReadinessRegistry,
    ) -> AcquisitionCycle<ScriptedSpectral, FixedUv, FixedLuminosity, MemoryTransport> {
        AcquisitionCycle::new(
            spectral,
            FixedUv { value: Ok(2) },
            FixedLuminosity {
                value: Ok((200 << 16) | 900),
            },
            MemoryTransport::new(),
            registry,
            StationConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_saturation_triggers_one_step_and_reread() {
        // Scenario: one saturated channel at the neutral index
        let spectral = ScriptedSpectral::new(vec![
            Ok([100, 200, 60500, 300, 400, 500, 600, 700]),
            Ok([50, 100, 30000, 150, 200, 250, 300, 350]),
        ]);
        let mut cycle = cycle_with(spectral, all_ready());

        cycle.tick().await.unwrap();

        assert_eq!(cycle.gain_index(), 4);
        assert_eq!(cycle.spectral.reads, 2);
        assert_eq!(cycle.spectral.gains_applied, vec![4]);

        let line = &cycle.transport.lines()[0];
        assert!(line.contains("\"gain\":\"8x\""));
        assert!(line.contains("\"F3\":30000"));
    }

    #[tokio::test]
    async fn test_dark_bank_at_ceiling_reads_once() {
        let spectral = ScriptedSpectral::new(vec![Ok([500; 8])]);
        let mut cycle = cycle_with(spectral, all_ready());
        cycle.gain = AutoGainController::with_index(10);

        cycle.tick().await.unwrap();

        assert_eq!(cycle.gain_index(), 10);
        assert_eq!(cycle.spectral.reads, 1);
        assert!(cycle.spectral.gains_applied.is_empty());
    }

    #[tokio::test]
    async fn test_gain_search_is_bounded() {
        // A bank that stays saturated no matter what: the search must
        // stop at the iteration bound, not walk the ladder forever.
        let spectral = ScriptedSpectral::new(vec![Ok([65535; 8])]);
        let mut cycle = cycle_with(spectral, all_ready());

        cycle.tick().await.unwrap();

        assert!(cycle.spectral.reads <= MAX_GAIN_ATTEMPTS as usize);
        assert_eq!(cycle.gain_index(), 0);
        // Every applied step moved exactly one index down
        assert_eq!(cycle.spectral.gains_applied, vec![4, 3, 2, 1, 0]);
    }

    #[tokio::test]
    async fn test_failed_spectral_boot_omits_channels_and_freezes_gain() {
        // Scenario: spectral bank marked failed at boot
        let mut registry = ReadinessRegistry::new();
        registry.record(SensorId::SpectralBank, Readiness::Failed);
        registry.record(SensorId::UvAmbient, Readiness::Ready);
        registry.record(SensorId::Luminosity, Readiness::Ready);

        let spectral = ScriptedSpectral::new(vec![Ok([65535; 8])]);
        let mut cycle = cycle_with(spectral, registry);

        for _ in 0..3 {
            cycle.tick().await.unwrap();
        }

        assert_eq!(cycle.gain_index(), 5);
        assert_eq!(cycle.spectral.reads, 0);
        for line in cycle.transport.lines() {
            assert!(!line.contains("\"F1\""));
            assert!(line.contains("\"gain\":\"16x\""));
            assert!(line.contains("\"UV\":2"));
        }
    }

    #[tokio::test]
    async fn test_transient_read_failure_omits_field_without_downgrade() {
        let spectral = ScriptedSpectral::new(vec![
            Err(SpectralSensorError::ReadFailed),
            Ok([2000; 8]),
        ]);
        let mut cycle = cycle_with(spectral, all_ready());

        cycle.tick().await.unwrap();
        cycle.tick().await.unwrap();

        let lines = cycle.transport.lines();
        assert!(!lines[0].contains("\"F1\""));
        assert!(lines[1].contains("\"F1\":2000"));
        assert!(cycle.readiness().is_ready(SensorId::SpectralBank));
    }

    #[tokio::test]
    async fn test_reread_failure_keeps_last_good_reading() {
        let spectral = ScriptedSpectral::new(vec![
            Ok([100, 200, 60500, 300, 400, 500, 600, 700]),
            Err(SpectralSensorError::Timeout),
        ]);
        let mut cycle = cycle_with(spectral, all_ready());

        cycle.tick().await.unwrap();

        // Gain stepped down once, re-read failed, first reading kept
        assert_eq!(cycle.gain_index(), 4);
        let line = &cycle.transport.lines()[0];
        assert!(line.contains("\"F3\":60500"));
    }

    #[tokio::test]
    async fn test_uv_and_luminosity_failures_default_their_fields() {
        let mut cycle = AcquisitionCycle::new(
            ScriptedSpectral::new(vec![Ok([2000; 8])]),
            FixedUv {
                value: Err(LightSensorError::ReadFailed),
            },
            FixedLuminosity {
                value: Err(LightSensorError::Timeout),
            },
            MemoryTransport::new(),
            all_ready(),
            StationConfig::default(),
        );

        cycle.tick().await.unwrap();

        let line = &cycle.transport.lines()[0];
        assert!(line.contains("\"UV\":0"));
        assert!(line.contains("\"ALS\":0"));
        assert!(line.contains("\"TSL_Lux\":0.0"));
        assert!(line.contains("\"TSL_IR\":0"));
        assert!(line.contains("\"TSL_Full\":0"));
        assert!(line.contains("\"F1\":2000"));
    }

    #[tokio::test]
    async fn test_luminosity_split_reaches_the_record() {
        let spectral = ScriptedSpectral::new(vec![Ok([2000; 8])]);
        let mut cycle = cycle_with(spectral, all_ready());

        cycle.tick().await.unwrap();

        let line = &cycle.transport.lines()[0];
        assert!(line.contains("\"TSL_Full\":900"));
        assert!(line.contains("\"TSL_IR\":200"));
    }
}
