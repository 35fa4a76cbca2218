//! Boot sequencer
//!
//! Initializes each sensor exactly once, in a fixed order, and records
//! the outcomes in the readiness registry. Initialization failure is
//! non-fatal: the sensor is marked `Failed`, a boot record goes out for
//! operator visibility, and the sequence continues. The sequencer adds
//! no timeout of its own - bounded return is each capability's
//! contract.

use log::{info, warn};

use crate::domain::{Readiness, ReadinessRegistry, SensorId};
use crate::ports::light::{LuminositySensorPort, UvSensorPort};
use crate::ports::spectral::SpectralSensorPort;
use crate::ports::transport::TransportPort;
use crate::telemetry::{encode_line, BootRecord};

/// Emit one boot record, logging instead of propagating any failure.
///
/// Boot must run to completion even with a dead transport; the registry
/// is the authoritative outcome, the records are advisory.
async fn emit<T: TransportPort>(transport: &mut T, record: &BootRecord) {
    match encode_line(record) {
        Ok(line) => {
            if let Err(e) = transport.send_line(&line).await {
                warn!("boot record dropped: {e}");
            }
        }
        Err(e) => warn!("boot record not encoded: {e}"),
    }
}

/// Record one sensor's initialization outcome and emit its boot record
async fn record_outcome<E, T>(
    registry: &mut ReadinessRegistry,
    transport: &mut T,
    id: SensorId,
    outcome: Result<(), E>,
) where
    E: std::fmt::Display,
    T: TransportPort,
{
    match outcome {
        Ok(()) => {
            info!("{} initialized", id.as_str());
            registry.record(id, Readiness::Ready);
            emit(transport, &BootRecord::online(id)).await;
        }
        Err(e) => {
            warn!("{} init failed: {e}", id.as_str());
            registry.record(id, Readiness::Failed);
            emit(transport, &BootRecord::init_failed(id, &e.to_string())).await;
        }
    }
}

/// Run the one-shot boot sequence and return the populated registry.
///
/// Order is fixed (spectral bank, UV/ambient, luminosity) so a late
/// failure never blocks an earlier successful sensor. Emits one record
/// per sensor outcome plus a final readiness summary.
pub async fn run_boot_sequence<S, U, L, T>(
    spectral: &mut S,
    uv: &mut U,
    luminosity: &mut L,
    transport: &mut T,
) -> ReadinessRegistry
where
    S: SpectralSensorPort,
    U: UvSensorPort,
    L: LuminositySensorPort,
    T: TransportPort,
{
    let mut registry = ReadinessRegistry::new();

    let outcome = spectral.initialize().await;
    record_outcome(&mut registry, transport, SensorId::SpectralBank, outcome).await;

    let outcome = uv.initialize().await;
    record_outcome(&mut registry, transport, SensorId::UvAmbient, outcome).await;

    let outcome = luminosity.initialize().await;
    record_outcome(&mut registry, transport, SensorId::Luminosity, outcome).await;

    emit(transport, &BootRecord::summary(&registry)).await;
    info!(
        "boot complete: as7341={} ltr390={} tsl2591={}",
        registry.is_ready(SensorId::SpectralBank),
        registry.is_ready(SensorId::UvAmbient),
        registry.is_ready(SensorId::Luminosity),
    );

    registry
}
