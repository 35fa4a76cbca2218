//! Lumistation device loop
//!
//! Runs the acquisition loop against the simulated sensor trio and
//! writes telemetry lines to stdout. Pipe the output to a file, a
//! serial bridge, or the dashboard host to watch the station live.
//!
//! ## Usage
//!
//! ```bash
//! # Default 500 ms cadence
//! cargo run --bin lumistation
//!
//! # Faster sampling
//! cargo run --bin lumistation -- --interval-ms 100
//! ```

use lumistation::adapters::{
    SimLuminositySensor, SimSpectralSensor, SimUvSensor, StdoutTransport,
};
use lumistation::{run_boot_sequence, AcquisitionCycle, StationConfig, FW_VERSION};

fn parse_args() -> Result<StationConfig, String> {
    let args: Vec<String> = std::env::args().collect();
    let mut config = StationConfig::default();

    if let Some(idx) = args.iter().position(|a| a == "--interval-ms") {
        let value = args
            .get(idx + 1)
            .ok_or("--interval-ms requires a value".to_string())?;
        config.cycle_interval_ms = value
            .parse::<u64>()
            .map_err(|_| format!("invalid interval '{value}'"))?;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = parse_args()?;
    log::info!("{FW_VERSION} starting, {} ms cadence", config.cycle_interval_ms);

    let mut spectral = SimSpectralSensor::new();
    let mut uv = SimUvSensor::new();
    let mut luminosity = SimLuminositySensor::new();
    let mut transport = StdoutTransport::new();

    let readiness =
        run_boot_sequence(&mut spectral, &mut uv, &mut luminosity, &mut transport).await;

    let mut cycle =
        AcquisitionCycle::new(spectral, uv, luminosity, transport, readiness, config);
    cycle.run().await;

    Ok(())
}
