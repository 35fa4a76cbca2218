//! Lumistation Dashboard Host
//!
//! This binary runs on your PC, connects to a station over serial, and
//! renders the merged telemetry state as records arrive.
//!
//! ## Usage
//!
//! ```bash
//! # List available serial ports
//! cargo run --bin lumistation_host --features transport_serial -- --list-ports
//!
//! # Connect to a specific port
//! cargo run --bin lumistation_host --features transport_serial -- --port /dev/ttyACM0
//! ```
//!
//! Every received line is handled independently: lines that do not
//! parse as a complete record are ignored, and only the fields present
//! in a record update the display - absent fields keep their last
//! known values.

use std::io::{self, BufRead, BufReader};
use std::time::Duration;

use lumistation::{DashboardState, SpectralReading};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    if args.contains(&"--list-ports".to_string()) {
        list_ports();
        return Ok(());
    }

    let port_name = if let Some(idx) = args.iter().position(|a| a == "--port") {
        args.get(idx + 1).cloned()
    } else {
        find_station_port()
    };

    let port_name = match port_name {
        Some(name) => name,
        None => {
            eprintln!("Error: No station found");
            eprintln!("Use --list-ports to see available ports");
            eprintln!("Or specify port with --port <PORT>");
            return Err("No device found".into());
        }
    };

    println!("Connecting to {}...", port_name);

    let port = serialport::new(&port_name, 115_200)
        .timeout(Duration::from_millis(1000))
        .flow_control(serialport::FlowControl::None)
        .open()?;

    println!("Connected. Waiting for records...\n");

    let mut reader = BufReader::new(port);
    let mut state = DashboardState::new();
    let mut line = String::new();

    loop {
        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => {
                println!("Station disconnected");
                break;
            }
            Ok(_) => {
                if !state.apply_line(&line) {
                    continue;
                }
                if let Some(status) = state.last_status.take() {
                    println!("[station] {status}");
                }
                if let Some(error) = state.last_error.take() {
                    eprintln!("[station] ERROR: {error}");
                }
                if state.gain.is_some() {
                    display_state(&state);
                }
            }
            Err(ref e) if e.kind() == io::ErrorKind::TimedOut => continue,
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}

fn list_ports() {
    println!("Available serial ports:");
    match serialport::available_ports() {
        Ok(ports) => {
            if ports.is_empty() {
                println!("  (none)");
            }
            for port in ports {
                print!("  {}", port.port_name);
                match &port.port_type {
                    serialport::SerialPortType::UsbPort(info) => {
                        println!(" - USB (VID: 0x{:04x}, PID: 0x{:04x})", info.vid, info.pid);
                        if let Some(ref product) = info.product {
                            println!("      Product: {}", product);
                        }
                    }
                    other => println!(" - {}", port_type_name(other)),
                }
            }
        }
        Err(e) => {
            eprintln!("Error listing ports: {}", e);
        }
    }
}

fn port_type_name(port_type: &serialport::SerialPortType) -> &str {
    match port_type {
        serialport::SerialPortType::UsbPort(_) => "USB",
        serialport::SerialPortType::BluetoothPort => "Bluetooth",
        serialport::SerialPortType::PciPort => "PCI",
        serialport::SerialPortType::Unknown => "Unknown",
    }
}

fn find_station_port() -> Option<String> {
    let ports = serialport::available_ports().ok()?;

    for port in ports {
        if let serialport::SerialPortType::UsbPort(info) = &port.port_type {
            // Raspberry Pi vendor ID
            if info.vid == 0x2e8a {
                return Some(port.port_name);
            }
        }
    }

    None
}

fn display_state(state: &DashboardState) {
    println!("{:-<60}", "");
    if let (Some(fw), Some(gain)) = (&state.fw, &state.gain) {
        println!("{:<30} gain: {}", fw, gain);
    }

    for (i, name) in SpectralReading::CHANNEL_NAMES.iter().enumerate() {
        match state.channels[i] {
            Some(value) => println!("  {:<10} {:>8}", name, value),
            None => println!("  {:<10} {:>8}", name, "-"),
        }
    }

    if let Some(uv) = state.uv {
        println!("  {:<10} {:>8}", "UV", uv);
    }
    if let Some(als) = state.als {
        println!("  {:<10} {:>8}", "ALS", als);
    }
    if let Some(lux) = state.tsl_lux {
        println!("  {:<10} {:>8.2} lx", "TSL_Lux", lux);
    }
    if let (Some(full), Some(ir)) = (state.tsl_full, state.tsl_ir) {
        println!("  {:<10} full={} ir={}", "TSL_Raw", full, ir);
    }
    println!("{:-<60}", "");
}
