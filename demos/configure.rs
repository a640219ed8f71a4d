//! Configure Example
//!
//! Reads the current settings of an HC-12, optionally moves it to another
//! channel and transmit power, and prints the confirmed result as JSON.
//!
//! The adapter's DTR output must be wired to the module's SET pin.
//!
//! Usage:
//!   cargo run --example configure                        # Interactive mode
//!   cargo run --example configure -- /dev/ttyUSB0
//!   cargo run --example configure -- /dev/ttyUSB0 21 8   # channel 21, level 8
//!
//! Set RUST_LOG environment variable to control logging:
//!   RUST_LOG=debug cargo run --example configure

use hc12::{Baudrate, Channel, Hc12, Hc12Config, Result, TransmitPower};
use inquire::Select;
use log::{error, info};

/// Interactive serial port selection using inquire
fn select_port() -> Result<String> {
    let ports = Hc12::list_ports()?;

    if ports.is_empty() {
        eprintln!("No serial ports found!");
        std::process::exit(1);
    }

    let port_names: Vec<String> = ports
        .iter()
        .map(|p| format!("{} - {:?}", p.port_name, p.port_type))
        .collect();

    let selection = Select::new("Select a serial port:", port_names)
        .prompt()
        .map_err(|e| std::io::Error::other(format!("Selection cancelled: {e}")))?;

    Ok(selection
        .split(" - ")
        .next()
        .unwrap_or_default()
        .to_string())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let port_name = match args.next() {
        Some(port) => port,
        None => select_port()?,
    };
    let channel = args.next().and_then(|c| c.parse::<u16>().ok());
    let level = args.next().and_then(|l| l.parse::<u8>().ok());

    info!("Connecting to HC-12 on {port_name}...");
    let mut hc12 = Hc12::open(&port_name, Baudrate::Bps9600, Hc12Config::default())?;

    if !hc12.begin() {
        error!("No answer from the module, try the find_baudrate example");
        return Ok(());
    }

    if let Some(channel) = channel {
        hc12.prepare_channel(Channel::new(channel)?);
    }
    if let Some(level) = level {
        hc12.prepare_transmit_power(TransmitPower::from_level(level)?);
    }

    if !hc12.update_params() {
        if let Some(report) = hc12.last_sync_report() {
            for (parameter, e) in report.failures() {
                error!("{parameter}: {e}");
            }
        }
    }

    let status = serde_json::to_string_pretty(&hc12.status())
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    println!("{status}");

    Ok(())
}
