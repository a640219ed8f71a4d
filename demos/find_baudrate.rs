//! Find Baudrate Example
//!
//! Probes every rate the HC-12 supports until the module answers.
//!
//! Usage:
//!   cargo run --example find_baudrate -- /dev/ttyUSB0

use hc12::{find_baudrate, Hc12Config, ModemLine, ModemSignal, Result, SerialTransport};
use log::{info, warn};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(port_name) = std::env::args().nth(1) else {
        eprintln!("Usage: find_baudrate <port>");
        std::process::exit(1);
    };

    let config = Hc12Config::default();
    let port = serialport::new(&port_name, 9600)
        .timeout(config.response_timeout)
        .open()?;
    let mut line = ModemLine::new(port.try_clone()?, ModemSignal::Dtr);
    let mut transport = SerialTransport::new(port);

    match find_baudrate(&mut transport, &mut line, &config)? {
        Some(baud) => info!("Module answers at {baud}"),
        None => warn!("Module not found at any supported baud rate"),
    }

    Ok(())
}
