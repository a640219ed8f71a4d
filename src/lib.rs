//! # HC-12 Library
//!
//! A Rust library for configuring HC-12 433 MHz serial radio modules through
//! their AT command interface, while using the same serial link for data.
//!
//! ## Features
//!
//! - Stage baud rate, channel, transmit power and FU mode changes without I/O
//! - Apply all staged changes and read back the rest in one command session
//! - Typed, validated parameter values (invalid channels can't be built)
//! - SET line handled by a guard, so the module always returns to data mode
//! - Transparent data mode through `std::io::Read` / `Write`
//! - Baud rate discovery for modules with unknown settings
//!
//! ## Example
//!
//! ```no_run
//! use hc12::{Baudrate, Channel, Hc12, Hc12Config, TransmitPower};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut hc12 = Hc12::open("/dev/ttyUSB0", Baudrate::Bps9600, Hc12Config::default())?;
//!     hc12.prepare_channel(Channel::new(21)?);
//!     hc12.prepare_transmit_power(TransmitPower::Mw25);
//!     if hc12.update_params() {
//!         println!("Now on {} at {}", hc12.channel(), hc12.transmit_power());
//!     }
//!     Ok(())
//! }
//! ```

pub mod command;
pub mod config;
pub mod constants;
pub mod control;
pub mod discovery;
pub mod error;
pub mod module;
pub mod parse;
pub mod pending;
pub mod sync;
pub mod transport;
pub mod types;

#[cfg(test)]
mod mock_serial;

pub use config::Hc12Config;
pub use discovery::find_baudrate;
pub use error::{Hc12Error, Result};
pub use module::Hc12;
pub use pending::PendingValue;
pub use sync::{Parameters, StepOutcome, SyncReport};
pub use transport::{BaudSwitch, ControlLine, ModemLine, ModemSignal, SerialTransport, Transport};
pub use types::*;
