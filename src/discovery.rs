//! Finding the baud rate a module with unknown settings listens at.

use crate::command::CommandChannel;
use crate::config::Hc12Config;
use crate::constants::{CMD_PROBE, DISCOVERY_ORDER};
use crate::control::CommandMode;
use crate::error::Result;
use crate::transport::{BaudSwitch, ControlLine, Transport};
use crate::types::Baudrate;
use log::{debug, info};

/// Probe every supported rate with `AT` until the module answers `OK`.
///
/// The transport is left at the rate that answered, or at the last rate
/// tried when nothing did (`Ok(None)`).
pub fn find_baudrate<T, P>(transport: &mut T, control_line: &mut P, config: &Hc12Config) -> Result<Option<Baudrate>>
where
    T: Transport + BaudSwitch,
    P: ControlLine,
{
    let _session = CommandMode::enter(control_line, config.enter_settle, config.exit_settle)?;

    for bps in DISCOVERY_ORDER {
        debug!("Looking at baud: {bps}");
        transport.set_baud_rate(bps)?;
        let mut channel = CommandChannel::new(&mut *transport, config.response_timeout);
        if channel.expect_ok(CMD_PROBE)? {
            info!("HC-12 found at {bps} bps");
            return Baudrate::try_from(bps).map(Some);
        }
    }

    Ok(None)
}
