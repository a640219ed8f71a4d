//! Command mode session guard.

use crate::error::Result;
use crate::transport::ControlLine;
use log::{debug, warn};
use std::thread;
use std::time::Duration;

/// Holds the module in command mode for as long as it lives.
///
/// Entering pulls SET low and waits for the module to switch over; dropping
/// releases SET and waits again, so data mode is restored on every exit path.
pub struct CommandMode<'a, P: ControlLine> {
    line: &'a mut P,
    exit_settle: Duration,
}

impl<'a, P: ControlLine> CommandMode<'a, P> {
    pub fn enter(line: &'a mut P, enter_settle: Duration, exit_settle: Duration) -> Result<Self> {
        debug!("Entering command mode");
        if let Err(e) = line.set_low() {
            // SET may be half driven, release it before giving up
            let _ = line.set_high();
            return Err(e);
        }
        thread::sleep(enter_settle);
        Ok(CommandMode { line, exit_settle })
    }
}

impl<P: ControlLine> Drop for CommandMode<'_, P> {
    fn drop(&mut self) {
        debug!("Leaving command mode");
        if let Err(e) = self.line.set_high() {
            warn!("Failed to release SET line: {e}");
        }
        thread::sleep(self.exit_settle);
    }
}
