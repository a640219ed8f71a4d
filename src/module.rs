use crate::command::CommandChannel;
use crate::config::Hc12Config;
use crate::constants::*;
use crate::control::CommandMode;
use crate::error::Result;
use crate::sync::{Parameters, SyncReport, Synchronizer};
use crate::transport::{ControlLine, ModemLine, ModemSignal, SerialTransport, Transport};
use crate::types::*;
use chrono::Utc;
use log::{info, warn};
use std::io::{self, Read, Write};
use std::time::Duration;

/// Main HC-12 interface
///
/// Configuration goes through [`prepare_*`](Hc12::prepare_channel) setters,
/// which only stage values, followed by a single
/// [`update_params`](Hc12::update_params) that talks to the module. Outside
/// of those calls the module is in data mode and `Hc12` reads and writes user
/// data through [`Read`] and [`Write`].
pub struct Hc12<T, P> {
    channel: CommandChannel<T>,
    control_line: P,
    config: Hc12Config,
    params: Parameters,
    last_sync: Option<SyncReport>,
}

impl Hc12<SerialTransport, ModemLine> {
    /// Open the module on a serial adapter whose DTR output drives SET
    pub fn open(port_name: &str, baud: Baudrate, config: Hc12Config) -> Result<Self> {
        let port = serialport::new(port_name, baud.bps())
            .timeout(config.response_timeout)
            .open()?;
        let line = ModemLine::new(port.try_clone()?, ModemSignal::Dtr);

        let defaults = Settings {
            baudrate: baud,
            ..Settings::FACTORY
        };
        let mut hc12 = Hc12::new(SerialTransport::new(port), line, defaults, config);
        // Data mode until a command session starts
        hc12.control_line.set_high()?;
        Ok(hc12)
    }

    /// List available serial ports
    pub fn list_ports() -> Result<Vec<serialport::SerialPortInfo>> {
        Ok(serialport::available_ports()?)
    }
}

impl<T: Transport, P: ControlLine> Hc12<T, P> {
    /// Create a new interface.
    ///
    /// `defaults` are what the module is assumed to run with until the first
    /// [`update_params`](Hc12::update_params) reads the real values back.
    pub fn new(transport: T, control_line: P, defaults: Settings, config: Hc12Config) -> Self {
        Hc12 {
            channel: CommandChannel::new(transport, config.response_timeout),
            control_line,
            config,
            params: Parameters::new(defaults),
            last_sync: None,
        }
    }

    fn session(&mut self) -> Result<(CommandMode<'_, P>, &mut CommandChannel<T>, &mut Parameters)> {
        let session = CommandMode::enter(
            &mut self.control_line,
            self.config.enter_settle,
            self.config.exit_settle,
        )?;
        Ok((session, &mut self.channel, &mut self.params))
    }

    /// Check that the module answers `AT` with `OK`
    pub fn begin(&mut self) -> bool {
        let result = self
            .session()
            .and_then(|(_session, channel, _)| channel.expect_ok(CMD_PROBE));
        match result {
            Ok(true) => {
                info!("HC-12 responded");
                true
            }
            Ok(false) => {
                warn!("HC-12 did not answer the probe");
                false
            }
            Err(e) => {
                warn!("HC-12 probe failed: {e}");
                false
            }
        }
    }

    pub fn prepare_baudrate(&mut self, baudrate: Baudrate) {
        self.params.baudrate.set_desired(baudrate);
    }

    pub fn prepare_operational_mode(&mut self, mode: OperationalMode) {
        self.params.operational_mode.set_desired(mode);
    }

    pub fn prepare_channel(&mut self, channel: Channel) {
        self.params.channel.set_desired(channel);
    }

    pub fn prepare_transmit_power(&mut self, power: TransmitPower) {
        self.params.transmit_power.set_desired(power);
    }

    /// Push staged values and read back the rest.
    ///
    /// Returns `true` only if every parameter was pushed or read back. A
    /// failed push stays staged, so calling again retries it.
    pub fn update_params(&mut self) -> bool {
        let report = match self.session() {
            Ok((_session, channel, params)) => Some(Synchronizer::new(channel, params).run()),
            Err(e) => {
                warn!("Could not enter command mode: {e}");
                None
            }
        };
        let success = report.as_ref().is_some_and(SyncReport::success);
        self.last_sync = report;
        success
    }

    /// Per-parameter results of the last [`update_params`](Hc12::update_params)
    pub fn last_sync_report(&self) -> Option<&SyncReport> {
        self.last_sync.as_ref()
    }

    pub fn baudrate(&self) -> Baudrate {
        self.params.baudrate.confirmed()
    }

    pub fn operational_mode(&self) -> OperationalMode {
        self.params.operational_mode.confirmed()
    }

    pub fn channel(&self) -> Channel {
        self.params.channel.confirmed()
    }

    pub fn transmit_power(&self) -> TransmitPower {
        self.params.transmit_power.confirmed()
    }

    pub fn settings(&self) -> Settings {
        self.params.confirmed()
    }

    pub fn pending_changes(&self) -> Vec<Parameter> {
        self.params.pending()
    }

    /// Report of the confirmed settings
    pub fn status(&self) -> ModuleStatus {
        ModuleStatus {
            timestamp: Utc::now(),
            settings: self.params.confirmed(),
            pending: self.params.pending(),
        }
    }

    /// Put the module to sleep until it next enters command mode.
    ///
    /// The module echoes `AT+SLEEP` back rather than acknowledging with an
    /// `OK+` reply, so the echo is what counts as success.
    pub fn sleep(&mut self) -> bool {
        let result = self
            .session()
            .and_then(|(_session, channel, _)| channel.exchange(CMD_SLEEP));
        match result {
            Ok(reply) if reply == REPLY_SLEEP => true,
            Ok(reply) => {
                warn!("Unexpected sleep reply: {reply:?}");
                false
            }
            Err(e) => {
                warn!("Sleep failed: {e}");
                false
            }
        }
    }

    /// Restore factory defaults on the module and locally
    pub fn reset(&mut self) -> bool {
        let result = self.session().and_then(|(_session, channel, params)| {
            let reply = channel.exchange(CMD_DEFAULT)?;
            if reply == REPLY_DEFAULT {
                params.reset(Settings::FACTORY);
            }
            Ok(reply)
        });
        match result {
            Ok(reply) if reply == REPLY_DEFAULT => {
                info!("Reset was successful");
                true
            }
            Ok(reply) => {
                warn!("Unexpected reset reply: {reply:?}");
                false
            }
            Err(e) => {
                warn!("Reset failed: {e}");
                false
            }
        }
    }

    /// Bytes of user data waiting to be read
    pub fn available(&mut self) -> Result<usize> {
        self.transport_mut().available()
    }

    /// Next byte of user data without consuming it
    pub fn peek(&mut self) -> Result<Option<u8>> {
        self.transport_mut().peek_byte()
    }

    pub fn config(&self) -> &Hc12Config {
        &self.config
    }

    pub fn into_parts(self) -> (T, P) {
        (self.channel.into_inner(), self.control_line)
    }

    fn transport_mut(&mut self) -> &mut T {
        self.channel.transport_mut()
    }
}

impl<T: Transport, P: ControlLine> Read for Hc12<T, P> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let timeout = self.config.response_timeout;
        let transport = self.transport_mut();
        // Block for the first byte like a serial port would, then drain what's there
        let first = transport
            .read_byte(timeout)
            .map_err(io::Error::other)?;
        let Some(first) = first else {
            return Err(io::ErrorKind::TimedOut.into());
        };
        buf[0] = first;

        let mut n = 1;
        while n < buf.len() {
            match transport.read_byte(Duration::ZERO).map_err(io::Error::other)? {
                Some(byte) => {
                    buf[n] = byte;
                    n += 1;
                }
                None => break,
            }
        }
        Ok(n)
    }
}

impl<T: Transport, P: ControlLine> Write for Hc12<T, P> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.transport_mut()
            .write_all(buf)
            .map_err(io::Error::other)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
