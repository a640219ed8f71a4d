//! Parameter synchronization.
//!
//! Every parameter is either pushed (the caller staged a new value) or pulled
//! (refresh what the module runs with). The order matters: switching the
//! operational mode makes the module pick a baud rate that mode supports on
//! its own, so the baud rate is read back last.

use crate::command::CommandChannel;
use crate::constants::{CMD_GET_BAUD, CMD_GET_CHANNEL, CMD_GET_MODE, CMD_GET_POWER};
use crate::error::{Hc12Error, Result};
use crate::parse;
use crate::pending::PendingValue;
use crate::transport::Transport;
use crate::types::*;
use log::{debug, warn};

/// Confirmed and desired values of all four parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameters {
    pub baudrate: PendingValue<Baudrate>,
    pub channel: PendingValue<Channel>,
    pub transmit_power: PendingValue<TransmitPower>,
    pub operational_mode: PendingValue<OperationalMode>,
}

impl Parameters {
    pub fn new(defaults: Settings) -> Self {
        Parameters {
            baudrate: PendingValue::new(defaults.baudrate),
            channel: PendingValue::new(defaults.channel),
            transmit_power: PendingValue::new(defaults.transmit_power),
            operational_mode: PendingValue::new(defaults.operational_mode),
        }
    }

    pub fn confirmed(&self) -> Settings {
        Settings {
            baudrate: self.baudrate.confirmed(),
            channel: self.channel.confirmed(),
            transmit_power: self.transmit_power.confirmed(),
            operational_mode: self.operational_mode.confirmed(),
        }
    }

    pub fn desired(&self) -> Settings {
        Settings {
            baudrate: self.baudrate.desired(),
            channel: self.channel.desired(),
            transmit_power: self.transmit_power.desired(),
            operational_mode: self.operational_mode.desired(),
        }
    }

    /// Parameters with a staged value the module hasn't confirmed
    pub fn pending(&self) -> Vec<Parameter> {
        let mut pending = Vec::new();
        if self.baudrate.has_changed() {
            pending.push(Parameter::Baudrate);
        }
        if self.channel.has_changed() {
            pending.push(Parameter::Channel);
        }
        if self.transmit_power.has_changed() {
            pending.push(Parameter::TransmitPower);
        }
        if self.operational_mode.has_changed() {
            pending.push(Parameter::OperationalMode);
        }
        pending
    }

    /// Overwrite confirmed and desired values alike
    pub fn reset(&mut self, settings: Settings) {
        self.baudrate.reset(settings.baudrate);
        self.channel.reset(settings.channel);
        self.transmit_power.reset(settings.transmit_power);
        self.operational_mode.reset(settings.operational_mode);
    }
}

/// What happened to one parameter during a synchronization
#[derive(Debug)]
pub enum StepOutcome {
    /// The staged value was sent and acknowledged
    Pushed,
    /// The module's current value was read back
    Pulled,
    Failed(Hc12Error),
}

impl StepOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, StepOutcome::Failed(_))
    }
}

/// Per-step results of one synchronization, in execution order
#[derive(Debug, Default)]
pub struct SyncReport {
    steps: Vec<(Parameter, StepOutcome)>,
}

impl SyncReport {
    /// True only if every step succeeded
    pub fn success(&self) -> bool {
        self.steps.iter().all(|(_, outcome)| outcome.is_success())
    }

    pub fn steps(&self) -> &[(Parameter, StepOutcome)] {
        &self.steps
    }

    /// Outcome of the last step touching `parameter`
    pub fn outcome(&self, parameter: Parameter) -> Option<&StepOutcome> {
        self.steps
            .iter()
            .rev()
            .find(|(p, _)| *p == parameter)
            .map(|(_, outcome)| outcome)
    }

    pub fn failures(&self) -> impl Iterator<Item = (Parameter, &Hc12Error)> {
        self.steps.iter().filter_map(|(p, outcome)| match outcome {
            StepOutcome::Failed(e) => Some((*p, e)),
            _ => None,
        })
    }

    fn record(&mut self, parameter: Parameter, pushed: bool, result: Result<()>) {
        let action = if pushed { "update" } else { "request" };
        let outcome = match result {
            Ok(()) if pushed => StepOutcome::Pushed,
            Ok(()) => StepOutcome::Pulled,
            Err(e) => {
                warn!("{parameter} {action} failure: {e}");
                StepOutcome::Failed(e)
            }
        };
        if outcome.is_success() {
            debug!("{parameter} {action} ok");
        }
        self.steps.push((parameter, outcome));
    }
}

/// Runs one push-or-pull pass over all parameters.
///
/// Must be driven while the module is in command mode. A failing step never
/// stops the remaining ones.
pub struct Synchronizer<'a, T> {
    channel: &'a mut CommandChannel<T>,
    params: &'a mut Parameters,
}

impl<'a, T: Transport> Synchronizer<'a, T> {
    pub fn new(channel: &'a mut CommandChannel<T>, params: &'a mut Parameters) -> Self {
        Synchronizer { channel, params }
    }

    pub fn run(mut self) -> SyncReport {
        let mut report = SyncReport::default();

        if self.params.baudrate.has_changed() {
            let result = self.push_baudrate();
            report.record(Parameter::Baudrate, true, result);
        }
        // Decided before the mode step, whose pull may move the confirmed rate
        let pull_baud = !self.params.baudrate.has_changed();

        let pushed = self.params.channel.has_changed();
        let result = if pushed { self.push_channel() } else { self.pull_channel() };
        report.record(Parameter::Channel, pushed, result);

        let pushed = self.params.transmit_power.has_changed();
        let result = if pushed { self.push_power() } else { self.pull_power() };
        report.record(Parameter::TransmitPower, pushed, result);

        let pushed = self.params.operational_mode.has_changed();
        let result = if pushed { self.push_mode() } else { self.pull_mode() };
        report.record(Parameter::OperationalMode, pushed, result);

        // Reads back a freshly pushed rate as well, unless that push failed
        if pull_baud {
            let result = self.pull_baudrate();
            report.record(Parameter::Baudrate, false, result);
        }

        report
    }

    fn push_baudrate(&mut self) -> Result<()> {
        let baud = self.params.baudrate.desired();
        let reply = self.channel.exchange(&parse::set_baudrate_command(baud))?;
        parse::baudrate_set_reply(&reply, baud)?;
        self.params.baudrate.mark_confirmed();
        Ok(())
    }

    fn pull_baudrate(&mut self) -> Result<()> {
        let reply = self.channel.exchange(CMD_GET_BAUD)?;
        let baud = parse::baudrate_reply(&reply)?;
        self.params.baudrate.force_confirmed(baud);
        Ok(())
    }

    fn push_channel(&mut self) -> Result<()> {
        let channel = self.params.channel.desired();
        let reply = self.channel.exchange(&parse::set_channel_command(channel))?;
        parse::channel_set_reply(&reply, channel)?;
        self.params.channel.mark_confirmed();
        Ok(())
    }

    fn pull_channel(&mut self) -> Result<()> {
        let reply = self.channel.exchange(CMD_GET_CHANNEL)?;
        let channel = parse::channel_reply(&reply)?;
        self.params.channel.force_confirmed(channel);
        Ok(())
    }

    fn push_power(&mut self) -> Result<()> {
        let power = self.params.transmit_power.desired();
        let reply = self.channel.exchange(&parse::set_power_command(power))?;
        parse::power_set_reply(&reply, power)?;
        self.params.transmit_power.mark_confirmed();
        Ok(())
    }

    fn pull_power(&mut self) -> Result<()> {
        let reply = self.channel.exchange(CMD_GET_POWER)?;
        let power = parse::power_reply(&reply)?;
        self.params.transmit_power.force_confirmed(power);
        Ok(())
    }

    fn push_mode(&mut self) -> Result<()> {
        let mode = self.params.operational_mode.desired();
        let reply = self.channel.exchange(&parse::set_mode_command(mode))?;
        let reported = parse::mode_set_reply(&reply)?;
        if reported != mode {
            // The module runs `reported` now, the staged mode stays pending
            debug!("Module switched to {reported} instead of {mode}");
        }
        self.params.operational_mode.force_confirmed(reported);
        Ok(())
    }

    fn pull_mode(&mut self) -> Result<()> {
        let reply = self.channel.exchange(CMD_GET_MODE)?;
        let (mode, baud) = parse::mode_reply(&reply)?;
        self.params.operational_mode.force_confirmed(mode);
        if let Some(baud) = baud {
            self.params.baudrate.force_confirmed(baud);
        }
        Ok(())
    }
}
