use crate::constants::{DEFAULT_CHANNEL, MAX_CHANNEL, MIN_CHANNEL};
use crate::error::Hc12Error;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Baud rates supported by the HC-12
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Baudrate {
    Bps1200,
    Bps2400,
    Bps4800,
    Bps9600,
    Bps19200,
    Bps38400,
    Bps57600,
    Bps115200,
}

impl Baudrate {
    /// Every supported rate in ascending order
    pub const ALL: [Baudrate; 8] = [
        Baudrate::Bps1200,
        Baudrate::Bps2400,
        Baudrate::Bps4800,
        Baudrate::Bps9600,
        Baudrate::Bps19200,
        Baudrate::Bps38400,
        Baudrate::Bps57600,
        Baudrate::Bps115200,
    ];

    /// Bits per second, also the wire representation
    pub fn bps(self) -> u32 {
        match self {
            Baudrate::Bps1200 => 1200,
            Baudrate::Bps2400 => 2400,
            Baudrate::Bps4800 => 4800,
            Baudrate::Bps9600 => 9600,
            Baudrate::Bps19200 => 19200,
            Baudrate::Bps38400 => 38400,
            Baudrate::Bps57600 => 57600,
            Baudrate::Bps115200 => 115200,
        }
    }
}

impl TryFrom<u32> for Baudrate {
    type Error = Hc12Error;

    fn try_from(bps: u32) -> Result<Self, Self::Error> {
        Baudrate::ALL
            .into_iter()
            .find(|b| b.bps() == bps)
            .ok_or(Hc12Error::UnknownBaudrate(bps))
    }
}

impl From<Baudrate> for u32 {
    fn from(baud: Baudrate) -> u32 {
        baud.bps()
    }
}

impl fmt::Display for Baudrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bps", self.bps())
    }
}

/// FU operational modes, trading power consumption against air data rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationalMode {
    Fu1,
    Fu2,
    Fu3,
    Fu4,
}

impl OperationalMode {
    pub const ALL: [OperationalMode; 4] = [
        OperationalMode::Fu1,
        OperationalMode::Fu2,
        OperationalMode::Fu3,
        OperationalMode::Fu4,
    ];

    /// Digit used on the wire (`AT+FU<digit>`)
    pub fn digit(self) -> u8 {
        match self {
            OperationalMode::Fu1 => 1,
            OperationalMode::Fu2 => 2,
            OperationalMode::Fu3 => 3,
            OperationalMode::Fu4 => 4,
        }
    }
}

impl TryFrom<u8> for OperationalMode {
    type Error = Hc12Error;

    fn try_from(digit: u8) -> Result<Self, Self::Error> {
        match digit {
            1 => Ok(OperationalMode::Fu1),
            2 => Ok(OperationalMode::Fu2),
            3 => Ok(OperationalMode::Fu3),
            4 => Ok(OperationalMode::Fu4),
            _ => Err(Hc12Error::InvalidMode(digit)),
        }
    }
}

impl fmt::Display for OperationalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FU{}", self.digit())
    }
}

/// Radio channel, 1 to 126
///
/// Channel 1 sits at 433.4 MHz and each step adds 400 kHz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Channel(u8);

impl Channel {
    pub fn new(channel: u16) -> Result<Self, Hc12Error> {
        if (u16::from(MIN_CHANNEL)..=u16::from(MAX_CHANNEL)).contains(&channel) {
            Ok(Channel(channel as u8))
        } else {
            Err(Hc12Error::InvalidChannel(channel))
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// Three digit, zero padded form used by `AT+C`
    pub fn wire(self) -> String {
        format!("{:03}", self.0)
    }
}

impl Default for Channel {
    fn default() -> Self {
        Channel(DEFAULT_CHANNEL)
    }
}

impl TryFrom<u16> for Channel {
    type Error = Hc12Error;

    fn try_from(channel: u16) -> Result<Self, Self::Error> {
        Channel::new(channel)
    }
}

impl From<Channel> for u16 {
    fn from(channel: Channel) -> u16 {
        channel.0 as u16
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CH{:03}", self.0)
    }
}

/// Transmit power levels, weakest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TransmitPower {
    Mw0_8,
    Mw1_6,
    Mw3_2,
    Mw6_3,
    Mw12,
    Mw25,
    Mw50,
    Mw100,
}

impl TransmitPower {
    pub const ALL: [TransmitPower; 8] = [
        TransmitPower::Mw0_8,
        TransmitPower::Mw1_6,
        TransmitPower::Mw3_2,
        TransmitPower::Mw6_3,
        TransmitPower::Mw12,
        TransmitPower::Mw25,
        TransmitPower::Mw50,
        TransmitPower::Mw100,
    ];

    /// Level 1-8 sent with `AT+P`
    pub fn level(self) -> u8 {
        match self {
            TransmitPower::Mw0_8 => 1,
            TransmitPower::Mw1_6 => 2,
            TransmitPower::Mw3_2 => 3,
            TransmitPower::Mw6_3 => 4,
            TransmitPower::Mw12 => 5,
            TransmitPower::Mw25 => 6,
            TransmitPower::Mw50 => 7,
            TransmitPower::Mw100 => 8,
        }
    }

    /// dBm code reported by `AT+RP`
    pub fn dbm(self) -> i8 {
        match self {
            TransmitPower::Mw0_8 => -1,
            TransmitPower::Mw1_6 => 2,
            TransmitPower::Mw3_2 => 5,
            TransmitPower::Mw6_3 => 8,
            TransmitPower::Mw12 => 11,
            TransmitPower::Mw25 => 14,
            TransmitPower::Mw50 => 17,
            TransmitPower::Mw100 => 20,
        }
    }

    pub fn milliwatts(self) -> f32 {
        match self {
            TransmitPower::Mw0_8 => 0.8,
            TransmitPower::Mw1_6 => 1.6,
            TransmitPower::Mw3_2 => 3.2,
            TransmitPower::Mw6_3 => 6.3,
            TransmitPower::Mw12 => 12.0,
            TransmitPower::Mw25 => 25.0,
            TransmitPower::Mw50 => 50.0,
            TransmitPower::Mw100 => 100.0,
        }
    }

    pub fn from_level(level: u8) -> Result<Self, Hc12Error> {
        TransmitPower::ALL
            .into_iter()
            .find(|p| p.level() == level)
            .ok_or(Hc12Error::InvalidPowerLevel(level))
    }

    /// Map a reported dBm code back to its level
    pub fn from_dbm(dbm: i32) -> Option<Self> {
        TransmitPower::ALL.into_iter().find(|p| i32::from(p.dbm()) == dbm)
    }
}

impl fmt::Display for TransmitPower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} mW ({:+} dBm)", self.milliwatts(), self.dbm())
    }
}

/// The four configurable parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parameter {
    Baudrate,
    Channel,
    TransmitPower,
    OperationalMode,
}

impl Parameter {
    pub fn name(self) -> &'static str {
        match self {
            Parameter::Baudrate => "baudrate",
            Parameter::Channel => "channel",
            Parameter::TransmitPower => "transmit power",
            Parameter::OperationalMode => "operational mode",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A full set of module parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub baudrate: Baudrate,
    pub channel: Channel,
    pub transmit_power: TransmitPower,
    pub operational_mode: OperationalMode,
}

impl Settings {
    /// What `AT+DEFAULT` restores
    pub const FACTORY: Settings = Settings {
        baudrate: Baudrate::Bps9600,
        channel: Channel(DEFAULT_CHANNEL),
        transmit_power: TransmitPower::Mw100,
        operational_mode: OperationalMode::Fu3,
    };
}

impl Default for Settings {
    fn default() -> Self {
        Settings::FACTORY
    }
}

/// Snapshot of what the module last confirmed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleStatus {
    pub timestamp: DateTime<Utc>,
    pub settings: Settings,
    /// Parameters whose requested value hasn't been confirmed yet
    pub pending: Vec<Parameter>,
}
