//! Decoders for the module's command replies.
//!
//! Replies are short ASCII lines with no consistent layout, so every decoder
//! checks its prefix first and never looks at digits behind a mismatch.

use crate::constants::*;
use crate::error::{Hc12Error, Result};
use crate::types::{Baudrate, Channel, OperationalMode, TransmitPower};

/// Command that sets the baud rate
pub fn set_baudrate_command(baud: Baudrate) -> String {
    format!("{}{}", CMD_SET_BAUD, baud.bps())
}

pub fn set_mode_command(mode: OperationalMode) -> String {
    format!("{}{}", CMD_SET_MODE, mode.digit())
}

pub fn set_channel_command(channel: Channel) -> String {
    format!("{}{}", CMD_SET_CHANNEL, channel.wire())
}

pub fn set_power_command(power: TransmitPower) -> String {
    format!("{}{}", CMD_SET_POWER, power.level())
}

fn expect_exact(reply: &str, expected: String) -> Result<()> {
    if reply == expected {
        Ok(())
    } else {
        Err(Hc12Error::invalid(expected, reply))
    }
}

fn strip<'a>(reply: &'a str, prefix: &str) -> Result<&'a str> {
    reply
        .strip_prefix(prefix)
        .ok_or_else(|| Hc12Error::invalid(format!("{prefix}..."), reply))
}

fn parse_baud_field(field: &str, reply: &str) -> Result<Baudrate> {
    let bps: u32 = field
        .parse()
        .map_err(|_| Hc12Error::invalid("decimal baud rate", reply))?;
    Baudrate::try_from(bps).map_err(|_| Hc12Error::OutOfRange {
        parameter: "baudrate",
        value: bps.into(),
    })
}

fn parse_mode_digit(rest: &str, reply: &str) -> Result<OperationalMode> {
    let digit = rest
        .chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .ok_or_else(|| Hc12Error::invalid("mode digit", reply))?;
    OperationalMode::try_from(digit as u8).map_err(|_| Hc12Error::OutOfRange {
        parameter: "operational mode",
        value: digit.into(),
    })
}

/// `OK+B<baud>` echoing exactly what was sent
pub fn baudrate_set_reply(reply: &str, sent: Baudrate) -> Result<()> {
    expect_exact(reply, format!("{}{}", REPLY_BAUD, sent.bps()))
}

/// `OK+B<baud>` in answer to `AT+RB`
pub fn baudrate_reply(reply: &str) -> Result<Baudrate> {
    let rest = strip(reply, REPLY_BAUD)?;
    parse_baud_field(rest, reply)
}

/// `OK+FU<digit>` in answer to `AT+FU<digit>`
pub fn mode_set_reply(reply: &str) -> Result<OperationalMode> {
    let rest = strip(reply, REPLY_MODE)?;
    parse_mode_digit(rest, reply)
}

/// `OK+FU<digit>` in answer to `AT+RF`, optionally followed by the baud rate
/// the mode runs at.
///
/// The baud field is best effort: the mode is returned even when the trailing
/// field is missing or unreadable, in which case the baud is `None`.
pub fn mode_reply(reply: &str) -> Result<(OperationalMode, Option<Baudrate>)> {
    let rest = strip(reply, REPLY_MODE)?;
    let mode = parse_mode_digit(rest, reply)?;

    let baud = rest
        .get(1 + MODE_BAUD_SEPARATOR_LEN..)
        .filter(|field| !field.is_empty())
        .and_then(|field| match parse_baud_field(field, reply) {
            Ok(baud) => Some(baud),
            Err(e) => {
                log::debug!("Ignoring baud field in mode reply {reply:?}: {e}");
                None
            }
        });

    Ok((mode, baud))
}

/// `OK+C<3 digits>` echoing exactly what was sent
pub fn channel_set_reply(reply: &str, sent: Channel) -> Result<()> {
    expect_exact(reply, format!("{}{}", REPLY_SET_CHANNEL, sent.wire()))
}

/// `OK+RC<channel>` in answer to `AT+RC`
pub fn channel_reply(reply: &str) -> Result<Channel> {
    let rest = strip(reply, REPLY_GET_CHANNEL)?;
    let number: i64 = rest
        .parse()
        .map_err(|_| Hc12Error::invalid("decimal channel", reply))?;
    u16::try_from(number)
        .ok()
        .and_then(|n| Channel::new(n).ok())
        .ok_or(Hc12Error::OutOfRange {
            parameter: "channel",
            value: number,
        })
}

/// `OK+P<level>` echoing exactly what was sent
pub fn power_set_reply(reply: &str, sent: TransmitPower) -> Result<()> {
    expect_exact(reply, format!("{}{}", REPLY_SET_POWER, sent.level()))
}

/// `OK+RP:<dbm>dBm` in answer to `AT+RP`
pub fn power_reply(reply: &str) -> Result<TransmitPower> {
    let rest = strip(reply, REPLY_GET_POWER)?;
    let dbm = rest.strip_suffix(REPLY_GET_POWER_UNIT).ok_or_else(|| {
        Hc12Error::invalid(format!("{REPLY_GET_POWER}...{REPLY_GET_POWER_UNIT}"), reply)
    })?;
    let dbm: i32 = dbm
        .parse()
        .map_err(|_| Hc12Error::invalid("signed dBm value", reply))?;
    TransmitPower::from_dbm(dbm).ok_or(Hc12Error::OutOfRange {
        parameter: "transmit power",
        value: dbm.into(),
    })
}
