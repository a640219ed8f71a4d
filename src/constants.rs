//! Protocol constants for HC-12 communication.
//!
//! This module defines the AT command strings, reply prefixes, timing
//! parameters and factory defaults of the HC-12 command interface.

/// Line terminator appended to every command
pub const COMMAND_TERMINATOR: &[u8] = b"\r\n";

/// Terminator of every reply line
pub const REPLY_TERMINATOR: u8 = b'\n';

/// Probe command
pub const CMD_PROBE: &str = "AT";

/// Generic acknowledgment of the probe command
pub const REPLY_OK: &str = "OK";

/// Set baud rate (followed by the decimal rate)
pub const CMD_SET_BAUD: &str = "AT+B";

/// Query baud rate
pub const CMD_GET_BAUD: &str = "AT+RB";

/// Baud rate reply prefix, shared by set and query
pub const REPLY_BAUD: &str = "OK+B";

/// Set operational mode (followed by the mode digit)
pub const CMD_SET_MODE: &str = "AT+FU";

/// Query operational mode
pub const CMD_GET_MODE: &str = "AT+RF";

/// Operational mode reply prefix, shared by set and query
pub const REPLY_MODE: &str = "OK+FU";

/// Characters between the mode digit and the baud field of a mode query reply
pub const MODE_BAUD_SEPARATOR_LEN: usize = 2;

/// Set channel (followed by a 3-digit zero padded channel)
pub const CMD_SET_CHANNEL: &str = "AT+C";

/// Query channel
pub const CMD_GET_CHANNEL: &str = "AT+RC";

/// Channel set reply prefix
pub const REPLY_SET_CHANNEL: &str = "OK+C";

/// Channel query reply prefix
pub const REPLY_GET_CHANNEL: &str = "OK+RC";

/// Set transmit power (followed by the level 1-8)
pub const CMD_SET_POWER: &str = "AT+P";

/// Query transmit power
pub const CMD_GET_POWER: &str = "AT+RP";

/// Transmit power set reply prefix
pub const REPLY_SET_POWER: &str = "OK+P";

/// Transmit power query reply prefix
pub const REPLY_GET_POWER: &str = "OK+RP:";

/// Transmit power query reply suffix
pub const REPLY_GET_POWER_UNIT: &str = "dBm";

/// Enter sleep mode
pub const CMD_SLEEP: &str = "AT+SLEEP";

/// The module echoes the sleep command instead of acknowledging it
pub const REPLY_SLEEP: &str = "AT+SLEEP";

/// Restore factory defaults
pub const CMD_DEFAULT: &str = "AT+DEFAULT";

/// Factory reset acknowledgment
pub const REPLY_DEFAULT: &str = "OK+DEFAULT";

/// Maximum time a command may take to reply, in milliseconds
pub const RESPONSE_TIMEOUT_MS: u64 = 150;

/// Settle time after pulling SET low before the first command
pub const COMMAND_MODE_ENTER_MS: u64 = 40;

/// Settle time after releasing SET before data mode is usable again
pub const COMMAND_MODE_EXIT_MS: u64 = 80;

/// Lowest valid channel
pub const MIN_CHANNEL: u8 = 1;

/// Highest valid channel
pub const MAX_CHANNEL: u8 = 126;

/// Factory default channel
pub const DEFAULT_CHANNEL: u8 = 1;

/// Baud rates tried by discovery, most common first
pub const DISCOVERY_ORDER: [u32; 8] = [9600, 115200, 19200, 1200, 2400, 4800, 38400, 57600];
