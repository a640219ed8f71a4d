//! Error types for HC-12 operations.

use thiserror::Error;

/// Result type alias for HC-12 operations.
pub type Result<T> = std::result::Result<T, Hc12Error>;

/// Error types for HC-12 module communication.
#[derive(Error, Debug)]
pub enum Hc12Error {
    /// Serial port communication error
    #[error("Serial port error: {0}")]
    SerialPort(#[from] serialport::Error),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// No terminated line arrived within the response window
    #[error("Empty response")]
    EmptyResponse,

    /// Reply didn't match the expected prefix, suffix or exact text
    #[error("Invalid response: expected {expected}, got {actual}")]
    InvalidResponse {
        /// Expected response format
        expected: String,
        /// Actual response received
        actual: String,
    },

    /// Reply parsed but carried a value the module can't legally report
    #[error("Out of range {parameter}: {value}")]
    OutOfRange {
        /// Parameter the value was decoded for
        parameter: &'static str,
        /// Raw decoded value
        value: i64,
    },

    /// Channel outside 1..=126
    #[error("Invalid channel: {0} (valid range 1-126)")]
    InvalidChannel(u16),

    /// Baud rate the module doesn't support
    #[error("Unsupported baud rate: {0}")]
    UnknownBaudrate(u32),

    /// Operational mode outside FU1..FU4
    #[error("Invalid operational mode: {0}")]
    InvalidMode(u8),

    /// Transmit power level outside 1..=8
    #[error("Invalid transmit power level: {0}")]
    InvalidPowerLevel(u8),

    /// Driving the SET line failed
    #[error("Control line error: {0}")]
    ControlLine(String),
}

impl Hc12Error {
    /// Build an [`Hc12Error::InvalidResponse`] from anything string-like.
    pub(crate) fn invalid(expected: impl Into<String>, actual: &str) -> Self {
        if actual.is_empty() {
            return Hc12Error::EmptyResponse;
        }
        Hc12Error::InvalidResponse {
            expected: expected.into(),
            actual: actual.to_string(),
        }
    }
}
