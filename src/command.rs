use crate::constants::{COMMAND_TERMINATOR, REPLY_OK, REPLY_TERMINATOR};
use crate::error::Result;
use crate::transport::Transport;
use log::debug;
use std::time::{Duration, Instant};

/// Request/response over the module's serial link while in command mode
pub struct CommandChannel<T> {
    transport: T,
    timeout: Duration,
}

impl<T: Transport> CommandChannel<T> {
    pub fn new(transport: T, timeout: Duration) -> Self {
        CommandChannel { transport, timeout }
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Send `command` and return the trimmed reply line.
    ///
    /// Anything buffered before the command is dropped: in command mode it
    /// can't be user data anymore. If no line terminator arrives within the
    /// timeout, whatever was received is returned, which is empty when the
    /// module stayed silent.
    pub fn exchange(&mut self, command: &str) -> Result<String> {
        self.transport.discard_input()?;

        debug!("Sending:  {command}");
        let mut line = Vec::with_capacity(command.len() + COMMAND_TERMINATOR.len());
        line.extend_from_slice(command.as_bytes());
        line.extend_from_slice(COMMAND_TERMINATOR);
        self.transport.write_all(&line)?;

        let reply = self.read_line()?;
        debug!("Received: {reply}");
        Ok(reply)
    }

    /// Send `command` and check for a plain `OK`
    pub fn expect_ok(&mut self, command: &str) -> Result<bool> {
        Ok(self.exchange(command)? == REPLY_OK)
    }

    fn read_line(&mut self) -> Result<String> {
        let deadline = Instant::now() + self.timeout;
        let mut raw = Vec::new();

        // Same per-byte timeout throughout, so a serial port only has to be
        // configured once; the deadline bounds the line as a whole
        while Instant::now() < deadline {
            match self.transport.read_byte(self.timeout)? {
                Some(REPLY_TERMINATOR) => break,
                Some(byte) => raw.push(byte),
                None => break,
            }
        }

        Ok(String::from_utf8_lossy(&raw).trim().to_string())
    }
}
