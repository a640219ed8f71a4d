//! Collaborators the module talks through: the serial byte stream and the
//! SET control line.
//!
//! Both are traits so the library can run over anything that moves bytes and
//! toggles a pin. [`SerialTransport`] and [`ModemLine`] implement them on top
//! of the `serialport` crate for a USB-UART adapter.

use crate::error::{Hc12Error, Result};
use serialport::{ClearBuffer, SerialPort};
use std::io::{ErrorKind, Read, Write};
use std::time::Duration;

/// Bidirectional byte stream connected to the module's UART
pub trait Transport {
    /// Write all bytes
    fn write_all(&mut self, data: &[u8]) -> Result<()>;

    /// Read a single byte, waiting at most `timeout`. `None` if nothing arrived.
    fn read_byte(&mut self, timeout: Duration) -> Result<Option<u8>>;

    /// Next byte without consuming it, if one is already buffered
    fn peek_byte(&mut self) -> Result<Option<u8>>;

    /// Bytes buffered and ready to read
    fn available(&mut self) -> Result<usize>;

    /// Drop everything buffered on the receive side
    fn discard_input(&mut self) -> Result<()>;
}

/// The module's SET pin
pub trait ControlLine {
    fn set_low(&mut self) -> Result<()>;
    fn set_high(&mut self) -> Result<()>;
}

/// A transport whose line rate can be changed, needed for baud discovery
pub trait BaudSwitch {
    fn set_baud_rate(&mut self, baud: u32) -> Result<()>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        (**self).write_all(data)
    }

    fn read_byte(&mut self, timeout: Duration) -> Result<Option<u8>> {
        (**self).read_byte(timeout)
    }

    fn peek_byte(&mut self) -> Result<Option<u8>> {
        (**self).peek_byte()
    }

    fn available(&mut self) -> Result<usize> {
        (**self).available()
    }

    fn discard_input(&mut self) -> Result<()> {
        (**self).discard_input()
    }
}

impl<P: ControlLine + ?Sized> ControlLine for &mut P {
    fn set_low(&mut self) -> Result<()> {
        (**self).set_low()
    }

    fn set_high(&mut self) -> Result<()> {
        (**self).set_high()
    }
}

/// [`Transport`] over a `serialport` handle
pub struct SerialTransport {
    port: Box<dyn SerialPort>,
    // serialport has no peek, so one byte of lookahead lives here
    peeked: Option<u8>,
    // last timeout handed to the port, each change costs a system call
    timeout: Option<Duration>,
}

impl SerialTransport {
    pub fn new(port: Box<dyn SerialPort>) -> Self {
        SerialTransport {
            port,
            peeked: None,
            timeout: None,
        }
    }

    pub fn port(&self) -> &dyn SerialPort {
        self.port.as_ref()
    }

    pub fn into_inner(self) -> Box<dyn SerialPort> {
        self.port
    }
}

impl Transport for SerialTransport {
    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        self.port.write_all(data)?;
        self.port.flush()?;
        Ok(())
    }

    fn read_byte(&mut self, timeout: Duration) -> Result<Option<u8>> {
        if let Some(byte) = self.peeked.take() {
            return Ok(Some(byte));
        }
        if self.timeout != Some(timeout) {
            self.port.set_timeout(timeout)?;
            self.timeout = Some(timeout);
        }
        let mut buf = [0u8; 1];
        match self.port.read(&mut buf) {
            Ok(1) => Ok(Some(buf[0])),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == ErrorKind::TimedOut => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn peek_byte(&mut self) -> Result<Option<u8>> {
        if self.peeked.is_none() && self.port.bytes_to_read()? > 0 {
            self.peeked = self.read_byte(Duration::ZERO)?;
        }
        Ok(self.peeked)
    }

    fn available(&mut self) -> Result<usize> {
        let buffered = self.port.bytes_to_read()? as usize;
        Ok(buffered + usize::from(self.peeked.is_some()))
    }

    fn discard_input(&mut self) -> Result<()> {
        self.peeked = None;
        self.port.clear(ClearBuffer::Input)?;
        Ok(())
    }
}

impl BaudSwitch for SerialTransport {
    fn set_baud_rate(&mut self, baud: u32) -> Result<()> {
        self.peeked = None;
        self.port.set_baud_rate(baud)?;
        Ok(())
    }
}

/// Which modem output of the adapter is wired to SET
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModemSignal {
    Dtr,
    Rts,
}

/// [`ControlLine`] driven through a modem control output of the adapter.
///
/// Most adapters invert these outputs: asserting DTR/RTS pulls the pin low.
pub struct ModemLine {
    port: Box<dyn SerialPort>,
    signal: ModemSignal,
}

impl ModemLine {
    /// `port` is usually a `try_clone()` of the data port
    pub fn new(port: Box<dyn SerialPort>, signal: ModemSignal) -> Self {
        ModemLine { port, signal }
    }

    fn assert(&mut self, asserted: bool) -> Result<()> {
        let result = match self.signal {
            ModemSignal::Dtr => self.port.write_data_terminal_ready(asserted),
            ModemSignal::Rts => self.port.write_request_to_send(asserted),
        };
        result.map_err(|e| Hc12Error::ControlLine(format!("{:?}: {}", self.signal, e)))
    }
}

impl ControlLine for ModemLine {
    fn set_low(&mut self) -> Result<()> {
        self.assert(true)
    }

    fn set_high(&mut self) -> Result<()> {
        self.assert(false)
    }
}
