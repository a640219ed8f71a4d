//! Scripted stand-ins for the serial port and the SET pin.

use crate::error::{Hc12Error, Result};
use crate::transport::{BaudSwitch, ControlLine, Transport};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    PinLow,
    PinHigh,
    Command(String),
    Baud(u32),
}

pub(crate) type EventLog = Rc<RefCell<Vec<Event>>>;

/// Answers each command line with a canned reply; unknown commands get silence
pub(crate) struct MockSerial {
    replies: HashMap<String, String>,
    baud: u32,
    answers_at: Option<u32>,
    fail_after: Option<usize>,
    lines: usize,
    read_timeouts: Vec<Duration>,
    rx: VecDeque<u8>,
    tx: Vec<u8>,
    line: Vec<u8>,
    events: EventLog,
}

impl MockSerial {
    pub fn new() -> Self {
        MockSerial {
            replies: HashMap::new(),
            baud: 9600,
            answers_at: None,
            fail_after: None,
            lines: 0,
            read_timeouts: Vec::new(),
            rx: VecDeque::new(),
            tx: Vec::new(),
            line: Vec::new(),
            events: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn reply(mut self, command: &str, reply: &str) -> Self {
        self.replies.insert(command.to_string(), reply.to_string());
        self
    }

    pub fn with_pending_input(mut self, data: &[u8]) -> Self {
        self.rx.extend(data);
        self
    }

    /// Only answer while the link runs at `baud`
    pub fn answering_at(mut self, baud: u32) -> Self {
        self.answers_at = Some(baud);
        self
    }

    /// Accept `lines` command lines, then fail every write
    pub fn failing_after(mut self, lines: usize) -> Self {
        self.fail_after = Some(lines);
        self
    }

    pub fn events(&self) -> EventLog {
        self.events.clone()
    }

    /// Timeout passed to every `read_byte` call so far
    pub fn read_timeouts(&self) -> &[Duration] {
        &self.read_timeouts
    }

    pub fn written(&self) -> &[u8] {
        &self.tx
    }

    pub fn commands(&self) -> Vec<String> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::Command(c) => Some(c.clone()),
                _ => None,
            })
            .collect()
    }

    fn handle_line(&mut self, command: String) {
        self.events.borrow_mut().push(Event::Command(command.clone()));
        if self.answers_at.is_some_and(|baud| baud != self.baud) {
            return;
        }
        if let Some(reply) = self.replies.get(&command) {
            self.rx.extend(reply.as_bytes());
            self.rx.push_back(b'\n');
        }
    }
}

impl Transport for MockSerial {
    fn write_all(&mut self, data: &[u8]) -> Result<()> {
        if self.fail_after.is_some_and(|n| self.lines >= n) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "unplugged").into());
        }
        self.tx.extend_from_slice(data);
        self.line.extend_from_slice(data);
        while let Some(end) = self.line.windows(2).position(|w| w == b"\r\n") {
            let command = String::from_utf8_lossy(&self.line[..end]).to_string();
            self.line.drain(..end + 2);
            self.lines += 1;
            self.handle_line(command);
        }
        Ok(())
    }

    fn read_byte(&mut self, timeout: Duration) -> Result<Option<u8>> {
        self.read_timeouts.push(timeout);
        Ok(self.rx.pop_front())
    }

    fn peek_byte(&mut self) -> Result<Option<u8>> {
        Ok(self.rx.front().copied())
    }

    fn available(&mut self) -> Result<usize> {
        Ok(self.rx.len())
    }

    fn discard_input(&mut self) -> Result<()> {
        self.rx.clear();
        Ok(())
    }
}

impl BaudSwitch for MockSerial {
    fn set_baud_rate(&mut self, baud: u32) -> Result<()> {
        self.baud = baud;
        self.events.borrow_mut().push(Event::Baud(baud));
        Ok(())
    }
}

/// SET pin recording into the same log as its [`MockSerial`]
pub(crate) struct MockPin {
    events: EventLog,
    fail_low: bool,
}

impl MockPin {
    pub fn new(events: EventLog) -> Self {
        MockPin {
            events,
            fail_low: false,
        }
    }

    pub fn failing(events: EventLog) -> Self {
        MockPin {
            events,
            fail_low: true,
        }
    }
}

impl ControlLine for MockPin {
    fn set_low(&mut self) -> Result<()> {
        if self.fail_low {
            return Err(Hc12Error::ControlLine("stuck".to_string()));
        }
        self.events.borrow_mut().push(Event::PinLow);
        Ok(())
    }

    fn set_high(&mut self) -> Result<()> {
        self.events.borrow_mut().push(Event::PinHigh);
        Ok(())
    }
}
