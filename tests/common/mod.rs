//! A simulated HC-12 that keeps its own settings and only answers while SET
//! is held low.

#![allow(dead_code)]

use hc12::{ControlLine, Hc12, Hc12Config, Settings, Transport};
use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::io;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trace {
    Low,
    High,
    Tx(String),
    Data(Vec<u8>),
}

#[derive(Debug)]
pub struct Device {
    pub baud: u32,
    pub channel: u8,
    pub power_level: u8,
    pub mode: u8,
    /// FU4 only runs at 1200 bps and switches the rate itself
    pub mode_forces_baud: bool,
    /// Commands answered with `ERROR` instead of their normal reply
    pub broken: HashSet<String>,
    pub sleep_reply: String,
    /// Writes fail as if the adapter was pulled
    pub unplugged: bool,
    pub set_low: bool,
    pub trace: Vec<Trace>,
}

impl Device {
    fn factory() -> Self {
        Device {
            baud: 9600,
            channel: 1,
            power_level: 8,
            mode: 3,
            mode_forces_baud: true,
            broken: HashSet::new(),
            sleep_reply: "AT+SLEEP".to_string(),
            unplugged: false,
            set_low: false,
            trace: Vec::new(),
        }
    }

    fn dbm(&self) -> i32 {
        [-1, 2, 5, 8, 11, 14, 17, 20][usize::from(self.power_level) - 1]
    }

    fn answer(&mut self, command: &str) -> Option<String> {
        if self.broken.contains(command) {
            return Some("ERROR".to_string());
        }
        let reply = match command {
            "AT" => "OK".to_string(),
            "AT+RB" => format!("OK+B{}", self.baud),
            "AT+RC" => format!("OK+RC{:03}", self.channel),
            "AT+RP" => format!("OK+RP:{:+03}dBm", self.dbm()),
            "AT+RF" => format!("OK+FU{},B{}", self.mode, self.baud),
            "AT+SLEEP" => self.sleep_reply.clone(),
            "AT+DEFAULT" => {
                self.baud = 9600;
                self.channel = 1;
                self.power_level = 8;
                self.mode = 3;
                "OK+DEFAULT".to_string()
            }
            _ => return self.answer_set(command),
        };
        Some(reply)
    }

    fn answer_set(&mut self, command: &str) -> Option<String> {
        if let Some(baud) = command.strip_prefix("AT+B") {
            let baud: u32 = baud.parse().ok()?;
            self.baud = baud;
            return Some(format!("OK+B{baud}"));
        }
        if let Some(mode) = command.strip_prefix("AT+FU") {
            let mode = mode.parse::<u8>().ok().filter(|m| (1..=4).contains(m))?;
            self.mode = mode;
            if mode == 4 && self.mode_forces_baud {
                self.baud = 1200;
            }
            return Some(format!("OK+FU{mode}"));
        }
        if let Some(channel) = command.strip_prefix("AT+C") {
            self.channel = channel.parse().ok()?;
            return Some(format!("OK+C{channel}"));
        }
        if let Some(level) = command.strip_prefix("AT+P") {
            self.power_level = level.parse::<u8>().ok().filter(|l| (1..=8).contains(l))?;
            return Some(format!("OK+P{level}"));
        }
        None
    }
}

pub type Shared = Rc<RefCell<Device>>;

pub struct SimulatedPort {
    device: Shared,
    rx: VecDeque<u8>,
    line: Vec<u8>,
}

impl Transport for SimulatedPort {
    fn write_all(&mut self, data: &[u8]) -> hc12::Result<()> {
        let mut device = self.device.borrow_mut();
        if device.unplugged {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "device unplugged").into());
        }
        if !device.set_low {
            device.trace.push(Trace::Data(data.to_vec()));
            return Ok(());
        }
        self.line.extend_from_slice(data);
        while let Some(end) = self.line.windows(2).position(|w| w == b"\r\n") {
            let command = String::from_utf8_lossy(&self.line[..end]).to_string();
            self.line.drain(..end + 2);
            device.trace.push(Trace::Tx(command.clone()));
            if let Some(reply) = device.answer(&command) {
                self.rx.extend(reply.bytes());
                self.rx.extend(b"\r\n");
            }
        }
        Ok(())
    }

    fn read_byte(&mut self, _timeout: Duration) -> hc12::Result<Option<u8>> {
        Ok(self.rx.pop_front())
    }

    fn peek_byte(&mut self) -> hc12::Result<Option<u8>> {
        Ok(self.rx.front().copied())
    }

    fn available(&mut self) -> hc12::Result<usize> {
        Ok(self.rx.len())
    }

    fn discard_input(&mut self) -> hc12::Result<()> {
        self.rx.clear();
        Ok(())
    }
}

pub struct SetPin {
    device: Shared,
}

impl ControlLine for SetPin {
    fn set_low(&mut self) -> hc12::Result<()> {
        let mut device = self.device.borrow_mut();
        device.set_low = true;
        device.trace.push(Trace::Low);
        Ok(())
    }

    fn set_high(&mut self) -> hc12::Result<()> {
        let mut device = self.device.borrow_mut();
        device.set_low = false;
        device.trace.push(Trace::High);
        Ok(())
    }
}

pub fn device() -> Shared {
    Rc::new(RefCell::new(Device::factory()))
}

/// Facade over `device`, assuming it runs with `defaults`
pub fn connect(device: &Shared, defaults: Settings) -> Hc12<SimulatedPort, SetPin> {
    let port = SimulatedPort {
        device: device.clone(),
        rx: VecDeque::new(),
        line: Vec::new(),
    };
    let pin = SetPin {
        device: device.clone(),
    };
    Hc12::new(port, pin, defaults, Hc12Config::default().without_settle())
}

pub fn commands(device: &Shared) -> Vec<String> {
    device
        .borrow()
        .trace
        .iter()
        .filter_map(|t| match t {
            Trace::Tx(c) => Some(c.clone()),
            _ => None,
        })
        .collect()
}

pub fn clear_trace(device: &Shared) {
    device.borrow_mut().trace.clear();
}

/// Every command was sent with SET low, and SET ended high
pub fn assert_single_session(device: &Shared) {
    let device = device.borrow();
    let trace = &device.trace;
    assert_eq!(trace.first(), Some(&Trace::Low), "trace: {trace:?}");
    assert_eq!(trace.last(), Some(&Trace::High), "trace: {trace:?}");
    let toggles = trace
        .iter()
        .filter(|t| matches!(t, Trace::Low | Trace::High))
        .count();
    assert_eq!(toggles, 2, "trace: {trace:?}");
    assert!(!device.set_low);
}
