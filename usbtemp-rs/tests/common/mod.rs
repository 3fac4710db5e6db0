#![allow(dead_code)]
use std::{
    collections::VecDeque,
    io,
    sync::{Arc, Mutex, MutexGuard},
};

use embedded_onewire::crc8;
use log::LevelFilter;
use usbtemp::{NORMAL_BAUD, RESET_BAUD, Transport};

pub fn init_logger() {
    let _ = env_logger::builder()
        .filter_level(LevelFilter::max())
        .is_test(true)
        .try_init();
}

/// Valid ROM code of family 0x28.
pub fn rom() -> [u8; 8] {
    let mut rom = [0x28, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x00];
    rom[7] = crc8(&rom[..7]);
    rom
}

/// Power-on scratchpad: 85.0 °C, 12-bit resolution.
pub fn scratchpad() -> [u8; 9] {
    let mut pad = [0x50, 0x05, 0x4b, 0x46, 0x7f, 0xff, 0x0c, 0x10, 0x00];
    pad[8] = crc8(&pad[..8]);
    pad
}

#[derive(Debug)]
enum Mode {
    RomCommand,
    FunctionCommand,
    Transmit(VecDeque<bool>),
    Idle,
}

fn bits_of(bytes: &[u8]) -> VecDeque<bool> {
    bytes
        .iter()
        .flat_map(|&b| (0..8).map(move |i| (b >> i) & 0x01 == 0x01))
        .collect()
}

/// What the simulated line looks like, shared with the test body.
#[derive(Debug)]
pub struct SimState {
    /// Reply to the reset pulse; `None` keeps the line silent.
    pub presence: Option<u8>,
    pub rom: [u8; 8],
    pub scratchpad: [u8; 9],
    /// Something holds the line low during bit slots.
    pub stuck_low: bool,
    /// Every baud rate change, in order.
    pub bauds: Vec<u32>,
    /// Commands seen after each reset.
    pub transactions: Vec<Vec<u8>>,
    /// Writes that arrived while the previous echo was still unread.
    pub overlaps: usize,
    in_flight: bool,
    baud: u32,
    mode: Mode,
    shift: u8,
    bits: u8,
    rx: VecDeque<u8>,
}

impl SimState {
    fn slot(&mut self, slot: u8) -> u8 {
        if self.stuck_low {
            return 0x00;
        }
        if let Mode::Transmit(bits) = &mut self.mode {
            if slot == 0x00 {
                return 0x00;
            }
            // device drives a 0 by holding the line low early in the slot
            return match bits.pop_front() {
                Some(false) => 0xfc,
                _ => 0xff,
            };
        }
        self.shift >>= 1;
        if slot == 0xff {
            self.shift |= 0x80;
        }
        self.bits += 1;
        if self.bits == 8 {
            let byte = self.shift;
            self.bits = 0;
            self.command(byte);
        }
        slot
    }

    fn command(&mut self, byte: u8) {
        if let Some(cmds) = self.transactions.last_mut() {
            cmds.push(byte);
        }
        self.mode = match (&self.mode, byte) {
            (Mode::RomCommand, 0x33) => Mode::Transmit(bits_of(&self.rom)),
            (Mode::RomCommand, 0xcc) => Mode::FunctionCommand,
            (Mode::FunctionCommand, 0xbe) => Mode::Transmit(bits_of(&self.scratchpad)),
            _ => Mode::Idle,
        };
    }
}

/// A USB-UART adapter with one DS18B20 on its line.
#[derive(Clone)]
pub struct SimPort {
    state: Arc<Mutex<SimState>>,
}

impl SimPort {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(SimState {
                presence: Some(0xe0),
                rom: rom(),
                scratchpad: scratchpad(),
                stuck_low: false,
                bauds: Vec::new(),
                transactions: Vec::new(),
                overlaps: 0,
                in_flight: false,
                baud: NORMAL_BAUD,
                mode: Mode::Idle,
                shift: 0,
                bits: 0,
                rx: VecDeque::new(),
            })),
        }
    }

    pub fn state(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().unwrap()
    }
}

impl Transport for SimPort {
    type Error = io::Error;

    async fn set_baud_rate(&mut self, baud_rate: u32) -> io::Result<()> {
        let mut state = self.state();
        state.baud = baud_rate;
        state.bauds.push(baud_rate);
        Ok(())
    }

    async fn discard_input(&mut self) -> io::Result<()> {
        self.state().rx.clear();
        Ok(())
    }

    async fn write_all(&mut self, bytes: &[u8]) -> io::Result<()> {
        let mut state = self.state();
        if state.in_flight {
            state.overlaps += 1;
        }
        if state.baud == RESET_BAUD {
            for &byte in bytes {
                state.mode = Mode::RomCommand;
                state.bits = 0;
                state.transactions.push(Vec::new());
                if let Some(reply) = state.presence {
                    state.rx.push_back(if byte == 0xf0 { reply } else { byte });
                    state.in_flight = true;
                }
            }
            return Ok(());
        }
        for &slot in bytes {
            let echo = state.slot(slot);
            state.rx.push_back(echo);
        }
        state.in_flight = !bytes.is_empty();
        Ok(())
    }

    async fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = {
            let mut state = self.state();
            let n = buf.len().min(state.rx.len());
            for (slot, byte) in buf.iter_mut().zip(state.rx.drain(..n)) {
                *slot = byte;
            }
            if state.rx.is_empty() {
                state.in_flight = false;
            }
            n
        };
        if n == 0 {
            std::future::pending::<()>().await;
        }
        Ok(n)
    }
}
