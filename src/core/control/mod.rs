use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::counter::Pulses;

const EN_BIT: u8 = 0;
const LOAD_BIT: u8 = 1;
const UP_BIT: u8 = 2;
const OE_BIT: u8 = 3;

const LOADED_BIT: u8 = 5;
const CARRY_BORROW_BIT: u8 = 6;
const WRAP_BIT: u8 = 7;

fn bit(byte: u8, idx: u8) -> bool {
    (byte >> idx) & 1 == 1
}

/// Control inputs carried on `uio_in`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlWord {
    pub enable: bool,
    pub load: bool,
    pub up: bool,
    pub output_enable: bool,
}

impl ControlWord {
    pub fn decode(byte: u8) -> Self {
        let word = Self {
            enable: bit(byte, EN_BIT),
            load: bit(byte, LOAD_BIT),
            up: bit(byte, UP_BIT),
            output_enable: bit(byte, OE_BIT),
        };
        debug!("Decoded control byte 0x{:02X}: {:?}", byte, word);
        word
    }

    pub fn encode(&self) -> u8 {
        (u8::from(self.output_enable) << OE_BIT)
            | (u8::from(self.up) << UP_BIT)
            | (u8::from(self.load) << LOAD_BIT)
            | (u8::from(self.enable) << EN_BIT)
    }
}

impl Default for ControlWord {
    // Counting direction defaults to up.
    fn default() -> Self {
        Self {
            enable: false,
            load: false,
            up: true,
            output_enable: false,
        }
    }
}

/// Pulse outputs on `uo_out[7:5]`. Lower bits are always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusWord {
    pub loaded: bool,
    pub carry_borrow: bool,
    pub wrap: bool,
}

impl StatusWord {
    pub fn from_pulses(pulses: &Pulses) -> Self {
        Self {
            loaded: pulses.loaded,
            carry_borrow: pulses.carry_borrow,
            wrap: pulses.wrap,
        }
    }

    pub fn decode(byte: u8) -> Self {
        Self {
            loaded: bit(byte, LOADED_BIT),
            carry_borrow: bit(byte, CARRY_BORROW_BIT),
            wrap: bit(byte, WRAP_BIT),
        }
    }

    pub fn bits(&self) -> u8 {
        (u8::from(self.wrap) << WRAP_BIT)
            | (u8::from(self.carry_borrow) << CARRY_BORROW_BIT)
            | (u8::from(self.loaded) << LOADED_BIT)
    }
}
