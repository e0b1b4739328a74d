use tracing::{debug, info, instrument, warn};

use crate::core::control::{ControlWord, StatusWord};
use crate::core::counter::{BusValue, Counter, TristatePolicy};

/// Output pins after the last update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outputs {
    pub uio_out: BusValue,
    pub uio_oe: u8,
    pub uo_out: u8,
}

impl Outputs {
    pub fn status(&self) -> StatusWord {
        StatusWord::decode(self.uo_out)
    }
}

/// Pin-level shell around the counter.
#[derive(Debug, Clone)]
pub struct Device {
    counter: Counter,
    rst_n: bool,
    ui_in: u8,
    uio_in: u8,
    outputs: Outputs,
    cycles: u64,
}

fn truncate(pin: &str, value: u32) -> u8 {
    let byte = (value & 0xFF) as u8;
    if u32::from(byte) != value {
        warn!("{} value 0x{:X} exceeds 8 bits, truncated to 0x{:02X}", pin, value, byte);
    }
    byte
}

impl Device {
    pub fn new(policy: TristatePolicy) -> Self {
        let counter = Counter::new(policy);
        let (uio_out, uio_oe) = counter.read(false);
        let device = Self {
            counter,
            rst_n: true,
            ui_in: 0,
            uio_in: 0,
            outputs: Outputs {
                uio_out,
                uio_oe,
                uo_out: 0,
            },
            cycles: 0,
        };
        info!("Device initialized: {:?}", device.outputs);
        device
    }

    pub fn counter(&self) -> &Counter {
        &self.counter
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn outputs(&self) -> Outputs {
        self.outputs
    }

    /// Drive `rst_n`. Going low resets the counter at once.
    #[instrument(name = "set_reset_n", level = "debug", skip(self))]
    pub fn set_reset_n(&mut self, rst_n: bool) {
        self.rst_n = rst_n;
        if !rst_n {
            self.counter.reset();
            self.refresh();
        }
    }

    pub fn drive(&mut self, ui_in: u32, uio_in: u32) {
        self.ui_in = truncate("ui_in", ui_in);
        self.uio_in = truncate("uio_in", uio_in);
        // Output enable is combinational.
        self.refresh();
    }

    #[instrument(name = "rising_edge", level = "debug", skip(self), fields(cycle = self.cycles))]
    pub fn rising_edge(&mut self) -> Outputs {
        self.cycles += 1;
        if !self.rst_n {
            debug!("Reset held low, edge ignored");
            return self.outputs;
        }

        let ctrl = ControlWord::decode(self.uio_in);
        let data_in = self.ui_in;
        self.counter.clock_tick(ctrl.enable, ctrl.load, ctrl.up, data_in);
        self.refresh();
        self.outputs
    }

    fn refresh(&mut self) {
        let ctrl = ControlWord::decode(self.uio_in);
        let (uio_out, uio_oe) = self.counter.read(ctrl.output_enable);
        self.outputs = Outputs {
            uio_out,
            uio_oe,
            uo_out: StatusWord::from_pulses(&self.counter.pulses()).bits(),
        };
    }
}
