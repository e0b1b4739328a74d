use serde::{Deserialize, Serialize};
use tracing::instrument;

/// What the counter does with `uio_out` while output enable is low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TristatePolicy {
    /// Bus is driven with zero.
    DriveZero,
    /// Bus is left undriven.
    #[default]
    HighImpedance,
}

/// Value observed on the bidirectional bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BusValue {
    Driven(u8),
    HighZ,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pulses {
    pub loaded: bool,
    pub wrap: bool,
    pub carry_borrow: bool,
}

/// 8-bit up/down counter with synchronous load and asynchronous reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    pub value: u8,
    pulses: Pulses,
    policy: TristatePolicy,
}

impl Counter {
    pub fn new(policy: TristatePolicy) -> Self {
        tracing::info!("Creating a new counter with tri-state policy: {:?}", policy);
        Self {
            value: 0,
            pulses: Pulses::default(),
            policy,
        }
    }

    pub fn policy(&self) -> TristatePolicy {
        self.policy
    }

    pub fn pulses(&self) -> Pulses {
        self.pulses
    }

    /// Asynchronous reset. Takes effect without waiting for a clock edge.
    #[instrument(name = "reset_counter", level = "debug", skip(self))]
    pub fn reset(&mut self) {
        self.value = 0;
        self.pulses = Pulses::default();
        tracing::debug!("Counter reset to 0");
    }

    /// One rising clock edge with reset released.
    #[instrument(name = "clock_tick", level = "debug", skip(self), fields(value = self.value))]
    pub fn clock_tick(&mut self, enable: bool, load: bool, up: bool, data_in: u8) -> Pulses {
        self.pulses = if load {
            self.value = data_in;
            Pulses {
                loaded: true,
                ..Pulses::default()
            }
        } else if enable {
            let (next, carry) = if up {
                (self.value.wrapping_add(1), self.value == u8::MAX)
            } else {
                (self.value.wrapping_sub(1), self.value == 0)
            };
            self.value = next;
            Pulses {
                loaded: false,
                wrap: carry,
                carry_borrow: carry,
            }
        } else {
            Pulses::default()
        };

        tracing::debug!("Counter now at: {} ({:?})", self.value, self.pulses);
        self.pulses
    }

    /// Bus value and drive mask as seen from outside.
    pub fn read(&self, output_enable: bool) -> (BusValue, u8) {
        if output_enable {
            return (BusValue::Driven(self.value), 0xFF);
        }
        match self.policy {
            TristatePolicy::DriveZero => (BusValue::Driven(0), 0x00),
            TristatePolicy::HighImpedance => (BusValue::HighZ, 0x00),
        }
    }
}
