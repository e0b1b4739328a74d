use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, instrument};

use crate::core::control::ControlWord;
use crate::core::counter::{BusValue, TristatePolicy};
use crate::core::device::{Device, Outputs};

mod scenarios;

pub use scenarios::builtin;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{script}: step {step}: {signal} expected {expected}, got {actual}")]
    Mismatch {
        script: String,
        step: usize,
        signal: &'static str,
        expected: String,
        actual: String,
    },
}

/// Checks made against the output pins. Unset fields are not checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Expect {
    pub uio_out: Option<BusValue>,
    pub uio_oe: Option<u8>,
    pub loaded: Option<bool>,
    pub wrap: Option<bool>,
    pub carry_borrow: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Pulse `rst_n` low, then release it.
    Reset,
    /// Raw pin assignment.
    Drive { ui_in: u32, uio_in: u32 },
    /// Same as `Drive`, with the control byte spelled out.
    Control {
        #[serde(flatten)]
        control: ControlWord,
        #[serde(default)]
        data: u32,
    },
    Edges { count: u32 },
    Expect(Expect),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub name: String,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub name: String,
    pub steps: usize,
    pub cycles: u64,
    pub checks: usize,
}

impl Script {
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        let bytes = serde_json::to_vec_pretty(self)?;
        debug!("Serialized script: {}", self.name);
        Ok(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let script: Script = serde_json::from_slice(bytes)?;
        debug!("Deserialized script: {} ({} steps)", script.name, script.steps.len());
        Ok(script)
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let bytes = std::fs::read(path)?;
        Ok(Self::from_bytes(&bytes)?)
    }
}

fn check<T>(
    script: &Script,
    step: usize,
    signal: &'static str,
    expected: Option<T>,
    actual: T,
) -> Result<usize, ScriptError>
where
    T: PartialEq + std::fmt::Debug,
{
    match expected {
        None => Ok(0),
        Some(expected) if expected == actual => Ok(1),
        Some(expected) => {
            error!("{}: step {}: {} expected {:?}, got {:?}", script.name, step, signal, expected, actual);
            Err(ScriptError::Mismatch {
                script: script.name.clone(),
                step,
                signal,
                expected: format!("{expected:?}"),
                actual: format!("{actual:?}"),
            })
        }
    }
}

fn check_outputs(script: &Script, step: usize, expect: &Expect, out: &Outputs) -> Result<usize, ScriptError> {
    let status = out.status();
    Ok(check(script, step, "uio_out", expect.uio_out, out.uio_out)?
        + check(script, step, "uio_oe", expect.uio_oe, out.uio_oe)?
        + check(script, step, "loaded_pulse", expect.loaded, status.loaded)?
        + check(script, step, "wrap_pulse", expect.wrap, status.wrap)?
        + check(script, step, "carry_borrow_pulse", expect.carry_borrow, status.carry_borrow)?)
}

/// Apply every step in order, stopping at the first failed expectation.
#[instrument(name = "run_script", level = "info", skip_all, fields(script = %script.name))]
pub fn run(script: &Script, device: &mut Device) -> Result<RunReport, ScriptError> {
    let start = device.cycles();
    let mut checks = 0;

    for (idx, step) in script.steps.iter().enumerate() {
        debug!("Step {}: {:?}", idx, step);
        match step {
            Step::Reset => {
                device.set_reset_n(false);
                device.set_reset_n(true);
            }
            Step::Drive { ui_in, uio_in } => device.drive(*ui_in, *uio_in),
            Step::Control { control, data } => device.drive(*data, u32::from(control.encode())),
            Step::Edges { count } => {
                for _ in 0..*count {
                    device.rising_edge();
                }
            }
            Step::Expect(expect) => {
                checks += check_outputs(script, idx, expect, &device.outputs())?;
            }
        }
    }

    let report = RunReport {
        name: script.name.clone(),
        steps: script.steps.len(),
        cycles: device.cycles() - start,
        checks,
    };
    info!(
        "Script passed: {:?}, final value 0x{:02X} under {:?}",
        report,
        device.counter().value,
        device.counter().policy()
    );
    Ok(report)
}

/// Run a script against a fresh device.
pub fn run_fresh(script: &Script, policy: TristatePolicy) -> Result<RunReport, ScriptError> {
    let mut device = Device::new(policy);
    run(script, &mut device)
}
