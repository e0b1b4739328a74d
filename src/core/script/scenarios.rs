//! Hardware testbench scenarios, replayed against the model.

use crate::core::control::ControlWord;
use crate::core::counter::{BusValue, TristatePolicy};

use super::{Expect, Script, Step};

fn ctrl(enable: bool, load: bool, up: bool, output_enable: bool, data: u32) -> Step {
    Step::Control {
        control: ControlWord {
            enable,
            load,
            up,
            output_enable,
        },
        data,
    }
}

fn edges(count: u32) -> Step {
    Step::Edges { count }
}

fn bus(value: u8) -> Option<BusValue> {
    Some(BusValue::Driven(value))
}

/// Reset with all inputs low and let one edge pass.
fn reset_dut() -> Vec<Step> {
    vec![Step::Drive { ui_in: 0, uio_in: 0 }, Step::Reset, edges(1)]
}

/// Load `value` on the next edge with output enable on.
fn sync_load(value: u8) -> Vec<Step> {
    vec![ctrl(false, true, true, true, u32::from(value)), edges(1)]
}

fn basic_reset_and_load() -> Script {
    let mut steps = reset_dut();
    steps.extend([
        ctrl(false, false, true, true, 0),
        edges(1),
        Step::Expect(Expect {
            uio_out: bus(0),
            uio_oe: Some(0xFF),
            ..Expect::default()
        }),
    ]);
    steps.extend(sync_load(0x55));
    steps.extend([
        Step::Expect(Expect {
            uio_out: bus(0x55),
            loaded: Some(true),
            ..Expect::default()
        }),
        ctrl(false, false, true, true, 0),
        edges(1),
        Step::Expect(Expect {
            uio_out: bus(0x55),
            loaded: Some(false),
            ..Expect::default()
        }),
    ]);
    Script {
        name: "basic_reset_and_load".to_string(),
        steps,
    }
}

fn count_up_and_wrap() -> Script {
    let mut steps = reset_dut();
    steps.extend(sync_load(0xFE));
    steps.extend([
        ctrl(true, false, true, true, 0),
        edges(1),
        Step::Expect(Expect {
            uio_out: bus(0xFF),
            wrap: Some(false),
            ..Expect::default()
        }),
        edges(1),
        Step::Expect(Expect {
            uio_out: bus(0x00),
            wrap: Some(true),
            carry_borrow: Some(true),
            ..Expect::default()
        }),
        edges(1),
        Step::Expect(Expect {
            uio_out: bus(0x01),
            wrap: Some(false),
            carry_borrow: Some(false),
            ..Expect::default()
        }),
    ]);
    Script {
        name: "count_up_and_wrap".to_string(),
        steps,
    }
}

fn count_down_and_wrap() -> Script {
    let mut steps = reset_dut();
    steps.extend(sync_load(0x00));
    steps.extend([
        ctrl(true, false, false, true, 0),
        edges(1),
        Step::Expect(Expect {
            uio_out: bus(0xFF),
            wrap: Some(true),
            carry_borrow: Some(true),
            ..Expect::default()
        }),
        edges(1),
        Step::Expect(Expect {
            uio_out: bus(0xFE),
            wrap: Some(false),
            carry_borrow: Some(false),
            ..Expect::default()
        }),
    ]);
    Script {
        name: "count_down_and_wrap".to_string(),
        steps,
    }
}

fn tristate_enable(policy: TristatePolicy) -> Script {
    let disabled = match policy {
        TristatePolicy::DriveZero => BusValue::Driven(0),
        TristatePolicy::HighImpedance => BusValue::HighZ,
    };

    let mut steps = reset_dut();
    steps.extend(sync_load(0xA5));
    steps.extend([
        Step::Expect(Expect {
            uio_oe: Some(0xFF),
            ..Expect::default()
        }),
        ctrl(true, false, true, false, 0),
        edges(1),
        Step::Expect(Expect {
            uio_out: Some(disabled),
            uio_oe: Some(0x00),
            ..Expect::default()
        }),
        ctrl(true, false, true, true, 0),
        edges(1),
        Step::Expect(Expect {
            uio_out: bus(0xA7),
            uio_oe: Some(0xFF),
            ..Expect::default()
        }),
    ]);
    Script {
        name: "tristate_enable".to_string(),
        steps,
    }
}

/// The four testbench scenarios, with tri-state expectations matching `policy`.
pub fn builtin(policy: TristatePolicy) -> Vec<Script> {
    vec![
        basic_reset_and_load(),
        count_up_and_wrap(),
        count_down_and_wrap(),
        tristate_enable(policy),
    ]
}
