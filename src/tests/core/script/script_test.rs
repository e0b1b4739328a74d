#[cfg(test)]
mod tests {
    use crate::core::counter::{BusValue, TristatePolicy};
    use crate::core::device::Device;
    use crate::core::script::{builtin, run, run_fresh, Expect, Script, ScriptError, Step};
    use tracing_test::traced_test;

    const POLICIES: [TristatePolicy; 2] = [TristatePolicy::DriveZero, TristatePolicy::HighImpedance];

    #[test]
    fn test_builtin_scenarios_pass() {
        for policy in POLICIES {
            let scripts = builtin(policy);
            assert_eq!(scripts.len(), 4);
            for script in &scripts {
                let report = run_fresh(script, policy).unwrap();
                assert_eq!(report.name, script.name);
                assert!(report.checks > 0);
            }
        }
    }

    #[test]
    fn test_tristate_scenario_is_policy_specific() {
        let zero = builtin(TristatePolicy::DriveZero).pop().unwrap();
        assert_eq!(zero.name, "tristate_enable");
        assert!(matches!(
            run_fresh(&zero, TristatePolicy::HighImpedance),
            Err(ScriptError::Mismatch { signal: "uio_out", .. })
        ));
    }

    #[traced_test]
    #[test]
    fn test_mismatch_reports_step() {
        let script = Script {
            name: "wrong".to_string(),
            steps: vec![
                Step::Drive { ui_in: 0x10, uio_in: 0b1010 },
                Step::Edges { count: 1 },
                Step::Expect(Expect {
                    uio_out: Some(BusValue::Driven(0x11)),
                    ..Expect::default()
                }),
            ],
        };
        match run_fresh(&script, TristatePolicy::HighImpedance) {
            Err(ScriptError::Mismatch { step, signal, expected, actual, .. }) => {
                assert_eq!(step, 2);
                assert_eq!(signal, "uio_out");
                assert_eq!(expected, "Driven(17)");
                assert_eq!(actual, "Driven(16)");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(logs_contain("uio_out expected"));
    }

    #[test]
    fn test_reset_step_on_shared_device() {
        let mut device = Device::new(TristatePolicy::DriveZero);
        let load = Script {
            name: "load".to_string(),
            steps: vec![Step::Drive { ui_in: 0x20, uio_in: 0b1010 }, Step::Edges { count: 3 }],
        };
        let report = run(&load, &mut device).unwrap();
        assert_eq!(report.cycles, 3);
        assert_eq!(report.checks, 0);

        let reset = Script {
            name: "reset".to_string(),
            steps: vec![
                Step::Reset,
                Step::Expect(Expect {
                    uio_out: Some(BusValue::Driven(0)),
                    loaded: Some(false),
                    ..Expect::default()
                }),
            ],
        };
        assert_eq!(run(&reset, &mut device).unwrap().checks, 2);
    }

    #[test]
    fn test_parse_json_script() {
        let json = r#"{
            "name": "from_json",
            "steps": [
                "reset",
                {"control": {"load": true, "output_enable": true, "data": 255}},
                {"edges": {"count": 1}},
                {"control": {"enable": true, "output_enable": true}},
                {"edges": {"count": 1}},
                {"expect": {"uio_out": {"driven": 0}, "wrap": true, "carry_borrow": true}},
                {"control": {"enable": true}},
                {"expect": {"uio_out": "high_z", "uio_oe": 0}}
            ]
        }"#;
        let script = Script::from_bytes(json.as_bytes()).unwrap();
        assert_eq!(script.steps.len(), 8);
        assert_eq!(script.steps[0], Step::Reset);

        let report = run_fresh(&script, TristatePolicy::HighImpedance).unwrap();
        assert_eq!(report.checks, 5);
        assert_eq!(report.cycles, 2);
    }

    #[test]
    fn test_script_bytes_roundtrip() {
        let script = builtin(TristatePolicy::HighImpedance).remove(0);
        let bytes = script.to_bytes().unwrap();
        assert_eq!(Script::from_bytes(&bytes).unwrap(), script);
    }

    #[test]
    fn test_bad_json() {
        assert!(Script::from_bytes(b"{\"name\": 1}").is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = Script::load(std::path::Path::new("/nonexistent/script.json")).unwrap_err();
        assert!(matches!(err, ScriptError::Io(_)));
    }
}
