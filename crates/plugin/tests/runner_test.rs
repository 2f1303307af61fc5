//! Integration tests for Runner

use mockall::mock;
use plugin::{Metric, Resource, Runner, ServiceState, ThresholdConfig};
use thresholds::Threshold;

mock! {
    pub Probe {}

    impl Resource for Probe {
        fn name(&self) -> &str;
        fn probe(&self) -> common::Result<Vec<Metric>>;
    }
}

/// Helper to create a mock resource returning `metrics`
fn probe_returning(metrics: Vec<Metric>) -> MockProbe {
    let mut probe = MockProbe::new();
    probe.expect_name().return_const("disk".to_string());
    probe.expect_probe().times(1).return_once(move || Ok(metrics));
    probe
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn test_runner_reports_worst_state() {
    init_tracing();

    let threshold = Threshold::from_specs(Some("80"), Some("90")).unwrap();
    let probe = probe_returning(vec![
        Metric::new("/", 95.0).with_uom("%").with_threshold(threshold),
        Metric::new("/var", 85.0).with_uom("%").with_threshold(threshold),
    ]);

    let output = Runner::new().run(&probe);
    assert_eq!(output.state, ServiceState::Critical);
    assert_eq!(output.state.exit_code(), 2);
    assert_eq!(
        output.to_string(),
        "DISK CRITICAL - / is 95%, /var is 85% | /=95%;80;90 /var=85%;80;90"
    );
}

#[test]
fn test_probe_error_becomes_unknown() {
    init_tracing();

    let mut probe = MockProbe::new();
    probe.expect_name().return_const("disk".to_string());
    probe
        .expect_probe()
        .times(1)
        .returning(|| Err(common::Error::check("statvfs failed")));

    let output = Runner::new().run(&probe);
    assert_eq!(output.state, ServiceState::Unknown);
    assert_eq!(output.state.exit_code(), 3);
    assert_eq!(output.to_string(), "DISK UNKNOWN - Check error: statvfs failed");
}

#[test]
fn test_invalid_threshold_in_probe_becomes_unknown() {
    let mut probe = MockProbe::new();
    probe.expect_name().return_const("load".to_string());
    probe.expect_probe().times(1).returning(|| {
        let threshold = Threshold::from_specs(Some("-5"), None)?;
        Ok(vec![Metric::new("load1", 1.0).with_threshold(threshold)])
    });

    let output = Runner::new().run(&probe);
    assert_eq!(output.state, ServiceState::Unknown);
    assert!(output.status_text.starts_with("LOAD UNKNOWN - Range error: invalid range value '-5'"));
    assert!(output.perfdata.is_empty());
}

#[test]
fn test_config_thresholds_replace_probe_thresholds() {
    let config = ThresholdConfig::from_yaml_str(
        r#"
metrics:
  - label: "/"
    warning: "50"
    critical: "99"
    min: 0
    max: 100
"#,
    )
    .unwrap();

    let threshold = Threshold::from_specs(Some("80"), Some("90")).unwrap();
    let probe = probe_returning(vec![
        Metric::new("/", 95.0).with_uom("%").with_threshold(threshold),
        Metric::new("/var", 10.0).with_uom("%").with_threshold(threshold),
    ]);

    let output = Runner::new().with_config(config).run(&probe);
    assert_eq!(output.state, ServiceState::Warning);
    assert_eq!(
        output.perfdata.to_string(),
        "/=95%;50;99;0;100 /var=10%;80;90"
    );
}

#[test]
fn test_unmeasured_metric_is_unknown_but_reported() {
    let probe = probe_returning(vec![
        Metric::unknown("rtt").with_uom("ms"),
        Metric::new("loss", 0.0).with_uom("%"),
    ]);

    let output = Runner::new().run(&probe);
    assert_eq!(output.state, ServiceState::Unknown);
    assert_eq!(output.to_string(), "DISK UNKNOWN - rtt is unknown | rtt=Ums loss=0%");
}
