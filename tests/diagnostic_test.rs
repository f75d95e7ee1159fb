//! End-to-end checks for the diagnostic flow.
//!
//! Run: cargo test --test diagnostic_test
//! Run with GPU: cargo test --test diagnostic_test -- --ignored
//!
//! NOTE: Tests marked #[ignore] require real GPU hardware and may block on
//! driver initialization. Everything else must pass on a machine with no GPU.

use accel_probe::backend::BackendReport;
use accel_probe::buildinfo::BuildConfig;
use accel_probe::device::Device;
use accel_probe::factorize::{fit, NormalizedLossParams};
use accel_probe::probe::{verify_transfer, VerifyOutcome};
use accel_probe::tensor::Tensor;

/// The full no-GPU path: report, selection, and skipped transfer must all
/// succeed on a machine with no accelerated backend.
#[test]
fn diagnostic_completes_without_gpu() {
    let report = BackendReport {
        available: false,
        built: accel_probe::backend::compiled_backend().is_some(),
        adapter: None,
    };

    let device = Device::select(report.available);
    assert_eq!(device, Device::Cpu);

    let tensor = Tensor::random(5, 3);
    let outcome = verify_transfer(&report, &tensor).expect("cpu path must not fail");
    assert_eq!(outcome, VerifyOutcome::Skipped);

    // The compute check must also complete on the fallback device.
    let fit_report =
        fit(&tensor, device, &NormalizedLossParams::default()).expect("cpu fit must not fail");
    assert_eq!(fit_report.device, Device::Cpu);
    assert!(fit_report.final_loss <= fit_report.initial_loss);
}

#[test]
fn device_selection_tracks_availability() {
    assert_eq!(Device::select(true), Device::Gpu);
    assert_eq!(Device::select(false), Device::Cpu);
    assert!(Device::select(true).is_accelerated());
    assert!(!Device::select(false).is_accelerated());
}

#[test]
fn build_report_has_labeled_lines() {
    let report = BuildConfig::collect().to_string();
    assert!(report.contains("target:"));
    assert!(report.contains("simd:"));
    assert!(report.contains("gpu backend:"));
}

#[test]
fn probe_report_is_internally_consistent() {
    let report = BackendReport::probe();
    // Whatever the hardware, the adapter summary and the availability flag
    // must tell the same story.
    assert_eq!(report.available, report.adapter.is_some());
    if let Some(adapter) = &report.adapter {
        assert!(adapter.kind.is_accelerated());
        assert!(!adapter.name.is_empty());
    }
}

#[test]
#[ignore = "Requires real GPU - run with --ignored"]
fn diagnostic_completes_with_gpu() {
    let report = BackendReport::probe();
    assert!(report.available, "no GPU adapter on this machine");
    assert!(report.built);

    let device = Device::select(report.available);
    assert_eq!(device, Device::Gpu);

    let tensor = Tensor::random(5, 3);
    match verify_transfer(&report, &tensor).expect("transfer failed") {
        VerifyOutcome::Transferred { bytes } => assert_eq!(bytes, tensor.size_bytes()),
        VerifyOutcome::Skipped => panic!("transfer skipped despite available backend"),
    }

    let fit_report =
        fit(&tensor, device, &NormalizedLossParams::default()).expect("gpu fit failed");
    assert_eq!(fit_report.device, Device::Gpu);
    assert!(fit_report.final_loss <= fit_report.initial_loss);
}
