//! accel-probe - one-shot GPU backend diagnostic.
//!
//! No arguments, no flags. Prints the build configuration, the backend
//! capability report, the selected device, the result of one trivial tensor
//! upload, and a small factorization compute check. Any probe error exits
//! non-zero.

use accel_probe::backend::BackendReport;
use accel_probe::buildinfo::BuildConfig;
use accel_probe::device::Device;
use accel_probe::factorize::{self, NormalizedLossParams};
use accel_probe::probe::{self, VerifyOutcome};
use accel_probe::tensor::Tensor;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("{}", BuildConfig::collect());
    println!();

    let report = BackendReport::probe();
    println!("Accelerated backend available: {}", report.available);
    println!("Accelerated backend built: {}", report.built);
    if let Some(adapter) = &report.adapter {
        println!("Adapter: {} ({})", adapter.name, adapter.backend);
    }

    let device = Device::select(report.available);
    println!("Current device: {device}");

    let tensor = Tensor::random(5, 3);
    if let VerifyOutcome::Transferred { bytes } = probe::verify_transfer(&report, &tensor)? {
        let (rows, cols) = tensor.shape();
        println!("Successfully moved {rows}x{cols} tensor to {device} ({bytes} bytes)");
    }

    let fit = factorize::fit(&tensor, device, &NormalizedLossParams::default())?;
    println!(
        "Factorization loss: {:.4} -> {:.4} over {} steps on {device}",
        fit.initial_loss, fit.final_loss, fit.steps
    );

    Ok(())
}
