//! # accel-probe
//!
//! One-shot diagnostic for hardware-accelerated compute backends.
//!
//! The probe answers five questions, in order, then exits:
//!
//! 1. What was baked into this binary? ([`buildinfo::BuildConfig`])
//! 2. Is an accelerated backend reachable at runtime? ([`backend::BackendReport`])
//! 3. Was one compiled in for this platform? (same report)
//! 4. Which device should compute run on? ([`device::Device`])
//! 5. Does a trivial tensor upload actually work? ([`probe::verify_transfer`])
//!
//! A final compute check ([`factorize::fit`]) runs a few gradient steps of a
//! rank-1 factorization under a normalized weighted loss, so the device is
//! exercised beyond a bare allocation.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use accel_probe::{backend::BackendReport, device::Device, probe, tensor::Tensor};
//!
//! let report = BackendReport::probe();
//! let device = Device::select(report.available);
//! println!("running on {device}");
//!
//! let tensor = Tensor::random(5, 3);
//! let outcome = probe::verify_transfer(&report, &tensor)?;
//! # Ok::<(), accel_probe::ProbeError>(())
//! ```

#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::module_name_repetitions)]

/// Accelerated backend capability probe.
pub mod backend;

/// Compile-time build configuration report.
pub mod buildinfo;

/// Compute device selection.
pub mod device;

/// Error types.
pub mod error;

/// Rank-1 factorization compute check.
pub mod factorize;

/// Verification step (tensor upload).
pub mod probe;

/// Host-side tensor allocation.
pub mod tensor;

pub use error::{ProbeError, Result};
