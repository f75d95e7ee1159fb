//! Compile-time build configuration report.
//!
//! The Rust analog of a numeric library's `show_config()`: everything here is
//! decided when the binary is compiled, so collection is infallible and pure.

use std::fmt;

use crate::backend::{compiled_backend, AcceleratedBackend};

/// SIMD instruction sets this build can use unconditionally.
///
/// Only features enabled at compile time appear; runtime-detected features are
/// out of scope for a build report.
#[must_use]
pub fn compiled_simd_features() -> Vec<&'static str> {
    let mut features = Vec::new();
    if cfg!(target_feature = "sse2") {
        features.push("sse2");
    }
    if cfg!(target_feature = "avx") {
        features.push("avx");
    }
    if cfg!(target_feature = "avx2") {
        features.push("avx2");
    }
    if cfg!(target_feature = "avx512f") {
        features.push("avx512f");
    }
    if cfg!(target_feature = "fma") {
        features.push("fma");
    }
    if cfg!(target_feature = "neon") {
        features.push("neon");
    }
    features
}

/// Snapshot of the facts baked into this binary.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Package name.
    pub package: &'static str,
    /// Package version.
    pub version: &'static str,
    /// Target architecture (e.g. "aarch64").
    pub target_arch: &'static str,
    /// Target operating system (e.g. "macos").
    pub target_os: &'static str,
    /// Pointer width in bits.
    pub pointer_width: u32,
    /// Byte order of the target.
    pub endianness: &'static str,
    /// SIMD features enabled at compile time.
    pub simd_features: Vec<&'static str>,
    /// Accelerated GPU backend compiled in for this platform.
    pub gpu_backend: Option<AcceleratedBackend>,
}

impl BuildConfig {
    /// Collects the build configuration. Infallible.
    #[must_use]
    pub fn collect() -> Self {
        Self {
            package: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            target_arch: std::env::consts::ARCH,
            target_os: std::env::consts::OS,
            pointer_width: if cfg!(target_pointer_width = "64") {
                64
            } else {
                32
            },
            endianness: if cfg!(target_endian = "big") {
                "big"
            } else {
                "little"
            },
            simd_features: compiled_simd_features(),
            gpu_backend: compiled_backend(),
        }
    }
}

impl fmt::Display for BuildConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.package, self.version)?;
        writeln!(f, "  target: {}-{}", self.target_arch, self.target_os)?;
        writeln!(
            f,
            "  pointer width: {} bits, {}-endian",
            self.pointer_width, self.endianness
        )?;
        if self.simd_features.is_empty() {
            writeln!(f, "  simd: none")?;
        } else {
            writeln!(f, "  simd: {}", self.simd_features.join(", "))?;
        }
        match self.gpu_backend {
            Some(backend) => write!(f, "  gpu backend: {backend}"),
            None => write!(f, "  gpu backend: none"),
        }
    }
}
