//! Compute device selection.

use std::fmt;

/// The device the diagnostic will run its verification on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    /// Hardware-accelerated GPU path.
    Gpu,
    /// Generic CPU fallback.
    Cpu,
}

impl Device {
    /// Selects the device from backend availability.
    ///
    /// Total and deterministic: `Gpu` iff the accelerated backend is
    /// available, `Cpu` otherwise.
    #[must_use]
    pub fn select(backend_available: bool) -> Self {
        if backend_available {
            Self::Gpu
        } else {
            Self::Cpu
        }
    }

    /// True when the selected device is the accelerated one.
    #[must_use]
    pub fn is_accelerated(self) -> bool {
        matches!(self, Self::Gpu)
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Gpu => "gpu",
            Self::Cpu => "cpu",
        })
    }
}
