//! Accelerated backend capability probe.
//!
//! Answers two independent questions about the platform GPU path:
//!
//! - **built**: was this binary compiled with an accelerated backend for the
//!   current platform (Metal on macOS, DX12 on Windows, Vulkan elsewhere)?
//! - **available**: does adapter enumeration find a usable non-CPU adapter at
//!   runtime?
//!
//! The two can disagree: a Linux binary is built with Vulkan support but
//! reports `available == false` when no driver is loaded.

use std::fmt;

use wgpu::{Backends, DeviceType, Instance, InstanceDescriptor};

/// A hardware-accelerated compute path reachable through wgpu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceleratedBackend {
    /// Metal (macOS, iOS)
    Metal,
    /// Vulkan (Linux, Windows, Android)
    Vulkan,
    /// DirectX 12 (Windows)
    Dx12,
    /// OpenGL (fallback)
    Gl,
    /// WebGPU (browsers)
    BrowserWebGpu,
}

impl From<wgpu::Backend> for AcceleratedBackend {
    fn from(backend: wgpu::Backend) -> Self {
        match backend {
            wgpu::Backend::Metal => Self::Metal,
            wgpu::Backend::Dx12 => Self::Dx12,
            wgpu::Backend::Gl => Self::Gl,
            wgpu::Backend::BrowserWebGpu => Self::BrowserWebGpu,
            _ => Self::Vulkan,
        }
    }
}

impl fmt::Display for AcceleratedBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Metal => "metal",
            Self::Vulkan => "vulkan",
            Self::Dx12 => "dx12",
            Self::Gl => "gl",
            Self::BrowserWebGpu => "webgpu",
        };
        f.write_str(name)
    }
}

/// Kind of adapter reported by the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterKind {
    /// Discrete GPU (dedicated graphics card)
    DiscreteGpu,
    /// Integrated GPU (on CPU die)
    IntegratedGpu,
    /// Virtual GPU
    VirtualGpu,
    /// CPU/software rasterizer
    Cpu,
    /// Unknown type
    Other,
}

impl From<DeviceType> for AdapterKind {
    fn from(dt: DeviceType) -> Self {
        match dt {
            DeviceType::DiscreteGpu => Self::DiscreteGpu,
            DeviceType::IntegratedGpu => Self::IntegratedGpu,
            DeviceType::VirtualGpu => Self::VirtualGpu,
            DeviceType::Cpu => Self::Cpu,
            DeviceType::Other => Self::Other,
        }
    }
}

impl AdapterKind {
    /// True for adapters that count as hardware acceleration.
    ///
    /// Software rasterizers (llvmpipe, WARP in CPU mode) enumerate as
    /// `DeviceType::Cpu` and must not flip `available` to true.
    #[must_use]
    pub fn is_accelerated(self) -> bool {
        !matches!(self, Self::Cpu)
    }
}

/// Identity of the adapter the verification step will use.
#[derive(Debug, Clone)]
pub struct AdapterSummary {
    /// Adapter name as reported by the driver.
    pub name: String,
    /// Backend the adapter is reached through.
    pub backend: AcceleratedBackend,
    /// Adapter kind (discrete, integrated, ...).
    pub kind: AdapterKind,
}

/// Result of the capability probe.
#[derive(Debug, Clone)]
pub struct BackendReport {
    /// A non-CPU adapter is reachable at runtime.
    pub available: bool,
    /// The binary was compiled with an accelerated backend for this platform.
    pub built: bool,
    /// The adapter that would be used, when one exists.
    pub adapter: Option<AdapterSummary>,
}

/// The accelerated backend compiled into this binary for the current
/// platform, or `None` on targets wgpu has no accelerated path for.
#[must_use]
pub const fn compiled_backend() -> Option<AcceleratedBackend> {
    if cfg!(any(target_os = "macos", target_os = "ios")) {
        Some(AcceleratedBackend::Metal)
    } else if cfg!(target_os = "windows") {
        Some(AcceleratedBackend::Dx12)
    } else if cfg!(any(target_os = "linux", target_os = "android", target_os = "freebsd")) {
        Some(AcceleratedBackend::Vulkan)
    } else if cfg!(target_arch = "wasm32") {
        Some(AcceleratedBackend::BrowserWebGpu)
    } else {
        None
    }
}

impl BackendReport {
    /// Probes the runtime for an accelerated adapter.
    ///
    /// Never fails: a missing or broken driver surfaces as
    /// `available == false`, matching the one-shot diagnostic contract.
    #[must_use]
    pub fn probe() -> Self {
        let built = compiled_backend().is_some();

        let instance = Instance::new(&InstanceDescriptor {
            backends: Backends::all(),
            ..Default::default()
        });

        let mut adapter = None;
        for candidate in instance.enumerate_adapters(Backends::all()) {
            let info = candidate.get_info();
            let kind = AdapterKind::from(info.device_type);
            log::debug!(
                "adapter: {} ({:?} via {:?})",
                info.name,
                info.device_type,
                info.backend
            );
            if kind.is_accelerated() && adapter.is_none() {
                adapter = Some(AdapterSummary {
                    name: info.name,
                    backend: info.backend.into(),
                    kind,
                });
            }
        }

        Self {
            available: adapter.is_some(),
            built,
            adapter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiled_backend_matches_target() {
        let backend = compiled_backend();
        #[cfg(target_os = "macos")]
        assert_eq!(backend, Some(AcceleratedBackend::Metal));
        #[cfg(target_os = "linux")]
        assert_eq!(backend, Some(AcceleratedBackend::Vulkan));
        #[cfg(target_os = "windows")]
        assert_eq!(backend, Some(AcceleratedBackend::Dx12));
        let _ = backend;
    }

    #[test]
    fn test_software_rasterizer_is_not_accelerated() {
        assert!(!AdapterKind::Cpu.is_accelerated());
        assert!(AdapterKind::DiscreteGpu.is_accelerated());
        assert!(AdapterKind::IntegratedGpu.is_accelerated());
    }

    #[test]
    fn test_backend_display() {
        assert_eq!(AcceleratedBackend::Metal.to_string(), "metal");
        assert_eq!(AcceleratedBackend::Vulkan.to_string(), "vulkan");
    }

    #[test]
    #[ignore = "Requires real GPU - run with --ignored"]
    fn test_probe_finds_adapter() {
        let report = BackendReport::probe();
        assert!(report.available);
        assert!(report.adapter.is_some());
    }

    #[test]
    fn test_probe_consistency() {
        // available and adapter presence must agree regardless of hardware
        let report = BackendReport::probe();
        assert_eq!(report.available, report.adapter.is_some());
    }
}
