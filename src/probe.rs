//! Verification step: one tensor upload to the accelerated device.

use wgpu::util::DeviceExt;
use wgpu::{Backends, Instance, InstanceDescriptor, PowerPreference, RequestAdapterOptions};

use crate::backend::BackendReport;
use crate::error::{ProbeError, Result};
use crate::tensor::Tensor;

/// Outcome of the verification step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Backend unavailable; no transfer was attempted.
    Skipped,
    /// Tensor uploaded to the device.
    Transferred {
        /// Bytes moved to device memory.
        bytes: u64,
    },
}

/// A live connection to the accelerated device.
pub struct GpuContext {
    /// Name of the adapter backing the device.
    pub adapter_name: String,
    device: wgpu::Device,
    queue: wgpu::Queue,
}

impl GpuContext {
    /// Requests an adapter and logical device, blocking on wgpu's async API.
    pub fn acquire() -> Result<Self> {
        let instance = Instance::new(&InstanceDescriptor {
            backends: Backends::all(),
            ..Default::default()
        });

        let adapter = pollster::block_on(instance.request_adapter(&RequestAdapterOptions {
            power_preference: PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .ok_or(ProbeError::AdapterUnavailable)?;

        let info = adapter.get_info();
        log::debug!("acquiring device on {} ({:?})", info.name, info.backend);

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("accel-probe"),
                ..Default::default()
            },
            None,
        ))?;

        Ok(Self {
            adapter_name: info.name,
            device,
            queue,
        })
    }

    /// Uploads the tensor into a device buffer and waits for the device.
    ///
    /// Returns the number of bytes moved.
    pub fn upload(&self, tensor: &Tensor) -> u64 {
        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("accel-probe tensor"),
                contents: bytemuck::cast_slice(tensor.as_slice()),
                usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            });

        // Flush the queue so the allocation actually reaches the device
        // before we report success.
        self.queue.submit(std::iter::empty());
        let _ = self.device.poll(wgpu::Maintain::Wait);

        buffer.size()
    }
}

/// Runs the verification step against a capability report.
///
/// When the backend is unavailable this is a no-op: no instance is created
/// and no driver call is made, so the CPU-only path cannot fail.
pub fn verify_transfer(report: &BackendReport, tensor: &Tensor) -> Result<VerifyOutcome> {
    if !report.available {
        log::debug!("accelerated backend unavailable, skipping transfer");
        return Ok(VerifyOutcome::Skipped);
    }

    let ctx = GpuContext::acquire()?;
    let bytes = ctx.upload(tensor);
    log::debug!("uploaded {bytes} bytes to {}", ctx.adapter_name);
    Ok(VerifyOutcome::Transferred { bytes })
}
