//! Error types for accel-probe operations.

use thiserror::Error;

/// Result type alias using [`ProbeError`].
pub type Result<T> = std::result::Result<T, ProbeError>;

/// Errors that can occur while probing the accelerated backend.
///
/// The diagnostic performs no recovery: errors propagate to `main` and
/// terminate the process with a non-zero exit status.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Adapter enumeration found no usable GPU adapter.
    #[error("no suitable GPU adapter found")]
    AdapterUnavailable,

    /// The adapter refused to hand out a logical device.
    #[error("device request failed: {0}")]
    DeviceRequest(#[from] wgpu::RequestDeviceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adapter_unavailable_display() {
        let err = ProbeError::AdapterUnavailable;
        assert!(err.to_string().contains("no suitable GPU adapter"));
    }
}
