//! Rank-1 factorization compute check.
//!
//! Goes one step past the bare transfer: fits a rank-1 factorization of the
//! probe tensor under a normalized weighted squared-error loss and reports
//! how far the loss dropped. Cell weights start at 1 and are rescaled by
//! per-row and per-column weight totals raised to a configurable exponent,
//! so no row or column dominates the objective.
//!
//! On the accelerated device the fitted reconstruction is round-tripped
//! through a device buffer; on the CPU fallback the whole check is pure host
//! math and cannot fail.

use crate::device::Device;
use crate::error::Result;
use crate::probe::GpuContext;
use crate::tensor::Tensor;

/// Weight-normalization exponents for [`NormalizedLoss`].
///
/// An exponent of `0.0` disables that normalization pass. Negative exponents
/// downweight rows/columns that already carry a lot of weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedLossParams {
    /// Exponent applied to each row's weight total.
    pub row_norm_exp: f32,
    /// Exponent applied to each column's weight total.
    pub col_norm_exp: f32,
}

impl Default for NormalizedLossParams {
    fn default() -> Self {
        Self {
            row_norm_exp: -0.5,
            col_norm_exp: -0.5,
        }
    }
}

/// Weighted squared-error loss over a fixed target tensor.
#[derive(Debug, Clone)]
pub struct NormalizedLoss {
    weights: Vec<f32>,
    targets: Vec<f32>,
    rows: usize,
    cols: usize,
}

impl NormalizedLoss {
    /// Builds the loss for a target tensor, normalizing cell weights per
    /// `params`. Row normalization runs before column normalization.
    #[must_use]
    pub fn new(target: &Tensor, params: &NormalizedLossParams) -> Self {
        let (rows, cols) = target.shape();
        let mut weights = vec![1.0f32; rows * cols];

        if params.row_norm_exp != 0.0 {
            for i in 0..rows {
                let total: f32 = weights[i * cols..(i + 1) * cols].iter().sum();
                let multiplier = total.powf(params.row_norm_exp);
                for w in &mut weights[i * cols..(i + 1) * cols] {
                    *w *= multiplier;
                }
            }
        }
        if params.col_norm_exp != 0.0 {
            for j in 0..cols {
                let total: f32 = (0..rows).map(|i| weights[i * cols + j]).sum();
                let multiplier = total.powf(params.col_norm_exp);
                for i in 0..rows {
                    weights[i * cols + j] *= multiplier;
                }
            }
        }

        Self {
            weights,
            targets: target.as_slice().to_vec(),
            rows,
            cols,
        }
    }

    /// Cell weights, row-major.
    #[must_use]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Mean weighted squared error of a prediction against the targets.
    ///
    /// Empty tensors evaluate to zero.
    #[must_use]
    pub fn evaluate(&self, pred: &[f32]) -> f32 {
        if self.targets.is_empty() {
            return 0.0;
        }
        let sum: f32 = self
            .weights
            .iter()
            .zip(pred.iter().zip(self.targets.iter()))
            .map(|(w, (p, t))| w * (p - t) * (p - t))
            .sum();
        sum / self.targets.len() as f32
    }
}

/// Result of the factorization check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitReport {
    /// Device the check ran against.
    pub device: Device,
    /// Loss before the first gradient step.
    pub initial_loss: f32,
    /// Loss after the last gradient step.
    pub final_loss: f32,
    /// Gradient steps taken.
    pub steps: usize,
}

// Gradients carry the 1/n of the mean loss, so the step size compensates.
const FIT_STEPS: usize = 300;
const FIT_LR: f32 = 1.0;
// Deterministic factor init; the original seeds its RNG for the same reason.
const FIT_INIT: f32 = 0.1;

/// Fits a rank-1 factorization of `tensor` by gradient descent on the
/// normalized loss.
///
/// With `Device::Cpu` this never touches the GPU. With `Device::Gpu` the
/// fitted reconstruction is uploaded to a device buffer, and acquisition or
/// transfer errors propagate.
pub fn fit(tensor: &Tensor, device: Device, params: &NormalizedLossParams) -> Result<FitReport> {
    let (rows, cols) = tensor.shape();
    let loss = NormalizedLoss::new(tensor, params);
    let targets = tensor.as_slice();

    let mut u = vec![FIT_INIT; rows];
    let mut v = vec![FIT_INIT; cols];
    let predict = |u: &[f32], v: &[f32]| -> Vec<f32> {
        let mut pred = Vec::with_capacity(rows * cols);
        for ui in u {
            for vj in v {
                pred.push(ui * vj);
            }
        }
        pred
    };

    let initial_loss = loss.evaluate(&predict(&u, &v));
    let n = (rows * cols).max(1) as f32;

    for _ in 0..FIT_STEPS {
        let mut du = vec![0.0f32; rows];
        let mut dv = vec![0.0f32; cols];
        for i in 0..rows {
            for j in 0..cols {
                let idx = i * cols + j;
                let err = u[i] * v[j] - targets[idx];
                let grad = 2.0 * loss.weights()[idx] * err / n;
                du[i] += grad * v[j];
                dv[j] += grad * u[i];
            }
        }
        for (ui, dui) in u.iter_mut().zip(&du) {
            *ui -= FIT_LR * dui;
        }
        for (vj, dvj) in v.iter_mut().zip(&dv) {
            *vj -= FIT_LR * dvj;
        }
    }

    let reconstruction = predict(&u, &v);
    let final_loss = loss.evaluate(&reconstruction);

    if device.is_accelerated() {
        let ctx = GpuContext::acquire()?;
        let bytes = ctx.upload(&Tensor::from_vec(rows, cols, reconstruction));
        log::debug!(
            "uploaded {bytes}-byte reconstruction to {}",
            ctx.adapter_name
        );
    }

    Ok(FitReport {
        device,
        initial_loss,
        final_loss,
        steps: FIT_STEPS,
    })
}
