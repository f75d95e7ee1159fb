//! Small host-side tensor used by the verification step.

use rand::Rng;

/// A row-major `f32` matrix owned by the host.
///
/// The diagnostic only ever allocates one of these (5x3) and uploads it once,
/// so there is no view machinery and no device-side lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Tensor {
    /// Allocates a `rows x cols` tensor with uniform random values in [0, 1).
    #[must_use]
    pub fn random(rows: usize, cols: usize) -> Self {
        let mut rng = rand::thread_rng();
        let data = (0..rows * cols).map(|_| rng.gen::<f32>()).collect();
        Self { rows, cols, data }
    }

    /// Wraps existing row-major data in a `rows x cols` tensor.
    ///
    /// # Panics
    ///
    /// Panics if `data.len() != rows * cols`.
    #[must_use]
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Self {
        assert_eq!(data.len(), rows * cols, "data length must match shape");
        Self { rows, cols, data }
    }

    /// Shape as `(rows, cols)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Number of elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when the tensor holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Size of the element data in bytes.
    #[must_use]
    pub fn size_bytes(&self) -> u64 {
        (self.len() * std::mem::size_of::<f32>()) as u64
    }

    /// Element data, row-major.
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_random_shape() {
        let t = Tensor::random(5, 3);
        assert_eq!(t.shape(), (5, 3));
        assert_eq!(t.len(), 15);
        assert_eq!(t.size_bytes(), 60);
        assert!(!t.is_empty());
    }

    #[test]
    fn test_from_vec_roundtrip() {
        let t = Tensor::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]);
        assert_eq!(t.shape(), (2, 2));
        assert_eq!(t.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    #[should_panic(expected = "data length must match shape")]
    fn test_from_vec_shape_mismatch() {
        let _ = Tensor::from_vec(2, 2, vec![1.0]);
    }

    #[test]
    fn test_zero_sized() {
        let t = Tensor::random(0, 3);
        assert!(t.is_empty());
        assert_eq!(t.size_bytes(), 0);
    }

    proptest! {
        #[test]
        fn prop_values_in_unit_interval(rows in 0usize..8, cols in 0usize..8) {
            let t = Tensor::random(rows, cols);
            prop_assert_eq!(t.len(), rows * cols);
            for &v in t.as_slice() {
                prop_assert!((0.0..1.0).contains(&v));
            }
        }
    }
}
