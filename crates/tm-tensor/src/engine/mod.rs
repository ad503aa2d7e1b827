pub mod naive;
pub mod optimized;

use std::fmt::Debug;

use crate::error::Result;
use crate::shape::Shape;
use crate::tensor::Tensor;

pub use naive::NaiveEngine;
pub use optimized::OptimizedEngine;

/// Trait for multiplication engines.
///
/// Both engines share the same contract: validate the contraction
/// compatibility relation, allocate a fresh result tensor with the derived
/// shape, and fully populate it. They differ only in computation strategy,
/// and their outputs must agree within the equivalence tolerance.
pub trait MulEngine: Send + Sync + Debug {
    /// Returns the name of this engine (e.g., "naive", "optimized").
    fn name(&self) -> &str;

    /// Computes the tensor product `A @ B`, contracting A's last axis
    /// against B's first.
    ///
    /// # Errors
    /// Returns `IncompatibleShapes` if the operands fail the compatibility
    /// relation.
    fn multiply(&self, a: &Tensor, b: &Tensor) -> Result<Tensor>;
}

/// Multiply two tensors with the sequential reference engine.
pub fn multiply_naive(a: &Tensor, b: &Tensor) -> Result<Tensor> {
    NaiveEngine::new().multiply(a, b)
}

/// Multiply two tensors with the threaded, lane-vectorized engine.
pub fn multiply_optimized(a: &Tensor, b: &Tensor) -> Result<Tensor> {
    OptimizedEngine::new().multiply(a, b)
}

/// The flattened 2-D view of a contraction: any compatible pair reduces to
/// a row-major [m, k] @ [k, n] product whose buffer is reinterpreted under
/// the derived N-D result shape.
pub(crate) struct ContractionDims {
    pub out_shape: Shape,
    /// Rows: product of A's free (leading) axes.
    pub m: usize,
    /// Contraction length: A's last extent == B's first extent.
    pub k: usize,
    /// Columns: product of B's free (trailing) axes.
    pub n: usize,
}

pub(crate) fn contraction_dims(a: &Tensor, b: &Tensor) -> Result<ContractionDims> {
    let out_shape = Shape::contract(a.shape(), b.shape())?;
    let a_dims = a.dims();
    let k = a_dims[a_dims.len() - 1];
    let m: usize = a_dims[..a_dims.len() - 1].iter().product();
    let n: usize = b.dims()[1..].iter().product();
    Ok(ContractionDims { out_shape, m, k, n })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::compare_equal;
    use crate::error::TensorError;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn random_tensor(dims: &[usize], seed: u64) -> Tensor {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut t = Tensor::zeros(dims).unwrap();
        for idx in t.indices() {
            t.set(&idx, rng.gen_range(0..100) as f64).unwrap();
        }
        t
    }

    #[test]
    fn test_shape_derivation_law() {
        let a = random_tensor(&[2, 3, 4], 1);
        let b = random_tensor(&[4, 5, 6], 2);
        let c = multiply_naive(&a, &b).unwrap();
        assert_eq!(c.dims(), &[2, 3, 5, 6]);
    }

    #[test]
    fn test_engine_parity_2d() {
        for (size, seed) in [(1usize, 10u64), (4, 11), (8, 12)] {
            let a = random_tensor(&[size, size], seed);
            let b = random_tensor(&[size, size], seed + 100);
            let naive = multiply_naive(&a, &b).unwrap();
            let optimized = multiply_optimized(&a, &b).unwrap();
            assert!(
                compare_equal(&naive, &optimized, 1e-6),
                "engines diverged at size {}",
                size
            );
        }
    }

    #[test]
    fn test_engine_parity_4d() {
        let a = random_tensor(&[8, 8, 8, 8], 3);
        let b = random_tensor(&[8, 8, 8, 8], 4);
        let naive = multiply_naive(&a, &b).unwrap();
        let optimized = multiply_optimized(&a, &b).unwrap();
        assert_eq!(naive.dims(), &[8, 8, 8, 8, 8, 8]);
        assert!(compare_equal(&naive, &optimized, 1e-6));
    }

    #[test]
    fn test_engine_parity_odd_contraction() {
        // Contraction lengths that are not multiples of the lane width
        // exercise the zero-padded tail.
        for k in [1usize, 3, 5, 7, 9] {
            let a = random_tensor(&[3, k], 20 + k as u64);
            let b = random_tensor(&[k, 2], 40 + k as u64);
            let naive = multiply_naive(&a, &b).unwrap();
            let optimized = multiply_optimized(&a, &b).unwrap();
            assert!(compare_equal(&naive, &optimized, 1e-6), "k={}", k);
        }
    }

    #[test]
    fn test_incompatibility_rejection() {
        let a = Tensor::zeros(&[2, 3]).unwrap();
        let b = Tensor::zeros(&[4, 5]).unwrap();
        assert!(matches!(
            multiply_naive(&a, &b),
            Err(TensorError::IncompatibleShapes { .. })
        ));
        assert!(matches!(
            multiply_optimized(&a, &b),
            Err(TensorError::IncompatibleShapes { .. })
        ));
    }

    #[test]
    fn test_identity_law() {
        let a = random_tensor(&[6, 6], 7);
        let mut identity = Tensor::zeros(&[6, 6]).unwrap();
        for i in 0..6 {
            identity.set(&[i, i], 1.0).unwrap();
        }
        for result in [
            multiply_naive(&a, &identity).unwrap(),
            multiply_optimized(&a, &identity).unwrap(),
        ] {
            assert!(compare_equal(&a, &result, 1e-6));
        }
    }

    #[test]
    fn test_zero_law() {
        let a = random_tensor(&[4, 5], 8);
        let zero = Tensor::zeros(&[5, 3]).unwrap();
        for result in [
            multiply_naive(&a, &zero).unwrap(),
            multiply_optimized(&a, &zero).unwrap(),
        ] {
            assert!(result.data().iter().all(|&v| v == 0.0));
        }
    }
}
