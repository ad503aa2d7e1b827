use crate::engine::{contraction_dims, MulEngine};
use crate::error::Result;
use crate::index::IndexIter;
use crate::tensor::Tensor;

/// Sequential scalar reference engine.
///
/// Walks every output index tuple in odometer order and accumulates the
/// contraction sum in double precision. Optimized for correctness rather
/// than speed; its output defines ground truth for the optimized engine.
#[derive(Debug, Clone)]
pub struct NaiveEngine;

impl NaiveEngine {
    pub fn new() -> Self {
        NaiveEngine
    }
}

impl Default for NaiveEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MulEngine for NaiveEngine {
    fn name(&self) -> &str {
        "naive"
    }

    fn multiply(&self, a: &Tensor, b: &Tensor) -> Result<Tensor> {
        let dims = contraction_dims(a, b)?;
        let a_free = a.shape().ndim() - 1;
        let a_strides = a.shape().strides();
        let b_strides = b.shape().strides();
        let a_data = a.data();
        let b_data = b.data();
        let b_k_stride = b_strides[0];

        let mut c = vec![0.0f64; dims.out_shape.numel()];
        for (pos, out) in IndexIter::new(&dims.out_shape).enumerate() {
            // The output tuple splits into A's free axes followed by B's
            // free axes; each half resolves to a base offset in its operand.
            let a_base: usize = out[..a_free]
                .iter()
                .zip(a_strides.iter())
                .map(|(&i, &s)| i * s)
                .sum();
            let b_base: usize = out[a_free..]
                .iter()
                .zip(b_strides[1..].iter())
                .map(|(&i, &s)| i * s)
                .sum();

            let mut sum = 0.0f64;
            for kk in 0..dims.k {
                sum += a_data[a_base + kk] * b_data[b_base + kk * b_k_stride];
            }
            c[pos] = sum;
        }
        Tensor::from_data(c, dims.out_shape.dims())
    }
}
