use crate::error::{Result, TensorError};
use crate::index::IndexIter;
use crate::shape::Shape;

/// A dense N-dimensional tensor of `f64` values.
///
/// Holds a contiguous, row-major buffer which the tensor owns exclusively;
/// every multiplication allocates a fresh result tensor, so tensors are
/// never aliased between engines.
#[derive(Debug, Clone)]
pub struct Tensor {
    data: Vec<f64>,
    shape: Shape,
}

impl Tensor {
    /// Create a zero-filled tensor with the given dimensions.
    ///
    /// # Errors
    /// Returns `InvalidShape` if `dims` is empty or any extent is zero.
    pub fn zeros(dims: &[usize]) -> Result<Self> {
        let shape = Shape::from_slice(dims)?;
        let n = shape.numel();
        Ok(Tensor {
            data: vec![0.0; n],
            shape,
        })
    }

    /// Create a tensor from an existing buffer and dimensions.
    ///
    /// # Errors
    /// Returns `InvalidShape` if the dimensions are invalid or the buffer
    /// length does not equal their product.
    pub fn from_data(data: Vec<f64>, dims: &[usize]) -> Result<Self> {
        let shape = Shape::from_slice(dims)?;
        if data.len() != shape.numel() {
            return Err(TensorError::InvalidShape {
                dims: dims.to_vec(),
            });
        }
        Ok(Tensor { data, shape })
    }

    /// Returns the tensor's shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Returns the dimension sizes.
    pub fn dims(&self) -> &[usize] {
        self.shape.dims()
    }

    /// Returns the underlying row-major data as a slice.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Reads the element at the given index tuple.
    ///
    /// # Errors
    /// Returns `IndexOutOfRange` on wrong arity or an out-of-bounds
    /// component.
    pub fn get(&self, indices: &[usize]) -> Result<f64> {
        let offset = self.shape.linear_offset(indices)?;
        Ok(self.data[offset])
    }

    /// Writes the element at the given index tuple.
    ///
    /// # Errors
    /// Same bounds contract as [`Tensor::get`].
    pub fn set(&mut self, indices: &[usize], value: f64) -> Result<()> {
        let offset = self.shape.linear_offset(indices)?;
        self.data[offset] = value;
        Ok(())
    }

    /// Iterates every index tuple of this tensor in odometer order
    /// (last axis fastest).
    pub fn indices(&self) -> IndexIter {
        IndexIter::new(&self.shape)
    }
}
