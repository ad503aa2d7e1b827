use crate::error::{Result, TensorError};
use std::fmt;

/// A tensor shape, wrapping a vector of dimension sizes.
///
/// Shapes are validated on construction: a shape always has at least one
/// axis and every extent is positive, so `numel()` is never zero.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    /// Create a new shape from a vector of dimensions.
    ///
    /// # Errors
    /// Returns `InvalidShape` if `dims` is empty or any extent is zero.
    pub fn new(dims: Vec<usize>) -> Result<Self> {
        if dims.is_empty() || dims.iter().any(|&d| d == 0) {
            return Err(TensorError::InvalidShape { dims });
        }
        Ok(Shape { dims })
    }

    /// Create a shape from a slice of dimensions.
    pub fn from_slice(dims: &[usize]) -> Result<Self> {
        Shape::new(dims.to_vec())
    }

    /// Number of dimensions (rank).
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Total number of elements (product of all dimension sizes).
    pub fn numel(&self) -> usize {
        self.dims.iter().product()
    }

    /// Returns the size of dimension `i`.
    ///
    /// # Panics
    /// Panics if `i >= ndim()`.
    pub fn dim(&self, i: usize) -> usize {
        self.dims[i]
    }

    /// Returns a reference to the underlying dimension sizes.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Computes row-major contiguous strides for this shape.
    ///
    /// For a shape [d0, d1, d2], the strides are [d1*d2, d2, 1].
    pub fn strides(&self) -> Vec<usize> {
        let mut strides = vec![0usize; self.dims.len()];
        strides[self.dims.len() - 1] = 1;
        for i in (0..self.dims.len() - 1).rev() {
            strides[i] = strides[i + 1] * self.dims[i + 1];
        }
        strides
    }

    /// Maps an index tuple to its linear offset in a row-major buffer.
    ///
    /// # Errors
    /// Returns `IndexOutOfRange` if the tuple has the wrong arity or any
    /// component is outside its axis extent.
    pub fn linear_offset(&self, indices: &[usize]) -> Result<usize> {
        if indices.len() != self.dims.len()
            || indices.iter().zip(self.dims.iter()).any(|(&i, &d)| i >= d)
        {
            return Err(TensorError::IndexOutOfRange {
                indices: indices.to_vec(),
                dims: self.dims.clone(),
            });
        }
        let mut offset = 0;
        let mut stride = 1;
        for (&i, &d) in indices.iter().zip(self.dims.iter()).rev() {
            offset += i * stride;
            stride *= d;
        }
        Ok(offset)
    }

    /// Derives the result shape of the contraction `A @ B`.
    ///
    /// Two shapes are compatible iff they have the same rank and A's last
    /// extent equals B's first extent (the contraction dimension K). The
    /// result shape is A's leading axes followed by B's trailing axes; for
    /// the 2-D case this is the conventional [m, k] @ [k, n] -> [m, n].
    ///
    /// # Errors
    /// Returns `IncompatibleShapes` if the relation does not hold.
    pub fn contract(a: &Shape, b: &Shape) -> Result<Shape> {
        if a.ndim() != b.ndim() || a.dims[a.ndim() - 1] != b.dims[0] {
            return Err(TensorError::IncompatibleShapes {
                a: a.dims.clone(),
                b: b.dims.clone(),
            });
        }
        let mut dims = Vec::with_capacity(2 * (a.ndim() - 1));
        dims.extend_from_slice(&a.dims[..a.ndim() - 1]);
        dims.extend_from_slice(&b.dims[1..]);
        // Rank 1 operands contract to a scalar; the smallest shape this
        // system represents is a single-element axis.
        if dims.is_empty() {
            dims.push(1);
        }
        Shape::new(dims)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, d) in self.dims.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", d)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_shape() {
        let s = Shape::new(vec![2, 3, 4]).unwrap();
        assert_eq!(s.ndim(), 3);
        assert_eq!(s.numel(), 24);
        assert_eq!(s.dim(0), 2);
        assert_eq!(s.dim(1), 3);
        assert_eq!(s.dim(2), 4);
    }

    #[test]
    fn test_invalid_shapes() {
        assert!(matches!(
            Shape::new(vec![]),
            Err(TensorError::InvalidShape { .. })
        ));
        assert!(matches!(
            Shape::new(vec![2, 0, 3]),
            Err(TensorError::InvalidShape { .. })
        ));
    }

    #[test]
    fn test_strides() {
        let s = Shape::new(vec![2, 3, 4]).unwrap();
        assert_eq!(s.strides(), vec![12, 4, 1]);
    }

    #[test]
    fn test_linear_offset() {
        let s = Shape::new(vec![2, 3, 4]).unwrap();
        assert_eq!(s.linear_offset(&[0, 0, 0]).unwrap(), 0);
        assert_eq!(s.linear_offset(&[0, 0, 3]).unwrap(), 3);
        assert_eq!(s.linear_offset(&[1, 2, 3]).unwrap(), 23);
    }

    #[test]
    fn test_linear_offset_rejects() {
        let s = Shape::new(vec![3, 3]).unwrap();
        // Out-of-bounds component.
        assert!(matches!(
            s.linear_offset(&[3, 0]),
            Err(TensorError::IndexOutOfRange { .. })
        ));
        // Wrong arity.
        assert!(matches!(
            s.linear_offset(&[0]),
            Err(TensorError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_contract_2d() {
        let a = Shape::new(vec![2, 3]).unwrap();
        let b = Shape::new(vec![3, 5]).unwrap();
        let c = Shape::contract(&a, &b).unwrap();
        assert_eq!(c.dims(), &[2, 5]);
    }

    #[test]
    fn test_contract_4d() {
        let a = Shape::new(vec![8, 8, 8, 8]).unwrap();
        let b = Shape::new(vec![8, 8, 8, 8]).unwrap();
        let c = Shape::contract(&a, &b).unwrap();
        assert_eq!(c.dims(), &[8, 8, 8, 8, 8, 8]);
    }

    #[test]
    fn test_contract_incompatible() {
        let a = Shape::new(vec![2, 3]).unwrap();
        let b = Shape::new(vec![4, 5]).unwrap();
        assert!(matches!(
            Shape::contract(&a, &b),
            Err(TensorError::IncompatibleShapes { .. })
        ));
        // Rank mismatch fails the relation too.
        let b3 = Shape::new(vec![3, 4, 5]).unwrap();
        assert!(Shape::contract(&a, &b3).is_err());
    }

    #[test]
    fn test_contract_1d() {
        let a = Shape::new(vec![4]).unwrap();
        let b = Shape::new(vec![4]).unwrap();
        let c = Shape::contract(&a, &b).unwrap();
        assert_eq!(c.dims(), &[1]);
    }
}
