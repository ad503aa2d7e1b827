use crate::index::IndexIter;
use crate::tensor::Tensor;

/// First point of divergence found by [`compare`].
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    /// Index tuple of the diverging element, in odometer order.
    pub index: Vec<usize>,
    pub left: f64,
    pub right: f64,
}

/// Verdict of an element-wise tolerance comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub equal: bool,
    /// Populated on the first out-of-tolerance element; `None` when the
    /// tensors are equal or their shapes disagree outright.
    pub first_mismatch: Option<Mismatch>,
}

/// Compares two tensors element-wise within `epsilon`.
///
/// Iterates in odometer order and stops at the first element where
/// `|left - right| > epsilon`, recording its index and both values for
/// diagnostics. Tensors of different shapes are reported as unequal with no
/// mismatch index. Exists to validate engine parity; not performance
/// critical.
pub fn compare(left: &Tensor, right: &Tensor, epsilon: f64) -> Comparison {
    if left.dims() != right.dims() {
        return Comparison {
            equal: false,
            first_mismatch: None,
        };
    }
    let l = left.data();
    let r = right.data();
    for (pos, index) in IndexIter::new(left.shape()).enumerate() {
        if (l[pos] - r[pos]).abs() > epsilon {
            return Comparison {
                equal: false,
                first_mismatch: Some(Mismatch {
                    index,
                    left: l[pos],
                    right: r[pos],
                }),
            };
        }
    }
    Comparison {
        equal: true,
        first_mismatch: None,
    }
}

/// Boolean convenience wrapper over [`compare`].
pub fn compare_equal(left: &Tensor, right: &Tensor, epsilon: f64) -> bool {
    compare(left, right, epsilon).equal
}
