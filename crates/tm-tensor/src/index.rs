use crate::shape::Shape;

/// Odometer enumeration over all valid index tuples of a shape.
///
/// The last axis increments fastest; when an axis reaches its extent it
/// resets to zero and carries into the next-higher axis. The sequence is
/// finite, visits every valid tuple exactly once, and matches the linear
/// order of a row-major buffer, so the `n`-th tuple yielded addresses
/// offset `n`.
#[derive(Debug, Clone)]
pub struct IndexIter {
    dims: Vec<usize>,
    next: Option<Vec<usize>>,
}

impl IndexIter {
    /// Create an iterator over every index tuple of `shape`.
    pub fn new(shape: &Shape) -> Self {
        IndexIter {
            dims: shape.dims().to_vec(),
            next: Some(vec![0; shape.ndim()]),
        }
    }
}

impl Iterator for IndexIter {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        let current = self.next.take()?;
        let mut upcoming = current.clone();
        // Carry loop: bump the last axis, propagate overflow leftward.
        // Exhausted once the carry runs past the first axis.
        let mut axis = self.dims.len();
        loop {
            if axis == 0 {
                self.next = None;
                break;
            }
            axis -= 1;
            upcoming[axis] += 1;
            if upcoming[axis] < self.dims[axis] {
                self.next = Some(upcoming);
                break;
            }
            upcoming[axis] = 0;
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.next {
            None => (0, Some(0)),
            Some(_) => {
                let total: usize = self.dims.iter().product();
                (total, Some(total))
            }
        }
    }
}
