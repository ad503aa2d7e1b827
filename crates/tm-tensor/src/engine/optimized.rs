use std::ops::Range;
use std::thread;

use crate::engine::{contraction_dims, MulEngine};
use crate::error::Result;
use crate::lanes::{self, Lane, LANES};
use crate::tensor::Tensor;

/// Threaded, lane-vectorized engine.
///
/// Contract-identical twin of [`NaiveEngine`](crate::engine::NaiveEngine).
/// The flattened output row space is split into contiguous disjoint ranges,
/// one per worker thread; each worker owns an exclusive mutable slice of the
/// result buffer, so the partition itself is the only concurrency-safety
/// mechanism. Per output element the contraction sum is accumulated in
/// fixed-width `f32` lanes and horizontally reduced back to `f64` storage.
#[derive(Debug, Clone)]
pub struct OptimizedEngine {
    workers: usize,
}

impl OptimizedEngine {
    /// Create an engine sized to the available hardware parallelism.
    pub fn new() -> Self {
        let workers = thread::available_parallelism().map_or(1, |n| n.get());
        OptimizedEngine { workers }
    }

    /// Create an engine with an explicit worker count (minimum 1).
    pub fn with_workers(workers: usize) -> Self {
        OptimizedEngine {
            workers: workers.max(1),
        }
    }

    /// Number of worker threads this engine will spawn.
    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl Default for OptimizedEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits `0..total` into `parts` contiguous disjoint ranges, sized
/// `total / parts` with the remainder spread one row each over the leading
/// ranges. Trailing ranges are empty when `parts > total`.
fn partition_ranges(total: usize, parts: usize) -> Vec<Range<usize>> {
    let base = total / parts;
    let remainder = total % parts;
    let mut ranges = Vec::with_capacity(parts);
    let mut start = 0;
    for p in 0..parts {
        let len = base + usize::from(p < remainder);
        ranges.push(start..start + len);
        start += len;
    }
    ranges
}

/// Computes one row of the flattened [m, k] @ [k, n] product.
///
/// The contraction axis is walked `LANES` values at a time: operands are
/// narrowed to `f32`, gathered into lane groups (B's column is strided by
/// `n`), multiply-added into a vector accumulator with a zero-padded tail,
/// then horizontally reduced and widened back for storage.
fn compute_row(a_row: &[f64], b: &[f64], c_row: &mut [f64], k: usize, n: usize) {
    for j in 0..n {
        let mut acc: Lane = lanes::ZERO;
        let mut kk = 0;
        while kk < k {
            let mut va: Lane = lanes::ZERO;
            let mut vb: Lane = lanes::ZERO;
            for l in 0..LANES.min(k - kk) {
                va[l] = a_row[kk + l] as f32;
                vb[l] = b[(kk + l) * n + j] as f32;
            }
            acc = lanes::accumulate(acc, va, vb);
            kk += LANES;
        }
        c_row[j] = lanes::horizontal_sum(acc) as f64;
    }
}

impl MulEngine for OptimizedEngine {
    fn name(&self) -> &str {
        "optimized"
    }

    fn multiply(&self, a: &Tensor, b: &Tensor) -> Result<Tensor> {
        let dims = contraction_dims(a, b)?;
        let (m, k, n) = (dims.m, dims.k, dims.n);
        let a_data = a.data();
        let b_data = b.data();

        let mut c = vec![0.0f64; dims.out_shape.numel()];

        // Carve the output buffer into per-worker slices up front; disjoint
        // exclusive borrows make the unsynchronized writes sound.
        let ranges = partition_ranges(m, self.workers);
        let mut chunks: Vec<(Range<usize>, &mut [f64])> = Vec::with_capacity(ranges.len());
        let mut rest: &mut [f64] = &mut c;
        for range in ranges {
            let (chunk, tail) = rest.split_at_mut(range.len() * n);
            rest = tail;
            if !range.is_empty() {
                chunks.push((range, chunk));
            }
        }

        thread::scope(|scope| {
            for (range, chunk) in chunks {
                scope.spawn(move || {
                    for (row_in_chunk, row) in range.enumerate() {
                        let a_row = &a_data[row * k..(row + 1) * k];
                        let c_row = &mut chunk[row_in_chunk * n..(row_in_chunk + 1) * n];
                        compute_row(a_row, b_data, c_row, k, n);
                    }
                });
            }
        });

        Tensor::from_data(c, dims.out_shape.dims())
    }
}
