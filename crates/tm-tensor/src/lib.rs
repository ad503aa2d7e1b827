//! `tm-tensor` - Dense tensor storage and multiplication engines for tensormul.
//!
//! This crate provides:
//! - A `Tensor` type backed by a flat row-major `f64` buffer
//! - A `MulEngine` trait with two contract-identical implementations:
//!   a sequential scalar reference engine and a threaded, lane-vectorized one
//! - Shape utilities and the contraction compatibility relation
//! - An equivalence checker for verifying engine parity within a tolerance

pub mod compare;
pub mod engine;
pub mod error;
pub mod index;
pub mod lanes;
pub mod shape;
pub mod tensor;

// Re-export primary types at the crate root for convenience.
pub use compare::{compare, compare_equal, Comparison, Mismatch};
pub use engine::{multiply_naive, multiply_optimized, MulEngine, NaiveEngine, OptimizedEngine};
pub use error::{Result, TensorError};
pub use index::IndexIter;
pub use shape::Shape;
pub use tensor::Tensor;
