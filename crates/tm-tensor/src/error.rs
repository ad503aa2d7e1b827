use thiserror::Error;

#[derive(Error, Debug)]
pub enum TensorError {
    #[error("invalid shape {dims:?}: dimensions must be non-empty and positive")]
    InvalidShape { dims: Vec<usize> },
    #[error("index {indices:?} out of range for tensor with dims {dims:?}")]
    IndexOutOfRange {
        indices: Vec<usize>,
        dims: Vec<usize>,
    },
    #[error("incompatible shapes for multiplication: {a:?} @ {b:?}")]
    IncompatibleShapes { a: Vec<usize>, b: Vec<usize> },
}

pub type Result<T> = std::result::Result<T, TensorError>;
