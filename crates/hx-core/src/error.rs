/// Broad failure classes callers usually branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller handed in something unusable (bad buffer, dims, config or view).
    InvalidInput,
    /// The input is valid but scales down to an empty target.
    DegenerateOutput,
    /// A cancellation flag was observed between rows.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    #[error("dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    #[error("out of bounds")]
    OutOfBounds,
    #[error("invalid stride")]
    InvalidStride,
    #[error("degenerate output: {src_width}x{src_height} scales to {width}x{height}")]
    DegenerateOutput {
        src_width: usize,
        src_height: usize,
        width: usize,
        height: usize,
    },
    #[error("conversion cancelled")]
    Cancelled,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::SizeMismatch { .. }
            | Self::InvalidDimensions { .. }
            | Self::DimensionMismatch { .. }
            | Self::InvalidConfig(_)
            | Self::OutOfBounds
            | Self::InvalidStride => ErrorKind::InvalidInput,
            Self::DegenerateOutput { .. } => ErrorKind::DegenerateOutput,
            Self::Cancelled => ErrorKind::Cancelled,
        }
    }
}
