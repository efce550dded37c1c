//! Error types for plane transforms.

/// Errors returned by the image-plane transforms.
///
/// Every operation validates its arguments before allocating or spawning
/// workers, so an error always means no work was done.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(
        "dimension mismatch: expected {}x{}, got {}x{}",
        .expected.0, .expected.1, .actual.0, .actual.1
    )]
    DimensionMismatch {
        /// Dimensions of the plane being decorated (width, height)
        expected: (usize, usize),
        /// Dimensions of the plane supplied alongside it (width, height)
        actual: (usize, usize),
    },
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
