use ndarray_stats::errors::MinMaxError;
use thiserror::Error;

/// Errors reported while preparing a polygon or shaping a query batch.
#[derive(Debug, Error)]
pub enum Error {
    /// A polygon needs at least three vertices to enclose anything.
    #[error("polygon must have at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    /// Points and polygons are both N×2 matrices: column 0 holds x, column 1
    /// holds y.
    #[error("{name} matrix must have exactly 2 columns, got {ncols}")]
    BadShape { name: &'static str, ncols: usize },

    /// The polygon's bounding box could not be derived: a coordinate column
    /// was empty or contained NaN.
    #[error("polygon bounds are undefined: {0}")]
    BoundsUndefined(#[from] MinMaxError),
}

/// Convenience alias for results using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
