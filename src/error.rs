//! Error taxonomy for the stitching core.
//!
//! A missing overlap is not an error: it is reported through
//! [`OverlapResult::found`](crate::types::OverlapResult) and the pipeline
//! falls back to plain concatenation.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StitchError {
    /// Zero-sized or malformed buffer, or parameters outside their domain.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The overlap would discard the whole bottom image.
    #[error("overlap of {overlap} rows consumes the entire bottom image ({bottom_height} rows)")]
    Merge { overlap: usize, bottom_height: usize },

    /// Target paper size resolves to an empty or invalid pixel grid.
    #[error("cannot fit to paper: {0}")]
    Resize(String),

    /// A cancellation request was observed between pipeline stages.
    #[error("stitching cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, StitchError>;
