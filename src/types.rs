use serde::{Deserialize, Serialize};

pub use crate::image::{PixelBuffer, RgbView};

/// Outcome of the overlap search.
///
/// `found == false` implies `height == 0`; the merge then concatenates the
/// two scans without discarding rows.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapResult {
    /// Rows at the top of the bottom scan to discard.
    pub height: usize,
    pub found: bool,
    /// Normalised SAD of the best candidate in `[0, 1]`; `1.0` if nothing was
    /// evaluated.
    pub score: f64,
}

impl OverlapResult {
    pub fn accepted(height: usize, score: f64) -> Self {
        Self {
            height,
            found: true,
            score,
        }
    }

    pub fn not_found(score: f64) -> Self {
        Self {
            height: 0,
            found: false,
            score,
        }
    }

    /// Rows the merge removes from the bottom scan.
    pub fn discarded_rows(&self) -> usize {
        if self.found {
            self.height
        } else {
            0
        }
    }
}

impl Default for OverlapResult {
    fn default() -> Self {
        Self::not_found(1.0)
    }
}
