use crate::error::{Result, StitchError};
use crate::pyramid::PyramidFilter;
use serde::{Deserialize, Serialize};

/// Knobs for the overlap search.
///
/// Defaults search up to half of the shorter scan, starting at 20 rows, and
/// accept a match whose mean per-sample difference is at most 15% of full
/// scale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlapParams {
    /// Fraction of the shorter scan's height searched, in `(0, 1]`.
    pub search_fraction: f64,
    /// Smallest candidate overlap in rows (> 0).
    pub min_strip: usize,
    /// Acceptance gate on the normalised SAD.
    pub sad_threshold: f64,
    /// Candidate stride at full resolution when `coarse_levels == 0`.
    pub step: usize,
    /// Pyramid level used for a coarse pass (0 disables it).
    pub coarse_levels: usize,
    /// Extra full-resolution rows rescanned on each side of the coarse pick.
    pub refine_radius: usize,
    /// Kernel applied before each decimation of the coarse pass.
    pub pyramid_filter: PyramidFilter,
}

impl Default for OverlapParams {
    fn default() -> Self {
        Self {
            search_fraction: 0.5,
            min_strip: 20,
            sad_threshold: 0.15,
            step: 1,
            coarse_levels: 0,
            refine_radius: 4,
            pyramid_filter: PyramidFilter::Gaussian5,
        }
    }
}

impl OverlapParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.search_fraction > 0.0 && self.search_fraction <= 1.0) {
            return Err(StitchError::InvalidInput(format!(
                "search_fraction must be in (0, 1], got {}",
                self.search_fraction
            )));
        }
        if self.min_strip == 0 {
            return Err(StitchError::InvalidInput("min_strip must be positive".into()));
        }
        if self.step == 0 {
            return Err(StitchError::InvalidInput("step must be positive".into()));
        }
        if !self.sad_threshold.is_finite() || self.sad_threshold < 0.0 {
            return Err(StitchError::InvalidInput(format!(
                "sad_threshold must be a non-negative number, got {}",
                self.sad_threshold
            )));
        }
        if self.coarse_levels >= usize::BITS as usize {
            return Err(StitchError::InvalidInput(format!(
                "coarse_levels {} is out of range",
                self.coarse_levels
            )));
        }
        Ok(())
    }

    /// Inclusive candidate range for scans whose shorter height is `short_h`,
    /// or `None` when it is empty.
    pub fn candidate_range(&self, short_h: usize) -> Option<(usize, usize)> {
        let max_h = (short_h as f64 * self.search_fraction).floor() as usize;
        let max_h = max_h.min(short_h);
        (self.min_strip <= max_h).then_some((self.min_strip, max_h))
    }
}
