use crate::error::{Result, StitchError};
use crate::image::canvas::centered_offset;
use crate::image::PixelBuffer;
use crate::types::OverlapResult;
use serde::Serialize;

/// White columns added on each side of a part narrower than the output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Padding {
    pub left: usize,
    pub right: usize,
}

impl Padding {
    /// Centre `width` within `target`; the odd column goes right.
    pub fn centered(target: usize, width: usize) -> Self {
        let left = centered_offset(target, width);
        Self {
            left,
            right: target.saturating_sub(width + left),
        }
    }

    pub fn is_none(&self) -> bool {
        self.left == 0 && self.right == 0
    }
}

/// Geometry decided once per merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MergePlan {
    /// Rows dropped from the top of the bottom scan.
    pub overlap_height: usize,
    pub cropped_bottom_height: usize,
    pub target_width: usize,
    pub output_height: usize,
    pub top_padding: Padding,
    pub bottom_padding: Padding,
}

/// Compute the merge geometry, rejecting overlaps that swallow the bottom scan.
pub fn plan_merge(
    top: &PixelBuffer,
    bottom: &PixelBuffer,
    overlap: &OverlapResult,
) -> Result<MergePlan> {
    let overlap_height = overlap.discarded_rows();
    if overlap_height >= bottom.height() {
        return Err(StitchError::Merge {
            overlap: overlap_height,
            bottom_height: bottom.height(),
        });
    }
    let cropped_bottom_height = bottom.height() - overlap_height;
    let target_width = top.width().max(bottom.width());
    Ok(MergePlan {
        overlap_height,
        cropped_bottom_height,
        target_width,
        output_height: top.height() + cropped_bottom_height,
        top_padding: Padding::centered(target_width, top.width()),
        bottom_padding: Padding::centered(target_width, bottom.width()),
    })
}
