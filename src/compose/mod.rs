//! Vertical compositing of the two scans.
//!
//! The whole top scan is kept; the bottom scan loses its first
//! `overlap.height` rows. Narrower parts are centred on white so the output
//! width is always the wider of the two inputs.

mod plan;

pub use plan::{plan_merge, MergePlan, Padding};

use crate::error::Result;
use crate::image::canvas::paste;
use crate::image::{PixelBuffer, CHANNELS};
use crate::types::OverlapResult;
use log::debug;

/// Merge `top` above the cropped `bottom`.
pub fn merge(top: PixelBuffer, bottom: PixelBuffer, overlap: OverlapResult) -> Result<PixelBuffer> {
    let plan = plan_merge(&top, &bottom, &overlap)?;
    merge_with_plan(top, bottom, &plan)
}

/// Merge following a precomputed plan.
pub fn merge_with_plan(top: PixelBuffer, bottom: PixelBuffer, plan: &MergePlan) -> Result<PixelBuffer> {
    debug!(
        "merge: top={}x{} bottom={}x{} -> {}x{} (overlap {}, pad top {:?}, pad bottom {:?})",
        top.width(),
        top.height(),
        bottom.width(),
        bottom.height(),
        plan.target_width,
        plan.output_height,
        plan.overlap_height,
        plan.top_padding,
        plan.bottom_padding
    );
    let cropped = bottom.band(plan.overlap_height, plan.cropped_bottom_height);

    if plan.top_padding.is_none() && plan.bottom_padding.is_none() {
        // Same width: extend the top scan's storage with the kept bottom rows.
        let mut data = top.into_raw();
        data.reserve(cropped.w * cropped.h * CHANNELS);
        data.extend_from_slice(cropped.data);
        return PixelBuffer::new(plan.target_width, plan.output_height, data);
    }

    let mut out = PixelBuffer::white(plan.target_width, plan.output_height)?;
    paste(&mut out, &top.as_view(), plan.top_padding.left, 0);
    paste(&mut out, &cropped, plan.bottom_padding.left, top.height());
    Ok(out)
}
