//! Fit a page image onto an exact paper-sized pixel grid.
//!
//! The image is scaled by `s = min(tw / w, th / h)` (up or down), resampled to
//! `round(w·s) × round(h·s)` and centred on a white `tw × th` canvas. Output
//! is always exactly the paper size, so fitting an already-fitted page is a
//! no-op.

mod resample;
mod spec;

pub use resample::{resize, ResampleFilter};
pub use spec::{PaperPreset, PaperSpec, DEFAULT_DPI, MAX_PAGE_PIXELS};

use crate::error::Result;
use crate::image::canvas::{centered_offset, paste};
use crate::image::PixelBuffer;
use log::debug;
use serde::Serialize;

/// Geometry of one fit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FitPlan {
    pub target: (usize, usize),
    pub scale: f64,
    pub resized: (usize, usize),
    /// Top-left corner of the resized image on the canvas.
    pub offset: (usize, usize),
}

impl FitPlan {
    pub fn is_identity(&self) -> bool {
        self.resized == self.target && self.offset == (0, 0)
    }
}

/// Compute the fit geometry for an image of `dims` onto `spec`.
pub fn plan_fit(dims: (usize, usize), spec: &PaperSpec) -> Result<FitPlan> {
    let (tw, th) = spec.target_pixels()?;
    let (w, h) = dims;
    let scale = (tw as f64 / w as f64).min(th as f64 / h as f64);
    let rw = ((w as f64 * scale).round() as usize).clamp(1, tw);
    let rh = ((h as f64 * scale).round() as usize).clamp(1, th);
    Ok(FitPlan {
        target: (tw, th),
        scale,
        resized: (rw, rh),
        offset: (centered_offset(tw, rw), centered_offset(th, rh)),
    })
}

/// Scale and pad `image` to exactly the paper's pixel size.
pub fn fit_to_paper(
    image: PixelBuffer,
    spec: &PaperSpec,
    filter: ResampleFilter,
) -> Result<PixelBuffer> {
    let plan = plan_fit(image.dimensions(), spec)?;
    fit_with_plan(image, &plan, filter)
}

pub fn fit_with_plan(image: PixelBuffer, plan: &FitPlan, filter: ResampleFilter) -> Result<PixelBuffer> {
    debug!(
        "fit_to_paper: {}x{} -> {}x{} (scale {:.4}) on {}x{} at {:?}",
        image.width(),
        image.height(),
        plan.resized.0,
        plan.resized.1,
        plan.scale,
        plan.target.0,
        plan.target.1,
        plan.offset
    );
    let resized = resize(image, plan.resized.0, plan.resized.1, filter)?;
    if plan.is_identity() {
        return Ok(resized);
    }
    let (tw, th) = plan.target;
    let mut canvas = PixelBuffer::white(tw, th)?;
    paste(&mut canvas, &resized.as_view(), plan.offset.0, plan.offset.1);
    Ok(canvas)
}
