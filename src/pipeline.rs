//! Overlap search → merge → paper fit.
//!
//! [`Stitcher`] owns the parameters and runs the three stages in order,
//! returning the first error. Inputs are moved through the stages; nothing is
//! shared between runs.

use crate::compose::{merge_with_plan, plan_merge};
use crate::diagnostics::timing::elapsed_ms;
use crate::diagnostics::{InputDescriptor, StitchReport, TimingBreakdown};
use crate::error::{Result, StitchError};
use crate::image::PixelBuffer;
use crate::overlap::{find_overlap_traced, OverlapParams};
use crate::paper::{fit_with_plan, plan_fit, PaperSpec, ResampleFilter};
use log::debug;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Stitcher-wide parameters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StitchParams {
    pub overlap: OverlapParams,
    pub fit: FitParams,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitParams {
    pub filter: ResampleFilter,
}

/// Shared flag checked between stages.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(StitchError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Stitcher {
    pub params: StitchParams,
}

impl Stitcher {
    pub fn new(params: StitchParams) -> Self {
        Self { params }
    }

    pub fn process(&self, top: PixelBuffer, bottom: PixelBuffer, spec: &PaperSpec) -> Result<PixelBuffer> {
        self.run(top, bottom, spec, None).map(|(page, _)| page)
    }

    pub fn process_with_report(
        &self,
        top: PixelBuffer,
        bottom: PixelBuffer,
        spec: &PaperSpec,
    ) -> Result<(PixelBuffer, StitchReport)> {
        self.run(top, bottom, spec, None)
    }

    /// Like [`process_with_report`](Self::process_with_report), but stops with
    /// [`StitchError::Cancelled`] if `cancel` is set before any stage starts.
    pub fn process_cancellable(
        &self,
        top: PixelBuffer,
        bottom: PixelBuffer,
        spec: &PaperSpec,
        cancel: &CancelToken,
    ) -> Result<(PixelBuffer, StitchReport)> {
        self.run(top, bottom, spec, Some(cancel))
    }

    fn run(
        &self,
        top: PixelBuffer,
        bottom: PixelBuffer,
        spec: &PaperSpec,
        cancel: Option<&CancelToken>,
    ) -> Result<(PixelBuffer, StitchReport)> {
        let checkpoint = || cancel.map_or(Ok(()), CancelToken::check);
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();
        let input = InputDescriptor {
            top: top.dimensions(),
            bottom: bottom.dimensions(),
        };

        // Paper size is checked before the search.
        spec.target_pixels()?;

        checkpoint()?;
        let start = Instant::now();
        let (overlap, search) = find_overlap_traced(&top, &bottom, &self.params.overlap)?;
        timings.record_since("overlap", start);

        checkpoint()?;
        let start = Instant::now();
        let merge = plan_merge(&top, &bottom, &overlap)?;
        let merged = merge_with_plan(top, bottom, &merge)?;
        timings.record_since("merge", start);

        checkpoint()?;
        let start = Instant::now();
        let fit = plan_fit(merged.dimensions(), spec)?;
        let page = fit_with_plan(merged, &fit, self.params.fit.filter)?;
        timings.record_since("fit", start);

        timings.total_ms = elapsed_ms(total_start);
        let report = StitchReport {
            input,
            paper: *spec,
            overlap,
            search,
            merge,
            fit,
            output: page.dimensions(),
            timings,
        };
        debug!("Stitcher::process {}", report.summary());
        Ok((page, report))
    }
}

/// Run the pipeline with default parameters.
pub fn process(top: PixelBuffer, bottom: PixelBuffer, spec: &PaperSpec) -> Result<PixelBuffer> {
    Stitcher::default().process(top, bottom, spec)
}
