use super::timing::TimingBreakdown;
use crate::compose::MergePlan;
use crate::overlap::SearchTrace;
use crate::paper::{FitPlan, PaperSpec};
use crate::types::OverlapResult;
use serde::Serialize;

/// Everything decided during one run of [`Stitcher::process_with_report`](crate::Stitcher).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StitchReport {
    pub input: InputDescriptor,
    pub paper: PaperSpec,
    pub overlap: OverlapResult,
    pub search: SearchTrace,
    pub merge: MergePlan,
    pub fit: FitPlan,
    pub output: (usize, usize),
    pub timings: TimingBreakdown,
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub top: (usize, usize),
    pub bottom: (usize, usize),
}

impl StitchReport {
    /// One-line human summary for CLI output.
    pub fn summary(&self) -> String {
        let overlap = if self.overlap.found {
            format!(
                "overlap {} rows (score {:.4})",
                self.overlap.height, self.overlap.score
            )
        } else {
            format!("no overlap (best score {:.4})", self.overlap.score)
        };
        format!(
            "{}x{} + {}x{}: {overlap}, merged {}x{}, page {}x{} in {:.1} ms",
            self.input.top.0,
            self.input.top.1,
            self.input.bottom.0,
            self.input.bottom.1,
            self.merge.target_width,
            self.merge.output_height,
            self.output.0,
            self.output.1,
            self.timings.total_ms
        )
    }
}
