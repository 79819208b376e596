#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod compose;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod overlap;
pub mod paper;
pub mod pipeline;
pub mod types;
pub mod worker;

// Supporting modules used by the tools and the coarse search.
pub mod config;
pub mod pyramid;

// --- High-level re-exports -------------------------------------------------

pub use crate::compose::{merge, MergePlan};
pub use crate::error::{Result, StitchError};
pub use crate::overlap::{find_overlap, OverlapParams};
pub use crate::paper::{fit_to_paper, PaperPreset, PaperSpec, ResampleFilter};
pub use crate::pipeline::{process, CancelToken, StitchParams, Stitcher};
pub use crate::types::{OverlapResult, PixelBuffer};

pub use crate::diagnostics::StitchReport;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use scan_stitch::prelude::*;
///
/// # fn main() -> scan_stitch::Result<()> {
/// let top = PixelBuffer::white(1200, 1600)?;
/// let bottom = PixelBuffer::white(1200, 1400)?;
/// let spec = PaperSpec::from_preset(PaperPreset::Legal, 300);
///
/// let (page, report) = Stitcher::default().process_with_report(top, bottom, &spec)?;
/// println!("{} -> {}x{}", report.summary(), page.width(), page.height());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::PixelBuffer;
    pub use crate::{PaperPreset, PaperSpec, StitchParams, Stitcher};
}
