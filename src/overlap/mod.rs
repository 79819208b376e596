//! Vertical overlap search between the two scans.
//!
//! Candidates `h` run from `min_strip` to `floor(short_h × search_fraction)`.
//! Each is scored by [`score::strip_score`]; the minimum wins with ties going
//! to the smallest `h`, and the winner is accepted only if its score is at
//! most `sad_threshold`.
//!
//! The exhaustive scan costs `O(range × h × w)`. Two coarsenings are
//! available: a candidate `step`, and a pyramid pass (`coarse_levels > 0`)
//! that picks a coarse candidate and rescans a small full-resolution window
//! around it. Either way the accepted height and score come from
//! full-resolution SAD.

pub mod params;
pub mod score;

pub use params::OverlapParams;
pub use score::{strip_sad, strip_score};

use crate::error::Result;
use crate::image::PixelBuffer;
use crate::pyramid::{Pyramid, PyramidOptions};
use crate::types::OverlapResult;
use log::debug;
use serde::Serialize;

/// One evaluated candidate.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSample {
    pub height: usize,
    pub score: f64,
}

/// Bookkeeping from a search run.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTrace {
    /// Inclusive full-resolution candidate range, if non-empty.
    pub range: Option<(usize, usize)>,
    pub full_res_evaluated: usize,
    pub coarse_evaluated: usize,
    /// Coarse pick lifted to full-resolution rows.
    pub coarse_pick: Option<usize>,
    pub best: Option<ScoreSample>,
}

/// Find the overlap between the bottom of `top` and the top of `bottom`.
pub fn find_overlap(
    top: &PixelBuffer,
    bottom: &PixelBuffer,
    params: &OverlapParams,
) -> Result<OverlapResult> {
    find_overlap_traced(top, bottom, params).map(|(res, _)| res)
}

/// Same as [`find_overlap`] but also returns the search bookkeeping.
pub fn find_overlap_traced(
    top: &PixelBuffer,
    bottom: &PixelBuffer,
    params: &OverlapParams,
) -> Result<(OverlapResult, SearchTrace)> {
    params.validate()?;
    let mut trace = SearchTrace::default();

    let short_h = top.height().min(bottom.height());
    let Some((lo, hi)) = params.candidate_range(short_h) else {
        debug!(
            "find_overlap: empty candidate range (short_h={short_h}, min_strip={})",
            params.min_strip
        );
        return Ok((OverlapResult::not_found(1.0), trace));
    };
    trace.range = Some((lo, hi));

    let best = if params.coarse_levels > 0 {
        match coarse_pick(top, bottom, params, lo, hi, &mut trace)? {
            Some(centre) => {
                let f = Pyramid::factor(params.coarse_levels);
                let reach = f.saturating_add(params.refine_radius);
                let wlo = centre.saturating_sub(reach).max(lo);
                let whi = centre.saturating_add(reach).min(hi);
                scan(top, bottom, (wlo..=whi).step_by(1), &mut trace)
            }
            None => scan(top, bottom, (lo..=hi).step_by(params.step), &mut trace),
        }
    } else {
        scan(top, bottom, (lo..=hi).step_by(params.step), &mut trace)
    };
    trace.best = best;

    let result = match best {
        Some(sample) if sample.score <= params.sad_threshold => {
            OverlapResult::accepted(sample.height, sample.score)
        }
        Some(sample) => OverlapResult::not_found(sample.score),
        None => OverlapResult::not_found(1.0),
    };
    debug!(
        "find_overlap: range={lo}..={hi} evaluated={} coarse={} -> height={} found={} score={:.4}",
        trace.full_res_evaluated,
        trace.coarse_evaluated,
        result.height,
        result.found,
        result.score
    );
    Ok((result, trace))
}

/// Full-resolution score for every candidate the exhaustive pass would visit.
pub fn score_profile(
    top: &PixelBuffer,
    bottom: &PixelBuffer,
    params: &OverlapParams,
) -> Result<Vec<ScoreSample>> {
    params.validate()?;
    let short_h = top.height().min(bottom.height());
    let Some((lo, hi)) = params.candidate_range(short_h) else {
        return Ok(Vec::new());
    };
    Ok((lo..=hi)
        .step_by(params.step)
        .map(|height| ScoreSample {
            height,
            score: strip_score(top, bottom, height),
        })
        .collect())
}

/// Minimum over ascending candidates; strict comparison keeps the smallest
/// height among equal scores.
fn scan(
    top: &PixelBuffer,
    bottom: &PixelBuffer,
    candidates: impl Iterator<Item = usize>,
    trace: &mut SearchTrace,
) -> Option<ScoreSample> {
    let mut best: Option<ScoreSample> = None;
    for height in candidates {
        let score = strip_score(top, bottom, height);
        trace.full_res_evaluated += 1;
        if best.map_or(true, |b| score < b.score) {
            best = Some(ScoreSample { height, score });
        }
    }
    best
}

/// Score candidates on a reduced pyramid level and return the best one in
/// full-resolution rows, or `None` when the coarse range is empty.
fn coarse_pick(
    top: &PixelBuffer,
    bottom: &PixelBuffer,
    params: &OverlapParams,
    lo: usize,
    hi: usize,
    trace: &mut SearchTrace,
) -> Result<Option<usize>> {
    let level = params.coarse_levels;
    let f = Pyramid::factor(level);
    let (clo, chi) = (lo.div_ceil(f).max(1), hi / f);
    if clo > chi {
        return Ok(None);
    }

    // Only the seam bands matter. A band height that is a multiple of the
    // level factor keeps coarse rows aligned with the seam edge.
    let w = top.width().min(bottom.width());
    let band = (chi * f).min(top.height()).min(bottom.height());
    let options = PyramidOptions::new(level + 1).with_filter(params.pyramid_filter);
    let top_pyr = Pyramid::build(&top.bottom_band(band).with_width(w), options)?;
    let bottom_pyr = Pyramid::build(&bottom.top_band(band).with_width(w), options)?;
    let (ct, cb) = (top_pyr.coarsest(), bottom_pyr.coarsest());

    let chi = chi.min(ct.height()).min(cb.height());
    let mut best: Option<ScoreSample> = None;
    for hc in clo..=chi {
        let score = strip_score(ct, cb, hc);
        trace.coarse_evaluated += 1;
        if best.map_or(true, |b| score < b.score) {
            best = Some(ScoreSample { height: hc, score });
        }
    }
    let pick = best.map(|b| b.height * f);
    trace.coarse_pick = pick;
    debug!("coarse_pick: level={level} range={clo}..={chi} -> {pick:?}");
    Ok(pick)
}
