mod common;

use common::synthetic_image::{
    black_band_scans, brighten, noise_rgb, rows, smooth_page, split_with_overlap,
};
use scan_stitch::image::PixelBuffer;
use scan_stitch::overlap::{find_overlap, find_overlap_traced, score_profile, OverlapParams};
use scan_stitch::StitchError;

#[test]
fn black_band_scenario_overlaps_by_twenty_rows() {
    let (top, bottom) = black_band_scans();
    let result = find_overlap(&top, &bottom, &OverlapParams::default()).unwrap();
    assert!(result.found, "shared band should be detected: {result:?}");
    assert_eq!(result.height, 20);
    assert_eq!(result.score, 0.0);
}

#[test]
fn shared_strip_is_recovered_exactly() {
    let page = noise_rgb(64, 400, 7);
    for h0 in [20, 33, 58, 91] {
        let (top, bottom) = split_with_overlap(&page, 220, h0);
        let result = find_overlap(&top, &bottom, &OverlapParams::default()).unwrap();
        assert!(result.found, "h0={h0}: {result:?}");
        assert_eq!(result.height, h0);
        assert!(result.score < 0.15);
    }
}

#[test]
fn stepped_search_hits_candidates_on_its_grid() {
    let page = noise_rgb(48, 300, 11);
    let params = OverlapParams {
        step: 4,
        ..Default::default()
    };
    // Candidates are 20, 24, 28, ...
    let (top, bottom) = split_with_overlap(&page, 160, 44);
    let (result, trace) = find_overlap_traced(&top, &bottom, &params).unwrap();
    assert!(result.found);
    assert_eq!(result.height, 44);
    let (lo, hi) = trace.range.unwrap();
    assert_eq!(trace.full_res_evaluated, (hi - lo) / 4 + 1);
}

#[test]
fn coarse_to_fine_matches_exhaustive_search() {
    let page = smooth_page(48, 300);
    for levels in [1, 2] {
        let params = OverlapParams {
            coarse_levels: levels,
            ..Default::default()
        };
        for h0 in [27, 41, 62, 76] {
            let (top, bottom) = split_with_overlap(&page, 170, h0);
            let exhaustive = find_overlap(&top, &bottom, &OverlapParams::default()).unwrap();
            let (coarse, trace) = find_overlap_traced(&top, &bottom, &params).unwrap();
            assert_eq!(exhaustive.height, h0);
            assert_eq!(
                coarse, exhaustive,
                "levels={levels} h0={h0} coarse pick {:?}",
                trace.coarse_pick
            );
            assert!(trace.coarse_evaluated > 0);
            assert!(
                trace.full_res_evaluated < (trace.range.unwrap().1 - trace.range.unwrap().0 + 1),
                "refinement should scan a window, not the whole range"
            );
        }
    }
}

#[test]
fn huge_refine_radius_clamps_to_the_candidate_range() {
    let (top, bottom) = black_band_scans();
    let params = OverlapParams {
        coarse_levels: 1,
        refine_radius: usize::MAX,
        ..Default::default()
    };
    let (result, trace) = find_overlap_traced(&top, &bottom, &params).unwrap();
    assert!(result.found, "{result:?}");
    assert_eq!(result.height, 20);
    let (lo, hi) = trace.range.unwrap();
    assert_eq!(trace.full_res_evaluated, hi - lo + 1);
}

#[test]
fn unrelated_noise_is_rejected() {
    let top = noise_rgb(160, 200, 1);
    let bottom = noise_rgb(160, 180, 2);
    let result = find_overlap(&top, &bottom, &OverlapParams::default()).unwrap();
    assert!(!result.found);
    assert_eq!(result.height, 0);
    assert!(
        result.score > 0.25 && result.score < 0.42,
        "uncorrelated uniform noise scores about 1/3, got {:.4}",
        result.score
    );
}

#[test]
fn weak_match_respects_threshold() {
    let page = noise_rgb(64, 300, 5);
    let (top, bottom) = split_with_overlap(&page, 180, 40);
    let bottom = brighten(&bottom, 50);

    let strict = find_overlap(&top, &bottom, &OverlapParams::default()).unwrap();
    assert!(!strict.found, "brightened seam scores about 0.18: {strict:?}");

    let lenient = OverlapParams {
        sad_threshold: 0.25,
        ..Default::default()
    };
    let result = find_overlap(&top, &bottom, &lenient).unwrap();
    assert!(result.found);
    assert_eq!(result.height, 40);
    assert!((result.score - strict.score).abs() < 1e-12);
}

#[test]
fn ties_resolve_to_the_smallest_height() {
    let top = PixelBuffer::white(30, 120).unwrap();
    let bottom = PixelBuffer::white(30, 90).unwrap();
    let params = OverlapParams {
        min_strip: 12,
        ..Default::default()
    };
    let result = find_overlap(&top, &bottom, &params).unwrap();
    assert!(result.found);
    assert_eq!(result.height, 12);
}

#[test]
fn comparison_window_is_left_aligned_common_width() {
    let page = noise_rgb(80, 300, 9);
    let (top, bottom) = split_with_overlap(&page, 150, 30);
    let narrow_bottom = rows(&bottom, 0, bottom.height(), Some(50));
    let result = find_overlap(&top, &narrow_bottom, &OverlapParams::default()).unwrap();
    assert!(result.found);
    assert_eq!(result.height, 30);
}

#[test]
fn short_scans_have_no_candidates() {
    let top = PixelBuffer::white(40, 300).unwrap();
    let bottom = PixelBuffer::white(40, 39).unwrap();
    // floor(39 * 0.5) = 19 < min_strip = 20
    let (result, trace) = find_overlap_traced(&top, &bottom, &OverlapParams::default()).unwrap();
    assert!(!result.found);
    assert_eq!(result.height, 0);
    assert_eq!(trace.range, None);
    assert_eq!(trace.full_res_evaluated, 0);
}

#[test]
fn invalid_parameters_are_invalid_input() {
    let img = PixelBuffer::white(10, 100).unwrap();
    let params = OverlapParams {
        search_fraction: 0.0,
        ..Default::default()
    };
    assert!(matches!(
        find_overlap(&img, &img, &params),
        Err(StitchError::InvalidInput(_))
    ));
}

#[test]
fn empty_buffers_cannot_be_constructed() {
    assert!(matches!(
        PixelBuffer::new(0, 10, Vec::new()),
        Err(StitchError::InvalidInput(_))
    ));
    assert!(matches!(
        PixelBuffer::white(10, 0),
        Err(StitchError::InvalidInput(_))
    ));
}

#[test]
fn profile_covers_range_and_bottoms_out_at_overlap() {
    let page = noise_rgb(32, 260, 3);
    let (top, bottom) = split_with_overlap(&page, 140, 25);
    let params = OverlapParams::default();
    let profile = score_profile(&top, &bottom, &params).unwrap();
    // short_h = min(140, 145) = 140 -> candidates 20..=70
    assert_eq!(profile.len(), 51);
    assert_eq!(profile.first().unwrap().height, 20);
    let best = profile
        .iter()
        .min_by(|a, b| a.score.total_cmp(&b.score))
        .unwrap();
    assert_eq!(best.height, 25);
    assert_eq!(best.score, 0.0);
}
