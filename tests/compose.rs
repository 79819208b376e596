mod common;

use common::synthetic_image::{black_band_scans, noise_rgb, rows, split_with_overlap};
use scan_stitch::compose::{merge, plan_merge, Padding};
use scan_stitch::image::PixelBuffer;
use scan_stitch::overlap::{find_overlap, OverlapParams};
use scan_stitch::{OverlapResult, StitchError};

#[test]
fn black_band_scenario_merges_to_330_rows() {
    let (top, bottom) = black_band_scans();
    let overlap = find_overlap(&top, &bottom, &OverlapParams::default()).unwrap();
    let merged = merge(top, bottom, overlap).unwrap();
    assert_eq!(merged.dimensions(), (100, 330));
    // Exactly one copy of the black band remains.
    let black_rows = (0..merged.height())
        .filter(|&y| merged.pixel(50, y) == [0, 0, 0])
        .count();
    assert_eq!(black_rows, 20);
}

#[test]
fn heights_and_widths_follow_the_overlap() {
    let cases = [
        ((40, 100), (40, 80), OverlapResult::accepted(25, 0.01)),
        ((40, 100), (60, 80), OverlapResult::accepted(1, 0.0)),
        ((70, 10), (30, 80), OverlapResult::not_found(0.4)),
        ((31, 50), (30, 50), OverlapResult::default()),
    ];
    for ((tw, th), (bw, bh), overlap) in cases {
        let top = PixelBuffer::white(tw, th).unwrap();
        let bottom = PixelBuffer::white(bw, bh).unwrap();
        let merged = merge(top, bottom, overlap).unwrap();
        let expected_h = if overlap.found {
            th + bh - overlap.height
        } else {
            th + bh
        };
        assert_eq!(merged.dimensions(), (tw.max(bw), expected_h), "{overlap:?}");
    }
}

#[test]
fn split_page_reassembles_exactly() {
    let page = noise_rgb(40, 240, 21);
    let (top, bottom) = split_with_overlap(&page, 130, 35);
    let overlap = find_overlap(&top, &bottom, &OverlapParams::default()).unwrap();
    let merged = merge(top, bottom, overlap).unwrap();
    assert_eq!(merged, page);
}

#[test]
fn narrower_top_is_centred_with_floor_left_padding() {
    let top = PixelBuffer::filled(5, 4, [10, 20, 30]).unwrap();
    let bottom = PixelBuffer::filled(12, 6, [40, 50, 60]).unwrap();
    let plan = plan_merge(&top, &bottom, &OverlapResult::accepted(2, 0.0)).unwrap();
    assert_eq!(plan.top_padding, Padding { left: 3, right: 4 });
    assert_eq!(plan.bottom_padding, Padding::default());

    let merged = merge(top, bottom, OverlapResult::accepted(2, 0.0)).unwrap();
    assert_eq!(merged.dimensions(), (12, 8));
    assert_eq!(merged.pixel(2, 0), [255, 255, 255]);
    assert_eq!(merged.pixel(3, 0), [10, 20, 30]);
    assert_eq!(merged.pixel(7, 3), [10, 20, 30]);
    assert_eq!(merged.pixel(8, 3), [255, 255, 255]);
    assert_eq!(merged.pixel(0, 4), [40, 50, 60]);
}

#[test]
fn narrower_bottom_keeps_rows_after_the_overlap() {
    let page = noise_rgb(20, 60, 4);
    let top = PixelBuffer::white(26, 10).unwrap();
    let bottom = rows(&page, 0, 60, None);
    let merged = merge(top, bottom, OverlapResult::accepted(15, 0.1)).unwrap();
    assert_eq!(merged.dimensions(), (26, 55));
    // Bottom is offset by floor(6 / 2) = 3 columns; first kept row is page row 15.
    assert_eq!(merged.pixel(3, 10), page.pixel(0, 15));
    assert_eq!(merged.pixel(22, 54), page.pixel(19, 59));
    assert_eq!(merged.pixel(2, 10), [255, 255, 255]);
    assert_eq!(merged.pixel(23, 10), [255, 255, 255]);
}

#[test]
fn overlap_covering_the_bottom_scan_is_rejected() {
    let top = PixelBuffer::white(10, 40).unwrap();
    let bottom = PixelBuffer::white(10, 12).unwrap();
    let err = merge(top, bottom, OverlapResult::accepted(12, 0.0)).unwrap_err();
    assert_eq!(
        err,
        StitchError::Merge {
            overlap: 12,
            bottom_height: 12
        }
    );
}
