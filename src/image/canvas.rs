//! White-canvas compositing helpers shared by the merger and the paper fitter.
use super::rgb::{PixelBuffer, RgbView, CHANNELS};
use super::traits::ImageView;

/// Offset that centres `inner` within `outer`; any odd remainder goes to the
/// trailing side.
#[inline]
pub fn centered_offset(outer: usize, inner: usize) -> usize {
    outer.saturating_sub(inner) / 2
}

/// Copy `src` into `dst` with its top-left corner at `(x, y)`, clipping to the
/// destination bounds.
pub fn paste(dst: &mut PixelBuffer, src: &RgbView<'_>, x: usize, y: usize) {
    if x >= dst.width() || y >= dst.height() {
        return;
    }
    let cols = src.width().min(dst.width() - x);
    let rows = src.height().min(dst.height() - y);
    let span = cols * CHANNELS;
    let start = x * CHANNELS;
    for sy in 0..rows {
        let src_row = &src.row(sy)[..span];
        dst.row_mut(y + sy)[start..start + span].copy_from_slice(src_row);
    }
}
