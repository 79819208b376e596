//! Strip dissimilarity: sum of absolute differences over the seam band.
use crate::image::{ImageView, PixelBuffer, CHANNELS};

/// Raw SAD between the bottom `h` rows of `top` and the top `h` rows of
/// `bottom`, restricted to the left-aligned common width.
pub fn strip_sad(top: &PixelBuffer, bottom: &PixelBuffer, h: usize) -> u64 {
    let w = top.width().min(bottom.width());
    let a = top.bottom_band(h).with_width(w);
    let b = bottom.top_band(h).with_width(w);
    a.rows()
        .zip(b.rows())
        .map(|(ra, rb)| {
            ra.iter()
                .zip(rb)
                .map(|(&x, &y)| u64::from(x.abs_diff(y)))
                .sum::<u64>()
        })
        .sum()
}

/// SAD normalised by `h × w × channels × 255`; 0 is a perfect match.
pub fn strip_score(top: &PixelBuffer, bottom: &PixelBuffer, h: usize) -> f64 {
    let w = top.width().min(bottom.width());
    let denom = (h * w * CHANNELS) as f64 * 255.0;
    if denom == 0.0 {
        return 1.0;
    }
    strip_sad(top, bottom, h) as f64 / denom
}
