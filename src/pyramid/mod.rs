//! RGB image pyramid with configurable separable blur and 2× decimation.
//!
//! Level 0 is a copy of the input band. Each further level halves both
//! dimensions (rounding up), optionally blurring with a separable kernel
//! first. Border samples clamp to the image extents. Levels stay 8-bit so the
//! overlap scorer can run unchanged on any of them.

pub mod options;

pub use options::{PyramidFilter, PyramidOptions};

use crate::error::Result;
use crate::image::{ImageView, PixelBuffer, RgbView, CHANNELS};

#[derive(Clone, Debug, Default)]
pub struct Pyramid {
    pub levels: Vec<PixelBuffer>,
}

impl Pyramid {
    /// Build a pyramid from a borrowed RGB band.
    pub fn build(view: &RgbView<'_>, options: PyramidOptions) -> Result<Self> {
        let l0 = view.to_buffer()?;
        Self::build_owned(l0, options)
    }

    pub fn build_owned(image: PixelBuffer, options: PyramidOptions) -> Result<Self> {
        let count = options.levels.max(1);
        let mut levels = Vec::with_capacity(count);
        levels.push(image);

        let taps = options.filter.taps();
        for lvl in 1..count {
            let prev = levels.last().expect("previous level available");
            let down = if lvl <= options.blur_levels {
                downsample_with_filter(prev, taps)?
            } else {
                downsample_without_filter(prev)?
            };
            levels.push(down);
        }

        Ok(Self { levels })
    }

    /// Downscale factor of `level` relative to level 0.
    pub fn factor(level: usize) -> usize {
        1usize << level
    }

    pub fn coarsest(&self) -> &PixelBuffer {
        self.levels.last().expect("pyramid has at least one level")
    }
}

fn downsample_without_filter(src: &PixelBuffer) -> Result<PixelBuffer> {
    let (nw, nh) = (src.width().div_ceil(2), src.height().div_ceil(2));
    let mut data = Vec::with_capacity(nw * nh * CHANNELS);
    for y in 0..nh {
        let src_row = src.row((y * 2).min(src.height() - 1));
        for x in 0..nw {
            let sx = (x * 2).min(src.width() - 1) * CHANNELS;
            data.extend_from_slice(&src_row[sx..sx + CHANNELS]);
        }
    }
    PixelBuffer::new(nw, nh, data)
}

fn downsample_with_filter(src: &PixelBuffer, taps: &[f32]) -> Result<PixelBuffer> {
    if taps.is_empty() {
        return downsample_without_filter(src);
    }
    let radius = taps.len() / 2;
    let (nw, nh) = (src.width().div_ceil(2), src.height().div_ceil(2));
    let cache_width = nw * CHANNELS;

    // Horizontally filtered + decimated source rows, keyed by source row index.
    let mut horiz_cache = vec![0.0f32; cache_width * taps.len()];
    let mut cached_rows = vec![usize::MAX; taps.len()];

    let mut data = Vec::with_capacity(nw * nh * CHANNELS);
    let mut acc = vec![0.0f32; cache_width];
    for y in 0..nh {
        let center_sy = (y * 2) as isize;
        for ky in 0..taps.len() {
            let sy = clamp_index(center_sy + ky as isize - radius as isize, src.height());
            if cached_rows[ky] != sy {
                let cache_row = &mut horiz_cache[ky * cache_width..(ky + 1) * cache_width];
                filter_row_downsample(src.row(sy), cache_row, taps, radius);
                cached_rows[ky] = sy;
            }
        }
        acc.iter_mut().for_each(|v| *v = 0.0);
        for (ky, &tap) in taps.iter().enumerate() {
            let cache_row = &horiz_cache[ky * cache_width..(ky + 1) * cache_width];
            for (a, &v) in acc.iter_mut().zip(cache_row) {
                *a += tap * v;
            }
        }
        data.extend(acc.iter().map(|&v| v.round().clamp(0.0, 255.0) as u8));
    }
    PixelBuffer::new(nw, nh, data)
}

fn filter_row_downsample(row: &[u8], out: &mut [f32], taps: &[f32], radius: usize) {
    let width = row.len() / CHANNELS;
    for (x, dst_px) in out.chunks_exact_mut(CHANNELS).enumerate() {
        let sx = (x * 2) as isize;
        let mut px = [0.0f32; CHANNELS];
        for (k, &tap) in taps.iter().enumerate() {
            let idx = clamp_index(sx + k as isize - radius as isize, width) * CHANNELS;
            for c in 0..CHANNELS {
                px[c] += tap * row[idx + c] as f32;
            }
        }
        dst_px.copy_from_slice(&px);
    }
}

fn clamp_index(idx: isize, upper: usize) -> usize {
    if upper == 0 || idx < 0 {
        0
    } else {
        (idx as usize).min(upper - 1)
    }
}
