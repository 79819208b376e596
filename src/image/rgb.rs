//! Owned RGB8 pixel buffer and borrowed row windows over it.
//!
//! Storage is interleaved `R, G, B` in row-major order with no row padding, so
//! `data.len() == width * height * 3` always holds for a [`PixelBuffer`].
//! [`RgbView`] borrows a rectangular band of rows (optionally narrower than
//! the buffer, left-aligned) without copying.
use super::traits::ImageView;
use crate::error::{Result, StitchError};

/// Samples per pixel.
pub const CHANNELS: usize = 3;

/// Background colour used for every padded region.
pub const WHITE: [u8; CHANNELS] = [255, 255, 255];

#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap interleaved RGB bytes, validating dimensions and length.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        check_dims(width, height)?;
        let expected = width * height * CHANNELS;
        if data.len() != expected {
            return Err(StitchError::InvalidInput(format!(
                "buffer holds {} bytes, expected {expected} for {width}x{height} RGB",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build from interleaved RGBA bytes by dropping the alpha channel.
    pub fn from_rgba(width: usize, height: usize, rgba: &[u8]) -> Result<Self> {
        check_dims(width, height)?;
        let expected = width * height * 4;
        if rgba.len() != expected {
            return Err(StitchError::InvalidInput(format!(
                "buffer holds {} bytes, expected {expected} for {width}x{height} RGBA",
                rgba.len()
            )));
        }
        let data = rgba
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Solid-colour buffer.
    pub fn filled(width: usize, height: usize, color: [u8; CHANNELS]) -> Result<Self> {
        check_dims(width, height)?;
        let data = color
            .iter()
            .copied()
            .cycle()
            .take(width * height * CHANNELS)
            .collect();
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// White canvas, the starting point for every composite.
    pub fn white(width: usize, height: usize) -> Result<Self> {
        Self::filled(width, height, WHITE)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    fn idx(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * CHANNELS
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; CHANNELS] {
        let i = self.idx(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, px: [u8; CHANNELS]) {
        let i = self.idx(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&px);
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let stride = self.width * CHANNELS;
        &mut self.data[y * stride..(y + 1) * stride]
    }

    /// Borrow the whole buffer.
    pub fn as_view(&self) -> RgbView<'_> {
        RgbView {
            w: self.width,
            h: self.height,
            stride: self.width * CHANNELS,
            data: &self.data,
        }
    }

    /// Borrow rows `y0..y0 + h`. Panics if the band leaves the buffer.
    pub fn band(&self, y0: usize, h: usize) -> RgbView<'_> {
        assert!(
            y0 + h <= self.height,
            "band {y0}..{} exceeds height {}",
            y0 + h,
            self.height
        );
        let stride = self.width * CHANNELS;
        RgbView {
            w: self.width,
            h,
            stride,
            data: &self.data[y0 * stride..(y0 + h) * stride],
        }
    }

    /// Bottom `h` rows.
    pub fn bottom_band(&self, h: usize) -> RgbView<'_> {
        self.band(self.height - h, h)
    }

    /// Top `h` rows.
    pub fn top_band(&self, h: usize) -> RgbView<'_> {
        self.band(0, h)
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}

impl ImageView for PixelBuffer {
    type Sample = u8;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }
    #[inline]
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn channels(&self) -> usize {
        CHANNELS
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let stride = self.width * CHANNELS;
        &self.data[y * stride..(y + 1) * stride]
    }
}

/// Borrowed band of an RGB buffer.
#[derive(Clone, Copy, Debug)]
pub struct RgbView<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize, // bytes between rows
    pub data: &'a [u8],
}

impl<'a> RgbView<'a> {
    /// Restrict the view to its leftmost `w` columns.
    pub fn with_width(self, w: usize) -> Self {
        Self {
            w: w.min(self.w),
            ..self
        }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> [u8; CHANNELS] {
        let i = y * self.stride + x * CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Copy the view into a new owned buffer.
    pub fn to_buffer(&self) -> Result<PixelBuffer> {
        let mut data = Vec::with_capacity(self.w * self.h * CHANNELS);
        for row in self.rows() {
            data.extend_from_slice(row);
        }
        PixelBuffer::new(self.w, self.h, data)
    }
}

impl ImageView for RgbView<'_> {
    type Sample = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn channels(&self) -> usize {
        CHANNELS
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w * CHANNELS]
    }
}

fn check_dims(width: usize, height: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(StitchError::InvalidInput(format!(
            "image dimensions must be positive, got {width}x{height}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_dimensions_and_bad_length() {
        assert!(matches!(
            PixelBuffer::new(0, 4, Vec::new()),
            Err(StitchError::InvalidInput(_))
        ));
        assert!(matches!(
            PixelBuffer::new(2, 2, vec![0; 11]),
            Err(StitchError::InvalidInput(_))
        ));
        assert!(PixelBuffer::new(2, 2, vec![0; 12]).is_ok());
    }

    #[test]
    fn rgba_drops_alpha() {
        let rgba = [10, 20, 30, 0, 40, 50, 60, 255];
        let buf = PixelBuffer::from_rgba(2, 1, &rgba).unwrap();
        assert_eq!(buf.as_bytes(), &[10, 20, 30, 40, 50, 60]);
    }

    #[test]
    fn bands_address_expected_rows() {
        let mut buf = PixelBuffer::white(3, 4).unwrap();
        buf.set_pixel(1, 3, [1, 2, 3]);
        let bottom = buf.bottom_band(1);
        assert_eq!(bottom.h, 1);
        assert_eq!(bottom.get(1, 0), [1, 2, 3]);
        let narrow = buf.top_band(2).with_width(2);
        assert_eq!(narrow.row(1).len(), 6);
        assert_eq!(narrow.rows().count(), 2);
    }
}
