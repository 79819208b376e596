//! Resampling through `image::imageops`.
use crate::error::{Result, StitchError};
use crate::image::PixelBuffer;
use image::imageops::{self, FilterType};
use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Resampling kernel used when scaling to paper size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    CatmullRom,
    #[default]
    Lanczos3,
}

impl From<ResampleFilter> for FilterType {
    fn from(filter: ResampleFilter) -> Self {
        match filter {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Resize to exactly `width × height`; returns the input untouched when the
/// size already matches.
pub fn resize(
    image: PixelBuffer,
    width: usize,
    height: usize,
    filter: ResampleFilter,
) -> Result<PixelBuffer> {
    if image.dimensions() == (width, height) {
        return Ok(image);
    }
    let (w, h) = image.dimensions();
    let src = RgbImage::from_raw(w as u32, h as u32, image.into_raw())
        .ok_or_else(|| StitchError::InvalidInput(format!("{w}x{h} buffer has wrong length")))?;
    let out = imageops::resize(&src, width as u32, height as u32, filter.into());
    PixelBuffer::new(width, height, out.into_raw())
}
