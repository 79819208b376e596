use crate::error::{Result, StitchError};
use serde::{Deserialize, Serialize};

/// Print resolution used when none is given.
pub const DEFAULT_DPI: u32 = 300;

/// Upper bound on `width × height` of a target page (1 Gpx, 3 GiB of RGB).
pub const MAX_PAGE_PIXELS: usize = 1 << 30;

const MM_PER_INCH: f64 = 25.4;

/// Physical page size plus print resolution.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperSpec {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
}

impl PaperSpec {
    pub fn new(width_in: f64, height_in: f64, dpi: u32) -> Self {
        Self {
            width_in,
            height_in,
            dpi,
        }
    }

    pub fn from_preset(preset: PaperPreset, dpi: u32) -> Self {
        let (w, h) = preset.size_in();
        Self::new(w, h, dpi)
    }

    /// `round(width_in × dpi) × round(height_in × dpi)`.
    pub fn target_pixels(&self) -> Result<(usize, usize)> {
        if self.dpi == 0 {
            return Err(StitchError::Resize("dpi must be positive".into()));
        }
        let tw = to_pixels(self.width_in, self.dpi, "width")?;
        let th = to_pixels(self.height_in, self.dpi, "height")?;
        match tw.checked_mul(th) {
            Some(total) if total <= MAX_PAGE_PIXELS => Ok((tw, th)),
            _ => Err(StitchError::Resize(format!(
                "paper of {tw}x{th} pixels exceeds the {MAX_PAGE_PIXELS} pixel limit"
            ))),
        }
    }
}

fn to_pixels(inches: f64, dpi: u32, axis: &str) -> Result<usize> {
    if !inches.is_finite() || inches <= 0.0 {
        return Err(StitchError::Resize(format!(
            "paper {axis} must be a positive number of inches, got {inches}"
        )));
    }
    let px = (inches * f64::from(dpi)).round();
    if px < 1.0 || px > f64::from(u32::MAX) {
        return Err(StitchError::Resize(format!(
            "paper {axis} of {inches}in at {dpi}dpi resolves to {px} pixels"
        )));
    }
    Ok(px as usize)
}

/// Named paper sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperPreset {
    /// 8.5 × 11 in.
    Letter,
    /// 8.5 × 13 in.
    Folio,
    /// 8.5 × 14 in.
    Legal,
    /// 210 × 297 mm.
    A4,
}

impl PaperPreset {
    /// `(width, height)` in inches.
    pub fn size_in(self) -> (f64, f64) {
        match self {
            Self::Letter => (8.5, 11.0),
            Self::Folio => (8.5, 13.0),
            Self::Legal => (8.5, 14.0),
            Self::A4 => (210.0 / MM_PER_INCH, 297.0 / MM_PER_INCH),
        }
    }
}

impl std::fmt::Display for PaperPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A4 => write!(f, "A4 (210 x 297 mm)"),
            _ => {
                let (w, h) = self.size_in();
                write!(f, "{w} x {h} inches")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_at_300_dpi() {
        let spec = PaperSpec::from_preset(PaperPreset::Letter, DEFAULT_DPI);
        assert_eq!(spec.target_pixels().unwrap(), (2550, 3300));
    }

    #[test]
    fn a4_rounds_to_nearest_pixel() {
        let spec = PaperSpec::from_preset(PaperPreset::A4, 300);
        assert_eq!(spec.target_pixels().unwrap(), (2480, 3508));
    }

    #[test]
    fn invalid_specs_are_resize_errors() {
        for spec in [
            PaperSpec::new(8.5, 11.0, 0),
            PaperSpec::new(0.0, 11.0, 300),
            PaperSpec::new(-1.0, 11.0, 300),
            PaperSpec::new(8.5, f64::INFINITY, 300),
            PaperSpec::new(0.001, 11.0, 300),
        ] {
            assert!(
                matches!(spec.target_pixels(), Err(StitchError::Resize(_))),
                "{spec:?} should not resolve"
            );
        }
    }

    #[test]
    fn oversized_page_is_rejected_before_allocation() {
        let spec = PaperSpec::new(1e5, 1e5, 300);
        assert!(matches!(spec.target_pixels(), Err(StitchError::Resize(_))));
        // 40 x 40 in at 800 dpi is 32000 x 32000, just under the limit.
        assert!(PaperSpec::new(40.0, 40.0, 800).target_pixels().is_ok());
        assert!(PaperSpec::new(40.0, 40.0, 820).target_pixels().is_err());
    }

    #[test]
    fn preset_labels() {
        assert_eq!(PaperPreset::Folio.to_string(), "8.5 x 13 inches");
    }
}
