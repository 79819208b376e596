use serde::{Deserialize, Serialize};

/// Named kernels selectable from configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PyramidFilter {
    #[default]
    Gaussian5,
    Binomial3,
}

impl PyramidFilter {
    /// Normalised 1D taps, applied along rows then columns.
    pub fn taps(self) -> &'static [f32] {
        match self {
            // [1, 4, 6, 4, 1] / 16
            Self::Gaussian5 => &[0.0625, 0.25, 0.375, 0.25, 0.0625],
            // [1, 2, 1] / 4
            Self::Binomial3 => &[0.25, 0.5, 0.25],
        }
    }
}

/// Options controlling pyramid construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PyramidOptions {
    /// Number of pyramid levels (>= 1).
    pub levels: usize,
    /// Number of initial downscale steps that apply the separable filter
    /// (`k >= levels` → blur everywhere, `0` → plain decimation).
    pub blur_levels: usize,
    /// Kernel used for the separable blur stage.
    pub filter: PyramidFilter,
}

impl Default for PyramidOptions {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PyramidOptions {
    pub fn new(levels: usize) -> Self {
        Self {
            levels,
            blur_levels: usize::MAX,
            filter: PyramidFilter::Gaussian5,
        }
    }

    pub fn with_blur_levels(mut self, blur_levels: usize) -> Self {
        self.blur_levels = blur_levels;
        self
    }

    pub fn with_filter(mut self, filter: PyramidFilter) -> Self {
        self.filter = filter;
        self
    }
}
