use crate::image::io::OutputFormat;
use crate::paper::{PaperPreset, PaperSpec, DEFAULT_DPI};
use crate::pipeline::StitchParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StitchToolConfig {
    pub top: PathBuf,
    pub bottom: PathBuf,
    #[serde(default)]
    pub paper: PaperConfig,
    #[serde(default)]
    pub params: StitchParams,
    pub output: StitchOutputConfig,
}

/// Either a named preset or explicit inches; explicit sizes win.
#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaperConfig {
    pub preset: Option<PaperPreset>,
    pub width_in: Option<f64>,
    pub height_in: Option<f64>,
    pub dpi: u32,
}

impl Default for PaperConfig {
    fn default() -> Self {
        Self {
            preset: None,
            width_in: None,
            height_in: None,
            dpi: DEFAULT_DPI,
        }
    }
}

impl PaperConfig {
    pub fn resolve(&self) -> Result<PaperSpec, String> {
        match (self.width_in, self.height_in) {
            (Some(w), Some(h)) => Ok(PaperSpec::new(w, h, self.dpi)),
            (None, None) => Ok(PaperSpec::from_preset(
                self.preset.unwrap_or(PaperPreset::Folio),
                self.dpi,
            )),
            _ => Err("paper needs both widthIn and heightIn, or neither".to_string()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StitchOutputConfig {
    pub image: PathBuf,
    /// Inferred from the image extension when absent.
    pub format: Option<OutputFormat>,
    pub report_json: Option<PathBuf>,
}

impl StitchOutputConfig {
    pub fn resolve_format(&self) -> Result<OutputFormat, String> {
        self.format
            .or_else(|| OutputFormat::from_path(&self.image))
            .ok_or_else(|| {
                format!(
                    "Cannot infer output format from {}; set output.format to pdf, png or jpg",
                    self.image.display()
                )
            })
    }
}

pub fn load_config(path: &Path) -> Result<StitchToolConfig, String> {
    super::read_json(path)
}
