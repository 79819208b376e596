use crate::overlap::OverlapParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapProbeConfig {
    pub top: PathBuf,
    pub bottom: PathBuf,
    #[serde(default)]
    pub overlap: OverlapParams,
    pub output: OverlapProbeOutput,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlapProbeOutput {
    pub profile_json: PathBuf,
    /// Optional PNG of the top scan's bottom strip next to the bottom scan's
    /// top strip at the detected overlap.
    pub seam_image: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<OverlapProbeConfig, String> {
    super::read_json(path)
}
