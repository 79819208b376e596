use scan_stitch::config::overlap_probe;
use scan_stitch::image::canvas::paste;
use scan_stitch::image::io::{load_rgb_image, save_image, write_json_file, OutputFormat};
use scan_stitch::image::PixelBuffer;
use scan_stitch::overlap::{find_overlap_traced, score_profile, ScoreSample, SearchTrace};
use scan_stitch::paper::DEFAULT_DPI;
use scan_stitch::types::OverlapResult;
use serde::Serialize;
use std::env;
use std::path::Path;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = overlap_probe::load_config(Path::new(&config_path))?;

    let top = load_rgb_image(&config.top)?;
    let bottom = load_rgb_image(&config.bottom)?;

    let (result, trace) =
        find_overlap_traced(&top, &bottom, &config.overlap).map_err(|e| e.to_string())?;
    let profile = score_profile(&top, &bottom, &config.overlap).map_err(|e| e.to_string())?;

    let output = ProbeOutput {
        top: top.dimensions(),
        bottom: bottom.dimensions(),
        threshold: config.overlap.sad_threshold,
        result,
        trace,
        profile,
    };
    write_json_file(&config.output.profile_json, &output)?;
    println!(
        "Saved score profile with {} candidates to {}",
        output.profile.len(),
        config.output.profile_json.display()
    );

    if let Some(path) = &config.output.seam_image {
        let seam_rows = output
            .trace
            .best
            .map(|b| b.height)
            .unwrap_or(config.overlap.min_strip)
            .min(top.height())
            .min(bottom.height());
        let seam = seam_preview(&top, &bottom, seam_rows).map_err(|e| e.to_string())?;
        save_image(&seam, path, OutputFormat::Png, DEFAULT_DPI)?;
        println!("Saved seam preview ({seam_rows} rows) to {}", path.display());
    }
    Ok(())
}

/// Bottom strip of `top` above the top strip of `bottom`, split by a red row.
fn seam_preview(
    top: &PixelBuffer,
    bottom: &PixelBuffer,
    rows: usize,
) -> scan_stitch::Result<PixelBuffer> {
    let width = top.width().max(bottom.width());
    let mut out = PixelBuffer::white(width, rows * 2 + 1)?;
    paste(&mut out, &top.bottom_band(rows), 0, 0);
    for x in 0..width {
        out.set_pixel(x, rows, [255, 0, 0]);
    }
    paste(&mut out, &bottom.top_band(rows), 0, rows + 1);
    Ok(out)
}

fn usage() -> String {
    "Usage: overlap_probe <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProbeOutput {
    top: (usize, usize),
    bottom: (usize, usize),
    threshold: f64,
    result: OverlapResult,
    trace: SearchTrace,
    profile: Vec<ScoreSample>,
}
