use scan_stitch::config::stitch;
use scan_stitch::image::io::{load_rgb_image, save_image, write_json_file};
use scan_stitch::Stitcher;
use std::env;
use std::path::Path;

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "scan_stitch=info");
    }
    env_logger::init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = stitch::load_config(Path::new(&config_path))?;
    let paper = config.paper.resolve()?;
    let format = config.output.resolve_format()?;

    let top = load_rgb_image(&config.top)?;
    let bottom = load_rgb_image(&config.bottom)?;
    log::info!(
        "Loaded top {}x{} and bottom {}x{}",
        top.width(),
        top.height(),
        bottom.width(),
        bottom.height()
    );

    let stitcher = Stitcher::new(config.params);
    let (page, report) = stitcher
        .process_with_report(top, bottom, &paper)
        .map_err(|e| e.to_string())?;
    log::info!("{}", report.summary());

    save_image(&page, &config.output.image, format, paper.dpi)?;
    println!(
        "Saved {} page ({}x{}) to {}",
        format,
        page.width(),
        page.height(),
        config.output.image.display()
    );

    if let Some(path) = &config.output.report_json {
        write_json_file(path, &report)?;
        println!("Saved stitch report to {}", path.display());
    }
    Ok(())
}

fn usage() -> String {
    "Usage: scan-stitch <config.json>".to_string()
}
