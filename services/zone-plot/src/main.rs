//! Zone plot renderer.
//!
//! Reads a plot job written by the calculation service and either exports
//! the high-resolution PNG or writes the live-view heatmap for inspection.

mod job;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use zone_renderer::{
    png, DirectorySink, DisplayConfig, ExportController, LiveView, NumericOverlay, PlotInputs,
};

use job::PlotJob;

#[derive(Parser, Debug)]
#[command(name = "zone-plot")]
#[command(about = "Render calculation-zone plots")]
struct Args {
    /// Plot job file (JSON)
    job: PathBuf,

    /// Display configuration file (YAML)
    #[arg(short, long, env = "ZONE_PLOT_CONFIG")]
    config: Option<PathBuf>,

    /// Directory to write output into
    #[arg(short, long, default_value = ".", env = "ZONE_PLOT_OUT_DIR")]
    out_dir: PathBuf,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export the plot as a high-resolution PNG
    Export,
    /// Write the native-resolution heatmap and log the overlay summary
    Preview,
}

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.log_json)?;

    let display = match &args.config {
        Some(path) => DisplayConfig::load(path)
            .with_context(|| format!("failed to load display config {}", path.display()))?,
        None => DisplayConfig::default(),
    };
    let job = PlotJob::load(&args.job)?;

    // Exports borrow the controller across await points on one thread
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match args.command {
        Command::Export => runtime.block_on(export(&job, &display, &args.out_dir)),
        Command::Preview => preview(&job, &display, &args.out_dir),
    }
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder().with_max_level(level).with_target(true);
    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

async fn export(job: &PlotJob, display: &DisplayConfig, out_dir: &Path) -> Result<()> {
    let grid = job.grid()?;
    let lamps = job.enabled_lamps();
    let tlv_table = job.tlv_table();
    let inputs = PlotInputs {
        grid: &grid,
        zone: &job.zone,
        room: &job.room,
        lamps: &lamps,
        tlv_table: &tlv_table,
        display,
    };

    let controller = ExportController::with_font_path(display.font_path.as_deref());
    let sink = DirectorySink::new(out_dir);
    let receipt = controller.export(&inputs, &sink).await.map_err(|e| {
        tracing::error!(notice = e.user_notice(), "{}", e);
        e
    })?;

    info!(
        path = %sink.path_for(&receipt.filename).display(),
        width = receipt.width,
        height = receipt.height,
        bytes = receipt.size_bytes,
        "Exported plot"
    );
    Ok(())
}

fn preview(job: &PlotJob, display: &DisplayConfig, out_dir: &Path) -> Result<()> {
    let grid = job.grid()?;
    let lamps = job.enabled_lamps();
    let tlv_table = job.tlv_table();
    let inputs = PlotInputs {
        grid: &grid,
        zone: &job.zone,
        room: &job.room,
        lamps: &lamps,
        tlv_table: &tlv_table,
        display,
    };

    let frame = LiveView::new().render(&inputs)?;
    let bytes = png::encode_png(&frame.heatmap)?;

    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let path = out_dir.join(preview_filename(&job.zone));
    std::fs::write(&path, &bytes).with_context(|| format!("failed to write {}", path.display()))?;

    let numeric = match &frame.numeric {
        NumericOverlay::Off => "off".to_string(),
        NumericOverlay::Values(labels) => format!("{} values", labels.len()),
        NumericOverlay::TooDense => "too dense".to_string(),
    };
    info!(
        path = %path.display(),
        cells = grid.n_u() * grid.n_v(),
        overlay_commands = frame.overlay.len(),
        numeric = %numeric,
        "Wrote preview heatmap"
    );
    for text in frame.overlay.texts() {
        tracing::debug!(text, "overlay text");
    }
    Ok(())
}

fn preview_filename(zone: &zone_common::ZoneRecord) -> String {
    let export = zone_renderer::export_filename(zone);
    match export.strip_suffix(".png") {
        Some(stem) => format!("{}_preview.png", stem),
        None => format!("{}_preview", export),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::fixtures;

    fn job() -> PlotJob {
        PlotJob {
            zone: fixtures::zones::skin_limits(),
            room: fixtures::rooms::small_office(),
            lamps: fixtures::lamps::single_ceiling(),
            values: test_utils::create_lamp_field(8, 12, 3.0, 1.0),
            tlv_limits: None,
        }
    }

    #[test]
    fn test_preview_filename() {
        assert_eq!(preview_filename(&fixtures::zones::skin_limits()), "Skin_Dose_8_Hours_preview.png");
    }

    #[test]
    fn test_preview_writes_native_heatmap() {
        let dir = tempfile::tempdir().unwrap();
        preview(&job(), &DisplayConfig::default(), dir.path()).unwrap();

        let bytes = std::fs::read(dir.path().join("Skin_Dose_8_Hours_preview.png")).unwrap();
        let img = image::load_from_memory(&bytes).unwrap();
        assert_eq!((img.width(), img.height()), (8, 12));
    }

    #[tokio::test]
    async fn test_export_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        export(&job(), &DisplayConfig::default(), dir.path()).await.unwrap();
        assert!(dir.path().join("Skin_Dose_8_Hours.png").exists());
    }
}
