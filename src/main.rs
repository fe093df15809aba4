// src/main.rs
mod gui;
mod trace;
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use eframe::egui;
use log::info;
use trace::{render_trace_png, PlotStyle, TraceLayout, TracePipeline};
#[derive(Parser, Debug)]
#[command(name = "flocra-plot")]
#[command(version)]
#[command(about = "Plots the CSV trace written by flocra_sim, so the expected pulse sequence can be inspected.", long_about = None)]
struct Args {
    /// CSV file written by flocra_sim
    #[arg(value_name = "CSV_FILE", index = 1)]
    csv_file: Option<PathBuf>,
    /// Channel layout (JSON) to use instead of the built-in OCRA1 layout
    #[arg(long, value_name = "JSON")]
    layout: Option<PathBuf>,
    /// Render a PNG to this path instead of opening a window
    #[arg(long, value_name = "PATH")]
    png: Option<PathBuf>,
    /// Verbose logging, including per-group decode ranges
    #[arg(long)]
    debug: bool,
}
fn usage(program: &str) -> String {
    format!("Usage: ./{program} <csv_file.csv>\n\t Example: ./{program} ../build/flocra_sim.csv\n")
}
fn program_name() -> String {
    std::env::args()
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "flocra-plot".to_owned())
}
fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);
    run(args)
}
fn run(args: Args) -> Result<()> {
    // A missing file argument is not an error: print usage and leave.
    let Some(csv_file) = args.csv_file.as_deref() else {
        print!("{}", usage(&program_name()));
        return Ok(());
    };
    let layout = match &args.layout {
        Some(path) => TraceLayout::from_json_file(path)
            .with_context(|| format!("failed to load layout {}", path.display()))?,
        None => TraceLayout::ocra1(),
    };
    let trace = TracePipeline::new(layout)
        .load_path(csv_file)
        .with_context(|| format!("failed to decode {}", csv_file.display()))?;
    let (start, end) = trace.timebase.span_us();
    info!(
        "{} samples from {start:.3} us to {end:.3} us",
        trace.num_samples()
    );
    if let Some(png_path) = &args.png {
        let png = render_trace_png(&trace, &PlotStyle::default())?;
        fs::write(png_path, png)
            .with_context(|| format!("failed to write {}", png_path.display()))?;
        info!("figure written to {}", png_path.display());
        return Ok(());
    }
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1200.0, 800.0])
        .with_title(format!("flocra trace: {}", csv_file.display()));
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let app = gui::TraceViewerApp::new(&trace);
    eframe::run_native(
        "flocra-plot",
        options,
        Box::new(move |_cc| Box::new(app)),
    )
    .map_err(|err| anyhow!("display backend failed: {err}"))
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn usage_is_two_lines_with_example() {
        let text = usage("flocra-plot");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "Usage: ./flocra-plot <csv_file.csv>");
        assert_eq!(lines[1], "\t Example: ./flocra-plot ../build/flocra_sim.csv");
    }
    #[test]
    fn file_argument_is_optional() {
        let args = Args::try_parse_from(["flocra-plot"]).unwrap();
        assert!(args.csv_file.is_none());
        assert!(!args.debug);
        let args =
            Args::try_parse_from(["flocra-plot", "--debug", "--png", "out.png", "sim.csv"]).unwrap();
        assert_eq!(args.csv_file, Some(PathBuf::from("sim.csv")));
        assert_eq!(args.png, Some(PathBuf::from("out.png")));
        assert!(args.debug);
    }
    #[test]
    fn missing_file_prints_usage_and_succeeds() {
        let args = Args::try_parse_from(["flocra-plot", "--debug"]).unwrap();
        assert!(run(args).is_ok());
    }
    #[test]
    fn unreadable_file_is_fatal() {
        let args = Args::try_parse_from(["flocra-plot", "/nonexistent/flocra_sim.csv"]).unwrap();
        let err = run(args).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/flocra_sim.csv"));
    }
    #[test]
    fn second_positional_is_rejected() {
        assert!(Args::try_parse_from(["flocra-plot", "a.csv", "b.csv"]).is_err());
    }
}
