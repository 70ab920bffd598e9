//! CLI tool for dashchart - renders a chart spec to SVG or draw commands
//!
//! Usage:
//!   dashchart_cli <spec.json>                      # SVG to stdout
//!   dashchart_cli <spec.json> -o chart.svg         # SVG to file
//!   dashchart_cli <spec.json> --format json        # Draw commands as JSON
//!   dashchart_cli <spec.json> --config c.json --style s.json
//!
//! Set `RUST_LOG=dashchart=debug` to trace rendering.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};
use std::process;

use dashchart::{
    render_chart, render_svg, ChartConfig, ChartSpec, ChartStyle, CommandRecorder, RenderParams,
};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: dashchart_cli <spec.json> [-o output] [--format svg|json] \
                     [--style style.json] [--config config.json]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Svg,
    Json,
}

struct Args {
    input: String,
    output: Option<String>,
    format: Format,
    style: Option<String>,
    config: Option<String>,
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    process::exit(1);
}

fn parse_args(args: &[String]) -> Args {
    let mut input = None;
    let mut output = None;
    let mut format = Format::Svg;
    let mut style = None;
    let mut config = None;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        let flag = arg.as_str();
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .unwrap_or_else(|| fail(&format!("{flag} needs a value\n{USAGE}")))
        };
        match flag {
            "-o" | "--output" => output = Some(value(flag)),
            "--style" => style = Some(value(flag)),
            "--config" => config = Some(value(flag)),
            "--format" => {
                format = match value(flag).as_str() {
                    "svg" => Format::Svg,
                    "json" => Format::Json,
                    other => fail(&format!("Unknown format '{other}'\n{USAGE}")),
                }
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                process::exit(0);
            }
            _ if input.is_none() => input = Some(arg.clone()),
            _ => fail(&format!("Unexpected argument '{arg}'\n{USAGE}")),
        }
    }

    Args {
        input: input.unwrap_or_else(|| fail(USAGE)),
        output,
        format,
        style,
        config,
    }
}

fn read(path: &str) -> String {
    fs::read_to_string(path)
        .map_err(dashchart::DashchartError::from)
        .unwrap_or_else(|e| fail(&format!("Error reading {path}: {e}")))
}

fn render_json(
    spec: &ChartSpec,
    config: &ChartConfig,
    style: &ChartStyle,
) -> dashchart::Result<String> {
    let mut recorder = CommandRecorder::new(f64::from(spec.width), f64::from(spec.height));
    render_chart(&mut recorder, &RenderParams::new(spec, config, style))?;
    recorder.to_json()
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let args = parse_args(&args);

    let spec = ChartSpec::from_json(&read(&args.input))
        .unwrap_or_else(|e| fail(&format!("Error parsing spec: {e}")));
    let config = match &args.config {
        Some(path) => ChartConfig::from_json(&read(path))
            .unwrap_or_else(|e| fail(&format!("Error parsing config: {e}"))),
        None => ChartConfig::default(),
    };
    let style = match &args.style {
        Some(path) => ChartStyle::from_json(&read(path))
            .unwrap_or_else(|e| fail(&format!("Error parsing style: {e}"))),
        None => ChartStyle::default(),
    };

    let rendered = match args.format {
        Format::Svg => render_svg(&spec, &config, &style),
        Format::Json => render_json(&spec, &config, &style),
    };
    let rendered = rendered.unwrap_or_else(|e| fail(&format!("Error rendering chart: {e}")));

    match args.output {
        Some(path) => {
            fs::write(&path, &rendered)
                .map_err(dashchart::DashchartError::from)
                .unwrap_or_else(|e| fail(&format!("Error writing {path}: {e}")));
            eprintln!("Written: {path}");
        }
        None => {
            io::stdout().write_all(rendered.as_bytes()).unwrap();
            if args.format == Format::Json {
                println!();
            }
        }
    }
}
