use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use clap::Parser;
use flate2::bufread::GzDecoder;
use fxprof_markers::format::format_timestamp_relative;
use fxprof_markers::{
    compose_tooltip, derive_markers, DeriveOptions, MarkerSchemaRegistry, MarkerTooltip,
    ProfileContext, RawMarkerEvent,
};
use serde_derive::Serialize;
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(
    name = "fxprof-markers",
    version,
    about = r#"
fxprof-markers derives markers from the raw marker events of a Gecko profile
and prints the tooltip of each marker.

EXAMPLES:
    # Print the tooltips of the events in events.json:
    fxprof-markers events.json

    # With thread names and pages, and extra marker schemas:
    fxprof-markers events.json.gz --context context.json --schemas profile.json --json
"#
)]
struct Opt {
    /// A JSON array of raw marker events. Files ending in .gz are decompressed.
    events: PathBuf,

    /// A file with marker schemas, either a markerSchema array or a processed profile.
    #[arg(long)]
    schemas: Option<PathBuf>,

    /// A file with thread names, pages and the profile's zero time.
    #[arg(long)]
    context: Option<PathBuf>,

    /// The profile's zero time in milliseconds. Overrides the context file.
    #[arg(long)]
    zero_at: Option<f64>,

    /// Stop at the first event whose payload can't be read.
    #[arg(long)]
    strict: bool,

    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("Could not open file {0:?}: {1}")]
    Open(PathBuf, #[source] std::io::Error),

    #[error("Could not parse {0:?} as JSON: {1}")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("Could not load the marker schemas from {0:?}: {1}")]
    Schemas(PathBuf, #[source] fxprof_markers::MarkerError),

    #[error("Could not derive markers: {0}")]
    Derive(#[source] fxprof_markers::MarkerError),

    #[error("Could not write the output: {0}")]
    Output(#[source] serde_json::Error),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MarkerOutput {
    name: String,
    start: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    end: Option<f64>,
    incomplete: bool,
    tooltip: MarkerTooltip,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let opt = Opt::parse();
    if let Err(err) = run(opt) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run(opt: Opt) -> Result<(), CliError> {
    let events: Vec<RawMarkerEvent> = read_json(&opt.events)?;

    let mut registry = MarkerSchemaRegistry::with_builtin_schemas();
    if let Some(path) = &opt.schemas {
        let schemas: serde_json::Value = read_json(path)?;
        let count = registry
            .extend_from_json(&schemas)
            .map_err(|err| CliError::Schemas(path.clone(), err))?;
        log::info!("Loaded {count} marker schemas from {path:?}");
    }

    let mut context = match &opt.context {
        Some(path) => read_json(path)?,
        None => ProfileContext::new(),
    };
    if let Some(zero_at) = opt.zero_at {
        context = context.with_zero_at(zero_at);
    }

    let options = DeriveOptions {
        skip_malformed_payloads: !opt.strict,
    };
    let derived = derive_markers(&events, &options, &context).map_err(CliError::Derive)?;
    for diagnostic in &derived.diagnostics {
        eprintln!("Warning: {diagnostic}");
    }

    let output: Vec<MarkerOutput> = derived
        .markers
        .iter()
        .map(|marker| MarkerOutput {
            name: marker.name.clone(),
            start: marker.start,
            end: marker.end,
            incomplete: marker.incomplete,
            tooltip: compose_tooltip(marker, &registry, &context),
        })
        .collect();

    if opt.json {
        let stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(stdout, &output).map_err(CliError::Output)?;
        println!();
    } else {
        for marker in &output {
            print_marker(marker, context.zero_at());
        }
    }
    Ok(())
}

fn print_marker(marker: &MarkerOutput, zero_at: f64) {
    let tooltip = &marker.tooltip;
    match &tooltip.duration {
        Some(duration) => println!(
            "{} {} ({duration})",
            format_timestamp_relative(marker.start, zero_at),
            tooltip.title
        ),
        None => println!(
            "{} {}",
            format_timestamp_relative(marker.start, zero_at),
            tooltip.title
        ),
    }
    for detail in &tooltip.details {
        println!("    {}: {}", detail.label, detail.value);
    }
    if let Some(cause) = &tooltip.cause {
        let kind = if cause.is_async { "async" } else { "sync" };
        println!("    Cause ({kind}): stack {}", cause.stack.0);
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let file = File::open(path).map_err(|err| CliError::Open(path.to_owned(), err))?;
    let reader = BufReader::new(file);

    // Handle .gz files
    let reader: Box<dyn Read> = if path.extension() == Some(OsStr::new("gz")) {
        Box::new(GzDecoder::new(reader))
    } else {
        Box::new(reader)
    };
    serde_json::from_reader(BufReader::new(reader))
        .map_err(|err| CliError::Json(path.to_owned(), err))
}
