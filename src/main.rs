//! Caspr - Spreadsheets for multi-stage geocaches

mod config;

use anyhow::{Context, Result};
use caspr_core::{
    CacheFileParser, Caches, DirectorySource, FileSheetWriter, Format, LayoutOptions,
    StreamSheetWriter,
};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Turn the stage descriptions of multi-stage caches into spreadsheets
/// whose formulas compute the coordinates.
#[derive(Parser, Debug)]
#[command(name = "caspr", version, about)]
struct Args {
    /// Cache codes, e.g. GC2A62B. Each is read from <PAGES>/<CODE>.toml.
    #[arg(required = true)]
    codes: Vec<String>,

    /// Directory holding the cache files.
    #[arg(short, long, default_value = ".")]
    pages: PathBuf,

    /// Directory to write sheets into.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format: grd, csv or json.
    #[arg(short, long)]
    format: Option<Format>,

    /// Print sheets to stdout instead of writing files.
    #[arg(long)]
    stdout: bool,

    /// Settings file (default: settings.toml in the user config directory).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// More logging; repeat for debug output.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<()> {
    let (settings, warnings) = config::load_settings(args.config.as_deref());
    for warning in warnings {
        eprintln!("Warning: {}", warning);
    }
    tracing::debug!(?settings, "settings loaded");

    let options = LayoutOptions::from_letters(&settings.variable_column, &settings.formula_column)
        .context("invalid column in settings")?;
    let format = args.format.unwrap_or(settings.format);
    let source = DirectorySource::new(&args.pages);

    let diagnostics = if args.stdout {
        let writer = StreamSheetWriter::new(std::io::stdout().lock(), format);
        Caches::new(source, CacheFileParser, writer, options).prepare(&args.codes)?
    } else {
        let output_dir = args.output.unwrap_or(settings.output_dir);
        let writer = FileSheetWriter::new(output_dir, format);
        let mut caches = Caches::new(source, CacheFileParser, writer, options);
        let diagnostics = caches.prepare(&args.codes)?;
        for path in caches.into_writer().written() {
            println!("Wrote {}", path.display());
        }
        diagnostics
    };

    if !diagnostics.is_empty() {
        eprintln!(
            "Warning: {} stage(s) use undefined variables; their letters were left in the formulas",
            diagnostics.len()
        );
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
