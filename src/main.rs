//! Command-line converter: free-form coordinate text (or an existing
//! GeoJSON/KML file) in, GeoJSON or KML out.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};

use latlon_polygon::formats::{geojson, kml};
use latlon_polygon::{parse_text, ParseOutcome};

#[derive(Parser)]
#[command(
    version,
    about = "Convert free-form coordinate listings into polygon files"
)]
struct Cli {
    /// Input file; reads standard input when omitted
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "geojson")]
    format: Format,

    /// Output file; writes to standard output when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Geojson,
    Kml,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let source = match &cli.input {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
        }
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading standard input")?;
            buffer
        }
    };

    let outcome = convert(&source)?;
    for skip in &outcome.skipped {
        eprintln!("skipped `{}`: {}", skip.fragment, skip.reason);
    }
    if let Some(notation) = outcome.notation {
        log::info!("input classified as {notation:?}");
    }

    let rendered = match cli.format {
        Format::Geojson => geojson::write_geojson(&outcome.polygons),
        Format::Kml => kml::write_kml(&outcome.polygons),
    };
    match &cli.output {
        Some(path) => {
            fs::write(path, rendered).with_context(|| format!("writing {}", path.display()))?
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

/// Sniffs the input kind: a GeoJSON object, a KML document, or raw
/// coordinate text.
fn convert(source: &str) -> anyhow::Result<ParseOutcome> {
    let trimmed = source.trim_start();
    if trimmed.starts_with('{') {
        return geojson::read_geojson(source).context("parsing GeoJSON input");
    }
    if trimmed.starts_with('<') {
        return kml::read_kml(source).context("parsing KML input");
    }
    match parse_text(source) {
        Ok(outcome) => Ok(outcome),
        Err(e) => bail!("could not parse coordinate text: {e}"),
    }
}
