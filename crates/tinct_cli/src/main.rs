//! Tinct CLI
//!
//! Expands the root color custom properties of a stylesheet into the
//! derived `-rgb`, `-contrast` and HSL properties, and converts single
//! colors between hex, RGBA and HSLA.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tinct_core::{parse_hex_color, Hsla, Rgba};
use tinct_theme::{expand_custom_properties, DerivedProperties, OutputFormat, RootStylesheet};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use config::TinctConfig;

/// Derive theme custom properties from root colors
#[derive(Parser, Debug)]
#[command(name = "tinct")]
#[command(about = "Derive RGB, contrast and HSL custom properties from root colors")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Expand color properties declared in a stylesheet's :root
    Expand {
        /// Stylesheet to read
        file: PathBuf,

        /// Property to expand, without `--` (repeatable)
        #[arg(short, long = "name", value_name = "NAME")]
        names: Vec<String>,

        /// Output format: css, style-tag or pretty
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Config file (defaults to ./tinct.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Convert a single hex color
    Convert {
        /// Hex color such as #1e66f5, fff or #33669980
        color: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Expand {
            file,
            names,
            format,
            config,
        } => cmd_expand(file, names, format, config),
        Commands::Convert { color, json } => cmd_convert(&color, json),
    }
}

/// Logs go to stderr so stdout carries only the generated output
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_expand(
    file: PathBuf,
    names: Vec<String>,
    format: Option<OutputFormat>,
    config: Option<PathBuf>,
) -> Result<()> {
    let config = match config {
        Some(path) => TinctConfig::load_from_path(&path)?,
        None => {
            let cwd = std::env::current_dir().context("Failed to read current directory")?;
            TinctConfig::discover(&cwd)?
        }
    };
    let settings = config.expand.with_overrides(names, format);
    debug!(names = ?settings.names, format = %settings.format, "expand settings");

    let sheet = RootStylesheet::from_file(&file)
        .with_context(|| format!("Failed to load stylesheet {}", file.display()))?;
    info!(
        file = %file.display(),
        variables = sheet.variable_count(),
        "loaded stylesheet"
    );

    let block = expand_custom_properties(&settings.names, &sheet);
    if block.is_empty() {
        warn!("no color properties expanded");
    }

    let output = block.render(settings.format);
    if output.ends_with('\n') {
        print!("{output}");
    } else {
        println!("{output}");
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct ConvertReport {
    hex: String,
    rgba: Rgba,
    hsla: Hsla,
    derived: DerivedProperties,
}

impl ConvertReport {
    fn new(input: &str) -> Result<Self> {
        let rgba = parse_hex_color(input).with_context(|| format!("Invalid color `{input}`"))?;
        Ok(Self {
            hex: rgba.to_hex_string(),
            rgba,
            hsla: rgba.to_hsla(),
            derived: DerivedProperties::from_rgba(rgba),
        })
    }

    fn to_text(&self) -> String {
        format!(
            "hex:      {}\nrgb:      {}\nhsla:     {}\ncontrast: {} ({})\n",
            self.hex,
            self.derived.rgb_triplet,
            self.hsla,
            self.derived.contrast_hex,
            self.derived.contrast_rgb_triplet,
        )
    }
}

fn cmd_convert(color: &str, json: bool) -> Result<()> {
    let report = ConvertReport::new(color)?;
    if json {
        let text = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{text}");
    } else {
        print!("{}", report.to_text());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_expand() {
        let cli = Cli::try_parse_from([
            "tinct", "expand", "theme.css", "-n", "primary", "--name", "accent", "-f", "pretty",
        ])
        .unwrap();
        match cli.command {
            Commands::Expand {
                file,
                names,
                format,
                config,
            } => {
                assert_eq!(file, PathBuf::from("theme.css"));
                assert_eq!(names, vec!["primary", "accent"]);
                assert_eq!(format, Some(OutputFormat::Pretty));
                assert!(config.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["tinct", "expand", "theme.css", "--format", "yaml"]).is_err());
    }

    #[test]
    fn test_cli_global_verbose() {
        let cli = Cli::try_parse_from(["tinct", "convert", "#fff", "-v"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_convert_report() {
        let report = ConvertReport::new("#336699").unwrap();
        assert_eq!(report.hex, "#336699ff");
        assert_eq!((report.hsla.h, report.hsla.s, report.hsla.l), (210, 50, 40));
        assert_eq!(report.derived.contrast_hex, "#ffffff");

        let text = report.to_text();
        assert!(text.contains("rgb:      51,102,153"));
        assert!(text.contains("contrast: #ffffff (255,255,255)"));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["rgba"]["g"], 102);
        assert_eq!(json["derived"]["h"], 210);
    }

    #[test]
    fn test_convert_rejects_bad_color() {
        assert!(ConvertReport::new("#12").is_err());
        assert!(ConvertReport::new("blue").is_err());
    }
}
