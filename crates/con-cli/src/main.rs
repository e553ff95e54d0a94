//! `con` CLI — encode, decode, and analyze CON files from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Encode JSON to CON (stdin → stdout)
//! echo '{"name":"Alice","age":30}' | con encode
//!
//! # Encode from file to file
//! con encode -i data.json -o data.con
//!
//! # Encode with field filtering
//! echo '{"name":"Event","etag":"abc"}' | con encode --filter etag
//!
//! # Encode with Google Calendar preset filter
//! con encode --filter-preset google -i calendar.json
//!
//! # Decode CON back to pretty-printed JSON
//! con decode -i data.con
//!
//! # Show compression statistics
//! con stats -i data.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use con_core::CalendarFilter;
use std::io::{self, Read};

#[derive(Parser)]
#[command(name = "con", version, about = "CON (Compact Object Notation) CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode JSON to CON format
    Encode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Comma-separated field patterns to strip before encoding
        #[arg(long)]
        filter: Option<String>,
        /// Use a predefined filter preset (e.g., "google" for Google Calendar)
        #[arg(long)]
        filter_preset: Option<String>,
        /// Active delimiter for inline arrays, tabular rows, and field lists
        #[arg(long, value_enum, default_value = "comma")]
        delimiter: DelimiterArg,
        /// Reject tab indentation and require exact 2-space nesting
        #[arg(long)]
        strict: bool,
        /// Minimum array length before a tabular-eligible array is tabularized
        #[arg(long, default_value_t = 2)]
        min_tabular_length: usize,
    },
    /// Decode CON back to JSON format
    Decode {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Enforce indentation regularity and header count assertions
        #[arg(long)]
        strict: bool,
    },
    /// Show encoding statistics (byte size and estimated token counts)
    Stats {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum DelimiterArg {
    Comma,
    Tab,
    Pipe,
}

impl From<DelimiterArg> for con_core::Delimiter {
    fn from(d: DelimiterArg) -> Self {
        match d {
            DelimiterArg::Comma => con_core::Delimiter::Comma,
            DelimiterArg::Tab => con_core::Delimiter::Tab,
            DelimiterArg::Pipe => con_core::Delimiter::Pipe,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            Cli::parse_from(["con", "--help"]);
            unreachable!();
        }
    };

    match command {
        Commands::Encode {
            input,
            output,
            filter,
            filter_preset,
            delimiter,
            strict,
            min_tabular_length,
        } => {
            let json = read_input(input.as_deref())?;
            let patterns = build_filter_patterns(filter.as_deref(), filter_preset.as_deref())?;

            let filtered_json = if patterns.is_empty() {
                json
            } else {
                let value: serde_json::Value =
                    serde_json::from_str(&json).context("Input is not valid JSON")?;
                let pattern_refs: Vec<&str> = patterns.iter().map(|s| s.as_str()).collect();
                serde_json::to_string(&con_core::filter_fields(&value, &pattern_refs))?
            };

            let parsed: serde_json::Value =
                serde_json::from_str(&filtered_json).context("Input is not valid JSON")?;
            let normalized = con_core::normalize(parsed).context("Failed to normalize JSON")?;
            let opts = con_core::EmitOptions {
                delimiter: delimiter.into(),
                strict_arrays: strict,
                min_tabular_length,
                ..con_core::EmitOptions::default()
            };
            let con = con_core::serialize(&normalized, &opts).context("Failed to encode JSON to CON")?;
            write_output(output.as_deref(), &con)?;
        }
        Commands::Decode { input, output, strict } => {
            let con = read_input(input.as_deref())?;
            let value = con_core::deserialize(&con, &con_core::ParseOptions { strict })
                .context("Failed to decode CON to JSON")?;
            let pretty = serde_json::to_string_pretty(&value.to_json())?;
            write_output(output.as_deref(), &pretty)?;
        }
        Commands::Stats { input } => {
            let json = read_input(input.as_deref())?;
            let con = con_core::encode(&json).context("Failed to encode JSON to CON")?;
            let savings = con_core::count_tokens(&con, &json, None);
            println!("JSON size:    {} bytes", json.len());
            println!("CON size:     {} bytes", con.len());
            println!("JSON tokens:  {} (estimated)", savings.json_tokens);
            println!("CON tokens:   {} (estimated)", savings.con_tokens);
            println!("Token saving: {:.1}%", savings.percent_saved());
        }
    }

    Ok(())
}

/// Build filter patterns from the --filter and --filter-preset arguments.
///
/// - `--filter etag,kind` produces `["etag", "kind"]`
/// - `--filter-preset google` produces the Google Calendar default patterns
/// - Both can be combined (patterns are merged)
/// - An empty --filter string produces no patterns (preserves all fields)
fn build_filter_patterns(filter: Option<&str>, filter_preset: Option<&str>) -> Result<Vec<String>> {
    let mut patterns = Vec::new();

    if let Some(raw) = filter {
        for part in raw.split(',') {
            let trimmed = part.trim();
            if !trimmed.is_empty() {
                patterns.push(trimmed.to_string());
            }
        }
    }

    if let Some(preset) = filter_preset {
        match preset {
            "google" => {
                for p in CalendarFilter::google_default() {
                    patterns.push(p.to_string());
                }
            }
            other => {
                anyhow::bail!(
                    "Unknown filter preset: '{}'. Available presets: google",
                    other
                );
            }
        }
    }

    Ok(patterns)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
