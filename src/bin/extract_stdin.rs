//! CLI that reads HTML from stdin and writes the extraction result as JSON
//! to stdout.
//!
//! ```text
//! curl -s https://example.com/post | extract_stdin --url https://example.com/post
//! ```
//!
//! Logging goes to stderr and is controlled with `RUST_LOG`.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rs_distill::{extract_bytes_with_options, Options};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "extract_stdin", about = "Extract the main content of an HTML page read from stdin")]
struct Args {
    /// URL the page was fetched from (variant dispatch and link resolution).
    #[arg(long, default_value = "")]
    url: String,

    /// JSON file with extraction options; missing fields keep defaults.
    #[arg(long)]
    options: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

#[derive(Serialize)]
struct ErrorOutput {
    error: String,
}

fn load_options(path: Option<&PathBuf>) -> Result<Options, String> {
    let Some(path) = path else {
        return Ok(Options::default());
    };
    let json = fs::read_to_string(path).map_err(|err| format!("failed to read {}: {err}", path.display()))?;
    Options::from_json(&json).map_err(|err| err.to_string())
}

fn print_json<T: Serialize>(value: &T, pretty: bool) {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    println!("{}", json.unwrap_or_default());
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let options = match load_options(args.options.as_ref()) {
        Ok(options) => options,
        Err(error) => {
            print_json(&ErrorOutput { error }, args.pretty);
            return ExitCode::from(2);
        }
    };

    let mut html = Vec::new();
    if let Err(err) = io::stdin().read_to_end(&mut html) {
        print_json(&ErrorOutput { error: format!("failed to read stdin: {err}") }, args.pretty);
        return ExitCode::FAILURE;
    }

    match extract_bytes_with_options(&html, &args.url, &options) {
        Ok(result) => {
            print_json(&result, args.pretty);
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!(%err, url = %args.url, "extraction failed");
            print_json(&ErrorOutput { error: err.to_string() }, args.pretty);
            ExitCode::FAILURE
        }
    }
}
