//! avfinfo - inspect Minesweeper Arbiter replay files
//!
//! Decodes every file given on the command line and prints a short summary
//! (or one JSON object per line with `--json`). Exits non-zero if any file
//! fails to read or decode.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use minevid_avf::{decode_batch, Decoder, DecoderConfig, SkinKeyMatch};
use tracing_subscriber::EnvFilter;

mod report;

#[derive(Parser)]
#[command(name = "avfinfo")]
#[command(about = "Decode Minesweeper Arbiter .avf replays")]
#[command(version)]
struct Cli {
    /// Replay files to decode
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Print one JSON object per file
    #[arg(long)]
    json: bool,

    /// Worker threads (default: available parallelism)
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Reject files with mines outside the board
    #[arg(long)]
    strict: bool,

    /// Take the skin from the last non-`Skin` key, as older readers did
    #[arg(long)]
    legacy_skin: bool,
}

impl Cli {
    fn decoder_config(&self) -> DecoderConfig {
        DecoderConfig {
            strict_mine_bounds: self.strict,
            skin_key_match: if self.legacy_skin {
                SkinKeyMatch::LegacyInverted
            } else {
                SkinKeyMatch::Exact
            },
            ..Default::default()
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&Cli::parse()) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("avfinfo: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Decode all files and print them. Returns the number that failed.
fn run(cli: &Cli) -> Result<usize> {
    let decoder = Decoder::new(cli.decoder_config())?;

    let inputs = cli
        .files
        .iter()
        .map(|path| std::fs::read(path).with_context(|| format!("failed to read {}", path.display())))
        .collect::<Result<Vec<_>>>()?;
    tracing::info!(files = inputs.len(), jobs = ?cli.jobs, "decoding");

    let results = decode_batch(&decoder, &inputs, cli.jobs);

    let mut out = std::io::stdout().lock();
    let mut failed = 0;
    for (path, result) in cli.files.iter().zip(&results) {
        match result {
            Ok(record) if cli.json => writeln!(out, "{}", report::json_line(path, record)?)?,
            Ok(record) => writeln!(out, "{}", report::Summary::new(path, record))?,
            Err(e) => {
                failed += 1;
                eprintln!("{}: {e}", path.display());
            }
        }
    }
    Ok(failed)
}
