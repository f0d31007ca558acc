//! Serpent command-line driver.
//!
//! # Usage
//!
//! ```bash
//! # Calibrate the default exchange under seed 7 and replay it under seed 7
//! echo 5 | serpent verify --seed 7
//!
//! # Replay under another seed (reported as non-reproducible)
//! serpent verify --seed 7 --replay-seed 8 --size 5
//!
//! # Transform words, collapsing every measurement to 0
//! serpent transform 1234 73af --collapse zeros --grid
//!
//! # Show the table calibrated under a seed
//! serpent calibrate --seed 7 0001 0083
//! ```
//!
//! Results go to the `serpent::milestone` log target; per-operation detail
//! goes to `serpent::detail` at debug level.

mod entropy;
mod error;
mod render;

use std::{io::BufRead, process::ExitCode};

use clap::{Parser, Subcommand, ValueEnum};
use serpent_core::{
    Pipeline, Word, decode_word, encode_word,
    trace::{self, MILESTONE_TARGET},
};
use serpent_harness::{ExchangeScript, Verifier, transform_batch};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    entropy::{CliEntropy, SystemEntropy},
    error::CliError,
    render::render_bit_grid,
};

/// Words agent A sends in the default exchange.
const DEFAULT_SENDS: [&str; 5] = ["0001", "0083", "0000", "00e5", "73af"];

/// Serpent pipeline driver
#[derive(Parser, Debug)]
#[command(name = "serpent")]
#[command(about = "16-bit transformation pipeline and two-agent exchange verifier")]
#[command(version)]
struct Args {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calibrate an exchange under a seed and verify it
    Verify {
        /// Seed the expected values are computed under
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Seed used when replaying (defaults to --seed)
        #[arg(long, conflicts_with = "system_entropy")]
        replay_seed: Option<u64>,

        /// Replay with OS entropy instead of a seed
        #[arg(long)]
        system_entropy: bool,

        /// Words agent A expects to send (hex)
        #[arg(long = "send", num_args = 1..)]
        sends: Vec<String>,

        /// Size handshake value; read from stdin when omitted
        #[arg(long)]
        size: Option<i64>,
    },

    /// Run hex words through the pipeline
    Transform {
        /// Words to transform (4 hex digits each)
        #[arg(required = true)]
        words: Vec<String>,

        /// Seed for the resampling stage (OS entropy when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Collapse every measurement to a constant bit
        #[arg(long, value_enum)]
        collapse: Option<Collapse>,

        /// Also render each output as a bit grid
        #[arg(long)]
        grid: bool,
    },

    /// Show the exchange table calibrated under a seed
    Calibrate {
        /// Seed to calibrate under
        #[arg(long, default_value = "0")]
        seed: u64,

        /// Words agent A expects to send (hex)
        #[arg(required = true)]
        sends: Vec<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Collapse {
    Zeros,
    Ones,
}

fn main() -> Result<ExitCode, CliError> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let pipeline = Pipeline::standard();

    match args.command {
        Command::Verify { seed, replay_seed, system_entropy, sends, size } => {
            let size = size.map_or_else(|| read_size(std::io::stdin().lock()), Ok)?;
            tracing::debug!(size, "size handshake (unused)");

            let sends = decode_all(&sends, &DEFAULT_SENDS)?;
            let entropy = if system_entropy {
                CliEntropy::System(SystemEntropy)
            } else {
                CliEntropy::seeded(replay_seed.unwrap_or(seed))
            };
            Ok(exit_code(verify(&pipeline, seed, &sends, entropy)))
        },
        Command::Transform { words, seed, collapse, grid } => {
            let collapse = collapse.map(|c| matches!(c, Collapse::Ones));
            let mut entropy = CliEntropy::select(seed, collapse);
            Ok(exit_code(transform(&pipeline, &mut entropy, &words, grid)))
        },
        Command::Calibrate { seed, sends } => {
            let sends = decode_all(&sends, &[])?;
            let script = ExchangeScript::calibrate(&pipeline, seed, &sends);
            for (index, step) in script.steps().iter().enumerate() {
                tracing::info!(
                    target: MILESTONE_TARGET,
                    step = index + 1,
                    outbound = %encode_word(step.outbound),
                    expected_response = %encode_word(step.expected_response),
                    expected_send = %encode_word(step.expected_send),
                    "calibrated under seed {seed}"
                );
            }
            Ok(ExitCode::SUCCESS)
        },
    }
}

/// Read and validate the size handshake line.
fn read_size(mut input: impl BufRead) -> Result<i64, CliError> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    let trimmed = line.trim();
    trimmed.parse().map_err(|_| CliError::InvalidSize { input: trimmed.to_string() })
}

/// Decode hex arguments, or `defaults` when none were given.
fn decode_all(words: &[String], defaults: &[&str]) -> Result<Vec<Word>, CliError> {
    let words: Vec<&str> =
        if words.is_empty() { defaults.to_vec() } else { words.iter().map(String::as_str).collect() };
    words.into_iter().map(|w| decode_word(w).map_err(CliError::from)).collect()
}

fn exit_code(success: bool) -> ExitCode {
    if success { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

/// Calibrate under `seed`, replay under `entropy`. Returns whether every step
/// verified.
fn verify(pipeline: &Pipeline, seed: u64, sends: &[Word], entropy: CliEntropy) -> bool {
    let script = ExchangeScript::calibrate(pipeline, seed, sends);
    Verifier::new(pipeline, entropy).verify(&script).verdict.is_verified()
}

fn transform(
    pipeline: &Pipeline,
    entropy: &mut CliEntropy,
    words: &[String],
    grid: bool,
) -> bool {
    let mut failed = false;

    for (input, result) in words.iter().zip(transform_batch(pipeline, entropy, words)) {
        match result {
            Ok(response) => {
                trace::emit(&response.run.trace);
                let output = &response.message;
                tracing::info!(target: MILESTONE_TARGET, "{input} -> {output}");
                if grid {
                    let pattern = render_bit_grid(response.run.output);
                    tracing::info!(target: MILESTONE_TARGET, "bit pattern of {output}:\n{pattern}");
                }
            },
            Err(e) => {
                failed = true;
                tracing::warn!(target: MILESTONE_TARGET, "invalid hex word {input:?}: {e}");
            },
        }
    }

    !failed
}
