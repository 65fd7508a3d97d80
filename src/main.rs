//! thainum command line
//!
//! Reads the reference tables from a directory of JSON files (see
//! [`thainum::JsonStore`]) and prints results as JSON on stdout. Logs go to
//! stderr and are controlled with `RUST_LOG`.
//!
//! ```bash
//! thainum --data ./data analyze สมชาย --day monday
//! thainum --data ./data similar สมชาย --day wednesday2 --limit 5 --auspicious-only
//! thainum --data ./data similar สมชาย --day monday --no-bad-pairs --prefer ช --offset 10
//! ```
use clap::{ArgGroup, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use thainum::{Engine, EngineError, JsonStore, PairFilter, SimilarOptions};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "thainum")]
#[command(about = "Thai name numerology: scores, pairs, forbidden characters and similar names")]
struct Args {
    /// Directory holding scheme_a.json, scheme_b.json, day_forbidden.json,
    /// pair_meanings.json and corpus.json
    #[arg(long, default_value = "data", env = "THAINUM_DATA")]
    data: PathBuf,

    /// Strip digits, punctuation and control characters from names first
    #[arg(long, env = "THAINUM_SANITIZE")]
    sanitize: bool,

    /// Reject similar-name requests asking for more results than this
    #[arg(long, env = "THAINUM_MAX_LIMIT")]
    max_limit: Option<usize>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Full report for one name
    Analyze {
        name: String,
        #[arg(long)]
        day: String,
    },
    /// Closest corpus names that are clean for the given day
    #[command(group(ArgGroup::new("pairs").args(["auspicious_only", "no_bad_pairs"])))]
    Similar {
        name: String,
        #[arg(long)]
        day: String,
        #[arg(long)]
        limit: Option<usize>,
        /// Skip this many ranked results
        #[arg(long, default_value = "0")]
        offset: usize,
        /// Only names whose pairs are all D10/D8/D5
        #[arg(long)]
        auspicious_only: bool,
        /// Drop names with an R10/R7/R5 pair; neutral pairs pass
        #[arg(long)]
        no_bad_pairs: bool,
        /// Keep names with a character forbidden on the day
        #[arg(long)]
        allow_forbidden: bool,
        /// Rank names starting with this consonant first
        #[arg(long)]
        prefer: Option<char>,
    },
    /// Meaning of a two-digit pair
    Pair { pair: String },
    /// Corpus record (pairs, classes, forbidden days) for a name
    Profile {
        name: String,
        #[arg(long, default_value = "0")]
        id: u64,
    },
    /// Days on which the name carries a forbidden character
    ForbiddenDays { name: String },
    /// Load every table and exit
    Warm,
}

fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("thainum=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut builder = Engine::builder(JsonStore::new(&args.data)).sanitize_input(args.sanitize);
    if let Some(max) = args.max_limit {
        builder = builder.max_limit(max);
    }
    let engine = builder.build();

    match run(&engine, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("cannot encode output: {0}")]
    Json(#[from] serde_json::Error),
}

fn run(engine: &Engine, args: &Args) -> Result<(), CliError> {
    match &args.command {
        Command::Analyze { name, day } => emit(&engine.analyze(name, day)?, args.pretty),
        Command::Similar {
            name,
            day,
            limit,
            offset,
            auspicious_only,
            no_bad_pairs,
            allow_forbidden,
            prefer,
        } => {
            let filter = if *auspicious_only {
                PairFilter::AuspiciousOnly
            } else if *no_bad_pairs {
                PairFilter::NoBadPairs
            } else {
                PairFilter::Any
            };
            let mut options = SimilarOptions::new(limit.unwrap_or(engine.config().default_limit))
                .offset(*offset)
                .filter(filter)
                .allow_forbidden(*allow_forbidden);
            if let Some(c) = prefer {
                options = options.prefer(*c);
            }
            emit(&engine.similar_with(name, day, options, None)?, args.pretty)
        }
        Command::Pair { pair } => emit(&engine.pair_meaning(pair)?, args.pretty),
        Command::Profile { name, id } => emit(&engine.profile(*id, name)?, args.pretty),
        Command::ForbiddenDays { name } => emit(&engine.forbidden_days(name)?, args.pretty),
        Command::Warm => {
            engine.warm()?;
            Ok(())
        }
    }
}

fn emit<T: Serialize>(value: &T, pretty: bool) -> Result<(), CliError> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}
