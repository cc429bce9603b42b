//! triagectl - command-line front end for the complaint triage engine
//!
//! Plays the request-handler role: validates input, runs the engine and
//! prints the classification as text or JSON.

mod commands;
mod logging;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{ClassifyArgs, RulesFormat};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "triagectl")]
#[command(about = "Classify citizen complaints for routing and prioritization", long_about = None)]
#[command(version)]
struct Cli {
    /// Config file (default: $TRIAGE_CONFIG or ~/.config/triage/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Rule table file, overrides [rules].path from the config
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a single complaint
    Classify {
        /// Complaint text
        description: String,

        /// Evidence image URL (repeatable)
        #[arg(long = "image", value_name = "URL")]
        images: Vec<String>,

        /// Free-text location
        #[arg(long)]
        location: Option<String>,

        /// Reporter has a verified history
        #[arg(long)]
        trusted: bool,

        /// Show which rules fired
        #[arg(long)]
        explain: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Classify JSON Lines complaints from a file or stdin
    Batch {
        /// Input file, "-" for stdin
        #[arg(long, short)]
        input: Option<PathBuf>,

        /// Include the trace with every result
        #[arg(long)]
        explain: bool,
    },

    /// Show the active rule table in evaluation order
    Rules {
        #[arg(long, value_enum, default_value_t = RulesFormat::Human)]
        format: RulesFormat,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let early_logging = logging::init_early(cli.verbose);
    let config = commands::load_config(cli.config.as_deref())?;
    if !early_logging {
        logging::init(cli.verbose, &config.log.level);
        if let Some(source) = &config.source {
            tracing::debug!("Using config {}", source.display());
        }
    }

    let engine = commands::build_engine(&config, cli.rules.as_deref())?;
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Classify {
            description,
            images,
            location,
            trusted,
            explain,
            json,
        } => {
            commands::require_description(&description)?;
            let args = ClassifyArgs {
                description,
                images,
                location,
                trusted,
                explain,
                json,
            };
            commands::classify(&engine, &args, &mut stdout)?;
        }
        Commands::Batch { input, explain } => {
            let reader = commands::open_input(input.as_ref())?;
            let summary = commands::batch(&engine, reader, &mut stdout, explain)?;
            if summary.failed() > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Rules { format } => commands::rules(&engine, format, &mut stdout)?,
    }

    Ok(ExitCode::SUCCESS)
}
