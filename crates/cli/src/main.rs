mod commands;
mod logging;

use clap::{Parser, Subcommand};
use commands::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "crudgen")]
#[command(about = "Generate DynamoDB CRUD handlers from a Smithy model", version)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate handler sources for every marked structure
    Generate {
        /// Smithy JSON AST files, merged in order
        #[arg(long, short, required = true)]
        model: Vec<PathBuf>,

        /// Output directory
        #[arg(long, short, default_value = "build/crudgen")]
        output: PathBuf,

        /// Generator config (YAML)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the generated handlers and their routes
    Map {
        /// Smithy JSON AST files, merged in order
        #[arg(long, short, required = true)]
        model: Vec<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Generator config (YAML)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_json)?;

    match cli.command {
        Commands::Generate {
            model,
            output,
            config,
        } => {
            generate::run(&model, &output, config.as_deref())?;
        }
        Commands::Map {
            model,
            json,
            config,
        } => {
            map::run(&model, json, config.as_deref())?;
        }
    }

    Ok(())
}
