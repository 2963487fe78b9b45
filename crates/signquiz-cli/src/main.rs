//! signquiz CLI: terminal quiz runner and catalog tooling.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "signquiz", version, about = "Sign-language quiz runner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take the quizzes of a catalog in order
    Play {
        /// Catalog file or directory (overrides the config)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print a JSON report whenever an attempt completes
        #[arg(long)]
        json: bool,
    },

    /// Validate catalog files
    Validate {
        /// Catalog file or directory
        #[arg(long)]
        catalog: PathBuf,
    },

    /// List the quizzes of a catalog
    List {
        /// Catalog file or directory (overrides the config)
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example catalog
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("signquiz=info".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            catalog,
            config,
            json,
        } => commands::play::execute(catalog, config, json),
        Commands::Validate { catalog } => commands::validate::execute(catalog),
        Commands::List { catalog, config } => commands::list::execute(catalog, config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
