mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "dialscan",
    version,
    about = "Extract names and phone numbers from contact-list screenshots"
)]
struct Cli {
    /// Log progress for each image
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract contacts from one or more screenshots
    Extract {
        /// Screenshot files (PNG, JPEG, ...)
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// Output format: table (default), json or csv
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Write contacts to a .csv or .json file
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// JSON file overriding layout constants
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Show the text lines and candidates found in a screenshot (without pairing)
    Lines {
        /// Screenshot file
        image: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// JSON file overriding layout constants
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Inspect the extraction config
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective config as JSON
    Show {
        /// JSON file overriding layout constants
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Extract {
            images,
            output,
            out,
            config,
        } => commands::extract::run(images, &output, out, config),
        Commands::Lines {
            image,
            output,
            config,
        } => commands::lines::run(image, &output, config),
        Commands::Config { action } => match action {
            ConfigAction::Show { config } => commands::config::show(config),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
