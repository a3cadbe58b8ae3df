use anyhow::Result;
use clap::{Parser, Subcommand};
use tensorframe_cli::{commands, TrailerChoice};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "tensorframe")]
#[command(about = "Tensorframe - Self-describing multi-tensor containers", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pack a JSON manifest of tensors into one container
    Pack {
        /// Input JSON manifest
        #[arg(short, long)]
        manifest: String,

        /// Output container file
        #[arg(short, long)]
        output: String,

        /// Integrity trailer to append
        #[arg(long, value_enum, default_value_t = TrailerChoice::None)]
        trailer: TrailerChoice,
    },

    /// Decode a container and print its tensors
    Inspect {
        /// Input container file ("-" for stdin)
        #[arg(short, long)]
        input: String,

        /// Write the container report as JSON
        #[arg(long)]
        json: Option<String>,

        /// Print tensor payloads as hex
        #[arg(long)]
        dump: bool,
    },

    /// Parse a capability string or advertise a container's stream
    Caps {
        /// Capability string to parse
        #[arg(long, conflicts_with = "input")]
        describe: Option<String>,

        /// Container file whose stream to advertise
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Execute command
    match cli.command {
        Commands::Pack {
            manifest,
            output,
            trailer,
        } => commands::pack::execute(&manifest, &output, trailer.into()),

        Commands::Inspect { input, json, dump } => {
            commands::inspect::execute(&input, json.as_deref(), dump)
        }

        Commands::Caps { describe, input } => {
            commands::caps::execute(describe.as_deref(), input.as_deref())
        }
    }
}
