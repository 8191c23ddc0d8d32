//! Drawbook CLI - Command-line interface for building picture books

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "drawbook")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a book description to a PowerPoint deck
    Export {
        /// Book description (JSON)
        input: String,

        /// Output file path (a temporary file when omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Generate missing illustrations for a book
    Illustrate {
        /// Book description (JSON)
        input: String,

        /// Directory for generated images (a temporary directory when omitted)
        #[arg(short, long)]
        output_dir: Option<String>,

        /// Illustration style (model or LoRA id)
        #[arg(short, long)]
        style: Option<String>,

        /// Describe each page with a text model before drawing it
        #[arg(long)]
        describe: bool,

        /// Save the updated book back to the input file
        #[arg(long)]
        write: bool,
    },

    /// Display information about a book description
    Info {
        /// Book description (JSON)
        input: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "drawbook_cli=debug,drawbook_core=debug"
    } else {
        "drawbook_cli=info,drawbook_core=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Export { input, output } => commands::export(&input, output.as_deref()),

        Commands::Illustrate {
            input,
            output_dir,
            style,
            describe,
            write,
        } => {
            commands::illustrate(
                &input,
                output_dir.as_deref(),
                style.as_deref(),
                describe,
                write,
            )
            .await
        }

        Commands::Info { input, json } => commands::info(&input, json),
    }
}
