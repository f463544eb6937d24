//! epistat CLI: 2x2 table statistics from the command line.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use epistat_core::table::ContingencyTable;

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "epistat", version, about = "2x2 table statistics calculators")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available calculators
    List {
        /// Filter by category (hypothesis-testing, epidemiology)
        #[arg(long)]
        category: Option<String>,

        /// Filter by keyword
        #[arg(long)]
        search: Option<String>,
    },

    /// Show a calculator's description and formula
    Describe {
        /// Calculator id (e.g. chi-square, odds-ratio, risk-ratio, epi-2x2)
        id: String,
    },

    /// Run one calculator on a 2x2 table
    #[command(allow_negative_numbers = true)]
    Run {
        /// Calculator id
        calculator: String,

        /// Exposed cases
        #[arg(short, long)]
        a: f64,

        /// Exposed non-cases
        #[arg(short, long)]
        b: f64,

        /// Unexposed cases
        #[arg(short, long)]
        c: f64,

        /// Unexposed non-cases
        #[arg(short, long)]
        d: f64,

        /// Apply the Yates continuity correction (chi-square)
        #[arg(long, conflicts_with = "no_yates")]
        yates: bool,

        /// Skip the Yates continuity correction (chi-square)
        #[arg(long)]
        no_yates: bool,

        /// Confidence level in percent
        #[arg(long)]
        confidence: Option<f64>,

        /// Output format: text, json
        #[arg(long)]
        format: Option<String>,

        /// Include R code reproducing the calculation
        #[arg(long)]
        r_code: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Run every calculation in a batch file
    Batch {
        /// Path to a .toml batch file or directory
        #[arg(long)]
        input: PathBuf,

        /// Output directory
        #[arg(long)]
        output: Option<PathBuf>,

        /// Output format: json, html, markdown, all
        #[arg(long, default_value = "json")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate batch TOML files
    Validate {
        /// Path to batch file or directory
        #[arg(long)]
        input: PathBuf,
    },

    /// Create starter config and example batch
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("epistat=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::List { category, search } => commands::list::execute(category, search),
        Commands::Describe { id } => commands::describe::execute(id),
        Commands::Run {
            calculator,
            a,
            b,
            c,
            d,
            yates,
            no_yates,
            confidence,
            format,
            r_code,
            config,
        } => commands::run::execute(commands::run::RunArgs {
            calculator,
            table: ContingencyTable::new(a, b, c, d),
            yates: match (yates, no_yates) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            },
            confidence,
            format,
            r_code,
            config,
        }),
        Commands::Batch {
            input,
            output,
            format,
            config,
        } => commands::batch::execute(input, output, format, config),
        Commands::Validate { input } => commands::validate::execute(input),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
