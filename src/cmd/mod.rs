mod generate;
mod load;
mod report;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ecom-pipeline")]
#[command(version)]
#[command(about = "Generate synthetic e-commerce data, load it into DuckDB, and report lifetime spend", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the five CSV files (categories, users, products, orders, order_items)
    #[command(after_help = "Examples:
  ecom-pipeline generate
  ecom-pipeline generate -o data --seed 7
  ecom-pipeline generate -c pipeline.yaml")]
    Generate {
        /// Output directory for the CSV files (created if missing)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Random seed for reproducibility (default: 42)
        #[arg(long)]
        seed: Option<u64>,

        /// First day of the timestamp window, YYYY-MM-DD (default: 2022-01-01)
        #[arg(long)]
        start_date: Option<String>,

        /// Width of the timestamp window in days (default: 900)
        #[arg(long)]
        day_span: Option<u32>,

        /// YAML config file with seed, dates and record counts
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Recreate the schema and load the CSV files in one transaction
    #[command(after_help = "Examples:
  ecom-pipeline load
  ecom-pipeline load -d data --db shop.duckdb --progress")]
    Load {
        /// Directory containing the CSV files
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// DuckDB database file (replaced schema, default: ecommerce.duckdb)
        #[arg(long)]
        db: Option<PathBuf>,

        /// Show progress during loading
        #[arg(short, long)]
        progress: bool,

        /// YAML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print lifetime spend per user, highest first
    #[command(after_help = "Examples:
  ecom-pipeline report
  ecom-pipeline report -f json -o totals.json")]
    Report {
        /// DuckDB database file (default: ecommerce.duckdb)
        #[arg(long)]
        db: Option<PathBuf>,

        /// Output format: table, json, csv
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Write output to file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// YAML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Generate {
            output,
            seed,
            start_date,
            day_span,
            config,
        } => generate::run(output, seed, start_date, day_span, config),
        Commands::Load {
            data_dir,
            db,
            progress,
            config,
        } => load::run(data_dir, db, progress, config),
        Commands::Report {
            db,
            format,
            output,
            config,
        } => report::run(db, format, output, config),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "ecom-pipeline",
                &mut io::stdout(),
            );
            Ok(())
        }
    }
}
