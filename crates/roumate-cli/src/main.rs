//! CLI for roumate — track roulette outcomes and watch the statistics move.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "roumate")]
#[command(about = "roumate — manual roulette tracker with live statistics")]
#[command(version = roumate_core::VERSION)]
struct Cli {
    /// Table variant: european (single zero) or american (0 and 00)
    #[arg(long, global = true, default_value = "european")]
    table: String,

    /// Directory holding persisted histories and gate state
    #[arg(long, global = true, default_value = "roumate-data")]
    data_dir: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Record observed outcomes: numbers, "00", or spoken words ("seven")
    Enter {
        /// Outcomes to record, in order
        #[arg(required = true)]
        outcomes: Vec<String>,
    },

    /// Remove the most recent entry
    Undo,

    /// Clear the history (and usage counters) for this table
    Reset,

    /// Show the full statistics report for the current window
    Stats {
        /// Trailing window size; 0 = entire history
        #[arg(long, default_value = "0")]
        window: i64,

        /// Emit the raw aggregate report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Feed random outcomes through the normal input path
    Simulate {
        /// Number of outcomes to simulate
        #[arg(long, default_value = "100")]
        count: usize,

        /// Delay profile between inputs
        #[arg(long, default_value = "regular", value_parser = ["fast", "regular", "slow"])]
        speed: String,

        /// Clear history before the run starts
        #[arg(long)]
        reset: bool,

        /// Fixed RNG seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Export the history as CSV
    Export {
        /// Output path (default: roulette_{table}_{timestamp}.csv)
        #[arg(long)]
        output: Option<String>,
    },

    /// Inspect or change the input gate (free tier, ads, premium)
    Gate {
        #[command(subcommand)]
        action: commands::gate::GateAction,
    },

    /// Start the HTTP history server
    Serve {
        /// Bind address
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(long, default_value = "8640")]
        port: u16,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let variant = commands::parse_table(&cli.table);
    let data_dir = std::path::PathBuf::from(&cli.data_dir);

    match cli.command {
        Commands::Enter { outcomes } => commands::enter::run(variant, &data_dir, &outcomes),
        Commands::Undo => commands::enter::undo(variant, &data_dir),
        Commands::Reset => commands::enter::reset(variant, &data_dir),
        Commands::Stats { window, json } => commands::stats::run(variant, &data_dir, window, json),
        Commands::Simulate {
            count,
            speed,
            reset,
            seed,
        } => commands::simulate::run(variant, &data_dir, count, &speed, reset, seed),
        Commands::Export { output } => commands::export::run(variant, &data_dir, output.as_deref()),
        Commands::Gate { action } => commands::gate::run(variant, &data_dir, &action),
        Commands::Serve { host, port } => commands::serve::run(data_dir, &host, port),
    }
}
