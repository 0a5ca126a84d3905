//! tickhst CLI - converts tick CSV files into MetaTrader 4 history files.

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tickhst_lib::{DEFAULT_DIGITS, DEFAULT_QUEUE_CAPACITY, Timeframe};

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "tickhst")]
#[command(about = "Convert tick data into MetaTrader 4 history files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (suppress progress output)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a tick CSV file into an .hst history file
    Convert {
        /// Tick CSV file (timestamp,ask,bid,ask_volume,bid_volume)
        input: PathBuf,

        /// Instrument symbol written into the header (at most 11 characters)
        #[arg(short, long)]
        symbol: String,

        /// Bar timeframe (m1, m5, m15, m30, h1, h4, d1 or minutes)
        #[arg(short, long)]
        timeframe: Timeframe,

        /// Spread in points stored with every bar
        #[arg(long, default_value_t = 0)]
        spread: u32,

        /// Digits after the decimal point
        #[arg(long, default_value_t = DEFAULT_DIGITS)]
        digits: u32,

        /// Output directory. File named <symbol><minutes>.hst
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Reject tick batches that go back in time
        #[arg(long)]
        validate_order: bool,

        /// Maximum number of bars waiting to be written
        #[arg(long, default_value_t = DEFAULT_QUEUE_CAPACITY)]
        queue_capacity: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Convert {
            input,
            symbol,
            timeframe,
            spread,
            digits,
            output_dir,
            validate_order,
            queue_capacity,
        } => {
            let options = commands::convert::ConvertOptions {
                input,
                symbol,
                timeframe,
                spread,
                digits,
                output_dir,
                validate_order,
                queue_capacity,
            };
            commands::convert::convert(options, cli.quiet).await
        }
    }
}
