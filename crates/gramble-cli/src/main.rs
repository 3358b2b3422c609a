use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::Verbosity;

mod commands;
mod error;
mod io;

#[derive(Parser, Debug)]
#[command(name = "gramble")]
#[command(about = "Compiler for grammars written as spreadsheets", long_about = None)]
struct Args {
    /// Configuration file (defaults to gramble.toml in the current directory)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(flatten)]
    verbose: Verbosity,

    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Compile a workbook and report every diagnostic
    Check {
        /// JSON-serialized tabular syntax tree
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the tapes of each symbol
    Tapes {
        /// JSON-serialized tabular syntax tree
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Only print this qualified symbol
        #[arg(short, long, value_name = "NAME")]
        symbol: Option<String>,
    },

    /// Print the compiled grammar
    Show {
        /// JSON-serialized tabular syntax tree
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the alphabet of the test inputs, per tape
    Literals {
        /// JSON-serialized tabular syntax tree
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn main() -> miette::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let cwd = std::env::current_dir().map_err(|e| error::convert_io_error(e, PathBuf::from(".")))?;
    let config = io::load_config(args.config.as_deref(), &cwd)?;

    match args.command {
        Command::Check { file } => commands::handle_check(&file, &config)?,
        Command::Tapes { file, symbol } => commands::handle_tapes(&file, symbol.as_deref(), &config)?,
        Command::Show { file } => commands::handle_show(&file, &config)?,
        Command::Literals { file } => commands::handle_literals(&file, &config)?,
    }
    Ok(())
}
