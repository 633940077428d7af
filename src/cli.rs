use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cfglint")]
#[command(about = "Control-flow graph lint passes for bytecode methods", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the lint detectors over a method-set fixture
    Analyze {
        /// Path to a JSON method-set fixture
        path: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Config file (defaults to discovering .cfglint.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Log a receiver/type/name summary for every call site
        #[arg(long = "log-calls")]
        log_calls: bool,
    },

    /// Print every method's control-flow graph for tracing
    Dump {
        /// Path to a JSON method-set fixture
        path: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored one-line-per-finding report
    Terminal,
    /// JSON array of findings
    Json,
}
