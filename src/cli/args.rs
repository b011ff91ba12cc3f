use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "seismo-util")]
#[command(about = "Utility helpers for seismological data processing")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        short,
        long,
        global = true,
        help = "Log level: debug, info, warning, error or critical [default: from settings]"
    )]
    pub log_level: Option<String>,

    #[arg(short, long, global = true, help = "Suppress progress messages")]
    pub quiet: bool,

    #[arg(long, global = true, help = "Settings file (TOML)")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Select files below the given paths
    Select {
        #[arg(required = true, help = "Files or directories to scan")]
        paths: Vec<PathBuf>,

        #[arg(short, long, help = "Regular expression searched in each path")]
        pattern: Option<String>,

        #[arg(
            short,
            long = "field",
            help = "Require a named capture group to equal a value (NAME=VALUE)"
        )]
        fields: Vec<String>,

        #[arg(long, help = "Show a spinner instead of plain progress text")]
        bar: bool,
    },

    /// Show the five-stage factorization of a decimation ratio
    Decitab { ratio: u32 },

    /// Convert a `YYYY-MM-DD HH:MM:SS` UTC timestamp to epoch seconds
    ToEpoch { timestamp: String },

    /// Format epoch seconds as a UTC timestamp
    FromEpoch {
        #[arg(allow_negative_numbers = true)]
        seconds: f64,

        #[arg(long, value_enum, default_value = "plain")]
        style: TimeStyle,
    },

    /// Decimate a synthetic sine wave and report the result
    Decimate {
        #[arg(help = "Decimation factor")]
        q: usize,

        #[arg(long, default_value = "1000")]
        samples: usize,

        #[arg(long, default_value = "0.01", help = "Sine frequency in cycles per sample")]
        frequency: f64,

        #[arg(long, help = "Filter order [default: 30 for FIR, 8 for IIR]")]
        order: Option<usize>,

        #[arg(long, help = "Use a FIR filter instead of Chebyshev IIR")]
        fir: bool,
    },

    /// Create a directory and any missing parents
    Mkdir { path: PathBuf },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TimeStyle {
    Plain,
    Verbose,
    Filename,
}
