use clap::Parser;

pub mod global;
pub mod root_commands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `libris` binary.
#[derive(Debug, Parser)]
#[command(name = "libris", version, about = "Libris - library database toolbox")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database file (overrides `database.path`)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Use `database.test_path` instead of `database.path`
    #[arg(long, global = true)]
    pub test: bool,

    /// Open the database without foreign key enforcement
    #[arg(long, global = true)]
    pub no_foreign_keys: bool,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            quiet: self.quiet,
            verbose: self.verbose,
            db: self.db.clone(),
            test: self.test,
            no_foreign_keys: self.no_foreign_keys,
        }
    }
}
