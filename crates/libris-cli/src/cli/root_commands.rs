use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Create the schema if it is missing.
    Init(InitArgs),
    /// Load the fixture dataset (admin, authors, categories, books, students).
    Seed,
    /// Clear every table and seed the base category and author.
    Reset,
    /// Delete every row without reseeding.
    Truncate,
    /// Show tables, row counts, and foreign key enforcement.
    Status,
    /// List books one page at a time.
    Books(BooksArgs),
    /// Student lookups.
    Students {
        #[command(subcommand)]
        action: StudentCommands,
    },
    /// Books issued to a student.
    Issued(IssuedArgs),
}

#[derive(Clone, Debug, Args)]
pub struct InitArgs {
    /// Drop and recreate every table.
    #[arg(long)]
    pub fresh: bool,
}

#[derive(Clone, Debug, Args)]
pub struct BooksArgs {
    /// Only books whose name starts with this text.
    #[arg(long)]
    pub prefix: Option<String>,
    #[arg(long)]
    pub category: Option<i64>,
    #[arg(long)]
    pub author: Option<i64>,
    /// 1-based page number.
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Rows per page (defaults to `library.default_page_size`).
    #[arg(long)]
    pub per_page: Option<u32>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum StudentCommands {
    /// Match student ids against a LIKE pattern (`%` and `_` are wildcards).
    Search { pattern: String },
    /// Look up one student by row id.
    Get { id: i64 },
}

#[derive(Clone, Debug, Args)]
pub struct IssuedArgs {
    /// Row id of the student (not the `StudentId` code).
    pub student: i64,
    /// Only books not yet returned.
    #[arg(long, conflicts_with = "returned")]
    pub current: bool,
    /// Only books already returned.
    #[arg(long)]
    pub returned: bool,
}
