//! Clap derive structures for the `rollcall` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// rollcall -- admin CLI for a student registry backend
#[derive(Debug, Parser)]
#[command(
    name = "rollcall",
    version,
    about = "Manage a student registry from the command line",
    long_about = "Administer a student registry backend: list, register,\n\
        edit, and delete student records, and export the registry as a\n\
        spreadsheet or document.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Registry backend URL (overrides the config file)
    #[arg(long, short = 's', env = "ROLLCALL_SERVER", global = true)]
    pub server: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "ROLLCALL_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "ROLLCALL_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (default 30, or `timeout` from the config file)
    #[arg(long, env = "ROLLCALL_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output Enum ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and cache a session token
    Login(LoginArgs),

    /// Discard the cached session token
    Logout,

    /// Manage student records
    #[command(alias = "st")]
    Students(StudentsArgs),

    /// Export the registry to a file
    Export(ExportArgs),
}

// ── Login ────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email (prompted when omitted)
    pub email: Option<String>,

    /// Password (prompted when omitted; prefer the prompt over shell history)
    #[arg(long, env = "ROLLCALL_PASSWORD", hide_env = true)]
    pub password: Option<String>,
}

// ── Students ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StudentsArgs {
    #[command(subcommand)]
    pub command: StudentsCommand,
}

#[derive(Debug, Subcommand)]
pub enum StudentsCommand {
    /// List all student records
    #[command(alias = "ls")]
    List,

    /// Register a new student
    Add(AddArgs),

    /// Edit an existing record (unspecified fields keep their values)
    Edit(EditArgs),

    /// Delete a record
    #[command(alias = "rm")]
    Delete {
        /// Record id
        id: i64,
    },
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Email address (unique; immutable after registration)
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub last_name: String,

    #[arg(long)]
    pub first_name: String,

    /// Middle initial (optional)
    #[arg(long, default_value = "")]
    pub middle_initial: String,

    #[arg(long)]
    pub course: String,

    #[arg(long)]
    pub year: u32,

    #[arg(long)]
    pub gender: String,

    /// Mark the student as graduating
    #[arg(long)]
    pub graduating: bool,

    /// Password (min 8 chars; prompted when omitted)
    #[arg(long, env = "ROLLCALL_NEW_PASSWORD", hide_env = true)]
    pub password: Option<String>,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Record id
    pub id: i64,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub middle_initial: Option<String>,

    #[arg(long)]
    pub course: Option<String>,

    #[arg(long)]
    pub year: Option<u32>,

    #[arg(long)]
    pub gender: Option<String>,

    /// Set the graduating flag
    #[arg(long)]
    pub graduating: Option<bool>,
}

// ── Export ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Target file format
    #[arg(value_enum)]
    pub format: ExportFormat,

    /// Output path (defaults to students.xlsx / students.docx)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// Single-sheet spreadsheet
    Xlsx,
    /// Word-processor document
    Docx,
}

impl ExportFormat {
    pub fn default_file_name(self) -> &'static str {
        match self {
            Self::Xlsx => "students.xlsx",
            Self::Docx => "students.docx",
        }
    }
}
