//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Print nested field notation like (id,employee(id,name)) as a depth outline
#[derive(Parser, Debug)]
#[command(name = "nestline")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Project directory (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    /// Directory with <number>_<label>.txt case files
    #[arg(long, global = true, value_hint = ValueHint::DirPath)]
    pub cases_dir: Option<PathBuf>,

    /// Run only the case with this number
    #[arg(short, long)]
    pub test_number: Option<u32>,

    /// Sort output alphabetically within each level
    #[arg(short, long, global = true)]
    pub alphabetical_order: bool,

    /// Print box-drawing trees instead of marker outlines
    #[arg(long, global = true)]
    pub tree: bool,

    /// Depth marker character
    #[arg(short, long, global = true)]
    pub marker: Option<char>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List discovered cases
    List,

    /// Validate and print a notation string
    Parse {
        /// Notation, e.g. "(id,employee(id,name))"
        text: String,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config paths
    Path,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },
}
