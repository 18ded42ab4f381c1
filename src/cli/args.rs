//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Hierarchical checkbox selection: cascade, link and count selections on a page
#[derive(Parser, Debug)]
#[command(name = "selectree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding a local .selectree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every selection tree and counter of a page fixture
    Show {
        /// Page fixture (TOML)
        #[arg(value_hint = ValueHint::FilePath)]
        page: PathBuf,
    },

    /// Toggle a checkbox as a user would and print the propagated state
    Toggle {
        /// Page fixture (TOML)
        #[arg(value_hint = ValueHint::FilePath)]
        page: PathBuf,

        /// Name of the checkbox to toggle (first match in tree order)
        name: String,

        /// Uncheck instead of check
        #[arg(long)]
        off: bool,
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

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
