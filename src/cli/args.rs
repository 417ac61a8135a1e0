//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::application::CurriculumContext;
use crate::domain::Standard;

/// Curriculum standards folded into one term tree
#[derive(Parser, Debug)]
#[command(name = "dsb")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d, -dd, -ddd)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory with a local .dsb.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where the curriculum definition comes from.
#[derive(clap::Args, Debug, Clone)]
pub struct DefinitionArgs {
    /// Standard: educa, lp21, per, classification_system
    pub context: CurriculumContext,

    /// Definition payload (default: file in definitions_dir)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print a curriculum tree
    Dump {
        #[command(flatten)]
        definition: DefinitionArgs,

        /// Rebuild the tree from a LOM JSON document
        #[arg(long, value_hint = ValueHint::FilePath)]
        lom: Option<PathBuf>,

        /// Use the taxonomy trees (curriculum field) instead of taxonomy paths
        #[arg(long, requires = "lom")]
        trees: bool,

        /// Purpose of the taxonomy paths to use (default from config)
        #[arg(long, requires = "lom")]
        purpose: Option<String>,

        /// Box-drawing tree instead of the plain dump
        #[arg(long)]
        pretty: bool,
    },

    /// Show the dictionary entry of an identifier
    Lookup {
        #[command(flatten)]
        definition: DefinitionArgs,

        /// Identifier to look up
        id: String,

        /// Print the entry as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the term types of a standard and how they nest
    Describe {
        /// Standard: educa, lp21, per, classification_system
        context: CurriculumContext,
    },

    /// Translate an identifier between standards
    Map {
        /// Source standard
        source: Standard,
        /// Target standard
        target: Standard,
        /// Identifier in the source standard
        id: String,
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

    /// Print a config template
    Template,

    /// Show config paths
    Path,
}
