//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--root <dir>`: Store root (overrides the config file)
//! - `--config <path>`: Config file to load
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// bootstore - inspect and edit a network boot configuration store
#[derive(Parser, Debug)]
#[command(name = "bootstore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Store root directory (overrides the configured root)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Config file (default: $BOOTSTORE_CONFIG, then the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the store directory layout
    Init,

    /// Read or write profiles
    Profile {
        #[command(subcommand)]
        action: DocumentAction,
    },

    /// Read or write groups
    Group {
        #[command(subcommand)]
        action: DocumentAction,
    },

    /// Print an Ignition config verbatim
    Ignition {
        /// File name under ignition/ (including extension)
        name: String,
    },

    /// Print a Cloud-config verbatim
    Cloud {
        /// File name under cloud/ (including extension)
        name: String,
    },
}

/// Operations on JSON documents (profiles and groups).
#[derive(Subcommand, Debug, Clone)]
pub enum DocumentAction {
    /// Print one document by id
    Get {
        /// Document id
        id: String,
    },
    /// Print all documents as a JSON array
    List,
    /// Store a document read from a JSON file
    Put {
        /// JSON file to read, or `-` for stdin
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}
