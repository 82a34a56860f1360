//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Flags
//!
//! - `--help` / `-h`: Show help
//! - `--version` / `-V`: Show version
//! - `--yes` / `-y`: Skip the confirmation prompt
//! - `--cwd <path>`: Run as if started in that directory
//! - `--tool <path>`: External tool executable
//! - `--marker-file <name>`: Marker file name
//! - `--plan-file <name>`: Plan file name
//! - `--debug`: Enable debug logging
//! - `--quiet` / `-q`: Minimal output

use clap::Parser;
use std::path::PathBuf;

use crate::core::config::Overrides;

/// tfguard - Run Terraform only in the environment you think you are in
#[derive(Parser, Debug)]
#[command(name = "tfguard")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
ACTIONS:
    plan            get modules, discard any stale plan file, write a new plan
    apply           apply the saved plan file, then delete it
    destroy         destroy the environment's infrastructure
    get-update      update modules
    validate        validate configuration (no confirmation)
    removeplanfile  delete the saved plan file (no confirmation)

SAFETY CHECK:
    The working directory must be named testing, development, staging or
    production, and the first line of its marker file must declare the same
    environment, e.g.:

        #environment|staging")]
pub struct Cli {
    /// Action to run
    #[arg(value_name = "ACTION")]
    pub action: String,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,

    /// Run as if tfguard was started in this directory
    #[arg(long)]
    pub cwd: Option<PathBuf>,

    /// Path to the external tool executable
    #[arg(long, value_name = "PATH")]
    pub tool: Option<PathBuf>,

    /// Name of the file whose first line declares the environment
    #[arg(long, value_name = "NAME")]
    pub marker_file: Option<String>,

    /// Name of the saved plan file
    #[arg(long, value_name = "NAME")]
    pub plan_file: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Settings overrides given on the command line.
    pub fn overrides(&self) -> Overrides {
        Overrides {
            tool_path: self.tool.clone(),
            marker_file: self.marker_file.clone(),
            plan_file: self.plan_file.clone(),
        }
    }
}
