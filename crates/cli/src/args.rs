//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// hwsig: derive a deterministic Hardware Identity Signature for this machine
#[derive(Parser, Debug)]
#[command(name = "hwsig")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect attributes and compute the signature
    Compute(ComputeArgs),

    /// Hash a software inventory
    Inventory(InventoryArgs),

    /// Compare two captured attribute sets
    Compare(CompareArgs),

    /// Show the case policy table
    Policy(PolicyArgs),

    /// Configuration management
    Config(ConfigArgs),

    /// Validate configuration and collector sources
    Doctor(DoctorArgs),
}

#[derive(Args, Debug)]
pub struct ComputeArgs {
    /// Attribute collector (system, file, stub); overrides config
    #[arg(long)]
    pub collector: Option<String>,

    /// Read raw attributes from a .json or .toml file (implies --collector file)
    #[arg(long, conflicts_with = "collector")]
    pub attributes: Option<PathBuf>,

    /// Read the software inventory from a .json or .toml file
    #[arg(long, conflicts_with = "no_inventory")]
    pub inventory: Option<PathBuf>,

    /// Keep the collector's software_inventory_hash instead of hashing an inventory
    #[arg(long)]
    pub no_inventory: bool,

    /// Output as JSON (already includes every stage)
    #[arg(long, conflicts_with = "show_steps")]
    pub json: bool,

    /// Print the raw, normalized and canonical stages
    #[arg(long)]
    pub show_steps: bool,
}

#[derive(Args, Debug)]
pub struct InventoryArgs {
    /// Inventory file (.json or .toml); defaults to the configured source
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Baseline attributes file
    #[arg(long)]
    pub base: PathBuf,

    /// Attributes file to compare against the baseline
    #[arg(long)]
    pub candidate: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct PolicyArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Init {
        /// Path to write config file
        #[arg(long, default_value = "./hwsig.toml")]
        path: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
