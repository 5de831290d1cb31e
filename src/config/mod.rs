pub mod toml_config;

pub use toml_config::Settings;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "user-provision")]
#[command(about = "Batch account and group provisioning for Linux hosts")]
pub struct Cli {
    #[command(subcommand)]
    pub command: ProvisionCommand,

    /// Optional TOML settings file (directory database paths, audit log)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Audit log destination, overrides the settings file
    #[arg(long, global = true)]
    pub audit_log: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ProvisionCommand {
    /// Reconcile a batch input file (one `account,group,group` per line)
    Batch {
        /// Input record stream path
        file: PathBuf,

        /// Run against an empty in-memory directory instead of the host
        #[arg(long)]
        dry_run: bool,

        /// Print the batch summary as JSON
        #[arg(long)]
        summary_json: bool,
    },

    /// Create one account (locked, with home), same path as batch mode
    CreateAccount { name: String },

    /// Delete one account
    DeleteAccount {
        name: String,

        /// Also remove the home directory
        #[arg(long)]
        remove_home: bool,
    },

    /// Disable password authentication for an account
    LockAccount { name: String },

    /// Re-enable password authentication for an account
    UnlockAccount { name: String },

    /// Create one group
    CreateGroup { name: String },

    /// Delete one group
    DeleteGroup { name: String },

    /// Add an account to a group, creating the group if missing
    AddToGroup { account: String, group: String },
}
