use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use nupd_manifest::Channel;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Inspect update.ver mirror manifests",
    arg_required_else_help = true
)]
pub struct Args {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print output and logs as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize components and host lists
    Inspect {
        /// Manifest file, or `-` for stdin
        input: PathBuf,
    },

    /// List mirror host entries
    Hosts {
        /// Manifest file, or `-` for stdin
        input: PathBuf,

        /// Only list this channel (regular, prerelease, deferred)
        #[arg(short, long)]
        channel: Option<Channel>,
    },

    /// Show every attribute of one component
    Component {
        /// Manifest file, or `-` for stdin
        input: PathBuf,

        /// Section name of the component
        name: String,
    },

    /// Report fields that were dropped while decoding
    Check {
        /// Manifest file, or `-` for stdin
        input: PathBuf,
    },
}
