use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod demux;
pub mod inspect;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Route stdout frames to stdout and stderr frames to stderr.
    Demux(DemuxArgs),
    /// Print one record per frame.
    Inspect(InspectArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Demux(args) => demux::run(args),
        Command::Inspect(args) => inspect::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Args, Debug)]
pub struct DemuxArgs {
    /// Captured stream to read (`-` for stdin).
    pub input: PathBuf,
    /// Reject frames declaring more payload bytes than this.
    #[arg(long, value_name = "BYTES")]
    pub max_payload: Option<u32>,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Captured stream to read (`-` for stdin).
    pub input: PathBuf,
    /// Filter to specific channel ids (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub channels: Option<Vec<u8>>,
    /// Stop after printing N frames.
    #[arg(long)]
    pub count: Option<u64>,
    /// Reject frames declaring more payload bytes than this.
    #[arg(long, value_name = "BYTES")]
    pub max_payload: Option<u32>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
