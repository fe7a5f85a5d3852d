use std::path::PathBuf;

use airlink_record::RecordKind;
use clap::{Args, Subcommand};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod check;
pub mod config;
pub mod decode;
pub mod sign;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a captured telemetry byte stream.
    Decode(DecodeArgs),
    /// Append the checksum to a command body.
    Sign(SignArgs),
    /// Validate and parse a command line without executing it.
    Check(CheckArgs),
    /// Load a link configuration file and print the effective settings.
    Config(ConfigArgs),
    /// Show version information.
    Version(VersionArgs),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Decode(_) => "decode",
            Command::Sign(_) => "sign",
            Command::Check(_) => "check",
            Command::Config(_) => "config",
            Command::Version(_) => "version",
        }
    }
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Decode(args) => decode::run(args, format),
        Command::Sign(args) => sign::run(args, format),
        Command::Check(args) => check::run(args, format),
        Command::Config(args) => config::run(args, format),
        Command::Version(args) => version::run(args, format),
    }
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Capture file to read; `-` or omitted reads stdin.
    pub input: Option<PathBuf>,
    /// Only print these record kinds (comma-separated, e.g. gps,filter).
    #[arg(long = "kind", value_delimiter = ',')]
    pub kinds: Option<Vec<RecordKind>>,
    /// Stop after printing N records.
    #[arg(long)]
    pub count: Option<usize>,
    /// Exit non-zero if any frame was corrupt or undecodable.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct SignArgs {
    /// Command body including the sequence number, e.g. `12,ap,agl-ft,400`.
    pub body: String,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Full command line, e.g. `12,ap,agl-ft,400*5F`.
    pub line: String,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// JSON configuration file.
    pub path: PathBuf,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Also show build provenance and the packet layouts this build speaks.
    #[arg(long)]
    pub extended: bool,
}
