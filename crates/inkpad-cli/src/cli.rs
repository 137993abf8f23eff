//! Command line definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};

use inkpad_format::ContainerKind;

#[derive(Debug, Parser)]
#[command(name = "inkpad", version, about = "Inspect and convert notebook documents")]
pub struct Cli {
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print a summary of a document.
    Info(InfoArgs),
    /// Convert a document between container forms.
    Convert(ConvertArgs),
}

#[derive(Debug, Args)]
pub struct InfoArgs {
    /// Document to inspect (any container form).
    pub file: PathBuf,
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Input document (form detected from the bytes).
    pub input: PathBuf,
    /// Output path.
    pub output: PathBuf,
    /// Container form to write.
    #[arg(long, value_enum, default_value_t = FormatArg::Archive)]
    pub format: FormatArg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Zip archive with attachment entries (current form).
    Archive,
    /// Gzip-compressed flat markup (legacy).
    Gzip,
    /// Plain flat markup (legacy).
    Flat,
}

impl From<FormatArg> for ContainerKind {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Archive => ContainerKind::Archive,
            FormatArg::Gzip => ContainerKind::CompressedFlat,
            FormatArg::Flat => ContainerKind::Flat,
        }
    }
}
