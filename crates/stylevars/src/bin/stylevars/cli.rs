//! stylevars cli interface

use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Formatter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Change the work directory
    ///
    /// Can be specified multiple times. Note that all
    /// paths on the way to the final path must exist.
    ///
    /// This is equivalent to running { cd <directory>; stylevars ... }
    #[clap(short = 'C', long = "directory", global(true))]
    pub directory: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Substitute variables in a document
    ///
    /// Reads the document (yaml or json) from stdin unless --input-file is given
    #[command(alias = "sub")]
    Substitute(SubstituteCommand),

    /// Print debug information for development
    Dev(DevCommand),
}

#[derive(Parser, Debug)]
pub struct SubstituteCommand {
    #[clap(flatten)]
    pub input: InputArgs,

    #[clap(flatten)]
    pub options: OptionArgs,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug)]
pub struct InputArgs {
    /// Load the document from a file
    #[clap(short = 'f', long = "input-file")]
    pub file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct OptionArgs {
    /// Load options (variables, silent, only) from a yaml or json file
    #[clap(long = "config")]
    pub config: Option<PathBuf>,

    /// Define a variable, overrides the config file
    #[clap(long = "var", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub variables: Vec<(String, String)>,

    /// Only substitute this variable, leave definitions in place
    #[clap(long = "only", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub only: Vec<(String, String)>,

    /// Leave unknown variables as they are
    #[clap(long = "silent")]
    pub silent: bool,
}

fn parse_assignment(input: &str) -> Result<(String, String), String> {
    input
        .split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("expected NAME=VALUE, got `{input}`"))
}

#[derive(Parser, Debug)]
pub struct OutputArgs {
    #[arg(short = 'F', long = "output-format", default_value_t)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Clone, Default, Debug)]
pub enum OutputFormat {
    Json,
    #[default]
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Yaml => f.write_str("yaml"),
        }
    }
}

#[derive(Parser, Debug)]
pub struct DevCommand {
    #[clap(flatten)]
    pub input: InputArgs,

    #[clap(flatten)]
    pub options: OptionArgs,

    #[command(subcommand)]
    pub command: DevSubCommand,
}

#[derive(Subcommand, Debug)]
pub enum DevSubCommand {
    /// The loaded document tree
    Tree,
    /// The variable table after substitution
    Table,
}
