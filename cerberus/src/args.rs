use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Stdout,
    Write,
    Check,
}

#[derive(Debug, Clone, Parser)]
#[command(
    name = "cerberus",
    version,
    about = "Redirects built-in module imports and static asset loads in JavaScript sources"
)]
pub struct CerberusCli {
    /// Files or directories to rewrite
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Extra module redirected to the runtime registry (repeatable)
    #[arg(long = "module", value_name = "NAME")]
    pub modules: Vec<String>,

    /// Asset path pattern. `/body/flags` with distinct JS flags (dgimsuyv)
    /// is read as a JS regex literal, e.g. '/\.(png|svg)$/i'; anything else
    /// is a bare regular expression
    #[arg(long, value_name = "PATTERN", allow_hyphen_values = true)]
    pub resource_test: Option<String>,

    /// Config file to use instead of discovering one
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Rewrite files in place
    #[arg(long, conflicts_with = "check")]
    pub write: bool,

    /// Exit with status 1 when any file would change
    #[arg(long)]
    pub check: bool,

    #[arg(long, short)]
    pub verbose: bool,
}

impl CerberusCli {
    pub fn output_mode(&self) -> OutputMode {
        if self.check {
            OutputMode::Check
        } else if self.write {
            OutputMode::Write
        } else {
            OutputMode::Stdout
        }
    }
}
