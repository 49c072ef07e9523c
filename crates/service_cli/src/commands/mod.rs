//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Renderers return a
//! `String` so the command only decides where it goes.

pub mod models;
pub mod price;
pub mod sweep;

use std::str::FromStr;

use crate::{CliError, Result};

/// Output formats shared by the `price` and `sweep` commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: json, csv, table",
                other
            ))),
        }
    }
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let bytes = writer
        .into_inner()
        .map_err(|err| CliError::Io(err.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
