use std::fs::File;
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use thiserror::Error;

pub mod csv;

use csv::{ParsedReport, parse_report};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Read a health-report CSV (gzip-transparent) and parse it.
pub fn load_report(path: &Path) -> Result<ParsedReport, InputError> {
    if !path.exists() {
        return Err(InputError::MissingInput(format!(
            "{} does not exist",
            path.display()
        )));
    }
    let text = read_maybe_gz(path)?;
    let parsed = parse_report(&text);
    tracing::info!(
        "parsed {} records from {}",
        parsed.records.len(),
        path.display()
    );
    Ok(parsed)
}

fn read_maybe_gz(path: &Path) -> Result<String, InputError> {
    let file = File::open(path)?;
    let mut text = String::new();
    if path.extension().is_some_and(|ext| ext == "gz") {
        GzDecoder::new(file).read_to_string(&mut text).map_err(|e| {
            InputError::InvalidInput(format!("cannot decompress {}: {e}", path.display()))
        })?;
    } else {
        let mut file = file;
        file.read_to_string(&mut text)?;
    }
    Ok(text)
}
