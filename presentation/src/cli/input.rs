//! Patient case input

use council_domain::PatientCase;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaseInputError {
    #[error("Could not read case from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Case is not a JSON object: {0}")]
    Json(#[from] serde_json::Error),
}

/// Read a case from a file, or from stdin when `path` is `-`.
pub fn read_case(path: &Path) -> Result<PatientCase, CaseInputError> {
    let io_error = |source| CaseInputError::Io {
        path: path.to_path_buf(),
        source,
    };

    let text = if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(io_error)?;
        text
    } else {
        std::fs::read_to_string(path).map_err(io_error)?
    };

    parse_case(&text)
}

/// Parse a case; any JSON object is accepted, unknown keys are kept.
pub fn parse_case(text: &str) -> Result<PatientCase, CaseInputError> {
    Ok(serde_json::from_str(text)?)
}
