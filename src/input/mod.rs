use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub mod axes;
pub mod catalog_file;
pub mod companies;

pub use axes::load_axes;
pub use catalog_file::load_catalog;
pub use companies::load_companies;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Opens `path`, decompressing on the fly when it ends in `.gz`.
pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    if !path.exists() {
        return Err(InputError::MissingInput(path.display().to_string()));
    }
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, InputError> {
    let reader = open_maybe_gz(path)?;
    Ok(serde_json::from_reader(reader)?)
}

pub(crate) fn read_text(path: &Path) -> Result<String, InputError> {
    let mut reader = open_maybe_gz(path)?;
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    Ok(text)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
