use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use flate2::read::GzDecoder;
use memmap2::Mmap;
use thiserror::Error;

pub mod record;

use crate::matrix::{MatrixError, SquareMatrix};
use record::{PaeLayout, extract_pae};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{path}: no PAE matrix found (expected \"pae\", \"predicted_aligned_error\" or residue1/residue2/distance)")]
    MissingPae { path: PathBuf },
    #[error("{path}: {msg}")]
    InvalidInput { path: PathBuf, msg: String },
    #[error("{path}: {source}")]
    Matrix {
        path: PathBuf,
        #[source]
        source: MatrixError,
    },
}

#[derive(Debug, Clone)]
pub struct PaeInput {
    pub path: PathBuf,
    pub layout: PaeLayout,
    pub max_pae: Option<f32>,
    pub matrix: SquareMatrix,
}

pub fn load_pae(path: &Path) -> Result<PaeInput, InputError> {
    let io_err = |source| InputError::Io {
        path: path.to_path_buf(),
        source,
    };

    let value: serde_json::Value = if path.extension().is_some_and(|ext| ext == "gz") {
        let file = File::open(path).map_err(io_err)?;
        let mut bytes = Vec::new();
        GzDecoder::new(file)
            .read_to_end(&mut bytes)
            .map_err(io_err)?;
        parse_json(path, &bytes)?
    } else {
        let file = File::open(path).map_err(io_err)?;
        let len = file.metadata().map_err(io_err)?.len();
        if len == 0 {
            return Err(InputError::InvalidInput {
                path: path.to_path_buf(),
                msg: "file is empty".to_string(),
            });
        }
        let mmap = unsafe { Mmap::map(&file).map_err(io_err)? };
        parse_json(path, &mmap[..])?
    };

    let extracted = extract_pae(value, path)?;
    let matrix = SquareMatrix::from_rows(extracted.rows).map_err(|source| InputError::Matrix {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(
        path = %path.display(),
        layout = extracted.layout.as_str(),
        dim = matrix.dim(),
        missing = matrix.dim() * matrix.dim() - matrix.present_count(),
        "loaded PAE matrix"
    );

    Ok(PaeInput {
        path: path.to_path_buf(),
        layout: extracted.layout,
        max_pae: extracted.max_pae,
        matrix,
    })
}

fn parse_json(path: &Path, bytes: &[u8]) -> Result<serde_json::Value, InputError> {
    serde_json::from_slice(bytes).map_err(|source| InputError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
