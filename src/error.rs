use std::path::PathBuf;

use thiserror::Error;

use crate::input::InputError;
use crate::matrix::MatrixError;
use crate::render::RenderError;
use crate::report::ReportError;

#[derive(Debug, Error)]
pub enum PaeDiffError {
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error("cannot create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("realignment failed: {0}")]
    Matrix(#[from] MatrixError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Report(#[from] ReportError),
}
