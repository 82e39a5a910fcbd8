use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::matrix::MatrixStats;
use crate::matrix::diff::{DifferenceStats, ResidueDelta};

pub mod json;
pub mod tsv;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub tool: String,
    pub version: String,
    pub inputs: InputsSection,
    pub alignment: AlignmentSection,
    pub matrices: MatricesSection,
    pub difference: DifferenceSection,
    pub top_residues: Vec<ResidueEntry>,
    pub outputs: OutputsSection,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputsSection {
    pub wild_type: InputEntry,
    pub mutant: InputEntry,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputEntry {
    pub path: String,
    pub layout: String,
    pub dim: usize,
    pub max_pae: Option<f32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlignmentSection {
    pub gap_position: usize,
    pub gap_residue: usize,
    pub mutation_label: String,
    pub wild_type_dim: usize,
    pub mutant_dim: usize,
    pub realigned_dim: usize,
    pub wild_type_truncated: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatricesSection {
    pub wild_type: MatrixEntry,
    pub mutant_realigned: MatrixEntry,
    pub difference: MatrixEntry,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatrixEntry {
    pub dim: usize,
    pub present: usize,
    pub missing: usize,
    pub min: Option<f32>,
    pub max: Option<f32>,
    pub mean: Option<f32>,
    pub median: Option<f32>,
}

impl From<MatrixStats> for MatrixEntry {
    fn from(s: MatrixStats) -> Self {
        Self {
            dim: s.dim,
            present: s.present,
            missing: s.missing,
            min: s.min,
            max: s.max,
            mean: s.mean,
            median: s.median,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DifferenceSection {
    pub present: usize,
    pub mean: Option<f32>,
    pub mean_abs: Option<f32>,
    pub min: Option<f32>,
    pub max: Option<f32>,
}

impl From<DifferenceStats> for DifferenceSection {
    fn from(s: DifferenceStats) -> Self {
        Self {
            present: s.present,
            mean: s.mean,
            mean_abs: s.mean_abs,
            min: s.min,
            max: s.max,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResidueEntry {
    /// 1-based, realigned frame.
    pub residue: usize,
    pub present: usize,
    pub mean_delta: Option<f32>,
    pub mean_abs_delta: Option<f32>,
}

impl From<&ResidueDelta> for ResidueEntry {
    fn from(d: &ResidueDelta) -> Self {
        Self {
            residue: d.index + 1,
            present: d.present,
            mean_delta: d.mean,
            mean_abs_delta: d.mean_abs,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OutputsSection {
    pub png: Option<String>,
    pub pdf: Option<String>,
    pub residue_table: Option<String>,
}

pub fn format_f32_6(v: f32) -> String {
    format!("{:.6}", v)
}

pub fn format_opt_f32(v: Option<f32>) -> String {
    v.map_or_else(|| "NA".to_string(), format_f32_6)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
