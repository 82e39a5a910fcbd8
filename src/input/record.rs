use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::input::InputError;

/// Which on-disk PAE layout a file used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaeLayout {
    /// `{"pae": [[...]]}` (AlphaFold3 full_data, ColabFold scores).
    Pae,
    /// `{"predicted_aligned_error": [[...]]}` (AlphaFold DB).
    PredictedAlignedError,
    /// `{"residue1": [...], "residue2": [...], "distance": [...]}` (AlphaFold DB v1).
    Flattened,
}

impl PaeLayout {
    pub fn as_str(self) -> &'static str {
        match self {
            PaeLayout::Pae => "pae",
            PaeLayout::PredictedAlignedError => "predicted_aligned_error",
            PaeLayout::Flattened => "residue_pairs",
        }
    }
}

#[derive(Debug, Deserialize)]
struct PaeRecord {
    pae: Option<Vec<Vec<Option<f32>>>>,
    max_pae: Option<f32>,
    predicted_aligned_error: Option<Vec<Vec<Option<f32>>>>,
    max_predicted_aligned_error: Option<f32>,
    residue1: Option<Vec<usize>>,
    residue2: Option<Vec<usize>>,
    distance: Option<Vec<Option<f32>>>,
}

#[derive(Debug)]
pub struct ExtractedPae {
    pub layout: PaeLayout,
    pub max_pae: Option<f32>,
    pub rows: Vec<Vec<Option<f32>>>,
}

pub fn extract_pae(value: Value, path: &Path) -> Result<ExtractedPae, InputError> {
    let invalid = |msg: &str| InputError::InvalidInput {
        path: path.to_path_buf(),
        msg: msg.to_string(),
    };

    let object = match value {
        Value::Array(items) => {
            let count = items.len();
            let first = items
                .into_iter()
                .next()
                .ok_or_else(|| invalid("top-level array is empty"))?;
            if count > 1 {
                tracing::warn!(
                    path = %path.display(),
                    records = count,
                    "multiple PAE records in file; using the first"
                );
            }
            first
        }
        other => other,
    };
    if !object.is_object() {
        return Err(invalid("expected a JSON object holding the PAE matrix"));
    }

    let record: PaeRecord = serde_json::from_value(object).map_err(|source| InputError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let (layout, max_pae, rows) = if let Some(rows) = record.pae {
        (PaeLayout::Pae, record.max_pae, rows)
    } else if let Some(rows) = record.predicted_aligned_error {
        (
            PaeLayout::PredictedAlignedError,
            record.max_predicted_aligned_error,
            rows,
        )
    } else if let (Some(r1), Some(r2), Some(dist)) =
        (record.residue1, record.residue2, record.distance)
    {
        let rows = expand_flattened(&r1, &r2, &dist).map_err(|msg| invalid(&msg))?;
        (PaeLayout::Flattened, record.max_predicted_aligned_error, rows)
    } else {
        return Err(InputError::MissingPae {
            path: path.to_path_buf(),
        });
    };

    check_finite(&rows).map_err(|msg| invalid(&msg))?;
    Ok(ExtractedPae {
        layout,
        max_pae: max_pae.filter(|v| v.is_finite()),
        rows,
    })
}

/// Out-of-range JSON numbers deserialize to infinity.
fn check_finite(rows: &[Vec<Option<f32>>]) -> Result<(), String> {
    for (i, row) in rows.iter().enumerate() {
        if let Some(j) = row.iter().position(|v| v.is_some_and(|v| !v.is_finite())) {
            return Err(format!(
                "non-finite PAE value at row {}, column {}",
                i + 1,
                j + 1
            ));
        }
    }
    Ok(())
}

fn expand_flattened(
    residue1: &[usize],
    residue2: &[usize],
    distance: &[Option<f32>],
) -> Result<Vec<Vec<Option<f32>>>, String> {
    if residue1.len() != residue2.len() || residue1.len() != distance.len() {
        return Err(format!(
            "residue1/residue2/distance lengths differ: {}/{}/{}",
            residue1.len(),
            residue2.len(),
            distance.len()
        ));
    }
    let dim = residue1
        .iter()
        .chain(residue2)
        .copied()
        .max()
        .unwrap_or(0);
    if dim.checked_mul(dim) != Some(distance.len()) {
        return Err(format!(
            "{} residue pairs cannot fill a {dim}x{dim} matrix",
            distance.len()
        ));
    }
    let mut rows = vec![vec![None; dim]; dim];
    for ((&r1, &r2), &d) in residue1.iter().zip(residue2).zip(distance) {
        if r1 == 0 || r2 == 0 {
            return Err("residue numbers are 1-based; found 0".to_string());
        }
        rows[r1 - 1][r2 - 1] = d;
    }
    Ok(rows)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/record.rs"]
mod tests;
