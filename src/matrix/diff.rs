use crate::matrix::{MatrixError, SquareMatrix};

/// How the reference was brought to the realigned size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceFit {
    pub reference_dim: usize,
    pub target_dim: usize,
    pub truncated: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResidueDelta {
    pub index: usize,
    pub present: usize,
    pub mean: Option<f32>,
    pub mean_abs: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifferenceStats {
    pub present: usize,
    pub mean: Option<f32>,
    pub mean_abs: Option<f32>,
    pub min: Option<f32>,
    pub max: Option<f32>,
}

pub fn difference(
    minuend: &SquareMatrix,
    subtrahend: &SquareMatrix,
) -> Result<SquareMatrix, MatrixError> {
    if minuend.dim() != subtrahend.dim() {
        return Err(MatrixError::DimensionMismatch {
            left: minuend.dim(),
            right: subtrahend.dim(),
        });
    }
    let cells = minuend
        .cells()
        .iter()
        .zip(subtrahend.cells())
        .map(|(a, b)| match (a, b) {
            (Some(a), Some(b)) => Some(a - b),
            _ => None,
        })
        .collect();
    Ok(SquareMatrix {
        dim: minuend.dim(),
        cells,
    })
}

/// `realigned - reference[..m, ..m]` where `m` is the realigned dimension.
/// Assumes the reference shares the realigned index order; only the size is checked.
pub fn difference_against_reference(
    realigned: &SquareMatrix,
    reference: &SquareMatrix,
) -> Result<(SquareMatrix, ReferenceFit), MatrixError> {
    let target_dim = realigned.dim();
    let trimmed = reference.leading(target_dim)?;
    let fit = ReferenceFit {
        reference_dim: reference.dim(),
        target_dim,
        truncated: reference.dim() != target_dim,
    };
    let diff = difference(realigned, &trimmed)?;
    Ok((diff, fit))
}

pub fn difference_stats(diff: &SquareMatrix) -> DifferenceStats {
    let mut present = 0usize;
    let mut sum = 0.0f64;
    let mut abs_sum = 0.0f64;
    let mut min: Option<f32> = None;
    let mut max: Option<f32> = None;
    for v in diff.present_values() {
        present += 1;
        sum += v as f64;
        abs_sum += v.abs() as f64;
        min = Some(min.map_or(v, |m| m.min(v)));
        max = Some(max.map_or(v, |m| m.max(v)));
    }
    let (mean, mean_abs) = if present > 0 {
        (
            Some((sum / present as f64) as f32),
            Some((abs_sum / present as f64) as f32),
        )
    } else {
        (None, None)
    };
    DifferenceStats {
        present,
        mean,
        mean_abs,
        min,
        max,
    }
}

pub fn residue_deltas(diff: &SquareMatrix) -> Vec<ResidueDelta> {
    (0..diff.dim())
        .map(|index| {
            let mut present = 0usize;
            let mut sum = 0.0f64;
            let mut abs_sum = 0.0f64;
            for v in diff.row(index).iter().flatten() {
                present += 1;
                sum += *v as f64;
                abs_sum += v.abs() as f64;
            }
            let (mean, mean_abs) = if present > 0 {
                (
                    Some((sum / present as f64) as f32),
                    Some((abs_sum / present as f64) as f32),
                )
            } else {
                (None, None)
            };
            ResidueDelta {
                index,
                present,
                mean,
                mean_abs,
            }
        })
        .collect()
}

/// Residues ordered by descending mean absolute difference; rows without data are skipped.
pub fn top_residues(deltas: &[ResidueDelta], limit: usize) -> Vec<ResidueDelta> {
    let mut ranked: Vec<ResidueDelta> = deltas
        .iter()
        .filter(|d| d.mean_abs.is_some())
        .cloned()
        .collect();
    ranked.sort_by(|a, b| {
        let a_abs = a.mean_abs.unwrap_or(0.0);
        let b_abs = b.mean_abs.unwrap_or(0.0);
        b_abs
            .partial_cmp(&a_abs)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.index.cmp(&b.index))
    });
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
#[path = "../../tests/src_inline/matrix/diff.rs"]
mod tests;
