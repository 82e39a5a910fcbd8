pub mod diff;
pub mod gap;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatrixError {
    #[error("matrix is not square: row {row} has {len} cells, expected {dim}")]
    NotSquare { row: usize, len: usize, dim: usize },
    #[error("gap position {gap} is outside [0, {dim}] for a {dim}x{dim} matrix")]
    GapOutOfRange { gap: usize, dim: usize },
    #[error("dimension mismatch: {left}x{left} vs {right}x{right}")]
    DimensionMismatch { left: usize, right: usize },
    #[error("cannot take the leading {requested}x{requested} block of a {dim}x{dim} matrix")]
    TruncateBeyondDim { requested: usize, dim: usize },
}

/// Square pairwise error matrix. `None` marks a missing cell.
#[derive(Debug, Clone, PartialEq)]
pub struct SquareMatrix {
    dim: usize,
    cells: Vec<Option<f32>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixStats {
    pub dim: usize,
    pub present: usize,
    pub missing: usize,
    pub min: Option<f32>,
    pub max: Option<f32>,
    pub mean: Option<f32>,
    pub median: Option<f32>,
}

impl SquareMatrix {
    pub fn missing(dim: usize) -> Self {
        Self {
            dim,
            cells: vec![None; dim * dim],
        }
    }

    pub fn from_rows(rows: Vec<Vec<Option<f32>>>) -> Result<Self, MatrixError> {
        let dim = rows.len();
        let mut cells = Vec::with_capacity(dim * dim);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != dim {
                return Err(MatrixError::NotSquare {
                    row,
                    len: values.len(),
                    dim,
                });
            }
            cells.extend(values);
        }
        Ok(Self { dim, cells })
    }

    #[cfg(test)]
    pub fn from_dense(rows: &[Vec<f32>]) -> Result<Self, MatrixError> {
        Self::from_rows(
            rows.iter()
                .map(|r| r.iter().copied().map(Some).collect())
                .collect(),
        )
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    #[cfg(test)]
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.dim || col >= self.dim {
            return None;
        }
        self.cells[row * self.dim + col]
    }

    pub fn row(&self, row: usize) -> &[Option<f32>] {
        &self.cells[row * self.dim..(row + 1) * self.dim]
    }

    pub fn cells(&self) -> &[Option<f32>] {
        &self.cells
    }

    pub fn present_values(&self) -> impl Iterator<Item = f32> + '_ {
        self.cells.iter().filter_map(|v| *v)
    }

    pub fn present_count(&self) -> usize {
        self.cells.iter().filter(|v| v.is_some()).count()
    }

    pub fn value_range(&self) -> Option<(f32, f32)> {
        let mut range: Option<(f32, f32)> = None;
        for v in self.present_values() {
            range = Some(match range {
                None => (v, v),
                Some((lo, hi)) => (lo.min(v), hi.max(v)),
            });
        }
        range
    }

    /// Leading `dim`x`dim` block.
    pub fn leading(&self, dim: usize) -> Result<SquareMatrix, MatrixError> {
        if dim > self.dim {
            return Err(MatrixError::TruncateBeyondDim {
                requested: dim,
                dim: self.dim,
            });
        }
        let mut cells = Vec::with_capacity(dim * dim);
        for row in 0..dim {
            cells.extend_from_slice(&self.row(row)[..dim]);
        }
        Ok(SquareMatrix { dim, cells })
    }

    pub fn stats(&self) -> MatrixStats {
        let mut values: Vec<f32> = self.present_values().collect();
        let present = values.len();
        let total = self.cells.len();
        if values.is_empty() {
            return MatrixStats {
                dim: self.dim,
                present: 0,
                missing: total,
                min: None,
                max: None,
                mean: None,
                median: None,
            };
        }
        values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let sum: f64 = values.iter().map(|&v| v as f64).sum();
        let median = if present % 2 == 1 {
            values[present / 2]
        } else {
            (values[present / 2 - 1] + values[present / 2]) / 2.0
        };
        MatrixStats {
            dim: self.dim,
            present,
            missing: total - present,
            min: values.first().copied(),
            max: values.last().copied(),
            mean: Some((sum / present as f64) as f32),
            median: Some(median),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/matrix/tests.rs"]
mod tests;
