use crate::matrix::{MatrixError, SquareMatrix};

/// Re-indexes `matrix` into a frame one residue larger, with row `gap` and
/// column `gap` left missing. Entries at or past `gap` on an axis shift by one
/// on that axis.
pub fn insert_gap(matrix: &SquareMatrix, gap: usize) -> Result<SquareMatrix, MatrixError> {
    let n = matrix.dim();
    if gap > n {
        return Err(MatrixError::GapOutOfRange { gap, dim: n });
    }

    let size = n + 1;
    let mut out = SquareMatrix::missing(size);

    // (source rows, source cols, row shift, col shift)
    let blocks = [
        (0..gap, 0..gap, 0, 0),
        (gap..n, 0..gap, 1, 0),
        (0..gap, gap..n, 0, 1),
        (gap..n, gap..n, 1, 1),
    ];
    for (rows, cols, row_shift, col_shift) in blocks {
        if cols.is_empty() {
            continue;
        }
        for row in rows {
            let src = &matrix.row(row)[cols.clone()];
            let start = (row + row_shift) * size + cols.start + col_shift;
            out.cells[start..start + src.len()].copy_from_slice(src);
        }
    }

    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/matrix/gap.rs"]
mod tests;
