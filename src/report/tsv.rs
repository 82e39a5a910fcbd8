use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::matrix::diff::ResidueDelta;
use crate::report::{ReportError, format_opt_f32};

const HEADER: [&str; 5] = [
    "residue",
    "is_gap",
    "present",
    "mean_delta",
    "mean_abs_delta",
];

pub fn write_residue_tsv(
    deltas: &[ResidueDelta],
    gap_position: usize,
    path: &Path,
) -> Result<(), ReportError> {
    write_rows(deltas, gap_position, path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_rows(deltas: &[ResidueDelta], gap_position: usize, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    writeln!(w, "{}", HEADER.join("\t"))?;
    for d in deltas {
        let row = [
            (d.index + 1).to_string(),
            (d.index == gap_position).to_string(),
            d.present.to_string(),
            format_opt_f32(d.mean),
            format_opt_f32(d.mean_abs),
        ]
        .join("\t");
        writeln!(w, "{}", row)?;
    }
    w.flush()
}
