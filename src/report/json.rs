use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::report::{ReportError, Summary};

pub fn render_summary_json(summary: &Summary) -> Result<String, ReportError> {
    let mut out = serde_json::to_string_pretty(summary)?;
    out.push('\n');
    Ok(out)
}

pub fn write_summary_json(summary: &Summary, path: &Path) -> Result<(), ReportError> {
    let json = render_summary_json(summary)?;
    write_text(path, &json).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn write_text(path: &Path, contents: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);
    w.write_all(contents.as_bytes())?;
    w.flush()
}
