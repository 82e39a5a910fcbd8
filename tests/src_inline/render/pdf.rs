use super::*;
use std::io::Read;

use flate2::read::ZlibDecoder;

use crate::matrix::SquareMatrix;
use crate::render::colormap::ColorScale;
use crate::render::{Panel, RenderParams};

fn small_figure(matrix: &SquareMatrix) -> Figure<'_> {
    Figure {
        panels: vec![
            Panel {
                title: "WT PAE".to_string(),
                matrix,
                scale: ColorScale::sequential(matrix, None),
                colorbar_label: "Expected Position Error (Å)".to_string(),
            },
            Panel {
                title: "Difference (Mutant - WT)".to_string(),
                matrix,
                scale: ColorScale::diverging(matrix),
                colorbar_label: "Difference".to_string(),
            },
        ],
        params: RenderParams {
            width_in: 8.0,
            height_in: 4.0,
            dpi: 72,
            ..RenderParams::default()
        },
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[test]
fn test_pdf_structure_and_xref_offsets() {
    let m = SquareMatrix::from_dense(&[vec![0.5, 8.0], vec![7.5, 1.0]]).unwrap();
    let fig = small_figure(&m);
    let pdf = build_pdf(&fig, &fig.layout()).unwrap();

    assert!(pdf.starts_with(b"%PDF-1.4\n"));
    assert!(pdf.ends_with(b"%%EOF\n"));

    // 5 fixed objects + heatmap and colorbar per panel.
    let xref = find(&pdf, b"xref\n0 10\n").expect("xref table");
    let tail = String::from_utf8_lossy(&pdf[xref..]).to_string();
    let startxref: usize = tail
        .lines()
        .skip_while(|l| *l != "startxref")
        .nth(1)
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(startxref, xref);

    let entries: Vec<usize> = tail
        .lines()
        .skip(3)
        .take(9)
        .map(|l| l[..10].parse().unwrap())
        .collect();
    for (i, offset) in entries.iter().enumerate() {
        let header = format!("{} 0 obj\n", i + 1);
        assert_eq!(&pdf[*offset..*offset + header.len()], header.as_bytes());
    }
    assert!(find(&pdf, b"/MediaBox [0 0 576.00 288.00]").is_some());
    assert!(find(&pdf, b"/Im3 9 0 R").is_some());
}

#[test]
fn test_content_stream_holds_text_and_images() {
    let m = SquareMatrix::from_dense(&[vec![0.5, 8.0], vec![7.5, 1.0]]).unwrap();
    let fig = small_figure(&m);
    let pdf = build_pdf(&fig, &fig.layout()).unwrap();

    let start = find(&pdf, b"5 0 obj\n").unwrap();
    let stream_at = start + find(&pdf[start..], b"stream\n").unwrap() + b"stream\n".len();
    let end = stream_at + find(&pdf[stream_at..], b"\nendstream").unwrap();
    let mut content = Vec::new();
    ZlibDecoder::new(&pdf[stream_at..end])
        .read_to_end(&mut content)
        .unwrap();

    assert!(find(&content, b"(WT PAE) Tj").is_some());
    assert!(find(&content, b"(Difference \\(Mutant - WT\\)) Tj").is_some());
    assert!(find(&content, b"(Expected Position Error \\(\\305\\)) Tj").is_some());
    assert!(find(&content, b"/Im0 Do").is_some());
    assert!(find(&content, b"/Im3 Do").is_some());
    assert!(find(&content, b"0 1 -1 0").is_some());
}

#[test]
fn test_empty_matrix_skips_heatmap_image() {
    let m = SquareMatrix::missing(0);
    let fig = small_figure(&m);
    let pdf = build_pdf(&fig, &fig.layout()).unwrap();
    // Only the two colorbars become images.
    assert!(find(&pdf, b"/Im1 7 0 R").is_some());
    assert!(find(&pdf, b"/Im2").is_none());
}

#[test]
fn test_encode_text_escapes() {
    assert_eq!(encode_text("a(b)\\"), b"a\\(b\\)\\\\".to_vec());
    assert_eq!(encode_text("Å"), b"\\305".to_vec());
    assert_eq!(encode_text("Δ"), b"?".to_vec());
}

#[test]
fn test_write_pdf_to_disk() {
    let m = SquareMatrix::from_dense(&[vec![1.0]]).unwrap();
    let fig = small_figure(&m);
    let mut path = std::env::temp_dir();
    path.push(format!("kira_paediff_pdf_test_{}.pdf", std::process::id()));
    write_pdf(&fig, &fig.layout(), &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.4"));
    std::fs::remove_file(&path).unwrap();
}
