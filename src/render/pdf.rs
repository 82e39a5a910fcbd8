use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use flate2::Compression;
use flate2::write::ZlibEncoder;

use crate::render::colormap::{self, Rgb};
use crate::render::layout::{
    FigureLayout, LABEL_PT, PanelLayout, TICK_LEN_PT, TICK_PT, TITLE_PT, residue_ticks,
    value_ticks,
};
use crate::render::{Figure, Panel, RenderError};

const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const FONT_ID: usize = 3;
const PAGE_ID: usize = 4;
const CONTENT_ID: usize = 5;
const FIRST_IMAGE_ID: usize = 6;

const COLORBAR_STEPS: usize = 256;

#[derive(Debug, Clone, Copy)]
enum Align {
    Left,
    Center,
    Right,
}

/// Page geometry: layout points are y-down, PDF user space is y-up.
struct Page {
    height: f32,
}

impl Page {
    fn y(&self, y: f32) -> f32 {
        self.height - y
    }
}

struct Image {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

pub fn write_pdf(figure: &Figure<'_>, layout: &FigureLayout, path: &Path) -> Result<(), RenderError> {
    figure.params.validate()?;
    let io_err = |source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    };
    let bytes = build_pdf(figure, layout).map_err(io_err)?;
    let mut w = BufWriter::new(File::create(path).map_err(io_err)?);
    w.write_all(&bytes).map_err(io_err)?;
    w.flush().map_err(io_err)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "PDF written");
    Ok(())
}

pub fn build_pdf(figure: &Figure<'_>, layout: &FigureLayout) -> io::Result<Vec<u8>> {
    let page = Page {
        height: layout.height,
    };
    let mut content = Vec::new();
    let mut images = Vec::new();

    for (panel, panel_layout) in figure.panels.iter().zip(&layout.panels) {
        write_panel(&mut content, &mut images, &page, figure, panel, panel_layout)?;
    }

    let mut objects: Vec<Vec<u8>> = Vec::with_capacity(FIRST_IMAGE_ID - 1 + images.len());
    objects.push(format!("<< /Type /Catalog /Pages {PAGES_ID} 0 R >>").into_bytes());
    objects.push(format!("<< /Type /Pages /Kids [{PAGE_ID} 0 R] /Count 1 >>").into_bytes());
    objects.push(
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_vec(),
    );

    let mut xobjects = String::new();
    for i in 0..images.len() {
        xobjects.push_str(&format!("/Im{} {} 0 R ", i, FIRST_IMAGE_ID + i));
    }
    objects.push(
        format!(
            "<< /Type /Page /Parent {PAGES_ID} 0 R /MediaBox [0 0 {:.2} {:.2}] /Resources << /Font << /F1 {FONT_ID} 0 R >> /XObject << {xobjects}>> >> /Contents {CONTENT_ID} 0 R >>",
            layout.width, layout.height
        )
        .into_bytes(),
    );
    objects.push(stream_object("", &deflate(&content)?));
    for image in &images {
        objects.push(image_object(image)?);
    }

    Ok(assemble(&objects))
}

fn assemble(objects: &[Vec<u8>]) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut offsets = Vec::with_capacity(objects.len());
    buf.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");

    for (i, body) in objects.iter().enumerate() {
        offsets.push(buf.len());
        buf.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
        buf.extend_from_slice(body);
        buf.extend_from_slice(b"\nendobj\n");
    }

    let xref_start = buf.len();
    buf.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    buf.extend_from_slice(b"0000000000 65535 f \n");
    for offset in &offsets {
        buf.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    buf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root {CATALOG_ID} 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_start
        )
        .as_bytes(),
    );
    buf
}

fn deflate(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut enc = ZlibEncoder::new(Vec::new(), Compression::default());
    enc.write_all(data)?;
    enc.finish()
}

fn stream_object(extra_dict: &str, compressed: &[u8]) -> Vec<u8> {
    let mut obj = format!(
        "<< {extra_dict}/Filter /FlateDecode /Length {} >>\nstream\n",
        compressed.len()
    )
    .into_bytes();
    obj.extend_from_slice(compressed);
    obj.extend_from_slice(b"\nendstream");
    obj
}

fn image_object(image: &Image) -> io::Result<Vec<u8>> {
    let mut raw = Vec::with_capacity(image.pixels.len() * 3);
    for px in &image.pixels {
        raw.extend_from_slice(&[px.0, px.1, px.2]);
    }
    let dict = format!(
        "/Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /DeviceRGB /BitsPerComponent 8 /Interpolate false ",
        image.width, image.height
    );
    Ok(stream_object(&dict, &deflate(&raw)?))
}

fn write_panel(
    buf: &mut Vec<u8>,
    images: &mut Vec<Image>,
    page: &Page,
    figure: &Figure<'_>,
    panel: &Panel<'_>,
    layout: &PanelLayout,
) -> io::Result<()> {
    let hm = layout.heatmap;
    let dim = panel.matrix.dim();

    if dim > 0 {
        images.push(Image {
            width: dim,
            height: dim,
            pixels: colormap::rasterize(panel.matrix, &panel.scale, figure.params.missing_color),
        });
        draw_image(buf, images.len() - 1, page, hm.x, hm.bottom(), hm.w, hm.h)?;
    }
    writeln!(buf, "0 0 0 RG 0.8 w")?;
    stroke_rect(buf, page, hm.x, hm.bottom(), hm.w, hm.h)?;

    for tick in residue_ticks(dim, figure.params.tick_interval) {
        let x = hm.x + tick.offset * hm.w;
        line(buf, page, (x, hm.bottom()), (x, hm.bottom() + TICK_LEN_PT))?;
        text(
            buf,
            page,
            (x, hm.bottom() + TICK_LEN_PT + TICK_PT),
            TICK_PT,
            Align::Center,
            &tick.label,
        )?;

        let y = hm.y + tick.offset * hm.h;
        line(buf, page, (hm.x - TICK_LEN_PT, y), (hm.x, y))?;
        text(
            buf,
            page,
            (hm.x - TICK_LEN_PT - 2.0, y + TICK_PT * 0.35),
            TICK_PT,
            Align::Right,
            &tick.label,
        )?;
    }

    let cb = layout.colorbar;
    images.push(Image {
        width: 1,
        height: COLORBAR_STEPS,
        pixels: colormap::gradient(&panel.scale, COLORBAR_STEPS),
    });
    draw_image(buf, images.len() - 1, page, cb.x, cb.bottom(), cb.w, cb.h)?;
    stroke_rect(buf, page, cb.x, cb.bottom(), cb.w, cb.h)?;
    let (lo, hi) = panel.scale.bounds();
    for tick in value_ticks(lo, hi) {
        let y = cb.bottom() - tick.offset * cb.h;
        line(buf, page, (cb.right(), y), (cb.right() + TICK_LEN_PT, y))?;
        text(
            buf,
            page,
            (cb.right() + TICK_LEN_PT + 2.0, y + TICK_PT * 0.35),
            TICK_PT,
            Align::Left,
            &tick.label,
        )?;
    }

    let (tx, ty) = layout.title_at;
    text(
        buf,
        page,
        (tx, ty + TITLE_PT * 0.35),
        TITLE_PT,
        Align::Center,
        &panel.title,
    )?;
    let (lx, ly) = layout.x_label_at;
    text(
        buf,
        page,
        (lx, ly + LABEL_PT * 0.35),
        LABEL_PT,
        Align::Center,
        &figure.params.x_label,
    )?;
    vertical_text(buf, page, layout.y_label_at, LABEL_PT, &figure.params.y_label)?;
    vertical_text(
        buf,
        page,
        layout.colorbar_label_at,
        LABEL_PT,
        &panel.colorbar_label,
    )?;
    Ok(())
}

/// Places image `index` with its top-left at (`x`, `bottom - h`) in layout space.
fn draw_image(
    buf: &mut Vec<u8>,
    index: usize,
    page: &Page,
    x: f32,
    bottom: f32,
    w: f32,
    h: f32,
) -> io::Result<()> {
    writeln!(
        buf,
        "q {:.3} 0 0 {:.3} {:.3} {:.3} cm /Im{} Do Q",
        w,
        h,
        x,
        page.y(bottom),
        index
    )
}

fn stroke_rect(buf: &mut Vec<u8>, page: &Page, x: f32, bottom: f32, w: f32, h: f32) -> io::Result<()> {
    writeln!(buf, "{:.3} {:.3} {:.3} {:.3} re S", x, page.y(bottom), w, h)
}

fn line(buf: &mut Vec<u8>, page: &Page, from: (f32, f32), to: (f32, f32)) -> io::Result<()> {
    writeln!(
        buf,
        "{:.3} {:.3} m {:.3} {:.3} l S",
        from.0,
        page.y(from.1),
        to.0,
        page.y(to.1)
    )
}

/// `at` is the baseline anchor in layout space.
fn text(
    buf: &mut Vec<u8>,
    page: &Page,
    at: (f32, f32),
    size: f32,
    align: Align,
    s: &str,
) -> io::Result<()> {
    let width = text_width(s, size);
    let x = match align {
        Align::Left => at.0,
        Align::Center => at.0 - width / 2.0,
        Align::Right => at.0 - width,
    };
    write!(
        buf,
        "BT /F1 {:.2} Tf 1 0 0 1 {:.3} {:.3} Tm (",
        size,
        x,
        page.y(at.1)
    )?;
    buf.extend_from_slice(&encode_text(s));
    writeln!(buf, ") Tj ET")
}

/// Text rotated 90 degrees counter-clockwise, centered on `at`.
fn vertical_text(
    buf: &mut Vec<u8>,
    page: &Page,
    at: (f32, f32),
    size: f32,
    s: &str,
) -> io::Result<()> {
    let width = text_width(s, size);
    write!(
        buf,
        "BT /F1 {:.2} Tf 0 1 -1 0 {:.3} {:.3} Tm (",
        size,
        at.0 + size * 0.35,
        page.y(at.1 + width / 2.0)
    )?;
    buf.extend_from_slice(&encode_text(s));
    writeln!(buf, ") Tj ET")
}

/// Approximate Helvetica advance width in points.
fn text_width(s: &str, size: f32) -> f32 {
    let units: u32 = s
        .chars()
        .map(|c| match c {
            ' ' | '.' | ',' | ':' | ';' | '!' | '|' | 'i' | 'j' | 'l' | 'I' => 278,
            '(' | ')' | '[' | ']' | '-' | 'f' | 't' | 'r' => 333,
            '0'..='9' | 'a'..='e' | 'g' | 'h' | 'n'..='q' | 'u' | 'v' | 'x'..='z' => 556,
            's' | 'k' | 'J' | 'c' => 500,
            'm' | 'M' => 833,
            'w' | 'W' => 722,
            'A'..='Z' => 667,
            _ => 584,
        })
        .sum();
    units as f32 * size / 1000.0
}

/// WinAnsi bytes with string-literal escapes; characters outside Latin-1 become '?'.
fn encode_text(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.extend_from_slice(b"\\\\"),
            '(' => out.extend_from_slice(b"\\("),
            ')' => out.extend_from_slice(b"\\)"),
            ' '..='~' => out.push(ch as u8),
            '\u{a0}'..='\u{ff}' => out.extend_from_slice(format!("\\{:03o}", ch as u32).as_bytes()),
            _ => out.push(b'?'),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/src_inline/render/pdf.rs"]
mod tests;
