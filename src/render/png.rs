use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::render::colormap::{self, Rgb};
use crate::render::layout::{
    FigureLayout, LABEL_PT, PanelLayout, POINTS_PER_INCH, TICK_LEN_PT, TICK_PT, TITLE_PT,
    residue_ticks, value_ticks,
};
use crate::render::{Figure, Panel, RenderError};

/// Points-to-pixels mapping for one raster.
#[derive(Debug, Clone, Copy)]
struct Raster {
    px_per_pt: f32,
}

impl Raster {
    fn px(&self, pt: f32) -> i32 {
        (pt * self.px_per_pt).round() as i32
    }

    fn at(&self, (x, y): (f32, f32)) -> (i32, i32) {
        (self.px(x), self.px(y))
    }

    fn font(&self, pt: f32) -> f64 {
        (pt * self.px_per_pt) as f64
    }
}

pub fn write_png(figure: &Figure<'_>, layout: &FigureLayout, path: &Path) -> Result<(), RenderError> {
    figure.params.validate()?;
    let backend_err = |e: &dyn std::fmt::Display| RenderError::Backend {
        path: path.to_path_buf(),
        msg: e.to_string(),
    };

    let raster = Raster {
        px_per_pt: figure.params.dpi as f32 / POINTS_PER_INCH,
    };
    let root = BitMapBackend::new(path, figure.params.pixel_size()).into_drawing_area();
    root.fill(&WHITE).map_err(|e| backend_err(&e))?;

    for (panel, panel_layout) in figure.panels.iter().zip(&layout.panels) {
        draw_panel(&root, raster, figure, panel, panel_layout).map_err(|e| backend_err(&e))?;
    }

    root.present().map_err(|e| backend_err(&e))?;
    tracing::debug!(path = %path.display(), "PNG written");
    Ok(())
}

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

fn text_style(size: f64, h: HPos, v: VPos) -> TextStyle<'static> {
    ("sans-serif", size)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(h, v))
}

fn draw_panel<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    raster: Raster,
    figure: &Figure<'_>,
    panel: &Panel<'_>,
    layout: &PanelLayout,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let hm = layout.heatmap;
    let dim = panel.matrix.dim();
    let missing = figure.params.missing_color;

    if dim > 0 {
        let cell = hm.w / dim as f32;
        for row in 0..dim {
            let y0 = raster.px(hm.y + row as f32 * cell);
            let y1 = raster.px(hm.y + (row + 1) as f32 * cell);
            for (col, value) in panel.matrix.row(row).iter().enumerate() {
                let x0 = raster.px(hm.x + col as f32 * cell);
                let x1 = raster.px(hm.x + (col + 1) as f32 * cell);
                let color = panel.scale.cell_color(*value, missing);
                root.draw(&Rectangle::new([(x0, y0), (x1, y1)], rgb(color).filled()))?;
            }
        }
    }
    root.draw(&Rectangle::new(
        [raster.at((hm.x, hm.y)), raster.at((hm.right(), hm.bottom()))],
        BLACK.stroke_width(1),
    ))?;

    let tick_font = raster.font(TICK_PT);
    let ticks = residue_ticks(dim, figure.params.tick_interval);
    for tick in &ticks {
        let x = hm.x + tick.offset * hm.w;
        root.draw(&PathElement::new(
            vec![
                raster.at((x, hm.bottom())),
                raster.at((x, hm.bottom() + TICK_LEN_PT)),
            ],
            BLACK.stroke_width(1),
        ))?;
        root.draw(&Text::new(
            tick.label.clone(),
            raster.at((x, hm.bottom() + TICK_LEN_PT + 2.0)),
            text_style(tick_font, HPos::Center, VPos::Top),
        ))?;

        let y = hm.y + tick.offset * hm.h;
        root.draw(&PathElement::new(
            vec![raster.at((hm.x - TICK_LEN_PT, y)), raster.at((hm.x, y))],
            BLACK.stroke_width(1),
        ))?;
        root.draw(&Text::new(
            tick.label.clone(),
            raster.at((hm.x - TICK_LEN_PT - 2.0, y)),
            text_style(tick_font, HPos::Right, VPos::Center),
        ))?;
    }

    let cb = layout.colorbar;
    let (top, bottom) = (raster.px(cb.y), raster.px(cb.bottom()));
    let steps = (bottom - top).max(1) as usize;
    for (i, color) in colormap::gradient(&panel.scale, steps).into_iter().enumerate() {
        let y = top + i as i32;
        root.draw(&Rectangle::new(
            [(raster.px(cb.x), y), (raster.px(cb.right()), y + 1)],
            rgb(color).filled(),
        ))?;
    }
    root.draw(&Rectangle::new(
        [raster.at((cb.x, cb.y)), raster.at((cb.right(), cb.bottom()))],
        BLACK.stroke_width(1),
    ))?;
    let (lo, hi) = panel.scale.bounds();
    for tick in value_ticks(lo, hi) {
        let y = cb.bottom() - tick.offset * cb.h;
        root.draw(&PathElement::new(
            vec![
                raster.at((cb.right(), y)),
                raster.at((cb.right() + TICK_LEN_PT, y)),
            ],
            BLACK.stroke_width(1),
        ))?;
        root.draw(&Text::new(
            tick.label,
            raster.at((cb.right() + TICK_LEN_PT + 2.0, y)),
            text_style(tick_font, HPos::Left, VPos::Center),
        ))?;
    }

    root.draw(&Text::new(
        panel.title.clone(),
        raster.at(layout.title_at),
        text_style(raster.font(TITLE_PT), HPos::Center, VPos::Center),
    ))?;
    root.draw(&Text::new(
        figure.params.x_label.clone(),
        raster.at(layout.x_label_at),
        text_style(raster.font(LABEL_PT), HPos::Center, VPos::Center),
    ))?;

    let rotated = ("sans-serif", raster.font(LABEL_PT))
        .into_font()
        .transform(FontTransform::Rotate270)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    root.draw(&Text::new(
        figure.params.y_label.clone(),
        raster.at(layout.y_label_at),
        rotated.clone(),
    ))?;
    root.draw(&Text::new(
        panel.colorbar_label.clone(),
        raster.at(layout.colorbar_label_at),
        rotated,
    ))?;

    Ok(())
}
