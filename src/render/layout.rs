use crate::render::RenderParams;

pub const POINTS_PER_INCH: f32 = 72.0;

pub const TITLE_PT: f32 = 14.0;
pub const LABEL_PT: f32 = 11.0;
pub const TICK_PT: f32 = 9.0;
pub const TICK_LEN_PT: f32 = 4.0;

const COLORBAR_GAP_PT: f32 = 12.0;
const COLORBAR_WIDTH_PT: f32 = 14.0;
const OUTER_PAD_PT: f32 = 8.0;
const COLORBAR_TICK_TARGET: usize = 6;

/// Axis-aligned box in points, origin at the top-left of the figure.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn center_y(&self) -> f32 {
        self.y + self.h / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelLayout {
    pub heatmap: Rect,
    pub colorbar: Rect,
    pub title_at: (f32, f32),
    pub x_label_at: (f32, f32),
    pub y_label_at: (f32, f32),
    pub colorbar_label_at: (f32, f32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FigureLayout {
    pub width: f32,
    pub height: f32,
    pub panels: Vec<PanelLayout>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTick {
    /// Fraction along the axis, 0 at the origin edge.
    pub offset: f32,
    pub label: String,
}

pub fn figure_layout(params: &RenderParams, n_panels: usize) -> FigureLayout {
    let width = params.width_in * POINTS_PER_INCH;
    let height = params.height_in * POINTS_PER_INCH;
    let panel_w = width / n_panels.max(1) as f32;

    let title_h = TITLE_PT * 2.6;
    let bottom_h = TICK_PT * 1.6 + LABEL_PT * 2.4 + TICK_LEN_PT;
    let left_w = TICK_PT * 3.2 + LABEL_PT * 2.2 + TICK_LEN_PT;
    let colorbar_labels_w = TICK_PT * 3.6 + LABEL_PT * 2.2 + TICK_LEN_PT;

    let avail_w =
        panel_w - left_w - COLORBAR_GAP_PT - COLORBAR_WIDTH_PT - colorbar_labels_w - OUTER_PAD_PT;
    let avail_h = height - title_h - bottom_h - OUTER_PAD_PT;
    let side = avail_w.min(avail_h).max(1.0);
    let block_w = left_w + side + COLORBAR_GAP_PT + COLORBAR_WIDTH_PT + colorbar_labels_w;

    let panels = (0..n_panels)
        .map(|k| {
            let panel_x = k as f32 * panel_w;
            let origin_x = panel_x + ((panel_w - block_w) / 2.0).max(0.0);
            let heatmap = Rect {
                x: origin_x + left_w,
                y: title_h,
                w: side,
                h: side,
            };
            let colorbar = Rect {
                x: heatmap.right() + COLORBAR_GAP_PT,
                y: heatmap.y,
                w: COLORBAR_WIDTH_PT,
                h: side,
            };
            PanelLayout {
                heatmap,
                colorbar,
                title_at: (heatmap.center_x(), title_h * 0.5),
                x_label_at: (
                    heatmap.center_x(),
                    heatmap.bottom() + TICK_LEN_PT + TICK_PT * 1.6 + LABEL_PT * 1.2,
                ),
                y_label_at: (
                    heatmap.x - TICK_LEN_PT - TICK_PT * 3.2 - LABEL_PT * 0.9,
                    heatmap.center_y(),
                ),
                colorbar_label_at: (
                    colorbar.right() + TICK_LEN_PT + TICK_PT * 3.6 + LABEL_PT * 0.9,
                    colorbar.center_y(),
                ),
            }
        })
        .collect();

    FigureLayout {
        width,
        height,
        panels,
    }
}

/// Ticks every `interval` residues, at cell centers, labelled 1-based.
pub fn residue_ticks(dim: usize, interval: usize) -> Vec<AxisTick> {
    if dim == 0 {
        return Vec::new();
    }
    (0..dim)
        .step_by(interval.max(1))
        .map(|idx| AxisTick {
            offset: (idx as f32 + 0.5) / dim as f32,
            label: (idx + 1).to_string(),
        })
        .collect()
}

/// Round-valued ticks covering `[lo, hi]`; offset 0 is `lo`.
pub fn value_ticks(lo: f32, hi: f32) -> Vec<AxisTick> {
    let span = hi - lo;
    if span <= 0.0 || !span.is_finite() {
        return Vec::new();
    }
    let step = nice_step(span / COLORBAR_TICK_TARGET as f32);
    let decimals = (-step.log10().floor()).max(0.0) as usize;
    let first = (lo / step).ceil() as i64;
    let last = (hi / step + 1e-4).floor() as i64;
    (first..=last)
        .map(|k| {
            let value = k as f32 * step;
            AxisTick {
                offset: ((value - lo) / span).clamp(0.0, 1.0),
                label: format_tick(value, decimals),
            }
        })
        .collect()
}

fn nice_step(raw: f32) -> f32 {
    let magnitude = 10f32.powf(raw.log10().floor());
    let norm = raw / magnitude;
    let nice = if norm < 1.5 {
        1.0
    } else if norm < 3.0 {
        2.0
    } else if norm < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn format_tick(value: f32, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, value);
    if s.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        return format!("{:.*}", decimals, 0.0);
    }
    s
}

#[cfg(test)]
#[path = "../../tests/src_inline/render/layout.rs"]
mod tests;
