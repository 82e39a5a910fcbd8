use crate::matrix::SquareMatrix;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const WHITE: Rgb = Rgb(255, 255, 255);

// Evenly spaced stops sampled from matplotlib's viridis and coolwarm.
const VIRIDIS: [Rgb; 9] = [
    Rgb(68, 1, 84),
    Rgb(71, 44, 122),
    Rgb(59, 81, 139),
    Rgb(44, 113, 142),
    Rgb(33, 144, 141),
    Rgb(39, 173, 129),
    Rgb(92, 200, 99),
    Rgb(170, 220, 50),
    Rgb(253, 231, 37),
];

const COOLWARM: [Rgb; 5] = [
    Rgb(59, 76, 192),
    Rgb(141, 176, 254),
    Rgb(221, 221, 221),
    Rgb(244, 154, 123),
    Rgb(180, 4, 38),
];

const MIN_SPAN: f32 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorScale {
    /// viridis over `[min, max]`.
    Sequential { min: f32, max: f32 },
    /// coolwarm over `[-limit, limit]`, white-grey at zero.
    Diverging { limit: f32 },
}

impl ColorScale {
    pub fn sequential(matrix: &SquareMatrix, fixed_max: Option<f32>) -> Self {
        let (min, max) = match (fixed_max, matrix.value_range()) {
            (Some(max), _) => (0.0, max),
            (None, Some(range)) => range,
            (None, None) => (0.0, 1.0),
        };
        if max - min < MIN_SPAN {
            ColorScale::Sequential {
                min: min - 0.5,
                max: max + 0.5,
            }
        } else {
            ColorScale::Sequential { min, max }
        }
    }

    pub fn diverging(matrix: &SquareMatrix) -> Self {
        let limit = matrix
            .value_range()
            .map(|(lo, hi)| lo.abs().max(hi.abs()))
            .unwrap_or(0.0);
        ColorScale::Diverging {
            limit: if limit < MIN_SPAN { 1.0 } else { limit },
        }
    }

    pub fn bounds(&self) -> (f32, f32) {
        match *self {
            ColorScale::Sequential { min, max } => (min, max),
            ColorScale::Diverging { limit } => (-limit, limit),
        }
    }

    /// Position of `value` on the scale, clamped to [0, 1].
    pub fn normalize(&self, value: f32) -> f32 {
        let (lo, hi) = self.bounds();
        ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
    }

    pub fn color(&self, value: f32) -> Rgb {
        let t = self.normalize(value);
        match self {
            ColorScale::Sequential { .. } => sample(&VIRIDIS, t),
            ColorScale::Diverging { .. } => sample(&COOLWARM, t),
        }
    }

    pub fn cell_color(&self, value: Option<f32>, missing: Rgb) -> Rgb {
        value.map_or(missing, |v| self.color(v))
    }
}

fn sample(stops: &[Rgb], t: f32) -> Rgb {
    let last = stops.len() - 1;
    let pos = t.clamp(0.0, 1.0) * last as f32;
    let idx = (pos.floor() as usize).min(last - 1);
    let frac = pos - idx as f32;
    let (a, b) = (stops[idx], stops[idx + 1]);
    let lerp = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * frac).round() as u8;
    Rgb(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// Row-major cell colors, row 0 first.
pub fn rasterize(matrix: &SquareMatrix, scale: &ColorScale, missing: Rgb) -> Vec<Rgb> {
    matrix
        .cells()
        .iter()
        .map(|v| scale.cell_color(*v, missing))
        .collect()
}

/// Colorbar gradient from the top (scale max) to the bottom (scale min).
pub fn gradient(scale: &ColorScale, steps: usize) -> Vec<Rgb> {
    let (lo, hi) = scale.bounds();
    let denom = steps.saturating_sub(1).max(1) as f32;
    (0..steps)
        .map(|i| {
            let t = 1.0 - i as f32 / denom;
            scale.color(lo + (hi - lo) * t)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/render/colormap.rs"]
mod tests;
