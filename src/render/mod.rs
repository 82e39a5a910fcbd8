use std::path::PathBuf;

use thiserror::Error;

pub mod colormap;
pub mod layout;
pub mod pdf;
pub mod png;

use crate::matrix::SquareMatrix;
use colormap::{ColorScale, Rgb};
use layout::{FigureLayout, figure_layout};

const MAX_PIXELS_PER_SIDE: u32 = 30_000;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("drawing backend failed for {path}: {msg}")]
    Backend { path: PathBuf, msg: String },
    #[error("invalid render parameters: {0}")]
    InvalidParams(String),
}

#[derive(Debug, Clone)]
pub struct RenderParams {
    pub width_in: f32,
    pub height_in: f32,
    pub dpi: u32,
    pub tick_interval: usize,
    pub x_label: String,
    pub y_label: String,
    pub missing_color: Rgb,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self {
            width_in: 24.0,
            height_in: 8.0,
            dpi: 300,
            tick_interval: 50,
            x_label: "Scored Residue".to_string(),
            y_label: "Aligned Residue".to_string(),
            missing_color: colormap::WHITE,
        }
    }
}

impl RenderParams {
    pub fn validate(&self) -> Result<(), RenderError> {
        if !(self.width_in > 0.0 && self.height_in > 0.0) {
            return Err(RenderError::InvalidParams(format!(
                "figure size must be positive, got {}x{} in",
                self.width_in, self.height_in
            )));
        }
        if self.dpi == 0 {
            return Err(RenderError::InvalidParams("dpi must be > 0".to_string()));
        }
        if self.tick_interval == 0 {
            return Err(RenderError::InvalidParams(
                "tick interval must be >= 1".to_string(),
            ));
        }
        let (w, h) = self.pixel_size();
        if w > MAX_PIXELS_PER_SIDE || h > MAX_PIXELS_PER_SIDE {
            return Err(RenderError::InvalidParams(format!(
                "raster size {w}x{h} exceeds {MAX_PIXELS_PER_SIDE} pixels per side"
            )));
        }
        Ok(())
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi as f32).round() as u32,
            (self.height_in * self.dpi as f32).round() as u32,
        )
    }
}

/// One heatmap with its title and colorbar.
#[derive(Debug, Clone)]
pub struct Panel<'a> {
    pub title: String,
    pub matrix: &'a SquareMatrix,
    pub scale: ColorScale,
    pub colorbar_label: String,
}

#[derive(Debug, Clone)]
pub struct Figure<'a> {
    pub panels: Vec<Panel<'a>>,
    pub params: RenderParams,
}

impl Figure<'_> {
    pub fn layout(&self) -> FigureLayout {
        figure_layout(&self.params, self.panels.len())
    }
}
