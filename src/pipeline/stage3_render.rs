use std::path::PathBuf;

use crate::pipeline::RunConfig;
use crate::pipeline::stage1_load::Stage1Output;
use crate::pipeline::stage2_realign::Stage2Output;
use crate::render::colormap::ColorScale;
use crate::render::pdf::write_pdf;
use crate::render::png::write_png;
use crate::render::{Figure, Panel, RenderError};

#[derive(Debug, Clone)]
pub struct FigureText {
    pub wild_type_title: String,
    pub mutant_title: String,
    pub difference_title: String,
    pub error_label: String,
    pub difference_label: String,
}

impl FigureText {
    pub fn for_mutation(label: &str) -> Self {
        Self {
            wild_type_title: "WT PAE".to_string(),
            mutant_title: format!("Mutant PAE ({label} with Gap)"),
            difference_title: "Difference (Mutant - WT)".to_string(),
            error_label: "Expected Position Error (Å)".to_string(),
            difference_label: "Difference in Expected Position Error (Å)".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Stage3Output {
    pub png: Option<PathBuf>,
    pub pdf: Option<PathBuf>,
}

pub fn build_figure<'a>(
    stage1: &'a Stage1Output,
    stage2: &'a Stage2Output,
    config: &RunConfig,
    text: &FigureText,
) -> Figure<'a> {
    let wild_type = &stage1.wild_type.matrix;
    let mutant = &stage2.realigned_mutant;
    let difference = &stage2.difference;

    Figure {
        panels: vec![
            Panel {
                title: text.wild_type_title.clone(),
                matrix: wild_type,
                scale: ColorScale::sequential(wild_type, config.pae_max),
                colorbar_label: text.error_label.clone(),
            },
            Panel {
                title: text.mutant_title.clone(),
                matrix: mutant,
                scale: ColorScale::sequential(mutant, config.pae_max),
                colorbar_label: text.error_label.clone(),
            },
            Panel {
                title: text.difference_title.clone(),
                matrix: difference,
                scale: ColorScale::diverging(difference),
                colorbar_label: text.difference_label.clone(),
            },
        ],
        params: config.render.clone(),
    }
}

pub fn run_stage3(
    stage1: &Stage1Output,
    stage2: &Stage2Output,
    config: &RunConfig,
    text: &FigureText,
) -> Result<Stage3Output, RenderError> {
    let figure = build_figure(stage1, stage2, config, text);
    let layout = figure.layout();
    let mut out = Stage3Output::default();

    if config.write_png {
        let path = config.out_dir.join(format!("{}.png", config.prefix));
        write_png(&figure, &layout, &path)?;
        tracing::info!("Saved PNG: {}", path.display());
        out.png = Some(path);
    }
    if config.write_pdf {
        let path = config.out_dir.join(format!("{}.pdf", config.prefix));
        write_pdf(&figure, &layout, &path)?;
        tracing::info!("Saved PDF: {}", path.display());
        out.pdf = Some(path);
    }
    Ok(out)
}
