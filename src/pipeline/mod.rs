pub mod stage1_load;
pub mod stage2_realign;
pub mod stage3_render;
pub mod stage4_report;

use std::fs;
use std::path::PathBuf;

use crate::error::PaeDiffError;
use crate::render::RenderParams;
use stage1_load::run_stage1;
use stage2_realign::run_stage2;
use stage3_render::{FigureText, run_stage3};
use stage4_report::run_stage4;

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub wild_type: PathBuf,
    pub mutant: PathBuf,
    pub gap_position: usize,
    pub mutation_label: String,
    pub out_dir: PathBuf,
    pub prefix: String,
    pub render: RenderParams,
    pub pae_max: Option<f32>,
    pub top_residues: usize,
    pub write_png: bool,
    pub write_pdf: bool,
    pub write_report: bool,
}

#[derive(Debug, Clone, Default)]
pub struct RunOutputs {
    pub png: Option<PathBuf>,
    pub pdf: Option<PathBuf>,
    pub summary: Option<PathBuf>,
    pub residue_table: Option<PathBuf>,
}

pub fn run(config: &RunConfig) -> Result<RunOutputs, PaeDiffError> {
    config.render.validate()?;
    fs::create_dir_all(&config.out_dir).map_err(|source| PaeDiffError::OutputDir {
        path: config.out_dir.clone(),
        source,
    })?;

    let stage1 = run_stage1(&config.wild_type, &config.mutant)?;
    let stage2 = run_stage2(&stage1, config.gap_position)?;

    let text = FigureText::for_mutation(&config.mutation_label);
    let rendered = run_stage3(&stage1, &stage2, config, &text)?;

    let mut outputs = RunOutputs {
        png: rendered.png,
        pdf: rendered.pdf,
        ..RunOutputs::default()
    };
    if config.write_report {
        let report = run_stage4(&stage1, &stage2, config, &outputs)?;
        outputs.summary = Some(report.summary);
        outputs.residue_table = Some(report.residue_table);
    }
    Ok(outputs)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/mod.rs"]
mod tests;
