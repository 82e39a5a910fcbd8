use std::path::{Path, PathBuf};

use crate::input::PaeInput;
use crate::matrix::diff::{difference_stats, residue_deltas, top_residues};
use crate::pipeline::stage1_load::Stage1Output;
use crate::pipeline::stage2_realign::Stage2Output;
use crate::pipeline::{RunConfig, RunOutputs};
use crate::report::json::write_summary_json;
use crate::report::tsv::write_residue_tsv;
use crate::report::{
    AlignmentSection, InputEntry, InputsSection, MatricesSection, OutputsSection, ReportError,
    ResidueEntry, Summary,
};

pub const SUMMARY_FILE: &str = "summary.json";
pub const RESIDUE_TABLE_FILE: &str = "residue_delta.tsv";

#[derive(Debug, Clone)]
pub struct Stage4Output {
    pub summary: PathBuf,
    pub residue_table: PathBuf,
}

pub fn run_stage4(
    stage1: &Stage1Output,
    stage2: &Stage2Output,
    config: &RunConfig,
    rendered: &RunOutputs,
) -> Result<Stage4Output, ReportError> {
    let summary_path = config.out_dir.join(SUMMARY_FILE);
    let table_path = config.out_dir.join(RESIDUE_TABLE_FILE);

    let deltas = residue_deltas(&stage2.difference);
    write_residue_tsv(&deltas, stage2.audit.gap_position, &table_path)?;

    let outputs = OutputsSection {
        png: rendered.png.as_deref().map(display_path),
        pdf: rendered.pdf.as_deref().map(display_path),
        residue_table: Some(display_path(&table_path)),
    };
    let summary = build_summary(stage1, stage2, config, outputs);
    write_summary_json(&summary, &summary_path)?;

    tracing::info!(
        summary = %summary_path.display(),
        residue_table = %table_path.display(),
        "reports written"
    );
    Ok(Stage4Output {
        summary: summary_path,
        residue_table: table_path,
    })
}

pub fn build_summary(
    stage1: &Stage1Output,
    stage2: &Stage2Output,
    config: &RunConfig,
    outputs: OutputsSection,
) -> Summary {
    let audit = &stage2.audit;
    let deltas = residue_deltas(&stage2.difference);
    Summary {
        tool: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        inputs: InputsSection {
            wild_type: input_entry(&stage1.wild_type),
            mutant: input_entry(&stage1.mutant),
        },
        alignment: AlignmentSection {
            gap_position: audit.gap_position,
            gap_residue: audit.gap_position + 1,
            mutation_label: config.mutation_label.clone(),
            wild_type_dim: audit.wild_type_dim,
            mutant_dim: audit.mutant_dim,
            realigned_dim: audit.realigned_dim,
            wild_type_truncated: audit.wild_type_truncated,
        },
        matrices: MatricesSection {
            wild_type: stage1.wild_type.matrix.stats().into(),
            mutant_realigned: stage2.realigned_mutant.stats().into(),
            difference: stage2.difference.stats().into(),
        },
        difference: difference_stats(&stage2.difference).into(),
        top_residues: top_residues(&deltas, config.top_residues)
            .iter()
            .map(ResidueEntry::from)
            .collect(),
        outputs,
    }
}

fn input_entry(input: &PaeInput) -> InputEntry {
    InputEntry {
        path: display_path(&input.path),
        layout: input.layout.as_str().to_string(),
        dim: input.matrix.dim(),
        max_pae: input.max_pae,
    }
}

fn display_path(path: &Path) -> String {
    path.display().to_string()
}
