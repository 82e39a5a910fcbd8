use std::path::PathBuf;

use clap::Parser;

use crate::error::PaeDiffError;
use crate::pipeline::RunConfig;
use crate::render::RenderParams;

#[derive(Parser, Debug, Clone)]
#[command(name = "kira-paediff", version)]
#[command(
    about = "Realign a single-deletion mutant PAE matrix to its wild type and plot WT, mutant and difference side by side"
)]
pub struct Cli {
    /// Wild-type PAE JSON (.json or .json.gz)
    #[arg(long = "wt", value_name = "PATH", default_value = "fold_fbxo22_human_q8nez5_full_data_0.json")]
    pub wild_type: PathBuf,

    /// Mutant PAE JSON (.json or .json.gz)
    #[arg(
        long = "mutant",
        value_name = "PATH",
        default_value = "fold_fbxo22_human_q8nez5_val222del_full_data_0.json"
    )]
    pub mutant: PathBuf,

    /// 0-based index of the deleted residue in the wild-type frame
    #[arg(long = "gap", value_name = "N", default_value_t = 222)]
    pub gap: usize,

    /// Mutation name shown in the mutant panel title
    #[arg(long = "mutation-label", value_name = "LABEL", default_value = "Val222del")]
    pub mutation_label: String,

    /// Output directory
    #[arg(long = "out", value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// File stem of the PNG and PDF figures
    #[arg(long = "prefix", default_value = "PAE_Plots_One_Page")]
    pub prefix: String,

    /// Residue spacing between axis ticks
    #[arg(long = "tick-interval", value_name = "N", default_value_t = 50)]
    pub tick_interval: usize,

    /// Figure width in inches
    #[arg(long = "width", value_name = "IN", default_value_t = 24.0)]
    pub width: f32,

    /// Figure height in inches
    #[arg(long = "height", value_name = "IN", default_value_t = 8.0)]
    pub height: f32,

    /// PNG resolution
    #[arg(long = "dpi", default_value_t = 300)]
    pub dpi: u32,

    /// Fixed upper bound of the absolute-error color scale (default: per-panel range)
    #[arg(long = "pae-max", value_name = "F")]
    pub pae_max: Option<f32>,

    /// Number of residues listed in summary.json
    #[arg(long = "top-residues", value_name = "N", default_value_t = 10)]
    pub top_residues: usize,

    /// Skip the PNG figure
    #[arg(long = "no-png")]
    pub no_png: bool,

    /// Skip the PDF figure
    #[arg(long = "no-pdf")]
    pub no_pdf: bool,

    /// Skip summary.json and residue_delta.tsv
    #[arg(long = "no-report")]
    pub no_report: bool,

    /// More log output (repeatable)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only warnings and errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn into_config(self) -> Result<RunConfig, PaeDiffError> {
        if self.prefix.is_empty() || self.prefix.contains(['/', '\\']) {
            return Err(PaeDiffError::Config(format!(
                "--prefix must be a plain file stem, got {:?}",
                self.prefix
            )));
        }
        if let Some(max) = self.pae_max {
            if !(max.is_finite() && max > 0.0) {
                return Err(PaeDiffError::Config(format!(
                    "--pae-max must be a positive number, got {max}"
                )));
            }
        }
        let render = RenderParams {
            width_in: self.width,
            height_in: self.height,
            dpi: self.dpi,
            tick_interval: self.tick_interval,
            ..RenderParams::default()
        };
        render.validate()?;

        Ok(RunConfig {
            wild_type: self.wild_type,
            mutant: self.mutant,
            gap_position: self.gap,
            mutation_label: self.mutation_label,
            out_dir: self.out_dir,
            prefix: self.prefix,
            render,
            pae_max: self.pae_max,
            top_residues: self.top_residues,
            write_png: !self.no_png,
            write_pdf: !self.no_pdf,
            write_report: !self.no_report,
        })
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/cli.rs"]
mod tests;
