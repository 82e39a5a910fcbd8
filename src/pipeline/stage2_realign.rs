use crate::matrix::diff::difference_against_reference;
use crate::matrix::gap::insert_gap;
use crate::matrix::{MatrixError, SquareMatrix};
use crate::pipeline::stage1_load::Stage1Output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentAudit {
    pub gap_position: usize,
    pub wild_type_dim: usize,
    pub mutant_dim: usize,
    pub realigned_dim: usize,
    pub wild_type_truncated: bool,
}

#[derive(Debug, Clone)]
pub struct Stage2Output {
    pub realigned_mutant: SquareMatrix,
    pub difference: SquareMatrix,
    pub audit: AlignmentAudit,
}

pub fn run_stage2(stage1: &Stage1Output, gap_position: usize) -> Result<Stage2Output, MatrixError> {
    let wild_type = &stage1.wild_type.matrix;
    let mutant = &stage1.mutant.matrix;

    let realigned_mutant = insert_gap(mutant, gap_position)?;
    let (difference, fit) = difference_against_reference(&realigned_mutant, wild_type)?;

    if fit.truncated {
        tracing::warn!(
            wild_type_dim = fit.reference_dim,
            realigned_dim = fit.target_dim,
            "wild-type matrix is larger than the realigned mutant; comparing its leading block only"
        );
    }

    let audit = AlignmentAudit {
        gap_position,
        wild_type_dim: wild_type.dim(),
        mutant_dim: mutant.dim(),
        realigned_dim: realigned_mutant.dim(),
        wild_type_truncated: fit.truncated,
    };
    tracing::info!(
        gap = gap_position,
        mutant_dim = audit.mutant_dim,
        realigned_dim = audit.realigned_dim,
        compared_cells = difference.present_count(),
        "mutant realigned against wild type"
    );

    Ok(Stage2Output {
        realigned_mutant,
        difference,
        audit,
    })
}
