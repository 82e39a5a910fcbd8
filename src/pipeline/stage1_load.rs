use std::path::Path;

use crate::input::{InputError, PaeInput, load_pae};

#[derive(Debug, Clone)]
pub struct Stage1Output {
    pub wild_type: PaeInput,
    pub mutant: PaeInput,
}

pub fn run_stage1(wild_type: &Path, mutant: &Path) -> Result<Stage1Output, InputError> {
    let wild_type = load_pae(wild_type)?;
    let mutant = load_pae(mutant)?;
    Ok(Stage1Output { wild_type, mutant })
}
