//! The entities flowing through the analysis pipeline.

pub mod gene;
pub mod pedigree;
pub mod phenotype;
pub mod variant;
