//! Phenotype semantic scoring (Phenodigm family).

pub mod matcher;
pub mod phenodigm;
pub mod phenix;

pub use matcher::{PhenotypeMatcher, TheoreticalModel};
pub use phenodigm::PhenodigmModelScorer;
