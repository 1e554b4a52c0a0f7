//! OMIM disease-gene prioritizer.

use std::collections::HashMap;

use crate::inheritance::ModeOfInheritance;
use crate::model::gene::Gene;
use crate::priority::{PriorityResult, PriorityType};

/// Scores genes by their OMIM disease associations: `1.0` for a gene
/// linked to a disease compatible with the requested mode of inheritance,
/// `0.5` otherwise.
///
/// The score is never `0` so that a missing association does not zero out
/// the multiplicative combined priority score.
#[derive(Debug, Clone, PartialEq)]
pub struct OmimPrioritiser {
    /// The mode of inheritance the analysis asks for.
    target_mode: ModeOfInheritance,
    /// Gene symbol to the inheritance modes of its known diseases.
    disease_modes: HashMap<String, Vec<ModeOfInheritance>>,
}

impl OmimPrioritiser {
    /// Construct from the requested mode and the disease-association table.
    pub fn new(
        target_mode: ModeOfInheritance,
        disease_modes: HashMap<String, Vec<ModeOfInheritance>>,
    ) -> Self {
        Self {
            target_mode,
            disease_modes,
        }
    }

    fn score_gene(&self, gene: &Gene) -> f64 {
        let compatible = self
            .disease_modes
            .get(&gene.gene_symbol)
            .map(|modes| {
                modes.iter().any(|mode| {
                    self.target_mode == ModeOfInheritance::Any
                        || *mode == ModeOfInheritance::Any
                        || *mode == self.target_mode
                })
            })
            .unwrap_or(false);
        if compatible {
            1.0
        } else {
            0.5
        }
    }

    /// Attach a result to every gene.
    pub fn prioritise(&self, genes: &mut [Gene]) {
        for gene in genes.iter_mut() {
            let score = self.score_gene(gene);
            tracing::trace!("OMIM score for {} is {}", &gene.gene_symbol, score);
            gene.add_priority_result(PriorityResult::new(PriorityType::Omim, score));
        }
    }
}
