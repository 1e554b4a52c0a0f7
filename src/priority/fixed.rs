//! Fixed-score prioritizer.

use std::collections::HashMap;

use crate::model::gene::Gene;
use crate::priority::{PriorityResult, PriorityType};

/// Attaches a fixed gene-symbol-to-score mapping under a configurable
/// priority type.
///
/// Used as a deterministic stand-in for the heavyweight prioritizers in
/// tests, and for analyses that consume externally precomputed gene
/// scores.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedScorePrioritiser {
    priority_type: PriorityType,
    scores: HashMap<String, f64>,
}

impl FixedScorePrioritiser {
    /// Construct from the priority type to report and the score map.
    pub fn new(priority_type: PriorityType, scores: HashMap<String, f64>) -> Self {
        Self {
            priority_type,
            scores,
        }
    }

    /// The priority type this prioritizer reports as.
    pub fn priority_type(&self) -> PriorityType {
        self.priority_type
    }

    /// Attach a result to every gene; unknown genes get `0.0`.
    pub fn prioritise(&self, genes: &mut [Gene]) {
        for gene in genes.iter_mut() {
            let score = self.scores.get(&gene.gene_symbol).copied().unwrap_or(0.0);
            gene.add_priority_result(PriorityResult::new(self.priority_type, score));
        }
    }
}
