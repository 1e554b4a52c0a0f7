//! Phenix prioritizer: semantic similarity of the query phenotypes to the
//! HPO annotations of each gene, with an empirical p-value.

use indexmap::IndexMap;

use crate::model::gene::Gene;
use crate::pheno::matcher::PhenotypeMatcher;
use crate::pheno::phenix::PhenixScorer;
use crate::priority::{PriorityResult, PriorityType};

/// Scores genes by Phenomizer-style semantic similarity between the query
/// terms and the genes' phenotype annotations.
///
/// The reported score is `semantic_score * normalization_factor` (see
/// [`PhenixScorer`]); the negative log p-value is attached as a sub-score.
#[derive(Debug, Clone, PartialEq)]
pub struct PhenixPrioritiser {
    matcher: PhenotypeMatcher,
    scorer: PhenixScorer,
    /// Gene symbol to its annotated phenotype term ids.
    gene_phenotypes: IndexMap<String, Vec<String>>,
}

impl PhenixPrioritiser {
    /// Construct from the match table, the configured scorer, and the
    /// per-gene phenotype annotations.
    pub fn new(
        matcher: PhenotypeMatcher,
        scorer: PhenixScorer,
        gene_phenotypes: IndexMap<String, Vec<String>>,
    ) -> Self {
        Self {
            matcher,
            scorer,
            gene_phenotypes,
        }
    }

    /// Attach a result to every gene; genes without annotations get `0.0`.
    pub fn prioritise(&self, genes: &mut [Gene]) {
        for gene in genes.iter_mut() {
            let result = match self.gene_phenotypes.get(&gene.gene_symbol) {
                Some(terms) => {
                    let score = self.scorer.score_terms(&self.matcher, terms);
                    tracing::debug!(
                        "Phenix score for {}: {:.2} (neg. log p-value: {:.2})",
                        &gene.gene_symbol,
                        score.semantic_score,
                        score.neg_log_p
                    );
                    PriorityResult::new(PriorityType::Phenix, score.score)
                        .with_sub_score("semantic_score", score.semantic_score)
                        .with_sub_score("neg_log_p", score.neg_log_p)
                }
                None => PriorityResult::new(PriorityType::Phenix, 0.0),
            };
            gene.add_priority_result(result);
        }
    }
}
