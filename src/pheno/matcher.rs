//! Precomputed best phenotype matches of one organism and the theoretical
//! best model derived from them.

use indexmap::IndexMap;

use crate::model::phenotype::{Organism, PhenotypeMatch};

/// The hypothetical model achieving the maximum possible score against the
/// query set; used as the normalization denominator so that scores are
/// comparable across organisms.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TheoreticalModel {
    /// Best achievable single-match score.
    pub max_match_score: f64,
    /// Mean of the per-query best scores, over query terms with a match.
    pub best_avg_score: f64,
}

/// Raw per-model match statistics before combination.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelPhenotypeScore {
    /// Maximum of the per-query best match scores.
    pub max_model_match_score: f64,
    /// Sum of the per-query best match scores, over query terms with a
    /// match in the model.
    pub sum_model_best_match_scores: f64,
    /// Number of model terms matched by any query term.
    pub num_matching_phenotypes: usize,
    /// The per-query best matches against the model.
    pub best_matches: Vec<PhenotypeMatch>,
}

/// The precomputed match table of one organism: for every query term the
/// scored matches against the organism's term universe.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhenotypeMatcher {
    organism: Organism,
    /// Query term id to its matches, in query order.
    term_matches: IndexMap<String, Vec<PhenotypeMatch>>,
}

impl PhenotypeMatcher {
    /// Construct from the query term set and the precomputed matches.
    ///
    /// Query terms without any match keep an empty entry so that the
    /// number of query phenotypes is preserved.
    pub fn new(organism: Organism, query_terms: &[String], matches: Vec<PhenotypeMatch>) -> Self {
        let mut term_matches: IndexMap<String, Vec<PhenotypeMatch>> = query_terms
            .iter()
            .map(|t| (t.clone(), Vec::new()))
            .collect();
        for m in matches {
            term_matches.entry(m.query.id.clone()).or_default().push(m);
        }
        Self {
            organism,
            term_matches,
        }
    }

    /// The organism of the match table.
    pub fn organism(&self) -> Organism {
        self.organism
    }

    /// Number of query phenotype terms.
    pub fn num_query_terms(&self) -> usize {
        self.term_matches.len()
    }

    /// The theoretical best model over the organism's whole term universe.
    pub fn best_theoretical_model(&self) -> TheoreticalModel {
        let best_scores = self
            .term_matches
            .values()
            .filter_map(|matches| {
                matches
                    .iter()
                    .map(|m| m.score)
                    .max_by(|a, b| a.total_cmp(b))
            })
            .collect::<Vec<_>>();
        if best_scores.is_empty() {
            return TheoreticalModel::default();
        }
        TheoreticalModel {
            max_match_score: best_scores.iter().copied().fold(0f64, f64::max),
            best_avg_score: best_scores.iter().sum::<f64>() / best_scores.len() as f64,
        }
    }

    /// Whether any query term has a positive-score match to the given
    /// candidate term.
    pub fn matches_candidate_term(&self, term_id: &str) -> bool {
        self.term_matches
            .values()
            .flatten()
            .any(|m| m.matched.id == term_id && m.score > 0.0)
    }

    /// Compute the raw match statistics of a model's phenotype set.
    pub fn score_model_phenotypes(&self, model_phenotype_ids: &[String]) -> ModelPhenotypeScore {
        let mut score = ModelPhenotypeScore::default();
        for matches in self.term_matches.values() {
            let best = matches
                .iter()
                .filter(|m| model_phenotype_ids.contains(&m.matched.id))
                .max_by(|a, b| a.score.total_cmp(&b.score));
            if let Some(best) = best {
                score.max_model_match_score = score.max_model_match_score.max(best.score);
                score.sum_model_best_match_scores += best.score;
                score.best_matches.push(best.clone());
            }
        }
        score.num_matching_phenotypes = model_phenotype_ids
            .iter()
            .filter(|t| self.matches_candidate_term(t))
            .count();
        score
    }
}
