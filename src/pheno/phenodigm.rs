//! Phenodigm model scoring: semantic similarity of a model against the
//! best theoretical model for the query phenotypes in a given organism.
//!
//! See the original publication, <https://doi.org/10.1093/database/bat025>.

use crate::model::phenotype::{Model, PhenotypeMatch};
use crate::pheno::matcher::{PhenotypeMatcher, TheoreticalModel};

/// The scored result of comparing one model against the query phenotypes.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ModelPhenotypeMatchScore {
    /// Combined Phenodigm score in `[0, 1]`.
    pub score: f64,
    /// Identifier of the scored model.
    pub model_id: String,
    /// The per-query best matches supporting the score.
    pub best_matches: Vec<PhenotypeMatch>,
}

/// Scores models against a theoretical best model.
///
/// For single or single-cross-species comparisons use
/// [`PhenodigmModelScorer::of_single_organism`]; for multi-cross-species
/// comparisons all scorers share the theoretical model of the strongest
/// organism so that scores live on the same scale.
#[derive(Debug, Clone, PartialEq)]
pub struct PhenodigmModelScorer<'m> {
    theoretical_max_match_score: f64,
    theoretical_best_avg_score: f64,
    matcher: &'m PhenotypeMatcher,
    num_query_phenotypes: usize,
}

impl<'m> PhenodigmModelScorer<'m> {
    /// Construct against the matcher's own theoretical best model.
    pub fn of_single_organism(matcher: &'m PhenotypeMatcher) -> Self {
        Self::of_multi_organism(matcher.best_theoretical_model(), matcher)
    }

    /// Construct against a shared theoretical model.
    pub fn of_multi_organism(theoretical: TheoreticalModel, matcher: &'m PhenotypeMatcher) -> Self {
        Self {
            theoretical_max_match_score: theoretical.max_match_score,
            theoretical_best_avg_score: theoretical.best_avg_score,
            matcher,
            num_query_phenotypes: matcher.num_query_terms(),
        }
    }

    /// Score the given model; the result is in `[0, 1]` and `0` exactly
    /// when no query term matches the model.
    pub fn score_model(&self, model: &Model) -> ModelPhenotypeMatchScore {
        let raw = self.matcher.score_model_phenotypes(&model.phenotype_ids);
        ModelPhenotypeMatchScore {
            score: self.combined_score(
                raw.max_model_match_score,
                raw.sum_model_best_match_scores,
                raw.num_matching_phenotypes,
            ),
            model_id: model.id.clone(),
            best_matches: raw.best_matches,
        }
    }

    /// Combine per-model match statistics into the final score.
    ///
    /// The averaging denominator deliberately counts only the model terms
    /// that match the query subsets (semi-symmetrical comparison), so
    /// models with very many phenotypes are not penalized against small
    /// queries.
    fn combined_score(
        &self,
        max_model_match_score: f64,
        sum_model_best_match_scores: f64,
        num_matching_phenotypes: usize,
    ) -> f64 {
        if sum_model_best_match_scores <= 0.0
            || self.theoretical_max_match_score <= 0.0
            || self.theoretical_best_avg_score <= 0.0
        {
            return 0.0;
        }
        let total_phenotypes_with_match = self.num_query_phenotypes + num_matching_phenotypes;
        let model_best_avg_score =
            sum_model_best_match_scores / total_phenotypes_with_match as f64;
        let combined = 50.0
            * (max_model_match_score / self.theoretical_max_match_score
                + model_best_avg_score / self.theoretical_best_avg_score);
        combined.min(100.0) / 100.0
    }
}
