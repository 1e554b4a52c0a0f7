//! Phenix scoring: Phenomizer-style semantic similarity plus an empirical
//! p-value from a precomputed null-score distribution.

use crate::pheno::matcher::PhenotypeMatcher;

/// Supporting code for `PhenixScorer`.
pub(crate) mod phenix_scorer {
    /// Error type for `PhenixScorer::new()`.
    #[derive(thiserror::Error, Debug, Clone, PartialEq)]
    pub enum Error {
        #[error("Normalization factor must be positive, got {0}")]
        NonPositiveNormalizationFactor(f64),
    }
}

/// An empirical distribution of null similarity scores, used to estimate
/// the p-value of an observed score.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScoreDistribution {
    /// Null scores, kept sorted ascending.
    scores: Vec<f64>,
}

impl ScoreDistribution {
    /// Construct from null scores; the input need not be sorted.
    pub fn new(mut scores: Vec<f64>) -> Self {
        scores.sort_by(|a, b| a.total_cmp(b));
        Self { scores }
    }

    /// Empirical p-value of the observed score: the fraction of null
    /// scores at or above it. Bounded below by `1 / len` so that the
    /// logarithm stays finite; `1.0` for an empty distribution.
    pub fn p_value(&self, score: f64) -> f64 {
        if self.scores.is_empty() {
            return 1.0;
        }
        let lower_bound = self.scores.partition_point(|s| *s < score);
        let upper_bound = self.scores.partition_point(|s| *s <= score);
        let index = std::cmp::min((lower_bound + upper_bound) / 2, self.scores.len() - 1);
        1.0 - index as f64 / self.scores.len() as f64
    }

    /// Negative natural logarithm of the empirical p-value.
    pub fn neg_log_p(&self, score: f64) -> f64 {
        -self.p_value(score).ln()
    }
}

/// The Phenix score of one candidate term set.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhenixScore {
    /// Raw semantic-similarity score.
    pub semantic_score: f64,
    /// Negative natural logarithm of the empirical p-value.
    pub neg_log_p: f64,
    /// Final score: `semantic_score` times the normalization factor.
    pub score: f64,
}

/// Scores candidate term sets by semantic similarity to the query terms.
///
/// The normalization factor rescales scores across runs using different
/// ontology versions. It is per-instance state set once at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PhenixScorer {
    distribution: ScoreDistribution,
    normalization_factor: f64,
}

impl PhenixScorer {
    /// Construct with the given null distribution and normalization
    /// factor; the factor must be positive.
    pub fn new(
        distribution: ScoreDistribution,
        normalization_factor: f64,
    ) -> Result<Self, phenix_scorer::Error> {
        if normalization_factor <= 0.0 {
            return Err(phenix_scorer::Error::NonPositiveNormalizationFactor(
                normalization_factor,
            ));
        }
        Ok(Self {
            distribution,
            normalization_factor,
        })
    }

    /// The semantic-similarity score of a candidate term set: the mean of
    /// the per-query best match scores over all query terms.
    pub fn semantic_similarity(matcher: &PhenotypeMatcher, candidate_terms: &[String]) -> f64 {
        if matcher.num_query_terms() == 0 {
            return 0.0;
        }
        let raw = matcher.score_model_phenotypes(candidate_terms);
        raw.sum_model_best_match_scores / matcher.num_query_terms() as f64
    }

    /// Score the candidate term set against the query.
    pub fn score_terms(&self, matcher: &PhenotypeMatcher, candidate_terms: &[String]) -> PhenixScore {
        let semantic_score = Self::semantic_similarity(matcher, candidate_terms);
        PhenixScore {
            semantic_score,
            neg_log_p: self.distribution.neg_log_p(semantic_score),
            score: semantic_score * self.normalization_factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::phenotype::{Organism, PhenotypeMatch, PhenotypeTerm};

    fn matcher() -> PhenotypeMatcher {
        PhenotypeMatcher::new(
            Organism::Human,
            &[String::from("HP:A"), String::from("HP:B")],
            vec![
                PhenotypeMatch::new(
                    PhenotypeTerm::new("HP:A", ""),
                    PhenotypeTerm::new("T1", ""),
                    PhenotypeTerm::new("HP:0000001", ""),
                    2.0,
                ),
                PhenotypeMatch::new(
                    PhenotypeTerm::new("HP:B", ""),
                    PhenotypeTerm::new("T2", ""),
                    PhenotypeTerm::new("HP:0000001", ""),
                    3.0,
                ),
            ],
        )
    }

    #[test]
    fn new_rejects_non_positive_factor() {
        assert_eq!(
            PhenixScorer::new(ScoreDistribution::default(), 0.0),
            Err(phenix_scorer::Error::NonPositiveNormalizationFactor(0.0))
        );
    }

    #[test]
    fn semantic_similarity_averages_over_all_query_terms() {
        let sim = PhenixScorer::semantic_similarity(
            &matcher(),
            &[String::from("T1"), String::from("T2")],
        );
        assert!((sim - 2.5).abs() < 1e-9);

        // A query term without a model match drags down the average.
        let sim = PhenixScorer::semantic_similarity(&matcher(), &[String::from("T1")]);
        assert!((sim - 1.0).abs() < 1e-9);
    }

    #[test]
    fn unit_factor_returns_raw_semantic_score() {
        let scorer = PhenixScorer::new(ScoreDistribution::default(), 1.0).unwrap();
        let score = scorer.score_terms(&matcher(), &[String::from("T1"), String::from("T2")]);
        assert!((score.score - score.semantic_score).abs() < 1e-9);
    }

    #[test]
    fn factor_rescales_score() {
        let scorer = PhenixScorer::new(ScoreDistribution::default(), 0.5).unwrap();
        let score = scorer.score_terms(&matcher(), &[String::from("T1"), String::from("T2")]);
        assert!((score.score - 0.5 * score.semantic_score).abs() < 1e-9);
    }

    #[test]
    fn p_value_from_distribution() {
        let distribution =
            ScoreDistribution::new(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        // Score above all null scores: p is bounded by 1/len.
        assert!((distribution.p_value(100.0) - 0.1).abs() < 1e-9);
        // Score below all null scores: p = 1.
        assert!((distribution.p_value(-1.0) - 1.0).abs() < 1e-9);
        // Median-ish score.
        assert!((distribution.p_value(5.0) - 0.5).abs() < 1e-9);
        assert!(distribution.neg_log_p(5.0) > 0.0);
    }

    #[test]
    fn empty_distribution_has_p_one() {
        let distribution = ScoreDistribution::default();
        assert_eq!(distribution.p_value(10.0), 1.0);
        assert_eq!(distribution.neg_log_p(10.0), 0.0);
    }
}
