//! Priority-score filter (gene-level).

use crate::filters::{FilterResult, FilterType};
use crate::model::gene::Gene;
use crate::priority::PriorityType;

/// Supporting code for `PriorityScoreFilter`.
pub(crate) mod priority_score_filter {
    /// Error type for `PriorityScoreFilter::new()`.
    #[derive(thiserror::Error, Debug, Clone, PartialEq)]
    pub enum Error {
        #[error("Priority-score cutoff must be in [0, 1], got {0}")]
        CutoffOutOfRange(f64),
    }
}

/// Passes genes whose prioritizer result of the configured type reaches the
/// cutoff. Member variants are marked with the same outcome so that
/// per-variant diagnostic records stay complete.
///
/// Requires that the prioritizer of `priority_type` has run earlier in the
/// analysis; the runner enforces this before the run starts.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PriorityScoreFilter {
    /// The prioritizer result to gate on.
    priority_type: PriorityType,
    /// Minimal score to pass.
    min_priority_score: f64,
}

impl PriorityScoreFilter {
    /// Construct with the given priority type and cutoff (in `[0, 1]`).
    pub fn new(
        priority_type: PriorityType,
        min_priority_score: f64,
    ) -> Result<Self, priority_score_filter::Error> {
        if !(0.0..=1.0).contains(&min_priority_score) {
            return Err(priority_score_filter::Error::CutoffOutOfRange(
                min_priority_score,
            ));
        }
        Ok(Self {
            priority_type,
            min_priority_score,
        })
    }

    /// The prioritizer type this filter depends on.
    pub fn priority_type(&self) -> PriorityType {
        self.priority_type
    }

    /// Run the filter, recording the outcome on the gene and all member
    /// variants.
    pub fn apply(&self, gene: &mut Gene) {
        let passed = gene
            .priority_result(self.priority_type)
            .map(|r| r.score >= self.min_priority_score)
            .unwrap_or(false);
        let result = FilterResult::from_passed(FilterType::PriorityScore, passed);
        gene.add_filter_result(result);
        for variant in gene.variants_mut() {
            variant.add_filter_result(result);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::model::variant::VariantEvaluation;
    use crate::priority::PriorityResult;

    fn gene_with_score(score: Option<f64>) -> Gene {
        let mut gene = Gene::from_variant(VariantEvaluation {
            gene_symbol: String::from("RBM8A"),
            gene_id: String::from("HGNC:9939"),
            ..Default::default()
        });
        if let Some(score) = score {
            gene.add_priority_result(PriorityResult::new(PriorityType::Hiphive, score));
        }
        gene
    }

    #[rstest]
    #[case(-0.5)]
    #[case(1.5)]
    fn new_rejects_out_of_range_cutoff(#[case] cutoff: f64) {
        assert_eq!(
            PriorityScoreFilter::new(PriorityType::Hiphive, cutoff),
            Err(priority_score_filter::Error::CutoffOutOfRange(cutoff))
        );
    }

    #[rstest]
    #[case(Some(0.9), true)]
    #[case(Some(0.8), true)]
    #[case(Some(0.7), false)]
    #[case(None, false)]
    fn apply_records_on_gene_and_variants(#[case] score: Option<f64>, #[case] expected: bool) {
        let filter = PriorityScoreFilter::new(PriorityType::Hiphive, 0.8).unwrap();
        let mut gene = gene_with_score(score);
        filter.apply(&mut gene);

        assert_eq!(gene.passed_filter(FilterType::PriorityScore), expected);
        assert_eq!(
            gene.variants()[0].passed_filter(FilterType::PriorityScore),
            expected
        );
    }

    #[test]
    fn apply_ignores_results_of_other_types() {
        let filter = PriorityScoreFilter::new(PriorityType::Omim, 0.8).unwrap();
        let mut gene = gene_with_score(Some(0.9));
        filter.apply(&mut gene);
        assert!(!gene.passed_filter(FilterType::PriorityScore));
    }
}
