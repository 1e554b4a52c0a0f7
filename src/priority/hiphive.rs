//! Cross-species Phenodigm (hiPHIVE-style) prioritizer.

use crate::model::gene::Gene;
use crate::model::phenotype::Model;
use crate::pheno::matcher::PhenotypeMatcher;
use crate::pheno::phenodigm::PhenodigmModelScorer;
use crate::priority::{PriorityResult, PriorityType};

/// Scores genes by the best Phenodigm match of any of their disease or
/// organism models against the query phenotypes.
///
/// One matcher per organism; all scorers are normalized against the
/// theoretical best model of the strongest organism so that cross-species
/// scores share one scale. Per-organism best scores are attached as
/// sub-scores.
#[derive(Debug, Clone, PartialEq)]
pub struct HiphivePrioritiser {
    matchers: Vec<PhenotypeMatcher>,
    models: Vec<Model>,
}

impl HiphivePrioritiser {
    /// Construct from the per-organism match tables and the model catalog.
    pub fn new(matchers: Vec<PhenotypeMatcher>, models: Vec<Model>) -> Self {
        Self { matchers, models }
    }

    /// Attach a result to every gene; genes without any model get `0.0`.
    pub fn prioritise(&self, genes: &mut [Gene]) {
        // Shared reference model of the strongest organism.
        let reference = self
            .matchers
            .iter()
            .map(|m| m.best_theoretical_model())
            .max_by(|a, b| a.max_match_score.total_cmp(&b.max_match_score))
            .unwrap_or_default();
        let scorers = self
            .matchers
            .iter()
            .map(|m| (m.organism(), PhenodigmModelScorer::of_multi_organism(reference, m)))
            .collect::<Vec<_>>();

        for gene in genes.iter_mut() {
            let mut result = PriorityResult::new(PriorityType::Hiphive, 0.0);
            for (organism, scorer) in &scorers {
                let best_for_organism = self
                    .models
                    .iter()
                    .filter(|m| m.gene_symbol == gene.gene_symbol && m.organism == *organism)
                    .map(|m| scorer.score_model(m).score)
                    .fold(0f64, f64::max);
                result.score = result.score.max(best_for_organism);
                result
                    .sub_scores
                    .insert(format!("{}", organism).to_lowercase(), best_for_organism);
            }
            tracing::trace!(
                "hiPHIVE score for {} is {}",
                &gene.gene_symbol,
                result.score
            );
            gene.add_priority_result(result);
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::phenotype::{Organism, PhenotypeMatch, PhenotypeTerm};
    use crate::model::variant::VariantEvaluation;

    fn phenotype_match(query: &str, matched: &str, score: f64) -> PhenotypeMatch {
        PhenotypeMatch::new(
            PhenotypeTerm::new(query, ""),
            PhenotypeTerm::new(matched, ""),
            PhenotypeTerm::new("HP:0000001", ""),
            score,
        )
    }

    fn gene(symbol: &str) -> Gene {
        Gene::from_variant(VariantEvaluation {
            gene_symbol: symbol.to_string(),
            gene_id: format!("HGNC:{}", symbol.len()),
            ..Default::default()
        })
    }

    fn human_matcher() -> PhenotypeMatcher {
        PhenotypeMatcher::new(
            Organism::Human,
            &[String::from("HP:A"), String::from("HP:B")],
            vec![
                phenotype_match("HP:A", "HP:T1", 2.0),
                phenotype_match("HP:B", "HP:T2", 3.0),
            ],
        )
    }

    fn mouse_matcher() -> PhenotypeMatcher {
        PhenotypeMatcher::new(
            Organism::Mouse,
            &[String::from("HP:A"), String::from("HP:B")],
            vec![phenotype_match("HP:A", "MP:T1", 1.5)],
        )
    }

    #[test]
    fn takes_best_model_across_organisms() {
        let prioritiser = HiphivePrioritiser::new(
            vec![human_matcher(), mouse_matcher()],
            vec![
                Model::new("OMIM:1", "RBM8A", Organism::Human, &["HP:T1", "HP:T2"]),
                Model::new("MGI:1", "RBM8A", Organism::Mouse, &["MP:T1"]),
            ],
        );

        let mut genes = vec![gene("RBM8A"), gene("GNRHR2")];
        prioritiser.prioritise(&mut genes);

        let result = genes[0].priority_result(PriorityType::Hiphive).unwrap();
        assert!(result.score > 0.0);
        assert!(result.sub_scores["human"] >= result.sub_scores["mouse"]);
        assert_eq!(result.score, result.sub_scores["human"]);

        let unknown = genes[1].priority_result(PriorityType::Hiphive).unwrap();
        assert_eq!(unknown.score, 0.0);
    }

    /// The mouse scorer is normalized against the (stronger) human
    /// theoretical model, keeping cross-species scores on one scale.
    #[test]
    fn cross_species_scores_share_the_reference_scale() {
        let prioritiser = HiphivePrioritiser::new(
            vec![human_matcher(), mouse_matcher()],
            vec![Model::new("MGI:1", "RBM8A", Organism::Mouse, &["MP:T1"])],
        );

        let mut genes = vec![gene("RBM8A")];
        prioritiser.prioritise(&mut genes);

        let result = genes[0].priority_result(PriorityType::Hiphive).unwrap();
        // max=1.5 vs reference max 3.0; sum=1.5, total=2+1, avg=0.5 vs
        // reference avg 2.5 -> 50*(0.5 + 0.2)/100 = 0.35
        assert!((result.score - 0.35).abs() < 1e-6, "score = {}", result.score);
    }

    #[test]
    fn scores_stay_in_unit_interval() {
        let prioritiser = HiphivePrioritiser::new(
            vec![human_matcher()],
            vec![Model::new(
                "OMIM:1",
                "RBM8A",
                Organism::Human,
                &["HP:T1", "HP:T2"],
            )],
        );
        let mut genes = vec![gene("RBM8A")];
        prioritiser.prioritise(&mut genes);
        let score = genes[0]
            .priority_result(PriorityType::Hiphive)
            .unwrap()
            .score;
        assert!((0.0..=1.0).contains(&score));
    }
}
