//! Inheritance-mode filter (gene-level).

use std::collections::BTreeSet;

use crate::filters::{FilterResult, FilterType};
use crate::inheritance::{InheritanceModeAnnotator, ModeOfInheritance};
use crate::model::gene::Gene;

/// Passes genes whose compatible inheritance modes intersect the target
/// set; member variants are marked per whether they participate in a
/// compatible genotype combination.
///
/// The filter depends on the gene's final variant set and is therefore
/// scheduled last by the analysis runner regardless of where it is
/// declared. Genes that have not passed the preceding filters are skipped.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InheritanceFilter {
    /// The modes the analysis asks for.
    target_modes: BTreeSet<ModeOfInheritance>,
}

impl InheritanceFilter {
    /// Construct for a single target mode.
    pub fn new(mode: ModeOfInheritance) -> Self {
        Self {
            target_modes: BTreeSet::from([mode]),
        }
    }

    /// Construct for a set of target modes.
    pub fn with_modes(modes: impl IntoIterator<Item = ModeOfInheritance>) -> Self {
        Self {
            target_modes: modes.into_iter().collect(),
        }
    }

    /// Whether the filter is a no-op (`Any` or empty target set).
    pub fn is_unconstrained(&self) -> bool {
        self.target_modes.is_empty() || self.target_modes.contains(&ModeOfInheritance::Any)
    }

    /// Run the filter on the gene.
    ///
    /// Compatibility is computed over the variants that passed the earlier
    /// filters. A pedigree-incompatible gene is left unannotated (warned
    /// about, no filter effect), per the non-fatal error policy.
    pub fn apply(&self, gene: &mut Gene, annotator: &InheritanceModeAnnotator) {
        if self.is_unconstrained() || !gene.passed_filters() {
            return;
        }

        let passed_indexes = gene
            .variants()
            .iter()
            .enumerate()
            .filter(|(_, v)| v.passed_filters())
            .map(|(i, _)| i)
            .collect::<Vec<_>>();

        let compatible = {
            let passed = passed_indexes
                .iter()
                .map(|&i| &gene.variants()[i])
                .collect::<Vec<_>>();
            match annotator.compute_compatible_modes(&passed) {
                Ok(compatible) => compatible,
                Err(e) => {
                    tracing::warn!(
                        "skipping inheritance filter for gene {}: {}",
                        &gene.gene_symbol,
                        &e
                    );
                    return;
                }
            }
        };

        gene.set_inheritance_modes(compatible.keys().copied().collect());

        // Variants supporting any of the requested-and-compatible modes.
        let supporting = compatible
            .iter()
            .filter(|(mode, _)| self.target_modes.contains(mode))
            .flat_map(|(_, indexes)| indexes.iter().map(|&i| passed_indexes[i]))
            .collect::<BTreeSet<_>>();

        let gene_passes = !supporting.is_empty();
        gene.add_filter_result(FilterResult::from_passed(
            FilterType::Inheritance,
            gene_passes,
        ));
        for (index, variant) in gene.variants_mut().iter_mut().enumerate() {
            variant.add_filter_result(FilterResult::from_passed(
                FilterType::Inheritance,
                supporting.contains(&index),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::dao::{Frequency, FrequencyData, FrequencySource};
    use crate::inheritance::InheritanceMaxFrequencies;
    use crate::model::pedigree::Pedigree;
    use crate::model::variant::{SampleGenotype, VariantEvaluation};

    fn het_variant(position: i32, max_freq: f32) -> VariantEvaluation {
        let mut variant = VariantEvaluation {
            chromosome: 1,
            position,
            reference: String::from("A"),
            alternative: String::from("T"),
            gene_symbol: String::from("RBM8A"),
            gene_id: String::from("HGNC:9939"),
            sample_genotypes: IndexMap::from([(
                String::from("proband"),
                SampleGenotype::het(),
            )]),
            frequency_data: Some(FrequencyData::new(vec![Frequency::new(
                FrequencySource::GnomadExomes,
                max_freq,
            )])),
            ..Default::default()
        };
        variant.add_filter_result(FilterResult::pass(FilterType::Quality));
        variant
    }

    fn singleton_annotator(ceiling: f32) -> InheritanceModeAnnotator {
        InheritanceModeAnnotator::with_max_frequencies(
            Pedigree::single_affected_sample("proband"),
            InheritanceMaxFrequencies::uniform(ceiling),
        )
    }

    /// Two rare heterozygous variants of an affected singleton support
    /// compound-heterozygous recessive inheritance; both are marked PASS.
    #[test]
    fn recessive_singleton_marks_both_variants() {
        let filter = InheritanceFilter::new(ModeOfInheritance::AutosomalRecessive);
        let annotator = singleton_annotator(0.1);

        let mut gene = Gene::from_variant(het_variant(145_507_800, 0.001));
        gene.add_variant(het_variant(145_508_800, 0.05));

        filter.apply(&mut gene, &annotator);

        assert!(gene.is_compatible_with(ModeOfInheritance::AutosomalRecessive));
        assert!(gene.passed_filter(FilterType::Inheritance));
        for variant in gene.variants() {
            assert!(variant.passed_filter(FilterType::Inheritance));
        }
    }

    /// Variants failing the per-mode frequency ceiling do not support the
    /// mode and are marked FAIL.
    #[test]
    fn too_frequent_variant_is_not_supporting() {
        let filter = InheritanceFilter::new(ModeOfInheritance::AutosomalDominant);
        let annotator = singleton_annotator(0.1);

        let mut gene = Gene::from_variant(het_variant(100, 0.001));
        gene.add_variant(het_variant(200, 5.0));

        filter.apply(&mut gene, &annotator);

        assert!(gene.passed_filter(FilterType::Inheritance));
        assert!(gene.variants()[0].passed_filter(FilterType::Inheritance));
        assert_eq!(
            gene.variants()[1].passed_filter(FilterType::Inheritance),
            false
        );
    }

    #[test]
    fn gene_without_passed_variants_is_skipped() {
        let filter = InheritanceFilter::new(ModeOfInheritance::AutosomalRecessive);
        let annotator = singleton_annotator(0.1);

        let mut variant = het_variant(100, 0.001);
        variant.add_filter_result(FilterResult::fail(FilterType::Frequency));
        let mut gene = Gene::from_variant(variant);

        filter.apply(&mut gene, &annotator);

        assert!(gene.filter_results.is_empty());
        assert!(gene.inheritance_modes().is_empty());
    }

    #[test]
    fn pedigree_incompatible_gene_is_left_unannotated() {
        let filter = InheritanceFilter::new(ModeOfInheritance::AutosomalRecessive);
        // Annotator for a different sample than the genotyped one.
        let annotator = InheritanceModeAnnotator::new(Pedigree::single_affected_sample("other"));

        let mut gene = Gene::from_variant(het_variant(100, 0.001));
        filter.apply(&mut gene, &annotator);

        assert!(gene.filter_results.is_empty());
        assert!(gene.inheritance_modes().is_empty());
        assert!(gene.passed_filters());
    }

    #[test]
    fn unconstrained_filter_is_a_no_op() {
        let filter = InheritanceFilter::new(ModeOfInheritance::Any);
        let annotator = singleton_annotator(0.1);

        let mut gene = Gene::from_variant(het_variant(100, 0.001));
        filter.apply(&mut gene, &annotator);
        assert!(gene.filter_results.is_empty());
    }

    #[test]
    fn incompatible_target_mode_fails_gene_and_variants() {
        let filter = InheritanceFilter::new(ModeOfInheritance::Mitochondrial);
        let annotator = singleton_annotator(0.1);

        let mut gene = Gene::from_variant(het_variant(100, 0.001));
        filter.apply(&mut gene, &annotator);

        assert_eq!(gene.passed_filter(FilterType::Inheritance), false);
        assert_eq!(
            gene.variants()[0].passed_filter(FilterType::Inheritance),
            false
        );
        assert!(!gene.passed_filters());
    }
}
