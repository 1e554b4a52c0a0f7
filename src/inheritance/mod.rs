//! Mendelian inheritance compatibility over a pedigree.
//!
//! Given the variants of one gene with per-sample genotypes, the annotator
//! computes which modes of inheritance the gene is compatible with and
//! which variants support each mode.

pub mod checker;

use enum_map::EnumMap;
use indexmap::IndexMap;

use crate::common::ChromosomeType;
use crate::model::pedigree::Pedigree;
use crate::model::variant::VariantEvaluation;

/// Modes of inheritance a gene can be compatible with.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumIter,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum ModeOfInheritance {
    /// Autosomal dominant.
    AutosomalDominant,
    /// Autosomal recessive (homozygous or compound heterozygous).
    AutosomalRecessive,
    /// X-linked dominant.
    XDominant,
    /// X-linked recessive.
    XRecessive,
    /// Mitochondrial.
    Mitochondrial,
    /// No constraint; diagnostic only, excluded from result aggregation.
    #[default]
    Any,
}

/// Sub-modes distinguishing the recessive compatibility mechanisms.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    enum_map::Enum,
    strum::Display,
    strum::EnumIter,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum SubModeOfInheritance {
    /// Autosomal dominant.
    AutosomalDominant,
    /// Autosomal recessive via a homozygous-alternate variant.
    AutosomalRecessiveHomAlt,
    /// Autosomal recessive via a compound-heterozygous pair.
    AutosomalRecessiveCompHet,
    /// X-linked dominant.
    XDominant,
    /// X-linked recessive via a homozygous/hemizygous alternate variant.
    XRecessiveHomAlt,
    /// X-linked recessive via a compound-heterozygous pair.
    XRecessiveCompHet,
    /// Mitochondrial.
    Mitochondrial,
    /// No constraint; diagnostic only.
    Any,
}

impl SubModeOfInheritance {
    /// The mode of inheritance the sub-mode belongs to.
    pub fn mode_of_inheritance(&self) -> ModeOfInheritance {
        match self {
            SubModeOfInheritance::AutosomalDominant => ModeOfInheritance::AutosomalDominant,
            SubModeOfInheritance::AutosomalRecessiveHomAlt
            | SubModeOfInheritance::AutosomalRecessiveCompHet => {
                ModeOfInheritance::AutosomalRecessive
            }
            SubModeOfInheritance::XDominant => ModeOfInheritance::XDominant,
            SubModeOfInheritance::XRecessiveHomAlt | SubModeOfInheritance::XRecessiveCompHet => {
                ModeOfInheritance::XRecessive
            }
            SubModeOfInheritance::Mitochondrial => ModeOfInheritance::Mitochondrial,
            SubModeOfInheritance::Any => ModeOfInheritance::Any,
        }
    }

    /// The chromosome class the sub-mode applies to, `None` for `Any`.
    fn chromosome_type(&self) -> Option<ChromosomeType> {
        match self {
            SubModeOfInheritance::AutosomalDominant
            | SubModeOfInheritance::AutosomalRecessiveHomAlt
            | SubModeOfInheritance::AutosomalRecessiveCompHet => Some(ChromosomeType::Autosomal),
            SubModeOfInheritance::XDominant
            | SubModeOfInheritance::XRecessiveHomAlt
            | SubModeOfInheritance::XRecessiveCompHet => Some(ChromosomeType::XChromosomal),
            SubModeOfInheritance::Mitochondrial => Some(ChromosomeType::Mitochondrial),
            SubModeOfInheritance::Any => None,
        }
    }
}

/// Per-sub-mode ceilings on the minor-allele frequency of supporting
/// variants, as percentages.
///
/// Variants more frequent than the ceiling are removed from a sub-mode's
/// candidate set before the compatibility predicate is evaluated.
#[derive(Debug, Clone, PartialEq)]
pub struct InheritanceMaxFrequencies {
    max_freqs: EnumMap<SubModeOfInheritance, f32>,
}

impl Default for InheritanceMaxFrequencies {
    fn default() -> Self {
        Self {
            max_freqs: EnumMap::from_fn(|sub_mode| match sub_mode {
                SubModeOfInheritance::AutosomalDominant
                | SubModeOfInheritance::AutosomalRecessiveHomAlt
                | SubModeOfInheritance::XDominant
                | SubModeOfInheritance::XRecessiveHomAlt => 0.1,
                SubModeOfInheritance::AutosomalRecessiveCompHet
                | SubModeOfInheritance::XRecessiveCompHet => 2.0,
                SubModeOfInheritance::Mitochondrial => 0.2,
                SubModeOfInheritance::Any => 100.0,
            }),
        }
    }
}

impl InheritanceMaxFrequencies {
    /// The same ceiling for every sub-mode.
    pub fn uniform(max_freq: f32) -> Self {
        Self {
            max_freqs: EnumMap::from_fn(|_| max_freq),
        }
    }

    /// Override the ceiling for one sub-mode.
    pub fn with_max_freq(mut self, sub_mode: SubModeOfInheritance, max_freq: f32) -> Self {
        self.max_freqs[sub_mode] = max_freq;
        self
    }

    /// The ceiling for the given sub-mode.
    pub fn max_freq_for(&self, sub_mode: SubModeOfInheritance) -> f32 {
        self.max_freqs[sub_mode]
    }
}

/// Supporting code for `InheritanceModeAnnotator`.
pub(crate) mod annotator {
    /// Error type for the compatibility computations.
    #[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
    pub enum Error {
        #[error("Sample {0} from variant genotypes is not in the pedigree")]
        PedigreeIncompatible(String),
    }
}

/// Computes the inheritance modes a set of variants in one gene is
/// compatible with, given the pedigree supplied at construction.
///
/// The input variants are expected to be pre-filtered; the annotator does
/// not alter them.
#[derive(Debug, Clone, PartialEq)]
pub struct InheritanceModeAnnotator {
    pedigree: Pedigree,
    max_freqs: InheritanceMaxFrequencies,
}

impl InheritanceModeAnnotator {
    /// Construct with default frequency ceilings.
    pub fn new(pedigree: Pedigree) -> Self {
        Self {
            pedigree,
            max_freqs: InheritanceMaxFrequencies::default(),
        }
    }

    /// Construct with explicit frequency ceilings.
    pub fn with_max_frequencies(pedigree: Pedigree, max_freqs: InheritanceMaxFrequencies) -> Self {
        Self { pedigree, max_freqs }
    }

    /// The pedigree the annotator checks against.
    pub fn pedigree(&self) -> &Pedigree {
        &self.pedigree
    }

    /// Compute the compatible sub-modes and their supporting variants,
    /// given as indexes into `variants`. The `Any` sub-mode is excluded.
    ///
    /// # Errors
    ///
    /// `PedigreeIncompatible` if a genotyped sample is missing from the
    /// pedigree.
    pub fn compute_compatible_sub_modes(
        &self,
        variants: &[&VariantEvaluation],
    ) -> Result<IndexMap<SubModeOfInheritance, Vec<usize>>, annotator::Error> {
        self.validate_samples(variants)?;

        let mut result = IndexMap::new();
        for sub_mode in <SubModeOfInheritance as strum::IntoEnumIterator>::iter() {
            let Some(chromosome_type) = sub_mode.chromosome_type() else {
                continue;
            };
            let ceiling = self.max_freqs.max_freq_for(sub_mode);
            let candidates = variants
                .iter()
                .enumerate()
                .filter(|(_, v)| {
                    v.chromosome_type() == chromosome_type && v.max_freq() <= ceiling
                })
                .map(|(i, v)| (i, *v))
                .collect::<Vec<_>>();

            let supporting = self.supporting_variants(sub_mode, &candidates);
            if !supporting.is_empty() {
                result.insert(sub_mode, supporting);
            }
        }
        Ok(result)
    }

    /// Compute the compatible modes and their supporting variants, given as
    /// indexes into `variants`. The `Any` mode is excluded; the recessive
    /// modes aggregate their sub-modes.
    pub fn compute_compatible_modes(
        &self,
        variants: &[&VariantEvaluation],
    ) -> Result<IndexMap<ModeOfInheritance, Vec<usize>>, annotator::Error> {
        let sub_modes = self.compute_compatible_sub_modes(variants)?;

        let mut result: IndexMap<ModeOfInheritance, Vec<usize>> = IndexMap::new();
        for (sub_mode, supporting) in sub_modes {
            result
                .entry(sub_mode.mode_of_inheritance())
                .or_default()
                .extend(supporting);
        }
        for supporting in result.values_mut() {
            supporting.sort_unstable();
            supporting.dedup();
        }
        Ok(result)
    }

    fn validate_samples(&self, variants: &[&VariantEvaluation]) -> Result<(), annotator::Error> {
        for variant in variants {
            for sample in variant.sample_genotypes.keys() {
                if !self.pedigree.contains(sample) {
                    return Err(annotator::Error::PedigreeIncompatible(sample.clone()));
                }
            }
        }
        Ok(())
    }

    fn supporting_variants(
        &self,
        sub_mode: SubModeOfInheritance,
        candidates: &[(usize, &VariantEvaluation)],
    ) -> Vec<usize> {
        match sub_mode {
            SubModeOfInheritance::AutosomalDominant => {
                self.filter_single(candidates, checker::autosomal_dominant)
            }
            SubModeOfInheritance::AutosomalRecessiveHomAlt => {
                self.filter_single(candidates, checker::autosomal_recessive_hom_alt)
            }
            SubModeOfInheritance::AutosomalRecessiveCompHet => {
                self.filter_pairs(candidates, checker::autosomal_recessive_comp_het)
            }
            SubModeOfInheritance::XDominant => self.filter_single(candidates, checker::x_dominant),
            SubModeOfInheritance::XRecessiveHomAlt => {
                self.filter_single(candidates, checker::x_recessive_hom_alt)
            }
            SubModeOfInheritance::XRecessiveCompHet => {
                self.filter_pairs(candidates, checker::x_recessive_comp_het)
            }
            SubModeOfInheritance::Mitochondrial => {
                self.filter_single(candidates, checker::mitochondrial)
            }
            SubModeOfInheritance::Any => candidates.iter().map(|(i, _)| *i).collect(),
        }
    }

    fn filter_single(
        &self,
        candidates: &[(usize, &VariantEvaluation)],
        predicate: impl Fn(&Pedigree, &VariantEvaluation) -> bool,
    ) -> Vec<usize> {
        candidates
            .iter()
            .filter(|(_, v)| predicate(&self.pedigree, v))
            .map(|(i, _)| *i)
            .collect()
    }

    fn filter_pairs(
        &self,
        candidates: &[(usize, &VariantEvaluation)],
        predicate: impl Fn(&Pedigree, &VariantEvaluation, &VariantEvaluation) -> bool,
    ) -> Vec<usize> {
        let mut supporting = Vec::new();
        for (a, (i, first)) in candidates.iter().enumerate() {
            for (j, second) in candidates.iter().skip(a + 1) {
                if predicate(&self.pedigree, first, second) {
                    supporting.push(*i);
                    supporting.push(*j);
                }
            }
        }
        supporting.sort_unstable();
        supporting.dedup();
        supporting
    }
}
