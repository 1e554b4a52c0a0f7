//! Per-variant state: coordinates, annotation, genotypes, and the mutable
//! filter-results record.

use indexmap::IndexMap;

use crate::common::ChromosomeType;
use crate::dao::{FrequencyData, PathogenicityData};
use crate::filters::{FilterResult, FilterResults, FilterStatus, FilterType};

/// Sentinel gene identifier for variants outside of any gene.
pub const UNKNOWN_GENE_ID: &str = "-";

/// A single allele call of one sample at one variant site.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum AlleleCall {
    /// The reference allele.
    Ref,
    /// The alternate allele under consideration.
    Alt,
    /// Some other alternate allele of a multi-allelic site.
    OtherAlt,
    /// No call was made.
    NoCall,
}

/// The ordered allele calls of one sample at one variant site.
///
/// Diploid calls have two entries; hemizygous calls (male X/Y, MT) have one.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct SampleGenotype {
    calls: Vec<AlleleCall>,
}

impl SampleGenotype {
    /// Construct from the given calls.
    pub fn of(calls: Vec<AlleleCall>) -> Self {
        Self { calls }
    }

    /// Diploid heterozygous `0/1`.
    pub fn het() -> Self {
        Self::of(vec![AlleleCall::Ref, AlleleCall::Alt])
    }

    /// Diploid homozygous alternate `1/1`.
    pub fn hom_alt() -> Self {
        Self::of(vec![AlleleCall::Alt, AlleleCall::Alt])
    }

    /// Diploid homozygous reference `0/0`.
    pub fn hom_ref() -> Self {
        Self::of(vec![AlleleCall::Ref, AlleleCall::Ref])
    }

    /// Diploid no-call `./.`.
    pub fn no_call() -> Self {
        Self::of(vec![AlleleCall::NoCall, AlleleCall::NoCall])
    }

    /// Hemizygous call of a single allele.
    pub fn hemizygous(call: AlleleCall) -> Self {
        Self::of(vec![call])
    }

    /// The ordered allele calls.
    pub fn calls(&self) -> &[AlleleCall] {
        &self.calls
    }

    /// Whether any call is a no-call (the genotype is then treated as
    /// no-call as a whole).
    pub fn is_no_call(&self) -> bool {
        self.calls.is_empty() || self.calls.iter().any(|c| *c == AlleleCall::NoCall)
    }

    /// Whether all calls are reference.
    pub fn is_hom_ref(&self) -> bool {
        !self.calls.is_empty() && self.calls.iter().all(|c| *c == AlleleCall::Ref)
    }

    /// Whether all calls are the alternate allele (includes hemizygous alt).
    pub fn is_hom_alt(&self) -> bool {
        !self.calls.is_empty() && self.calls.iter().all(|c| *c == AlleleCall::Alt)
    }

    /// Whether the genotype carries the alternate allele exactly once
    /// together with at least one non-alternate call.
    pub fn is_het(&self) -> bool {
        self.calls.len() >= 2
            && !self.is_no_call()
            && self.calls.iter().filter(|c| **c == AlleleCall::Alt).count() == 1
    }

    /// Whether any call is the alternate allele.
    pub fn has_alt(&self) -> bool {
        self.calls.iter().any(|c| *c == AlleleCall::Alt)
    }
}

/// Predicted molecular consequence of a variant.
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
    serde::Serialize,
    serde::Deserialize,
)]
pub enum VariantEffect {
    /// Missense variant.
    #[default]
    Missense,
    /// Stop-gain variant.
    StopGained,
    /// Stop-loss variant.
    StopLost,
    /// Start-loss variant.
    StartLost,
    /// Frameshift variant.
    Frameshift,
    /// In-frame insertion.
    InframeInsertion,
    /// In-frame deletion.
    InframeDeletion,
    /// Splice-donor variant.
    SpliceDonor,
    /// Splice-acceptor variant.
    SpliceAcceptor,
    /// Splice-region variant.
    SpliceRegion,
    /// Synonymous variant.
    Synonymous,
    /// 5' UTR variant.
    FivePrimeUtr,
    /// 3' UTR variant.
    ThreePrimeUtr,
    /// Intronic variant outside of splice regions.
    Intronic,
    /// Upstream gene variant.
    Upstream,
    /// Downstream gene variant.
    Downstream,
    /// Intergenic variant.
    Intergenic,
    /// Regulatory-region variant.
    RegulatoryRegion,
}

/// Coarse grouping of effects for the pathogenicity filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathogenicityClass {
    /// Deleterious regardless of prediction scores.
    Disruptive,
    /// Scored against the pathogenicity predictions.
    MissenseEquivalent,
    /// Benign unless proven otherwise.
    Benign,
}

impl VariantEffect {
    /// The pathogenicity class of the effect.
    pub fn pathogenicity_class(&self) -> PathogenicityClass {
        match self {
            VariantEffect::StopGained
            | VariantEffect::StartLost
            | VariantEffect::Frameshift
            | VariantEffect::SpliceDonor
            | VariantEffect::SpliceAcceptor => PathogenicityClass::Disruptive,
            VariantEffect::Missense
            | VariantEffect::StopLost
            | VariantEffect::InframeInsertion
            | VariantEffect::InframeDeletion
            | VariantEffect::SpliceRegion => PathogenicityClass::MissenseEquivalent,
            VariantEffect::Synonymous
            | VariantEffect::FivePrimeUtr
            | VariantEffect::ThreePrimeUtr
            | VariantEffect::Intronic
            | VariantEffect::Upstream
            | VariantEffect::Downstream
            | VariantEffect::Intergenic
            | VariantEffect::RegulatoryRegion => PathogenicityClass::Benign,
        }
    }
}

/// One annotated variant under evaluation.
///
/// Created by the external annotator; filters record results on it, data
/// providers attach frequency/pathogenicity data. Lives for the duration of
/// one analysis.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VariantEvaluation {
    /// Chromosome number, 1..=25 with 23=X, 24=Y, 25=MT.
    pub chromosome: u8,
    /// 1-based position.
    pub position: i32,
    /// Reference allele.
    pub reference: String,
    /// Alternate allele.
    pub alternative: String,
    /// Index of the alternate allele for multi-allelic sites.
    pub alt_allele_id: u32,
    /// Predicted effect of the variant.
    pub variant_effect: VariantEffect,
    /// Call quality (PHRED).
    pub quality: f64,
    /// Gene symbol, empty if unknown.
    pub gene_symbol: String,
    /// Gene identifier, `UNKNOWN_GENE_ID` if the variant hits no gene.
    pub gene_id: String,
    /// Per-sample genotypes in pedigree order.
    pub sample_genotypes: IndexMap<String, SampleGenotype>,
    /// Population frequencies, if the variant has been looked up.
    pub frequency_data: Option<FrequencyData>,
    /// Pathogenicity predictions, if the variant has been looked up.
    pub pathogenicity_data: Option<PathogenicityData>,
    /// The filter-results record; the record itself enforces the
    /// one-entry-per-filter-type discipline.
    #[serde(default)]
    pub filter_results: FilterResults,
}

impl VariantEvaluation {
    /// Record a filter result; the first recording per filter type wins.
    pub fn add_filter_result(&mut self, result: FilterResult) {
        self.filter_results.add(result);
    }

    /// The derived filter status.
    pub fn filter_status(&self) -> FilterStatus {
        self.filter_results.status()
    }

    /// Whether the variant has passed all filters run on it (and at least
    /// one has run).
    pub fn passed_filters(&self) -> bool {
        self.filter_status() == FilterStatus::Passed
    }

    /// Whether the variant passed the given filter.
    pub fn passed_filter(&self, filter_type: FilterType) -> bool {
        self.filter_results.passed_filter(filter_type)
    }

    /// The filter types the variant failed, in recording order.
    pub fn failed_filter_types(&self) -> Vec<FilterType> {
        self.filter_results.failed_filter_types()
    }

    /// Classification of the variant's chromosome.
    pub fn chromosome_type(&self) -> ChromosomeType {
        ChromosomeType::from_chromosome(self.chromosome)
    }

    /// Whether the variant hits a known gene.
    pub fn has_gene(&self) -> bool {
        !self.gene_id.is_empty() && self.gene_id != UNKNOWN_GENE_ID
    }

    /// The genotype of the given sample, no-call when the sample is absent.
    pub fn sample_genotype(&self, sample: &str) -> SampleGenotype {
        self.sample_genotypes
            .get(sample)
            .cloned()
            .unwrap_or_else(SampleGenotype::no_call)
    }

    /// The highest observed minor-allele frequency, `0.0` without data.
    pub fn max_freq(&self) -> f32 {
        self.frequency_data
            .as_ref()
            .map(|d| d.max_freq())
            .unwrap_or(0.0)
    }

    /// The per-variant score used for gene ranking: the maximal
    /// pathogenicity component, clamped to `[0, 1]`; `0.0` without data.
    pub fn variant_score(&self) -> f64 {
        self.pathogenicity_data
            .as_ref()
            .map(|d| d.predicted_score() as f64)
            .unwrap_or(0.0)
    }
}
