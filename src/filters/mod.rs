//! Filter framework: variant-level and gene-level filters with a uniform
//! pass/fail contract and a result-recording discipline.
//!
//! Filters are a closed set of tagged variants rather than an open trait
//! hierarchy; equality of two filters is equality of their type and of
//! every configuration parameter.

pub mod frequency;
pub mod inheritance;
pub mod interval;
pub mod known_variant;
pub mod pathogenicity;
pub mod priority_score;
pub mod quality;
pub mod regulatory;

pub use frequency::FrequencyFilter;
pub use inheritance::InheritanceFilter;
pub use interval::{GeneticInterval, IntervalFilter};
pub use known_variant::KnownVariantFilter;
pub use pathogenicity::PathogenicityFilter;
pub use priority_score::PriorityScoreFilter;
pub use quality::QualityFilter;
pub use regulatory::RegulatoryFeatureFilter;

use crate::model::gene::Gene;
use crate::model::variant::VariantEvaluation;

/// Identifies the kind of a filter; one entry per concrete filter.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum FilterType {
    /// Call-quality filter.
    Quality,
    /// Genomic-interval filter.
    Interval,
    /// Population-frequency filter.
    Frequency,
    /// Pathogenicity-prediction filter.
    Pathogenicity,
    /// Known-variant (database representation) filter.
    KnownVariant,
    /// Regulatory-feature filter.
    RegulatoryFeature,
    /// Inheritance-mode filter.
    Inheritance,
    /// Priority-score filter.
    PriorityScore,
}

/// Outcome of running one filter on one entity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum FilterOutcome {
    /// The entity passed the filter.
    Pass,
    /// The entity failed the filter.
    Fail,
}

/// The result of one filter run, immutable once recorded on an entity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FilterResult {
    /// The filter that produced the result.
    pub filter_type: FilterType,
    /// Pass or fail.
    pub outcome: FilterOutcome,
}

impl FilterResult {
    /// Construct a passing result.
    pub fn pass(filter_type: FilterType) -> Self {
        Self {
            filter_type,
            outcome: FilterOutcome::Pass,
        }
    }

    /// Construct a failing result.
    pub fn fail(filter_type: FilterType) -> Self {
        Self {
            filter_type,
            outcome: FilterOutcome::Fail,
        }
    }

    /// Construct from a boolean pass flag.
    pub fn from_passed(filter_type: FilterType, passed: bool) -> Self {
        if passed {
            Self::pass(filter_type)
        } else {
            Self::fail(filter_type)
        }
    }

    /// Whether the result is a pass.
    pub fn passed(&self) -> bool {
        self.outcome == FilterOutcome::Pass
    }
}

/// Derived filter state of an entity.
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
    serde::Serialize,
    serde::Deserialize,
)]
pub enum FilterStatus {
    /// No filter has been run on the entity.
    #[default]
    Unfiltered,
    /// At least one filter passed and none failed.
    Passed,
    /// At least one filter failed.
    Failed,
}

/// The per-entity record of filter results.
///
/// Iteration order is recording order, which equals the step-declaration
/// order of the analysis. Each filter type is recorded at most once; a
/// second recording for the same type is a no-op (filters are deterministic,
/// so the value is identical anyway).
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct FilterResults {
    results: indexmap::IndexMap<FilterType, FilterResult>,
}

impl FilterResults {
    /// Record a result; the first recording for a filter type wins.
    pub fn add(&mut self, result: FilterResult) {
        self.results.entry(result.filter_type).or_insert(result);
    }

    /// The recorded result for the given filter type, if any.
    pub fn get(&self, filter_type: FilterType) -> Option<&FilterResult> {
        self.results.get(&filter_type)
    }

    /// Whether the entity passed the given filter.
    pub fn passed_filter(&self, filter_type: FilterType) -> bool {
        self.get(filter_type).map(|r| r.passed()).unwrap_or(false)
    }

    /// The filter types that recorded a failure, in recording order.
    pub fn failed_filter_types(&self) -> Vec<FilterType> {
        self.results
            .values()
            .filter(|r| !r.passed())
            .map(|r| r.filter_type)
            .collect()
    }

    /// The derived filter status.
    pub fn status(&self) -> FilterStatus {
        if self.results.is_empty() {
            FilterStatus::Unfiltered
        } else if self.results.values().any(|r| !r.passed()) {
            FilterStatus::Failed
        } else {
            FilterStatus::Passed
        }
    }

    /// Number of recorded results.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether no result has been recorded.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Iterate over the recorded results in recording order.
    pub fn iter(&self) -> impl Iterator<Item = &FilterResult> {
        self.results.values()
    }
}

/// The closed set of variant-level filters.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum VariantFilterKind {
    /// See [`QualityFilter`].
    Quality(QualityFilter),
    /// See [`IntervalFilter`].
    Interval(IntervalFilter),
    /// See [`FrequencyFilter`].
    Frequency(FrequencyFilter),
    /// See [`PathogenicityFilter`].
    Pathogenicity(PathogenicityFilter),
    /// See [`KnownVariantFilter`].
    KnownVariant(KnownVariantFilter),
    /// See [`RegulatoryFeatureFilter`].
    RegulatoryFeature(RegulatoryFeatureFilter),
}

impl VariantFilterKind {
    /// The filter type tag of the wrapped filter.
    pub fn filter_type(&self) -> FilterType {
        match self {
            VariantFilterKind::Quality(_) => FilterType::Quality,
            VariantFilterKind::Interval(_) => FilterType::Interval,
            VariantFilterKind::Frequency(_) => FilterType::Frequency,
            VariantFilterKind::Pathogenicity(_) => FilterType::Pathogenicity,
            VariantFilterKind::KnownVariant(_) => FilterType::KnownVariant,
            VariantFilterKind::RegulatoryFeature(_) => FilterType::RegulatoryFeature,
        }
    }

    /// Determine whether the variant passes, without recording.
    pub fn passes(&self, variant: &VariantEvaluation) -> bool {
        match self {
            VariantFilterKind::Quality(f) => f.passes(variant),
            VariantFilterKind::Interval(f) => f.passes(variant),
            VariantFilterKind::Frequency(f) => f.passes(variant),
            VariantFilterKind::Pathogenicity(f) => f.passes(variant),
            VariantFilterKind::KnownVariant(f) => f.passes(variant),
            VariantFilterKind::RegulatoryFeature(f) => f.passes(variant),
        }
    }

    /// Run the filter and record the result on the variant.
    pub fn apply(&self, variant: &mut VariantEvaluation) {
        let result = FilterResult::from_passed(self.filter_type(), self.passes(variant));
        variant.add_filter_result(result);
    }
}

/// The closed set of gene-level filters.
///
/// The inheritance filter is not part of this set: it needs the
/// inheritance-mode annotator as context and is dispatched separately by
/// the analysis runner.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum GeneFilterKind {
    /// See [`PriorityScoreFilter`].
    PriorityScore(PriorityScoreFilter),
}

impl GeneFilterKind {
    /// The filter type tag of the wrapped filter.
    pub fn filter_type(&self) -> FilterType {
        match self {
            GeneFilterKind::PriorityScore(_) => FilterType::PriorityScore,
        }
    }

    /// Run the filter, recording the result on the gene and its member
    /// variants.
    pub fn apply(&self, gene: &mut Gene) {
        match self {
            GeneFilterKind::PriorityScore(f) => f.apply(gene),
        }
    }
}
