//! Gene-level aggregation of variant evaluations with priority results and
//! aggregate scores.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::filters::{FilterResult, FilterResults, FilterType};
use crate::inheritance::ModeOfInheritance;
use crate::model::variant::VariantEvaluation;
use crate::priority::{PriorityResult, PriorityType};

/// Sentinel for scores that have not been calculated yet.
pub const UNINITIALIZED_SCORE: f64 = -10.0;

/// All variant evaluations sharing one gene identifier, plus the gene-level
/// filter/priority state.
///
/// Created during gene grouping; mutated by gene filters, prioritizers, and
/// the ranking stage. The aggregate scores are only valid after score
/// calculation has run for a mode of inheritance.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Gene {
    /// Gene symbol.
    pub gene_symbol: String,
    /// Gene identifier shared by all member variants.
    pub gene_id: String,
    /// The member variant evaluations in input order.
    variants: Vec<VariantEvaluation>,
    /// Results of the prioritizers that have run, keyed by type.
    priority_results: IndexMap<PriorityType, PriorityResult>,
    /// The gene-level filter-results record.
    pub filter_results: FilterResults,
    /// Modes of inheritance the gene is compatible with.
    inheritance_modes: BTreeSet<ModeOfInheritance>,
    /// Aggregate priority score; sentinel until calculated.
    pub(crate) priority_score: f64,
    /// Aggregate filter score; sentinel until calculated.
    pub(crate) filter_score: f64,
    /// Combined score used for ranking; sentinel until calculated.
    pub(crate) combined_score: f64,
}

impl Gene {
    /// Construct an empty gene.
    pub fn new(gene_symbol: &str, gene_id: &str) -> Self {
        Self {
            gene_symbol: gene_symbol.to_string(),
            gene_id: gene_id.to_string(),
            variants: Vec::new(),
            priority_results: IndexMap::new(),
            filter_results: FilterResults::default(),
            inheritance_modes: BTreeSet::new(),
            priority_score: UNINITIALIZED_SCORE,
            filter_score: UNINITIALIZED_SCORE,
            combined_score: UNINITIALIZED_SCORE,
        }
    }

    /// Construct from the first member variant.
    pub fn from_variant(variant: VariantEvaluation) -> Self {
        let mut gene = Self::new(&variant.gene_symbol, &variant.gene_id);
        gene.add_variant(variant);
        gene
    }

    /// Add a member variant; it must share the gene identifier.
    pub fn add_variant(&mut self, variant: VariantEvaluation) {
        debug_assert_eq!(variant.gene_id, self.gene_id);
        self.variants.push(variant);
    }

    /// The member variants in input order.
    pub fn variants(&self) -> &[VariantEvaluation] {
        &self.variants
    }

    /// Mutable access to the member variants.
    pub fn variants_mut(&mut self) -> &mut [VariantEvaluation] {
        &mut self.variants
    }

    /// Remove member variants not matching the predicate.
    pub fn retain_variants(&mut self, f: impl FnMut(&VariantEvaluation) -> bool) {
        self.variants.retain(f);
    }

    /// Number of member variants.
    pub fn number_of_variants(&self) -> usize {
        self.variants.len()
    }

    /// The member variants that passed all variant filters.
    pub fn passed_variants(&self) -> Vec<&VariantEvaluation> {
        self.variants.iter().filter(|v| v.passed_filters()).collect()
    }

    /// Whether the gene passed: at least one member variant passed and no
    /// gene-level filter recorded a failure.
    pub fn passed_filters(&self) -> bool {
        self.variants.iter().any(|v| v.passed_filters())
            && self.filter_results.failed_filter_types().is_empty()
    }

    /// Whether the gene passed the given gene-level filter.
    pub fn passed_filter(&self, filter_type: FilterType) -> bool {
        self.filter_results.passed_filter(filter_type)
    }

    /// Record a gene-level filter result.
    pub fn add_filter_result(&mut self, result: FilterResult) {
        self.filter_results.add(result);
    }

    /// Attach a prioritizer result, replacing any earlier result of the
    /// same type.
    pub fn add_priority_result(&mut self, result: PriorityResult) {
        self.priority_results.insert(result.priority_type, result);
    }

    /// The result of the prioritizer of the given type, if it has run.
    pub fn priority_result(&self, priority_type: PriorityType) -> Option<&PriorityResult> {
        self.priority_results.get(&priority_type)
    }

    /// All attached priority results in attachment order.
    pub fn priority_results(&self) -> impl Iterator<Item = &PriorityResult> {
        self.priority_results.values()
    }

    /// Replace the set of compatible inheritance modes.
    pub fn set_inheritance_modes(&mut self, modes: BTreeSet<ModeOfInheritance>) {
        self.inheritance_modes = modes;
    }

    /// The compatible inheritance modes.
    pub fn inheritance_modes(&self) -> &BTreeSet<ModeOfInheritance> {
        &self.inheritance_modes
    }

    /// Whether the gene is compatible with the given mode.
    pub fn is_compatible_with(&self, mode: ModeOfInheritance) -> bool {
        self.inheritance_modes.contains(&mode)
    }

    /// The aggregate priority score; sentinel until calculated.
    pub fn priority_score(&self) -> f64 {
        self.priority_score
    }

    /// The aggregate filter score; sentinel until calculated.
    pub fn filter_score(&self) -> f64 {
        self.filter_score
    }

    /// The combined ranking score; sentinel until calculated.
    pub fn combined_score(&self) -> f64 {
        self.combined_score
    }
}
