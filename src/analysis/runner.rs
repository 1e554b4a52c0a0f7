//! The step scheduler: runs the declared filter/prioritizer sequence over
//! the variants, groups them into genes, and drives the final scoring and
//! ranking.

use std::sync::atomic::{AtomicBool, Ordering};

use indexmap::IndexMap;
use rayon::prelude::*;

use crate::analysis::{ranking, Analysis, AnalysisResults, AnalysisStep};
use crate::filters::{FilterStatus, VariantFilterKind};
use crate::inheritance::InheritanceModeAnnotator;
use crate::model::gene::Gene;
use crate::model::variant::VariantEvaluation;
use crate::priority::PriorityType;

/// Memory policy of a run; both strategies produce identical rankings for
/// the surviving variants and genes.
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
    clap::ValueEnum,
    strum::Display,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum AnalysisStrategy {
    /// Keep all variants in memory; every filter records its result on
    /// every variant, producing complete diagnostic records.
    #[default]
    #[strum(serialize = "simple")]
    Simple,
    /// Drop variants as soon as they fail a filter; only the failing
    /// filter is recorded on a dropped variant.
    #[strum(serialize = "passed-only")]
    PassedOnly,
}

/// Supporting code for `AnalysisRunner`.
pub(crate) mod runner {
    use crate::priority::PriorityType;

    /// Error type for `AnalysisRunner::run()`.
    #[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
    pub enum Error {
        #[error(
            "Priority-score filter for {0} requires that a prioritizer of the same type runs earlier"
        )]
        StepDependencyUnsatisfied(PriorityType),
        #[error("Analysis was cancelled")]
        Cancelled,
    }
}

/// Executes an [`Analysis`] over a set of annotated variants.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisRunner {
    strategy: AnalysisStrategy,
}

impl AnalysisRunner {
    /// Construct with the given strategy.
    pub fn new(strategy: AnalysisStrategy) -> Self {
        Self { strategy }
    }

    /// Run the analysis to completion.
    pub fn run(
        &self,
        analysis: &Analysis,
        variants: Vec<VariantEvaluation>,
    ) -> Result<AnalysisResults, runner::Error> {
        self.run_with_cancel(analysis, variants, &AtomicBool::new(false))
    }

    /// Run the analysis, checking the cancellation flag between steps. A
    /// cancelled run produces no results.
    pub fn run_with_cancel(
        &self,
        analysis: &Analysis,
        variants: Vec<VariantEvaluation>,
        cancel: &AtomicBool,
    ) -> Result<AnalysisResults, runner::Error> {
        validate_step_dependencies(analysis.steps())?;

        if variants.is_empty() {
            tracing::info!("no variants in input, producing empty results");
            return Ok(AnalysisResults::default());
        }
        tracing::info!(
            "running {} steps over {} variants ({} strategy)",
            analysis.steps().len(),
            variants.len(),
            self.strategy
        );

        // The inheritance filter depends on the final variant set of each
        // gene and therefore always runs last, wherever it was declared.
        let (inheritance_steps, main_steps): (Vec<_>, Vec<_>) = analysis
            .steps()
            .iter()
            .partition(|s| matches!(s, AnalysisStep::InheritanceFilter(_)));

        let mut variants = variants;
        let mut genes: Option<Vec<Gene>> = None;
        let annotator = InheritanceModeAnnotator::with_max_frequencies(
            analysis.pedigree().clone(),
            analysis.inheritance_max_frequencies().clone(),
        );

        for step in main_steps.iter().chain(inheritance_steps.iter()) {
            if cancel.load(Ordering::Relaxed) {
                tracing::warn!("analysis cancelled between steps");
                return Err(runner::Error::Cancelled);
            }
            match step {
                AnalysisStep::VariantFilter(filter) => match genes.as_mut() {
                    None => {
                        self.apply_variant_filter(filter, &mut variants);
                    }
                    Some(genes) => {
                        self.apply_variant_filter_to_genes(filter, genes);
                    }
                },
                AnalysisStep::GeneFilter(filter) => {
                    let genes = genes
                        .get_or_insert_with(|| group_by_gene(std::mem::take(&mut variants)));
                    for gene in genes.iter_mut() {
                        filter.apply(gene);
                    }
                    self.drop_failed_genes(genes);
                }
                AnalysisStep::InheritanceFilter(filter) => {
                    let genes = genes
                        .get_or_insert_with(|| group_by_gene(std::mem::take(&mut variants)));
                    for gene in genes.iter_mut() {
                        filter.apply(gene, &annotator);
                    }
                    self.drop_failed_genes(genes);
                }
                AnalysisStep::Prioritiser(prioritiser) => {
                    let genes = genes
                        .get_or_insert_with(|| group_by_gene(std::mem::take(&mut variants)));
                    prioritiser.prioritise(genes);
                }
            }
        }

        let mut genes = genes.unwrap_or_else(|| group_by_gene(variants));
        for gene in genes.iter_mut() {
            ranking::score_gene(
                gene,
                analysis.mode_of_inheritance(),
                analysis.pedigree(),
                analysis.downweight_threshold(),
            );
        }
        ranking::rank_genes(&mut genes);

        tracing::info!(
            "analysis done, {} of {} genes passed",
            genes.iter().filter(|g| g.passed_filters()).count(),
            genes.len()
        );
        Ok(AnalysisResults::new(genes))
    }

    /// Apply one variant filter to ungrouped variants. Per-variant filter
    /// work is pure, so it fans out across the worker pool.
    fn apply_variant_filter(
        &self,
        filter: &VariantFilterKind,
        variants: &mut Vec<VariantEvaluation>,
    ) {
        variants.par_iter_mut().for_each(|v| filter.apply(v));
        if self.strategy == AnalysisStrategy::PassedOnly {
            variants.retain(|v| v.filter_status() != FilterStatus::Failed);
        }
    }

    /// Apply one variant filter to variants already grouped into genes.
    fn apply_variant_filter_to_genes(&self, filter: &VariantFilterKind, genes: &mut Vec<Gene>) {
        genes.par_iter_mut().for_each(|gene| {
            gene.variants_mut().iter_mut().for_each(|v| filter.apply(v));
        });
        if self.strategy == AnalysisStrategy::PassedOnly {
            for gene in genes.iter_mut() {
                gene.retain_variants(|v| v.filter_status() != FilterStatus::Failed);
            }
            genes.retain(|g| g.number_of_variants() > 0);
        }
    }

    /// In passed-only mode, genes failing a gene-level filter are dropped.
    fn drop_failed_genes(&self, genes: &mut Vec<Gene>) {
        if self.strategy == AnalysisStrategy::PassedOnly {
            genes.retain(|g| {
                g.filter_results.failed_filter_types().is_empty() && g.number_of_variants() > 0
            });
        }
    }
}

/// Check that every priority-score filter is preceded by a prioritizer of
/// its type.
fn validate_step_dependencies(steps: &[AnalysisStep]) -> Result<(), runner::Error> {
    let mut prioritised = Vec::<PriorityType>::new();
    for step in steps {
        match step {
            AnalysisStep::Prioritiser(p) => prioritised.push(p.priority_type()),
            AnalysisStep::GeneFilter(crate::filters::GeneFilterKind::PriorityScore(f)) => {
                if !prioritised.contains(&f.priority_type()) {
                    return Err(runner::Error::StepDependencyUnsatisfied(f.priority_type()));
                }
            }
            _ => {}
        }
    }
    Ok(())
}

/// Group variants by gene identifier, dropping variants that hit no gene.
fn group_by_gene(variants: Vec<VariantEvaluation>) -> Vec<Gene> {
    let mut genes: IndexMap<String, Gene> = IndexMap::new();
    let mut dropped = 0usize;
    for variant in variants {
        if !variant.has_gene() {
            dropped += 1;
            continue;
        }
        genes
            .entry(variant.gene_id.clone())
            .or_insert_with(|| Gene::new(&variant.gene_symbol, &variant.gene_id))
            .add_variant(variant);
    }
    if dropped > 0 {
        tracing::debug!("dropped {} variants outside of genes", dropped);
    }
    genes.into_values().collect()
}
