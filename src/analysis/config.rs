//! Building an [`Analysis`] from a serialized configuration.

use indexmap::IndexMap;

use crate::analysis::{Analysis, AnalysisStep};
use crate::filters::{
    frequency::frequency_filter, interval::genetic_interval, pathogenicity::pathogenicity_filter,
    priority_score::priority_score_filter, quality::quality_filter, FrequencyFilter,
    GeneFilterKind, GeneticInterval, InheritanceFilter, IntervalFilter, KnownVariantFilter,
    PathogenicityFilter, PriorityScoreFilter, QualityFilter, VariantFilterKind,
};
use crate::inheritance::{InheritanceMaxFrequencies, ModeOfInheritance};
use crate::model::pedigree::Pedigree;
use crate::model::phenotype::{Organism, PhenotypeMatch};
use crate::pheno::matcher::PhenotypeMatcher;
use crate::pheno::phenix::{phenix_scorer, PhenixScorer, ScoreDistribution};
use crate::priority::{FixedScorePrioritiser, PhenixPrioritiser, PrioritiserKind, PriorityType};

/// Supporting code for `AnalysisConfig`.
pub(crate) mod analysis_config {
    /// Error type for `AnalysisConfig::build_analysis()`.
    #[derive(thiserror::Error, Debug, Clone, PartialEq)]
    pub enum Error {
        #[error("Invalid quality threshold: {0}")]
        Quality(#[from] super::quality_filter::Error),
        #[error("Invalid interval: {0}")]
        Interval(#[from] super::genetic_interval::Error),
        #[error("Invalid frequency threshold: {0}")]
        Frequency(#[from] super::frequency_filter::Error),
        #[error("Invalid pathogenicity cutoff: {0}")]
        Pathogenicity(#[from] super::pathogenicity_filter::Error),
        #[error("Invalid priority-score cutoff: {0}")]
        PriorityScore(#[from] super::priority_score_filter::Error),
        #[error("Invalid Phenix configuration: {0}")]
        Phenix(#[from] super::phenix_scorer::Error),
        #[error("Priority-score cutoff given but no prioritizer configured")]
        PriorityCutoffWithoutPrioritiser,
        #[error("Invalid analysis: {0}")]
        Analysis(#[from] crate::analysis::analysis::Error),
    }
}

/// Phenotype-related configuration: the query terms, the precomputed match
/// table, per-gene annotations, and the Phenix parameters.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PhenotypeConfig {
    /// The query phenotype term ids, e.g. `["HP:0000123"]`.
    pub query_terms: Vec<String>,
    /// Precomputed matches of query terms against the human term universe.
    pub matches: Vec<PhenotypeMatch>,
    /// Gene symbol to its annotated phenotype term ids.
    pub gene_phenotypes: IndexMap<String, Vec<String>>,
    /// Null-score distribution for the empirical p-value.
    pub score_distribution: Vec<f64>,
    /// Phenix normalization factor, must be positive.
    pub normalization_factor: f64,
}

impl Default for PhenotypeConfig {
    fn default() -> Self {
        Self {
            query_terms: Vec::new(),
            matches: Vec::new(),
            gene_phenotypes: IndexMap::new(),
            score_distribution: Vec::new(),
            normalization_factor: 1.0,
        }
    }
}

/// The serialized analysis configuration; see the option table in the
/// documentation for the effect of each field.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Mode of inheritance to constrain the analysis to.
    pub mode_of_inheritance: ModeOfInheritance,
    /// Minimal call quality; enables the quality filter.
    pub quality_threshold: Option<f64>,
    /// Intervals as `"CHROM:START-END"`; enables the interval filter.
    pub intervals: Vec<String>,
    /// Maximal population frequency in percent; enables the frequency
    /// filter.
    pub frequency_threshold: Option<f32>,
    /// Fail variants represented in any population database.
    pub fail_if_known_variant: bool,
    /// Minimal pathogenicity prediction score; enables the pathogenicity
    /// filter.
    pub pathogenicity_cutoff: Option<f32>,
    /// Fail benign effects in the pathogenicity filter.
    pub remove_benign_variants: bool,
    /// Externally precomputed per-gene scores; enables the fixed-score
    /// prioritizer.
    pub gene_scores: Option<IndexMap<String, f64>>,
    /// Phenotype configuration; enables the Phenix prioritizer.
    pub phenotype: Option<PhenotypeConfig>,
    /// Minimal prioritizer score; enables the priority-score filter on the
    /// last configured prioritizer.
    pub priority_score_cutoff: Option<f64>,
    /// Variant count from which on genes are down-weighted.
    pub downweight_variant_count_threshold: Option<usize>,
    /// Uniform override of the inheritance-engine frequency ceilings.
    pub inheritance_max_freq: Option<f32>,
}

impl AnalysisConfig {
    /// Build the step sequence and analysis parameters.
    pub fn build_analysis(&self, pedigree: Pedigree) -> Result<Analysis, analysis_config::Error> {
        let mut builder = Analysis::builder()
            .mode_of_inheritance(self.mode_of_inheritance)
            .pedigree(pedigree);

        if let Some(threshold) = self.quality_threshold {
            builder = builder.add_step(AnalysisStep::VariantFilter(VariantFilterKind::Quality(
                QualityFilter::new(threshold)?,
            )));
        }
        if !self.intervals.is_empty() {
            let intervals = self
                .intervals
                .iter()
                .map(|s| s.parse::<GeneticInterval>())
                .collect::<Result<Vec<_>, _>>()?;
            builder = builder.add_step(AnalysisStep::VariantFilter(VariantFilterKind::Interval(
                IntervalFilter::with_intervals(intervals),
            )));
        }
        match (self.frequency_threshold, self.fail_if_known_variant) {
            (Some(threshold), strict) => {
                builder = builder.add_step(AnalysisStep::VariantFilter(
                    VariantFilterKind::Frequency(FrequencyFilter::new(threshold, strict)?),
                ));
            }
            (None, true) => {
                builder = builder.add_step(AnalysisStep::VariantFilter(
                    VariantFilterKind::KnownVariant(KnownVariantFilter::new()),
                ));
            }
            (None, false) => {}
        }
        if let Some(cutoff) = self.pathogenicity_cutoff {
            builder = builder.add_step(AnalysisStep::VariantFilter(
                VariantFilterKind::Pathogenicity(PathogenicityFilter::new(
                    cutoff,
                    self.remove_benign_variants,
                )?),
            ));
        }

        let mut last_priority_type = None;
        if let Some(phenotype) = &self.phenotype {
            let matcher = PhenotypeMatcher::new(
                Organism::Human,
                &phenotype.query_terms,
                phenotype.matches.clone(),
            );
            let scorer = PhenixScorer::new(
                ScoreDistribution::new(phenotype.score_distribution.clone()),
                phenotype.normalization_factor,
            )?;
            builder = builder.add_step(AnalysisStep::Prioritiser(PrioritiserKind::Phenix(
                PhenixPrioritiser::new(matcher, scorer, phenotype.gene_phenotypes.clone()),
            )));
            last_priority_type = Some(PriorityType::Phenix);
        }
        if let Some(gene_scores) = &self.gene_scores {
            builder = builder.add_step(AnalysisStep::Prioritiser(PrioritiserKind::Fixed(
                FixedScorePrioritiser::new(
                    PriorityType::FixedScore,
                    gene_scores
                        .iter()
                        .map(|(k, v)| (k.clone(), *v))
                        .collect(),
                ),
            )));
            last_priority_type = Some(PriorityType::FixedScore);
        }
        if let Some(cutoff) = self.priority_score_cutoff {
            let priority_type = last_priority_type
                .ok_or(analysis_config::Error::PriorityCutoffWithoutPrioritiser)?;
            builder = builder.add_step(AnalysisStep::GeneFilter(GeneFilterKind::PriorityScore(
                PriorityScoreFilter::new(priority_type, cutoff)?,
            )));
        }

        if self.mode_of_inheritance != ModeOfInheritance::Any {
            builder = builder.add_step(AnalysisStep::InheritanceFilter(InheritanceFilter::new(
                self.mode_of_inheritance,
            )));
        }
        if let Some(max_freq) = self.inheritance_max_freq {
            builder =
                builder.inheritance_max_frequencies(InheritanceMaxFrequencies::uniform(max_freq));
        }
        if let Some(threshold) = self.downweight_variant_count_threshold {
            builder = builder.downweight_threshold(threshold);
        }

        Ok(builder.build()?)
    }
}
