//! The analysis: an ordered sequence of filter/prioritizer steps plus the
//! run-wide parameters, and the `analyze run` sub command driving it.

pub mod config;
pub mod ranking;
pub mod runner;

use std::time::Instant;

use clap::Parser;

use crate::filters::{GeneFilterKind, InheritanceFilter, VariantFilterKind};
use crate::inheritance::{InheritanceMaxFrequencies, ModeOfInheritance};
use crate::model::gene::Gene;
use crate::model::pedigree::{Individual, Pedigree};
use crate::model::variant::VariantEvaluation;
use crate::priority::PrioritiserKind;
use runner::{AnalysisRunner, AnalysisStrategy};

/// One step of an analysis: a filter or a prioritizer.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisStep {
    /// A variant-level filter.
    VariantFilter(VariantFilterKind),
    /// A gene-level filter.
    GeneFilter(GeneFilterKind),
    /// The inheritance-mode filter; always rescheduled last by the runner.
    InheritanceFilter(InheritanceFilter),
    /// A prioritizer; scheduled like a gene-level filter.
    Prioritiser(PrioritiserKind),
}

/// Supporting code for `Analysis`.
pub(crate) mod analysis {
    /// Error type for `AnalysisBuilder::build()`.
    #[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
    pub enum Error {
        #[error("Down-weight variant count threshold must be at least 1")]
        InvalidDownweightThreshold,
    }
}

/// An ordered sequence of steps plus the run-wide parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    steps: Vec<AnalysisStep>,
    mode_of_inheritance: ModeOfInheritance,
    pedigree: Pedigree,
    inheritance_max_frequencies: InheritanceMaxFrequencies,
    downweight_threshold: Option<usize>,
}

impl Analysis {
    /// Start building an analysis.
    pub fn builder() -> AnalysisBuilder {
        AnalysisBuilder::default()
    }

    /// The declared steps, in order.
    pub fn steps(&self) -> &[AnalysisStep] {
        &self.steps
    }

    /// The mode of inheritance the analysis is constrained to.
    pub fn mode_of_inheritance(&self) -> ModeOfInheritance {
        self.mode_of_inheritance
    }

    /// The pedigree of the analyzed samples.
    pub fn pedigree(&self) -> &Pedigree {
        &self.pedigree
    }

    /// The per-sub-mode frequency ceilings of the inheritance engine.
    pub fn inheritance_max_frequencies(&self) -> &InheritanceMaxFrequencies {
        &self.inheritance_max_frequencies
    }

    /// The variant-count threshold for gene down-weighting, if enabled.
    pub fn downweight_threshold(&self) -> Option<usize> {
        self.downweight_threshold
    }
}

/// Builder for [`Analysis`].
#[derive(Debug, Clone, Default)]
pub struct AnalysisBuilder {
    steps: Vec<AnalysisStep>,
    mode_of_inheritance: ModeOfInheritance,
    pedigree: Option<Pedigree>,
    inheritance_max_frequencies: Option<InheritanceMaxFrequencies>,
    downweight_threshold: Option<usize>,
}

impl AnalysisBuilder {
    /// Append a step.
    pub fn add_step(mut self, step: AnalysisStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Constrain the analysis to the given mode of inheritance.
    pub fn mode_of_inheritance(mut self, mode: ModeOfInheritance) -> Self {
        self.mode_of_inheritance = mode;
        self
    }

    /// Set the pedigree; defaults to a single affected sample named
    /// `"proband"`.
    pub fn pedigree(mut self, pedigree: Pedigree) -> Self {
        self.pedigree = Some(pedigree);
        self
    }

    /// Override the inheritance-engine frequency ceilings.
    pub fn inheritance_max_frequencies(mut self, max_freqs: InheritanceMaxFrequencies) -> Self {
        self.inheritance_max_frequencies = Some(max_freqs);
        self
    }

    /// Enable down-weighting of genes with at least `threshold` variants.
    pub fn downweight_threshold(mut self, threshold: usize) -> Self {
        self.downweight_threshold = Some(threshold);
        self
    }

    /// Build the analysis, validating the configuration.
    pub fn build(self) -> Result<Analysis, analysis::Error> {
        if self.downweight_threshold == Some(0) {
            return Err(analysis::Error::InvalidDownweightThreshold);
        }
        Ok(Analysis {
            steps: self.steps,
            mode_of_inheritance: self.mode_of_inheritance,
            pedigree: self
                .pedigree
                .unwrap_or_else(|| Pedigree::single_affected_sample("proband")),
            inheritance_max_frequencies: self
                .inheritance_max_frequencies
                .unwrap_or_default(),
            downweight_threshold: self.downweight_threshold,
        })
    }
}

/// The ranked outcome of one analysis run.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnalysisResults {
    genes: Vec<Gene>,
}

impl AnalysisResults {
    /// Construct from ranked genes.
    pub fn new(genes: Vec<Gene>) -> Self {
        Self { genes }
    }

    /// All genes, ranked by combined score.
    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    /// The genes that passed filtering, in rank order.
    pub fn passed_genes(&self) -> Vec<&Gene> {
        self.genes.iter().filter(|g| g.passed_filters()).collect()
    }
}

/// Command line arguments for `analyze run` sub command.
#[derive(Parser, Debug)]
#[command(author, version, about = "Run a variant prioritization analysis", long_about = None)]
pub struct Args {
    /// Path to the analysis configuration JSON file.
    #[arg(long, required = true)]
    pub path_config_json: String,
    /// Path to the pedigree JSON file (list of individuals); defaults to a
    /// single affected sample taken from the variants.
    #[arg(long)]
    pub path_pedigree_json: Option<String>,
    /// Path to the annotated variants JSONL file.
    #[arg(long, required = true)]
    pub path_variants_jsonl: String,
    /// Path to the output JSON file.
    #[arg(long, required = true)]
    pub path_output_json: String,

    /// Execution strategy to use.
    #[arg(long, value_enum, default_value_t = AnalysisStrategy::Simple)]
    pub strategy: AnalysisStrategy,
    /// Optional maximal number of genes to write out.
    #[arg(long)]
    pub max_genes: Option<usize>,
}

/// Main entry point for `analyze run` sub command.
pub fn run(args_common: &crate::common::Args, args: &Args) -> Result<(), anyhow::Error> {
    let before_anything = Instant::now();
    tracing::info!("args_common = {:?}", &args_common);
    tracing::info!("args = {:?}", &args);

    tracing::info!("Loading analysis configuration...");
    let config: config::AnalysisConfig =
        serde_json::from_reader(std::fs::File::open(&args.path_config_json)?)?;
    tracing::info!(
        "... done loading configuration = {}",
        &serde_json::to_string(&config)?
    );

    tracing::info!("Loading variants...");
    let before_loading = Instant::now();
    let variants: Vec<VariantEvaluation> =
        serde_jsonlines::json_lines(&args.path_variants_jsonl)?
            .collect::<std::io::Result<Vec<_>>>()?;
    tracing::info!(
        "... done loading {} variants in {:?}",
        variants.len(),
        before_loading.elapsed()
    );

    let pedigree = match &args.path_pedigree_json {
        Some(path) => {
            let individuals: Vec<Individual> =
                serde_json::from_reader(std::fs::File::open(path)?)?;
            Pedigree::new(individuals)?
        }
        None => {
            let sample = variants
                .iter()
                .flat_map(|v| v.sample_genotypes.keys())
                .next()
                .cloned()
                .unwrap_or_else(|| String::from("proband"));
            tracing::info!("no pedigree given, assuming affected singleton {}", &sample);
            Pedigree::single_affected_sample(&sample)
        }
    };

    let analysis = config.build_analysis(pedigree)?;

    tracing::info!("Running analysis...");
    let before_analysis = Instant::now();
    let results = AnalysisRunner::new(args.strategy).run(&analysis, variants)?;
    tracing::info!(
        "... done running analysis in {:?}",
        before_analysis.elapsed()
    );

    tracing::info!("Writing results...");
    let genes = match args.max_genes {
        Some(max_genes) => &results.genes()[..std::cmp::min(max_genes, results.genes().len())],
        None => results.genes(),
    };
    let file = std::fs::File::create(&args.path_output_json)?;
    serde_json::to_writer_pretty(file, genes)?;

    tracing::info!(
        "All of `analyze run` completed in {:?}",
        before_anything.elapsed()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn builder_rejects_zero_downweight_threshold() {
        let result = Analysis::builder().downweight_threshold(0).build();
        assert_eq!(result, Err(analysis::Error::InvalidDownweightThreshold));
    }

    #[test]
    fn builder_defaults() {
        let built = Analysis::builder().build().unwrap();
        assert_eq!(built.mode_of_inheritance(), ModeOfInheritance::Any);
        assert!(built.pedigree().contains("proband"));
        assert_eq!(built.downweight_threshold(), None);
        assert!(built.steps().is_empty());
    }

    #[tracing_test::traced_test]
    #[test]
    fn smoke_test() -> Result<(), anyhow::Error> {
        let tmpdir = temp_testdir::TempDir::default();
        let base = tmpdir.to_string_lossy();
        let path_config = format!("{}/config.json", base);
        let path_variants = format!("{}/variants.jsonl", base);
        let path_output = format!("{}/out.json", base);

        std::fs::write(
            &path_config,
            r#"{
                "quality_threshold": 120.0,
                "gene_scores": {"RBM8A": 0.9, "GNRHR2": 0.1},
                "priority_score_cutoff": 0.8
            }"#,
        )?;
        let variants = [
            crate::model::variant::VariantEvaluation {
                chromosome: 1,
                position: 145_508_800,
                reference: String::from("A"),
                alternative: String::from("T"),
                quality: 2500.0,
                gene_symbol: String::from("RBM8A"),
                gene_id: String::from("HGNC:9939"),
                ..Default::default()
            },
            crate::model::variant::VariantEvaluation {
                chromosome: 2,
                position: 38_677_344,
                reference: String::from("C"),
                alternative: String::from("G"),
                quality: 20.0,
                gene_symbol: String::from("GNRHR2"),
                gene_id: String::from("HGNC:16915"),
                ..Default::default()
            },
        ];
        serde_jsonlines::write_json_lines(&path_variants, &variants)?;

        let args_common = Default::default();
        let args = super::Args {
            path_config_json: path_config,
            path_pedigree_json: None,
            path_variants_jsonl: path_variants,
            path_output_json: path_output.clone(),
            strategy: AnalysisStrategy::Simple,
            max_genes: None,
        };
        super::run(&args_common, &args)?;

        let written: Vec<Gene> =
            serde_json::from_reader(std::fs::File::open(&path_output)?)?;
        assert_eq!(written.len(), 2);
        assert_eq!(written[0].gene_symbol, "RBM8A");
        assert!(written[0].passed_filters());
        assert!(!written[1].passed_filters());

        Ok(())
    }
}
