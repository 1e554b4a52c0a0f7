//! Prioritizer framework: per-gene scoring strategies attaching typed
//! relevance scores.
//!
//! A prioritizer consumes the complete set of genes after variant
//! filtering and attaches exactly one result per gene; genes unknown to a
//! prioritizer get its sentinel default score so that every gene carries a
//! result of every prioritizer that ran.

pub mod fixed;
pub mod hiphive;
pub mod omim;
pub mod phenix;
pub mod walker;

pub use fixed::FixedScorePrioritiser;
pub use hiphive::HiphivePrioritiser;
pub use omim::OmimPrioritiser;
pub use phenix::PhenixPrioritiser;
pub use walker::ExomeWalkerPrioritiser;

use crate::model::gene::Gene;

/// Identifies the kind of a prioritizer; one entry per concrete strategy.
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
pub enum PriorityType {
    /// OMIM disease-gene association.
    Omim,
    /// Phenix semantic similarity with empirical p-value.
    Phenix,
    /// Cross-species Phenodigm (hiPHIVE) similarity.
    Hiphive,
    /// Random-walk-with-restart over a protein interaction network.
    ExomeWalker,
    /// Fixed gene-to-score mapping (deterministic test fixture).
    FixedScore,
}

/// The result a prioritizer attaches to a gene.
///
/// The meaning of the score is defined by the priority type; scores of
/// different types are not comparable.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PriorityResult {
    /// The prioritizer that produced the result.
    pub priority_type: PriorityType,
    /// The relevance score.
    pub score: f64,
    /// Optional named sub-scores, in attachment order.
    pub sub_scores: indexmap::IndexMap<String, f64>,
}

impl PriorityResult {
    /// Construct a result without sub-scores.
    pub fn new(priority_type: PriorityType, score: f64) -> Self {
        Self {
            priority_type,
            score,
            sub_scores: indexmap::IndexMap::new(),
        }
    }

    /// Attach a named sub-score.
    pub fn with_sub_score(mut self, name: &str, score: f64) -> Self {
        self.sub_scores.insert(name.to_string(), score);
        self
    }
}

/// The closed set of prioritizers.
#[derive(Debug, Clone, PartialEq)]
pub enum PrioritiserKind {
    /// See [`OmimPrioritiser`].
    Omim(OmimPrioritiser),
    /// See [`PhenixPrioritiser`].
    Phenix(PhenixPrioritiser),
    /// See [`HiphivePrioritiser`].
    Hiphive(HiphivePrioritiser),
    /// See [`ExomeWalkerPrioritiser`].
    ExomeWalker(ExomeWalkerPrioritiser),
    /// See [`FixedScorePrioritiser`].
    Fixed(FixedScorePrioritiser),
}

impl PrioritiserKind {
    /// The priority type of the wrapped prioritizer.
    pub fn priority_type(&self) -> PriorityType {
        match self {
            PrioritiserKind::Omim(_) => PriorityType::Omim,
            PrioritiserKind::Phenix(_) => PriorityType::Phenix,
            PrioritiserKind::Hiphive(_) => PriorityType::Hiphive,
            PrioritiserKind::ExomeWalker(_) => PriorityType::ExomeWalker,
            PrioritiserKind::Fixed(p) => p.priority_type(),
        }
    }

    /// Attach a result to every gene.
    pub fn prioritise(&self, genes: &mut [Gene]) {
        match self {
            PrioritiserKind::Omim(p) => p.prioritise(genes),
            PrioritiserKind::Phenix(p) => p.prioritise(genes),
            PrioritiserKind::Hiphive(p) => p.prioritise(genes),
            PrioritiserKind::ExomeWalker(p) => p.prioritise(genes),
            PrioritiserKind::Fixed(p) => p.prioritise(genes),
        }
    }
}
