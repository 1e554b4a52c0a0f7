//! Pathogenicity-prediction filter.

use crate::model::variant::{PathogenicityClass, VariantEvaluation};

/// Supporting code for `PathogenicityFilter`.
pub(crate) mod pathogenicity_filter {
    /// Error type for `PathogenicityFilter::new()`.
    #[derive(thiserror::Error, Debug, Clone, PartialEq)]
    pub enum Error {
        #[error("Pathogenicity cutoff must be in [0, 1], got {0}")]
        CutoffOutOfRange(f32),
    }
}

/// Passes variants predicted to be deleterious.
///
/// Disruptive effects (splice donor/acceptor, stop gain, frameshift) pass
/// regardless of prediction scores; missense-equivalent effects are gated
/// on the maximal prediction component; benign effects fail only when
/// `remove_benign` is set.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PathogenicityFilter {
    /// Minimal prediction score for missense-equivalent effects.
    cutoff: f32,
    /// Whether benign effects fail (pathogenicity-only mode).
    remove_benign: bool,
}

impl PathogenicityFilter {
    /// Construct with the given cutoff (must be in `[0, 1]`).
    pub fn new(cutoff: f32, remove_benign: bool) -> Result<Self, pathogenicity_filter::Error> {
        if !(0.0..=1.0).contains(&cutoff) {
            return Err(pathogenicity_filter::Error::CutoffOutOfRange(cutoff));
        }
        Ok(Self {
            cutoff,
            remove_benign,
        })
    }

    /// Whether the variant passes.
    pub fn passes(&self, variant: &VariantEvaluation) -> bool {
        match variant.variant_effect.pathogenicity_class() {
            PathogenicityClass::Disruptive => true,
            PathogenicityClass::MissenseEquivalent => {
                let score = variant
                    .pathogenicity_data
                    .as_ref()
                    .map(|d| d.predicted_score())
                    .unwrap_or(0.0);
                score >= self.cutoff
            }
            PathogenicityClass::Benign => !self.remove_benign,
        }
    }
}
