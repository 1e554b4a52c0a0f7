//! Regulatory-feature filter.

use crate::model::variant::{VariantEffect, VariantEvaluation};

/// Drops distal non-coding variants unless they hit a regulatory region.
///
/// Intergenic and upstream variants fail; everything else, including
/// annotated regulatory-region variants, passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegulatoryFeatureFilter;

impl RegulatoryFeatureFilter {
    /// Construct the filter.
    pub fn new() -> Self {
        Self
    }

    /// Whether the variant passes.
    pub fn passes(&self, variant: &VariantEvaluation) -> bool {
        !matches!(
            variant.variant_effect,
            VariantEffect::Intergenic | VariantEffect::Upstream
        )
    }
}
