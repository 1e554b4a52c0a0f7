//! Known-variant filter.

use crate::model::variant::VariantEvaluation;

/// Passes variants not represented in any population database.
///
/// Unlike the strict mode of the frequency filter this gate carries no
/// frequency threshold and treats an unqueried variant as unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct KnownVariantFilter;

impl KnownVariantFilter {
    /// Construct the filter.
    pub fn new() -> Self {
        Self
    }

    /// Whether the variant passes.
    pub fn passes(&self, variant: &VariantEvaluation) -> bool {
        variant
            .frequency_data
            .as_ref()
            .map(|data| !data.is_represented_in_database())
            .unwrap_or(true)
    }
}
