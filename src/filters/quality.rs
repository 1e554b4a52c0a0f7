//! Call-quality filter.

use crate::model::variant::VariantEvaluation;

/// Supporting code for `QualityFilter`.
pub(crate) mod quality_filter {
    /// Error type for `QualityFilter::new()`.
    #[derive(thiserror::Error, Debug, Clone, PartialEq)]
    pub enum Error {
        #[error("Quality threshold must be non-negative, got {0}")]
        NegativeThreshold(f64),
    }
}

/// Passes variants whose call quality reaches the threshold.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct QualityFilter {
    /// Minimal call quality to pass.
    min_quality: f64,
}

impl QualityFilter {
    /// Construct with the given threshold; must be `>= 0`.
    pub fn new(min_quality: f64) -> Result<Self, quality_filter::Error> {
        if min_quality < 0.0 {
            return Err(quality_filter::Error::NegativeThreshold(min_quality));
        }
        Ok(Self { min_quality })
    }

    /// Whether the variant passes.
    pub fn passes(&self, variant: &VariantEvaluation) -> bool {
        variant.quality >= self.min_quality
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn new_rejects_negative_threshold() {
        assert_eq!(
            QualityFilter::new(-1.0),
            Err(quality_filter::Error::NegativeThreshold(-1.0))
        );
    }

    #[rstest]
    #[case(30.0, 29.9, false)]
    #[case(30.0, 30.0, true)]
    #[case(30.0, 1000.0, true)]
    #[case(0.0, 0.0, true)]
    #[case(9_999_999.0, 2500.0, false)]
    fn passes(#[case] threshold: f64, #[case] quality: f64, #[case] expected: bool) {
        let filter = QualityFilter::new(threshold).unwrap();
        let variant = VariantEvaluation {
            quality,
            ..Default::default()
        };
        assert_eq!(filter.passes(&variant), expected);
    }
}
