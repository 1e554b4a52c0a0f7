//! Population-frequency filter.

use crate::model::variant::VariantEvaluation;

/// Supporting code for `FrequencyFilter`.
pub(crate) mod frequency_filter {
    /// Error type for `FrequencyFilter::new()`.
    #[derive(thiserror::Error, Debug, Clone, PartialEq)]
    pub enum Error {
        #[error("Frequency threshold must be in [0, 100], got {0}")]
        ThresholdOutOfRange(f32),
    }
}

/// Passes variants rare enough in the population databases.
///
/// In the strict mode (`fail_if_represented`) any variant known to a
/// database fails, and so does a variant that was never looked up: in a
/// context requiring knownness information, an unqueried variant cannot be
/// vouched for.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrequencyFilter {
    /// Maximal minor-allele frequency (percent) to pass.
    max_freq: f32,
    /// Whether presence in any database is already a failure.
    fail_if_represented: bool,
}

impl FrequencyFilter {
    /// Construct with the given threshold (percent, must be in `[0, 100]`).
    pub fn new(max_freq: f32, fail_if_represented: bool) -> Result<Self, frequency_filter::Error> {
        if !(0.0..=100.0).contains(&max_freq) {
            return Err(frequency_filter::Error::ThresholdOutOfRange(max_freq));
        }
        Ok(Self {
            max_freq,
            fail_if_represented,
        })
    }

    /// Whether the variant passes.
    pub fn passes(&self, variant: &VariantEvaluation) -> bool {
        match variant.frequency_data.as_ref() {
            None => !self.fail_if_represented,
            Some(data) => {
                if self.fail_if_represented && data.is_represented_in_database() {
                    false
                } else {
                    data.max_freq() <= self.max_freq
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::dao::{Frequency, FrequencyData, FrequencySource};

    const FREQ_THRESHOLD: f32 = 0.1;
    const PASS_FREQ: f32 = FREQ_THRESHOLD - 0.02;
    const FAIL_FREQ: f32 = FREQ_THRESHOLD + 1.0;

    fn variant_with_freq(frequency: Option<f32>) -> VariantEvaluation {
        VariantEvaluation {
            frequency_data: frequency.map(|f| {
                FrequencyData::new(vec![Frequency::new(FrequencySource::EspAll, f)])
            }),
            ..Default::default()
        }
    }

    #[rstest]
    #[case(-1.0)]
    #[case(101.0)]
    fn new_rejects_out_of_range_thresholds(#[case] threshold: f32) {
        assert_eq!(
            FrequencyFilter::new(threshold, false),
            Err(frequency_filter::Error::ThresholdOutOfRange(threshold))
        );
    }

    #[rstest]
    // non-strict: pass under threshold, fail over, no data passes
    #[case(PASS_FREQ, false, Some(PASS_FREQ), true)]
    #[case(FREQ_THRESHOLD, false, Some(FREQ_THRESHOLD), true)]
    #[case(FREQ_THRESHOLD, false, Some(FAIL_FREQ), false)]
    #[case(FREQ_THRESHOLD, false, None, true)]
    // strict: represented fails even when rare, unqueried fails too
    #[case(FREQ_THRESHOLD, true, Some(PASS_FREQ), false)]
    #[case(FREQ_THRESHOLD, true, None, false)]
    fn passes(
        #[case] threshold: f32,
        #[case] fail_if_represented: bool,
        #[case] variant_freq: Option<f32>,
        #[case] expected: bool,
    ) {
        let filter = FrequencyFilter::new(threshold, fail_if_represented).unwrap();
        assert_eq!(filter.passes(&variant_with_freq(variant_freq)), expected);
    }

    #[test]
    fn strict_mode_passes_queried_but_unrepresented_variant() {
        let filter = FrequencyFilter::new(FREQ_THRESHOLD, true).unwrap();
        let variant = VariantEvaluation {
            frequency_data: Some(FrequencyData::default()),
            ..Default::default()
        };
        assert!(filter.passes(&variant));
    }

    #[test]
    fn zero_threshold_passes_only_unrepresented_variants() {
        let filter = FrequencyFilter::new(0.0, false).unwrap();
        assert!(filter.passes(&variant_with_freq(None)));
        assert!(!filter.passes(&variant_with_freq(Some(0.001))));
    }
}
