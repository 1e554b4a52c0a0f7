//! Data-access contracts for population frequencies and pathogenicity
//! predictions.
//!
//! The analysis pipeline never talks to a database itself; it consumes the
//! narrow lookup interfaces defined here. Implementations are read-only and
//! may be shared between concurrently running analyses.

use crate::model::variant::VariantEffect;

/// Population database that contributed a frequency record.
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
pub enum FrequencySource {
    /// 1000 Genomes Project.
    ThousandGenomes,
    /// NHLBI-ESP, all samples.
    EspAll,
    /// NHLBI-ESP, African-American samples.
    EspAfricanAmerican,
    /// NHLBI-ESP, European-American samples.
    EspEuropeanAmerican,
    /// ExAC, all samples.
    ExacAll,
    /// gnomAD exomes.
    GnomadExomes,
    /// gnomAD genomes.
    GnomadGenomes,
    /// Site-local database.
    Local,
}

/// A single minor-allele frequency observation, as percentage in `[0, 100]`.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Frequency {
    /// The database the frequency was observed in.
    pub source: FrequencySource,
    /// Minor allele frequency as a percentage.
    pub frequency: f32,
}

impl Frequency {
    /// Construct from source and percentage value.
    pub fn new(source: FrequencySource, frequency: f32) -> Self {
        Self { source, frequency }
    }
}

/// Population-frequency annotations for one variant.
///
/// A variant that was looked up but is absent from all databases carries a
/// `FrequencyData` with no records; a variant that was never queried carries
/// no `FrequencyData` at all.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrequencyData {
    /// dbSNP identifier, if any.
    pub rs_id: Option<String>,
    /// The per-source frequency records.
    pub frequencies: Vec<Frequency>,
}

impl FrequencyData {
    /// Construct with the given records and no dbSNP id.
    pub fn new(frequencies: Vec<Frequency>) -> Self {
        Self {
            rs_id: None,
            frequencies,
        }
    }

    /// The highest minor-allele frequency over all sources, `0.0` if there
    /// are no records.
    pub fn max_freq(&self) -> f32 {
        self.frequencies
            .iter()
            .map(|f| f.frequency)
            .fold(0f32, f32::max)
    }

    /// Whether any database knows this variant.
    pub fn is_represented_in_database(&self) -> bool {
        self.rs_id.is_some() || !self.frequencies.is_empty()
    }
}

/// Pathogenicity predictions for one variant.
///
/// All component scores live on their native scales; `predicted_score`
/// folds them onto `[0, 1]`.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PathogenicityData {
    /// PolyPhen-2 score in `[0, 1]`, higher is more pathogenic.
    pub polyphen: Option<f32>,
    /// SIFT score in `[0, 1]`, lower is more pathogenic.
    pub sift: Option<f32>,
    /// MutationTaster score in `[0, 1]`, higher is more pathogenic.
    pub mutation_taster: Option<f32>,
    /// CADD score rescaled to `[0, 1]`, higher is more pathogenic.
    pub cadd_scaled: Option<f32>,
}

impl PathogenicityData {
    /// The maximal pathogenicity component with SIFT inverted, clamped to
    /// `[0, 1]`. Returns `0.0` when no component is present.
    pub fn predicted_score(&self) -> f32 {
        let components = [
            self.polyphen,
            self.sift.map(|s| 1.0 - s),
            self.mutation_taster,
            self.cadd_scaled,
        ];
        components
            .iter()
            .flatten()
            .fold(0f32, |acc, &s| acc.max(s))
            .clamp(0.0, 1.0)
    }
}

/// Lookup contract for population frequencies.
pub trait FrequencyDao: Sync {
    /// Query frequency data for the given variant description.
    ///
    /// `None` means the provider could not answer; per error policy the
    /// variant is then treated as carrying no data.
    fn frequency_data(
        &self,
        chromosome: u8,
        position: i32,
        reference: &str,
        alternative: &str,
    ) -> Option<FrequencyData>;
}

/// Lookup contract for pathogenicity predictions.
pub trait PathogenicityDao: Sync {
    /// Query pathogenicity data for the given variant description.
    fn pathogenicity_data(
        &self,
        chromosome: u8,
        position: i32,
        reference: &str,
        alternative: &str,
        variant_effect: VariantEffect,
    ) -> Option<PathogenicityData>;
}

/// Attach provider data to a variant that does not have it yet.
///
/// An unavailable provider result leaves the corresponding slot empty, which
/// downstream filters interpret per their no-data policy.
pub fn attach_variant_data(
    variant: &mut crate::model::variant::VariantEvaluation,
    frequency_dao: &dyn FrequencyDao,
    pathogenicity_dao: &dyn PathogenicityDao,
) {
    if variant.frequency_data.is_none() {
        variant.frequency_data = frequency_dao.frequency_data(
            variant.chromosome,
            variant.position,
            &variant.reference,
            &variant.alternative,
        );
    }
    if variant.pathogenicity_data.is_none() {
        variant.pathogenicity_data = pathogenicity_dao.pathogenicity_data(
            variant.chromosome,
            variant.position,
            &variant.reference,
            &variant.alternative,
            variant.variant_effect,
        );
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn frequency_data_max_freq_empty() {
        assert_eq!(FrequencyData::default().max_freq(), 0.0);
    }

    #[test]
    fn frequency_data_max_freq_takes_maximum() {
        let data = FrequencyData::new(vec![
            Frequency::new(FrequencySource::ThousandGenomes, 0.01),
            Frequency::new(FrequencySource::GnomadExomes, 0.5),
            Frequency::new(FrequencySource::EspAll, 0.02),
        ]);
        assert_eq!(data.max_freq(), 0.5);
    }

    #[test]
    fn frequency_data_representation() {
        assert!(!FrequencyData::default().is_represented_in_database());
        assert!(FrequencyData::new(vec![Frequency::new(
            FrequencySource::ExacAll,
            0.1
        )])
        .is_represented_in_database());
        let rs_only = FrequencyData {
            rs_id: Some(String::from("rs12345")),
            frequencies: vec![],
        };
        assert!(rs_only.is_represented_in_database());
    }

    #[rstest]
    #[case(None, None, None, None, 0.0)]
    #[case(Some(0.9), None, None, None, 0.9)]
    #[case(None, Some(0.1), None, None, 0.9)]
    #[case(None, None, Some(0.7), None, 0.7)]
    #[case(None, None, None, Some(0.8), 0.8)]
    #[case(Some(0.3), Some(0.9), Some(0.2), Some(0.4), 0.4)]
    #[case(Some(2.0), None, None, None, 1.0)]
    fn pathogenicity_predicted_score(
        #[case] polyphen: Option<f32>,
        #[case] sift: Option<f32>,
        #[case] mutation_taster: Option<f32>,
        #[case] cadd_scaled: Option<f32>,
        #[case] expected: f32,
    ) {
        let data = PathogenicityData {
            polyphen,
            sift,
            mutation_taster,
            cadd_scaled,
        };
        assert!((data.predicted_score() - expected).abs() < 1e-6);
    }
}
