//! Genomic-interval filter.

use std::str::FromStr;

use crate::common::chromosome_number;
use crate::model::variant::VariantEvaluation;

/// Supporting code for `GeneticInterval`.
pub(crate) mod genetic_interval {
    use std::num::ParseIntError;

    /// Error type for `GeneticInterval::from_str()`.
    #[derive(thiserror::Error, Debug, Clone, PartialEq)]
    pub enum Error {
        #[error("Invalid format in interval, expected CHROM:START-END")]
        InvalidFormat,
        #[error("Invalid integer coordinates in interval")]
        InvalidInts(#[from] ParseIntError),
        #[error("Unknown chromosome in interval: {0}")]
        UnknownChromosome(String),
        #[error("Interval end {end} lies before start {start}")]
        EndBeforeStart { start: i32, end: i32 },
    }
}

/// A chromosomal interval with inclusive start and end.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct GeneticInterval {
    /// Chromosome number.
    pub chromosome: u8,
    /// 1-based inclusive start.
    pub start: i32,
    /// 1-based inclusive end.
    pub end: i32,
}

impl GeneticInterval {
    /// Construct from chromosome and inclusive coordinates.
    pub fn new(chromosome: u8, start: i32, end: i32) -> Result<Self, genetic_interval::Error> {
        if end < start {
            return Err(genetic_interval::Error::EndBeforeStart { start, end });
        }
        Ok(Self {
            chromosome,
            start,
            end,
        })
    }

    /// Whether the interval contains the given position.
    pub fn contains(&self, chromosome: u8, position: i32) -> bool {
        self.chromosome == chromosome && self.start <= position && position <= self.end
    }
}

impl FromStr for GeneticInterval {
    type Err = genetic_interval::Error;

    /// Parse an interval from `"CHROM:START-END"`, e.g.
    /// `"chr1:145508800-145508800"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (chrom, range) = s
            .split_once(':')
            .ok_or(genetic_interval::Error::InvalidFormat)?;
        let (start, end) = range
            .split_once('-')
            .ok_or(genetic_interval::Error::InvalidFormat)?;
        let chromosome = chromosome_number(chrom)
            .ok_or_else(|| genetic_interval::Error::UnknownChromosome(chrom.to_string()))?;
        Self::new(
            chromosome,
            start.replace(',', "").parse()?,
            end.replace(',', "").parse()?,
        )
    }
}

/// Passes variants lying inside any of the configured intervals.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IntervalFilter {
    /// The intervals to keep.
    intervals: Vec<GeneticInterval>,
}

impl IntervalFilter {
    /// Construct from a single interval.
    pub fn new(interval: GeneticInterval) -> Self {
        Self {
            intervals: vec![interval],
        }
    }

    /// Construct from multiple intervals.
    pub fn with_intervals(intervals: Vec<GeneticInterval>) -> Self {
        Self { intervals }
    }

    /// Whether the variant lies in any interval.
    pub fn passes(&self, variant: &VariantEvaluation) -> bool {
        self.intervals
            .iter()
            .any(|i| i.contains(variant.chromosome, variant.position))
    }
}
