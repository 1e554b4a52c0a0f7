//! Common functionality.

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};

/// Commonly used command line arguments.
#[derive(Parser, Debug)]
pub struct Args {
    /// Verbosity of the program
    #[clap(flatten)]
    pub verbose: Verbosity<InfoLevel>,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            verbose: Verbosity::new(0, 0),
        }
    }
}

/// Chromosome number of the X chromosome.
pub const CHROM_X: u8 = 23;
/// Chromosome number of the Y chromosome.
pub const CHROM_Y: u8 = 24;
/// Chromosome number of the mitochondrial genome.
pub const CHROM_MT: u8 = 25;

/// Coarse classification of a chromosome by number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChromosomeType {
    /// Chromosomes 1..22.
    Autosomal,
    /// The X chromosome (number 23).
    XChromosomal,
    /// The Y chromosome (number 24).
    YChromosomal,
    /// The mitochondrial genome (number 25).
    Mitochondrial,
}

impl ChromosomeType {
    /// Classify the given chromosome number.
    pub fn from_chromosome(chromosome: u8) -> Self {
        match chromosome {
            CHROM_X => ChromosomeType::XChromosomal,
            CHROM_Y => ChromosomeType::YChromosomal,
            CHROM_MT => ChromosomeType::Mitochondrial,
            _ => ChromosomeType::Autosomal,
        }
    }
}

/// Convert a chromosome name such as `"chr1"`, `"X"`, or `"MT"` to its number.
///
/// Returns `None` for names outside of the canonical 1..25 set.
pub fn chromosome_number(name: &str) -> Option<u8> {
    let name = name.strip_prefix("chr").unwrap_or(name);
    match name.to_ascii_uppercase().as_str() {
        "X" => Some(CHROM_X),
        "Y" => Some(CHROM_Y),
        "M" | "MT" => Some(CHROM_MT),
        num => match num.parse::<u8>() {
            Ok(n) if (1..=22).contains(&n) => Some(n),
            _ => None,
        },
    }
}

/// Convert a chromosome number to its canonical name.
pub fn chromosome_name(chromosome: u8) -> String {
    match chromosome {
        CHROM_X => String::from("X"),
        CHROM_Y => String::from("Y"),
        CHROM_MT => String::from("MT"),
        n => format!("{}", n),
    }
}

/// The version of the `prioritizer-worker` package.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("1", Some(1))]
    #[case("chr1", Some(1))]
    #[case("22", Some(22))]
    #[case("X", Some(23))]
    #[case("chrX", Some(23))]
    #[case("x", Some(23))]
    #[case("Y", Some(24))]
    #[case("MT", Some(25))]
    #[case("chrM", Some(25))]
    #[case("23", None)]
    #[case("0", None)]
    #[case("HLA-A", None)]
    fn chromosome_number_(#[case] name: &str, #[case] expected: Option<u8>) {
        assert_eq!(chromosome_number(name), expected);
    }

    #[rstest]
    #[case(1, ChromosomeType::Autosomal)]
    #[case(22, ChromosomeType::Autosomal)]
    #[case(23, ChromosomeType::XChromosomal)]
    #[case(24, ChromosomeType::YChromosomal)]
    #[case(25, ChromosomeType::Mitochondrial)]
    fn chromosome_type_from_chromosome(#[case] chromosome: u8, #[case] expected: ChromosomeType) {
        assert_eq!(ChromosomeType::from_chromosome(chromosome), expected);
    }

    #[test]
    fn chromosome_name_roundtrip() {
        for chromosome in 1u8..=25 {
            assert_eq!(
                chromosome_number(&chromosome_name(chromosome)),
                Some(chromosome)
            );
        }
    }
}
