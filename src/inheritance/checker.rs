//! Pure genotype-compatibility predicates over `(pedigree, variant)`.
//!
//! Chromosome gating happens in the annotator; the predicates here only
//! look at genotypes, affected status, and (for the X rules) sex.
//! Individuals of unknown sex are checked with the diploid (female) rules.

use crate::model::pedigree::{Individual, Pedigree, Sex};
use crate::model::variant::{SampleGenotype, VariantEvaluation};

/// Compatible with autosomal-dominant inheritance: every affected member is
/// heterozygous or homozygous-alternate, every unaffected member is
/// homozygous-reference or no-call.
pub fn autosomal_dominant(pedigree: &Pedigree, variant: &VariantEvaluation) -> bool {
    pedigree.affected().all(|i| {
        let gt = variant.sample_genotype(&i.id);
        gt.is_het() || gt.is_hom_alt()
    }) && pedigree.unaffected().all(|i| {
        let gt = variant.sample_genotype(&i.id);
        gt.is_hom_ref() || gt.is_no_call()
    })
}

/// Compatible with homozygous autosomal-recessive inheritance: all affected
/// members homozygous-alternate, no unaffected member homozygous-alternate.
pub fn autosomal_recessive_hom_alt(pedigree: &Pedigree, variant: &VariantEvaluation) -> bool {
    pedigree
        .affected()
        .all(|i| variant.sample_genotype(&i.id).is_hom_alt())
        && pedigree
            .unaffected()
            .all(|i| !variant.sample_genotype(&i.id).is_hom_alt())
}

/// Compatible with compound-heterozygous autosomal-recessive inheritance:
/// every affected member heterozygous at both variants, and every
/// unaffected parent of an affected member heterozygous at exactly one of
/// the two.
pub fn autosomal_recessive_comp_het(
    pedigree: &Pedigree,
    first: &VariantEvaluation,
    second: &VariantEvaluation,
) -> bool {
    pedigree.affected().all(|i| {
        first.sample_genotype(&i.id).is_het() && second.sample_genotype(&i.id).is_het()
    }) && pedigree.unaffected_parents_of_affected().iter().all(|i| {
        let het_first = first.sample_genotype(&i.id).is_het();
        let het_second = second.sample_genotype(&i.id).is_het();
        het_first != het_second
    })
}

/// Whether the individual carries the alternate allele under hemizygous
/// handling: any alt call for males, the given diploid predicate otherwise.
fn carries_alt_hemizygous(individual: &Individual, gt: &SampleGenotype) -> bool {
    match individual.sex {
        Sex::Male => gt.has_alt() && !gt.is_no_call(),
        Sex::Female | Sex::Unknown => gt.is_hom_alt(),
    }
}

/// Compatible with X-linked dominant inheritance.
pub fn x_dominant(pedigree: &Pedigree, variant: &VariantEvaluation) -> bool {
    pedigree.affected().all(|i| {
        let gt = variant.sample_genotype(&i.id);
        match i.sex {
            Sex::Male => gt.has_alt() && !gt.is_no_call(),
            Sex::Female | Sex::Unknown => gt.is_het() || gt.is_hom_alt(),
        }
    }) && pedigree.unaffected().all(|i| {
        let gt = variant.sample_genotype(&i.id);
        match i.sex {
            Sex::Male => !gt.has_alt(),
            Sex::Female | Sex::Unknown => gt.is_hom_ref() || gt.is_no_call(),
        }
    })
}

/// Compatible with X-linked recessive inheritance via a single
/// homozygous/hemizygous alternate variant. Unaffected female carriers are
/// allowed; unaffected males must not carry the alternate allele.
pub fn x_recessive_hom_alt(pedigree: &Pedigree, variant: &VariantEvaluation) -> bool {
    pedigree.affected().all(|i| {
        let gt = variant.sample_genotype(&i.id);
        match i.sex {
            Sex::Male => gt.has_alt() && !gt.is_no_call(),
            Sex::Female | Sex::Unknown => gt.is_hom_alt(),
        }
    }) && pedigree
        .unaffected()
        .all(|i| !carries_alt_hemizygous(i, &variant.sample_genotype(&i.id)))
}

/// Compatible with compound-heterozygous X-linked recessive inheritance.
/// Hemizygous males cannot carry a compound pair, so any affected male
/// renders the pair incompatible.
pub fn x_recessive_comp_het(
    pedigree: &Pedigree,
    first: &VariantEvaluation,
    second: &VariantEvaluation,
) -> bool {
    if pedigree.affected().any(|i| i.sex == Sex::Male) {
        return false;
    }
    autosomal_recessive_comp_het(pedigree, first, second)
}

/// Compatible with mitochondrial inheritance: every affected member carries
/// the alternate allele. The maternal-line rule is advisory and not
/// enforced here.
pub fn mitochondrial(pedigree: &Pedigree, variant: &VariantEvaluation) -> bool {
    pedigree
        .affected()
        .all(|i| variant.sample_genotype(&i.id).has_alt())
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::model::pedigree::{AffectedStatus, Individual, Sex};

    fn trio() -> Pedigree {
        Pedigree::new(vec![
            Individual {
                id: String::from("father"),
                sex: Sex::Male,
                status: AffectedStatus::Unaffected,
                ..Default::default()
            },
            Individual {
                id: String::from("mother"),
                sex: Sex::Female,
                status: AffectedStatus::Unaffected,
                ..Default::default()
            },
            Individual {
                id: String::from("child"),
                father_id: Some(String::from("father")),
                mother_id: Some(String::from("mother")),
                sex: Sex::Female,
                status: AffectedStatus::Affected,
            },
        ])
        .unwrap()
    }

    fn variant(genotypes: &[(&str, SampleGenotype)]) -> VariantEvaluation {
        VariantEvaluation {
            chromosome: 1,
            position: 100,
            reference: String::from("A"),
            alternative: String::from("T"),
            sample_genotypes: genotypes
                .iter()
                .map(|(s, g)| (s.to_string(), g.clone()))
                .collect::<IndexMap<_, _>>(),
            ..Default::default()
        }
    }

    #[rstest]
    // de-novo-like: affected child het, parents ref
    #[case(SampleGenotype::het(), SampleGenotype::hom_ref(), SampleGenotype::hom_ref(), true)]
    // affected child hom-alt also fits the dominant rule
    #[case(SampleGenotype::hom_alt(), SampleGenotype::hom_ref(), SampleGenotype::hom_ref(), true)]
    // unaffected carrier parent breaks dominance
    #[case(SampleGenotype::het(), SampleGenotype::het(), SampleGenotype::hom_ref(), false)]
    // affected child without the allele
    #[case(SampleGenotype::hom_ref(), SampleGenotype::hom_ref(), SampleGenotype::hom_ref(), false)]
    // no-call in an unaffected parent is tolerated
    #[case(SampleGenotype::het(), SampleGenotype::no_call(), SampleGenotype::hom_ref(), true)]
    fn autosomal_dominant_trio(
        #[case] child: SampleGenotype,
        #[case] father: SampleGenotype,
        #[case] mother: SampleGenotype,
        #[case] expected: bool,
    ) {
        let v = variant(&[("child", child), ("father", father), ("mother", mother)]);
        assert_eq!(autosomal_dominant(&trio(), &v), expected);
    }

    #[rstest]
    // classic recessive trio: child hom-alt, parents carriers
    #[case(SampleGenotype::hom_alt(), SampleGenotype::het(), SampleGenotype::het(), true)]
    // an unaffected hom-alt parent contradicts recessiveness
    #[case(SampleGenotype::hom_alt(), SampleGenotype::hom_alt(), SampleGenotype::het(), false)]
    // het child is not hom-alt compatible
    #[case(SampleGenotype::het(), SampleGenotype::het(), SampleGenotype::het(), false)]
    fn autosomal_recessive_hom_alt_trio(
        #[case] child: SampleGenotype,
        #[case] father: SampleGenotype,
        #[case] mother: SampleGenotype,
        #[case] expected: bool,
    ) {
        let v = variant(&[("child", child), ("father", father), ("mother", mother)]);
        assert_eq!(autosomal_recessive_hom_alt(&trio(), &v), expected);
    }

    #[test]
    fn comp_het_trio_one_variant_per_parent() {
        let pedigree = trio();
        // father transmits the first variant, mother the second
        let first = variant(&[
            ("child", SampleGenotype::het()),
            ("father", SampleGenotype::het()),
            ("mother", SampleGenotype::hom_ref()),
        ]);
        let second = variant(&[
            ("child", SampleGenotype::het()),
            ("father", SampleGenotype::hom_ref()),
            ("mother", SampleGenotype::het()),
        ]);
        assert!(autosomal_recessive_comp_het(&pedigree, &first, &second));
    }

    #[test]
    fn comp_het_trio_both_from_one_parent_fails() {
        let pedigree = trio();
        // both variants on the same parental haplotype
        let first = variant(&[
            ("child", SampleGenotype::het()),
            ("father", SampleGenotype::het()),
            ("mother", SampleGenotype::hom_ref()),
        ]);
        let second = variant(&[
            ("child", SampleGenotype::het()),
            ("father", SampleGenotype::het()),
            ("mother", SampleGenotype::hom_ref()),
        ]);
        assert!(!autosomal_recessive_comp_het(&pedigree, &first, &second));
    }

    #[test]
    fn comp_het_singleton_is_vacuously_parent_compatible() {
        let pedigree = Pedigree::single_affected_sample("proband");
        let first = variant(&[("proband", SampleGenotype::het())]);
        let second = variant(&[("proband", SampleGenotype::het())]);
        assert!(autosomal_recessive_comp_het(&pedigree, &first, &second));
    }

    fn x_family(affected_son: bool) -> Pedigree {
        Pedigree::new(vec![
            Individual {
                id: String::from("father"),
                sex: Sex::Male,
                status: AffectedStatus::Unaffected,
                ..Default::default()
            },
            Individual {
                id: String::from("mother"),
                sex: Sex::Female,
                status: AffectedStatus::Unaffected,
                ..Default::default()
            },
            Individual {
                id: String::from("son"),
                father_id: Some(String::from("father")),
                mother_id: Some(String::from("mother")),
                sex: Sex::Male,
                status: if affected_son {
                    AffectedStatus::Affected
                } else {
                    AffectedStatus::Unaffected
                },
            },
        ])
        .unwrap()
    }

    #[test]
    fn x_recessive_affected_hemizygous_son() {
        let pedigree = x_family(true);
        let v = variant(&[
            ("son", SampleGenotype::hemizygous(crate::model::variant::AlleleCall::Alt)),
            ("father", SampleGenotype::hemizygous(crate::model::variant::AlleleCall::Ref)),
            ("mother", SampleGenotype::het()),
        ]);
        assert!(x_recessive_hom_alt(&pedigree, &v));
        // The carrier mother alone does not make the variant X-dominant
        // compatible.
        assert!(!x_dominant(&pedigree, &v));
    }

    #[test]
    fn x_recessive_unaffected_hemizygous_carrier_fails() {
        let pedigree = x_family(false);
        let v = variant(&[
            ("son", SampleGenotype::hemizygous(crate::model::variant::AlleleCall::Alt)),
            ("father", SampleGenotype::hemizygous(crate::model::variant::AlleleCall::Ref)),
            ("mother", SampleGenotype::het()),
        ]);
        assert!(!x_recessive_hom_alt(&pedigree, &v));
    }

    #[test]
    fn x_comp_het_rejects_affected_male() {
        let pedigree = x_family(true);
        let first = variant(&[("son", SampleGenotype::het())]);
        let second = variant(&[("son", SampleGenotype::het())]);
        assert!(!x_recessive_comp_het(&pedigree, &first, &second));
    }

    #[rstest]
    #[case(SampleGenotype::het(), true)]
    #[case(SampleGenotype::hom_alt(), true)]
    #[case(SampleGenotype::hom_ref(), false)]
    fn mitochondrial_needs_alt_in_affected(#[case] child: SampleGenotype, #[case] expected: bool) {
        let v = variant(&[
            ("child", child),
            ("father", SampleGenotype::hom_ref()),
            ("mother", SampleGenotype::hom_ref()),
        ]);
        assert_eq!(mitochondrial(&trio(), &v), expected);
    }
}
