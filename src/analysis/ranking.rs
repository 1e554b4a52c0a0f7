//! Gene ranking: combined-score aggregation, down-weighting of
//! variant-heavy genes, and the final deterministic sort.

use crate::inheritance::ModeOfInheritance;
use crate::model::gene::Gene;
use crate::model::pedigree::Pedigree;

/// Whether any affected pedigree member is homozygous-alternate at the
/// variant; such variants count twice under recessive scoring.
fn is_hom_alt_in_affected(
    pedigree: &Pedigree,
    variant: &crate::model::variant::VariantEvaluation,
) -> bool {
    pedigree
        .affected()
        .any(|i| variant.sample_genotype(&i.id).is_hom_alt())
}

/// Down-weighting factor for genes with many variants: 5% for the first
/// variant beyond the threshold, growing by half again per further
/// variant, capped at 1.
pub(crate) fn downweight_factor(num_variants: usize, threshold: usize) -> f64 {
    if num_variants < threshold {
        return 0.0;
    }
    let mut remaining = num_variants;
    let mut factor = 0.05;
    let mut downweight = 0.0_f64;
    while remaining > threshold {
        downweight += factor;
        factor *= 1.5;
        remaining -= 1;
    }
    downweight.min(1.0)
}

/// Calculate the gene's priority, filter, and combined scores for the
/// given mode of inheritance.
///
/// The filter score aggregates the scores of the variants that survived
/// filtering: under autosomal-recessive inheritance the mean of the two
/// best scores (counting homozygous variants of affected individuals
/// twice, zero when fewer than two scores remain), the single best score
/// otherwise.
pub fn score_gene(
    gene: &mut Gene,
    mode: ModeOfInheritance,
    pedigree: &Pedigree,
    downweight_threshold: Option<usize>,
) {
    let priority_score = gene.priority_results().map(|r| r.score).product::<f64>();

    let mut scores = Vec::new();
    for variant in gene.passed_variants() {
        let score = variant.variant_score();
        scores.push(score);
        if mode == ModeOfInheritance::AutosomalRecessive
            && is_hom_alt_in_affected(pedigree, variant)
        {
            scores.push(score);
        }
    }
    scores.sort_by(|a, b| b.total_cmp(a));

    let mut filter_score = if mode == ModeOfInheritance::AutosomalRecessive {
        if scores.len() < 2 {
            0.0
        } else {
            (scores[0] + scores[1]) / 2.0
        }
    } else {
        scores.first().copied().unwrap_or(0.0)
    };

    if let Some(threshold) = downweight_threshold {
        filter_score *= 1.0 - downweight_factor(gene.number_of_variants(), threshold);
    }

    gene.priority_score = priority_score;
    gene.filter_score = filter_score;
    gene.combined_score = (priority_score + filter_score) / 2.0;
}

/// Sort genes by combined score descending; ties are broken by gene symbol
/// ascending so that the output order is total and deterministic.
pub fn rank_genes(genes: &mut [Gene]) {
    genes.sort_by(|a, b| {
        b.combined_score()
            .total_cmp(&a.combined_score())
            .then_with(|| a.gene_symbol.cmp(&b.gene_symbol))
    });
}
