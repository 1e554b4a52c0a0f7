//! ExomeWalker prioritizer: random walk with restart over a
//! protein-protein interaction network, seeded with known disease genes.

use std::collections::BTreeMap;

use crate::model::gene::Gene;
use crate::priority::{PriorityResult, PriorityType};

/// Maximum number of power iterations before giving up on convergence.
const MAX_ITERATIONS: usize = 100;
/// L1 convergence threshold of the stationary distribution.
const CONVERGENCE_EPSILON: f64 = 1e-9;

/// An undirected weighted gene interaction network.
///
/// Kept in ordered maps so that the float accumulation order, and with it
/// the resulting scores, are deterministic.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GeneNetwork {
    edges: BTreeMap<String, Vec<(String, f64)>>,
}

impl GeneNetwork {
    /// Add an undirected edge between two genes.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: f64) {
        self.edges
            .entry(from.to_string())
            .or_default()
            .push((to.to_string(), weight));
        self.edges
            .entry(to.to_string())
            .or_default()
            .push((from.to_string(), weight));
    }

    /// Whether the gene is a node of the network.
    pub fn contains(&self, gene: &str) -> bool {
        self.edges.contains_key(gene)
    }

    fn nodes(&self) -> impl Iterator<Item = &String> {
        self.edges.keys()
    }

    fn neighbors(&self, gene: &str) -> &[(String, f64)] {
        self.edges.get(gene).map(Vec::as_slice).unwrap_or(&[])
    }

    fn weight_sum(&self, gene: &str) -> f64 {
        self.neighbors(gene).iter().map(|(_, w)| w).sum()
    }
}

/// Scores genes by the scaled stationary visit probability of a random
/// walk with restart seeded at the given gene list.
///
/// Scores are scaled by the maximal raw probability over the candidate
/// genes, yielding values in `[0, 1]`; genes outside the network score
/// `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExomeWalkerPrioritiser {
    network: GeneNetwork,
    seed_genes: Vec<String>,
    restart_probability: f64,
}

impl ExomeWalkerPrioritiser {
    /// Construct with the canonical restart probability of `0.7`.
    pub fn new(network: GeneNetwork, seed_genes: Vec<String>) -> Self {
        Self::with_restart_probability(network, seed_genes, 0.7)
    }

    /// Construct with an explicit restart probability in `(0, 1)`.
    pub fn with_restart_probability(
        network: GeneNetwork,
        seed_genes: Vec<String>,
        restart_probability: f64,
    ) -> Self {
        Self {
            network,
            seed_genes,
            restart_probability,
        }
    }

    /// Stationary visit probabilities of the walk.
    fn walk(&self) -> BTreeMap<String, f64> {
        let seeds = self
            .seed_genes
            .iter()
            .filter(|g| self.network.contains(g))
            .collect::<Vec<_>>();
        if seeds.is_empty() {
            return BTreeMap::new();
        }

        let restart_mass = 1.0 / seeds.len() as f64;
        let mut restart: BTreeMap<String, f64> = BTreeMap::new();
        for seed in &seeds {
            *restart.entry((*seed).clone()).or_default() += restart_mass;
        }

        let mut current = restart.clone();
        for _ in 0..MAX_ITERATIONS {
            let mut next: BTreeMap<String, f64> = self
                .network
                .nodes()
                .map(|n| (n.clone(), 0.0))
                .collect();
            for (node, probability) in &current {
                let weight_sum = self.network.weight_sum(node);
                if weight_sum <= 0.0 {
                    continue;
                }
                for (neighbor, weight) in self.network.neighbors(node) {
                    *next.entry(neighbor.clone()).or_default() +=
                        (1.0 - self.restart_probability) * probability * weight / weight_sum;
                }
            }
            for (node, mass) in &restart {
                *next.entry(node.clone()).or_default() += self.restart_probability * mass;
            }

            let diff: f64 = next
                .iter()
                .map(|(node, p)| (p - current.get(node).copied().unwrap_or(0.0)).abs())
                .sum();
            current = next;
            if diff < CONVERGENCE_EPSILON {
                break;
            }
        }
        current
    }

    /// Attach a result to every gene.
    pub fn prioritise(&self, genes: &mut [Gene]) {
        let probabilities = self.walk();
        let max_raw = genes
            .iter()
            .filter_map(|g| probabilities.get(&g.gene_symbol))
            .fold(0f64, |acc, p| acc.max(*p));

        for gene in genes.iter_mut() {
            let raw = probabilities
                .get(&gene.gene_symbol)
                .copied()
                .unwrap_or(0.0);
            let score = if max_raw > 0.0 { raw / max_raw } else { 0.0 };
            tracing::trace!(
                "ExomeWalker score for {} is {} (raw {})",
                &gene.gene_symbol,
                score,
                raw
            );
            gene.add_priority_result(
                PriorityResult::new(PriorityType::ExomeWalker, score)
                    .with_sub_score("raw_score", raw),
            );
        }
    }
}
