//! Phenotype terms, matches between them, and disease/organism models.
//!
//! Term/match tables are precomputed by an external ontology pipeline and
//! consumed here as data.

/// Organism a phenotype term universe or model belongs to.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    serde::Serialize,
    serde::Deserialize,
)]
pub enum Organism {
    /// Human (HPO terms).
    #[default]
    Human,
    /// Mouse (MPO terms).
    Mouse,
    /// Zebrafish (ZPO terms).
    Fish,
}

/// A phenotype term: identifier plus human-readable label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PhenotypeTerm {
    /// Term identifier, e.g. `"HP:0001156"`.
    pub id: String,
    /// Term label, e.g. `"Brachydactyly"`.
    pub label: String,
}

impl PhenotypeTerm {
    /// Construct from id and label.
    pub fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
        }
    }
}

/// A scored match between a query term and a candidate term.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhenotypeMatch {
    /// The query phenotype term.
    pub query: PhenotypeTerm,
    /// The matched candidate term.
    pub matched: PhenotypeTerm,
    /// The lowest common ancestor of query and match.
    pub lca: PhenotypeTerm,
    /// Similarity score, `>= 0`.
    pub score: f64,
}

impl PhenotypeMatch {
    /// Construct from terms and score.
    pub fn new(query: PhenotypeTerm, matched: PhenotypeTerm, lca: PhenotypeTerm, score: f64) -> Self {
        Self {
            query,
            matched,
            lca,
            score,
        }
    }
}

/// A disease or organism model annotated with phenotype terms.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Model {
    /// Model identifier, e.g. `"OMIM:101600"` or an MGI model id.
    pub id: String,
    /// Symbol of the associated gene.
    pub gene_symbol: String,
    /// Organism the model belongs to.
    pub organism: Organism,
    /// Ordered phenotype term identifiers of the model.
    pub phenotype_ids: Vec<String>,
}

impl Model {
    /// Construct from id, gene, organism, and phenotype term ids.
    pub fn new(id: &str, gene_symbol: &str, organism: Organism, phenotype_ids: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            gene_symbol: gene_symbol.to_string(),
            organism,
            phenotype_ids: phenotype_ids.iter().map(|s| s.to_string()).collect(),
        }
    }
}
