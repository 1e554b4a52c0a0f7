//! Family pedigree: individuals with sex, affected status, and parent
//! links. Immutable after construction.

use indexmap::IndexMap;

/// Biological sex of a pedigree member.
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
pub enum Sex {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Unknown.
    #[default]
    Unknown,
}

/// Disease status of a pedigree member.
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
pub enum AffectedStatus {
    /// The individual shows the phenotype.
    Affected,
    /// The individual does not show the phenotype.
    Unaffected,
    /// Unknown status.
    #[default]
    Unknown,
}

/// One member of a pedigree.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Individual {
    /// Sample identifier, unique within the pedigree.
    pub id: String,
    /// Identifier of the father, if in the pedigree.
    pub father_id: Option<String>,
    /// Identifier of the mother, if in the pedigree.
    pub mother_id: Option<String>,
    /// Sex of the individual.
    pub sex: Sex,
    /// Affected status of the individual.
    pub status: AffectedStatus,
}

impl Individual {
    /// Whether the individual is affected.
    pub fn is_affected(&self) -> bool {
        self.status == AffectedStatus::Affected
    }

    /// Whether the individual is unaffected (unknown status counts as
    /// neither affected nor unaffected).
    pub fn is_unaffected(&self) -> bool {
        self.status == AffectedStatus::Unaffected
    }
}

/// Supporting code for `Pedigree`.
pub(crate) mod pedigree {
    /// Error type for `Pedigree::new()`.
    #[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
    pub enum Error {
        #[error("Pedigree must contain at least one individual")]
        Empty,
        #[error("Duplicate individual in pedigree: {0}")]
        DuplicateIndividual(String),
        #[error("Parent {parent} of individual {child} is not in the pedigree")]
        MissingParent { child: String, parent: String },
    }
}

/// A family pedigree. Parent references must resolve within the pedigree.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Pedigree {
    individuals: IndexMap<String, Individual>,
}

impl Pedigree {
    /// Construct from the given individuals, validating parent links.
    pub fn new(individuals: Vec<Individual>) -> Result<Self, pedigree::Error> {
        if individuals.is_empty() {
            return Err(pedigree::Error::Empty);
        }
        let mut map = IndexMap::with_capacity(individuals.len());
        for individual in individuals {
            if map.contains_key(&individual.id) {
                return Err(pedigree::Error::DuplicateIndividual(individual.id));
            }
            map.insert(individual.id.clone(), individual);
        }
        for individual in map.values() {
            for parent in [&individual.father_id, &individual.mother_id]
                .into_iter()
                .flatten()
            {
                if !map.contains_key(parent) {
                    return Err(pedigree::Error::MissingParent {
                        child: individual.id.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }
        Ok(Self { individuals: map })
    }

    /// Construct a pedigree of a single affected individual.
    pub fn single_affected_sample(id: &str) -> Self {
        Self {
            individuals: IndexMap::from([(
                id.to_string(),
                Individual {
                    id: id.to_string(),
                    status: AffectedStatus::Affected,
                    ..Default::default()
                },
            )]),
        }
    }

    /// Whether the given sample is a member of the pedigree.
    pub fn contains(&self, id: &str) -> bool {
        self.individuals.contains_key(id)
    }

    /// The individual with the given id.
    pub fn individual(&self, id: &str) -> Option<&Individual> {
        self.individuals.get(id)
    }

    /// All members in insertion order.
    pub fn individuals(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.values()
    }

    /// All affected members.
    pub fn affected(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.values().filter(|i| i.is_affected())
    }

    /// All unaffected members.
    pub fn unaffected(&self) -> impl Iterator<Item = &Individual> {
        self.individuals.values().filter(|i| i.is_unaffected())
    }

    /// The unaffected parents of affected members, deduplicated, in
    /// pedigree order.
    pub fn unaffected_parents_of_affected(&self) -> Vec<&Individual> {
        let mut seen = std::collections::HashSet::new();
        let mut result = Vec::new();
        for affected in self.affected() {
            for parent_id in [&affected.father_id, &affected.mother_id]
                .into_iter()
                .flatten()
            {
                if let Some(parent) = self.individual(parent_id) {
                    if parent.is_unaffected() && seen.insert(&parent.id) {
                        result.push(parent);
                    }
                }
            }
        }
        result
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Whether the pedigree has no members (never true for a constructed
    /// pedigree).
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// A father/mother/affected-child trio used across the inheritance
    /// tests.
    pub(crate) fn trio() -> Pedigree {
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
        .expect("trio pedigree is valid")
    }

    #[test]
    fn new_rejects_empty() {
        assert_eq!(Pedigree::new(vec![]), Err(pedigree::Error::Empty));
    }

    #[test]
    fn new_rejects_duplicate() {
        let result = Pedigree::new(vec![
            Individual {
                id: String::from("sample"),
                ..Default::default()
            },
            Individual {
                id: String::from("sample"),
                ..Default::default()
            },
        ]);
        assert_eq!(
            result,
            Err(pedigree::Error::DuplicateIndividual(String::from("sample")))
        );
    }

    #[test]
    fn new_rejects_dangling_parent() {
        let result = Pedigree::new(vec![Individual {
            id: String::from("child"),
            father_id: Some(String::from("father")),
            ..Default::default()
        }]);
        assert_eq!(
            result,
            Err(pedigree::Error::MissingParent {
                child: String::from("child"),
                parent: String::from("father"),
            })
        );
    }

    #[test]
    fn trio_accessors() {
        let pedigree = trio();
        assert_eq!(pedigree.len(), 3);
        assert_eq!(pedigree.affected().count(), 1);
        assert_eq!(pedigree.unaffected().count(), 2);
        let parents = pedigree.unaffected_parents_of_affected();
        assert_eq!(
            parents.iter().map(|i| i.id.as_str()).collect::<Vec<_>>(),
            vec!["father", "mother"]
        );
    }

    #[test]
    fn single_affected_sample() {
        let pedigree = Pedigree::single_affected_sample("proband");
        assert_eq!(pedigree.len(), 1);
        assert!(pedigree.contains("proband"));
        assert_eq!(pedigree.affected().count(), 1);
        assert!(pedigree.unaffected_parents_of_affected().is_empty());
    }
}
