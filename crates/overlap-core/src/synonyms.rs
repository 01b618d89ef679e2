//! Synonym groups used for terminology variant detection.
//!
//! The table is plain configuration: a list of concepts, each with the
//! surface forms that should be treated as the same idea. Grouping code
//! never branches on specific words.

use serde::{Deserialize, Serialize};

/// Built-in groups. The first entry of each group names the concept.
const DEFAULT_GROUPS: &[&[&str]] = &[
    &["cross-reference", "xref", "internal link", "cross-ref"],
    &["workflow", "process", "procedure", "protocol"],
    &["must", "shall", "required", "mandatory"],
    &["should", "recommended", "advisable"],
    &["may", "optional", "can"],
    &["skill", "plugin", "component"],
    &["agent", "assistant", "bot"],
    &["command", "slash command", "directive"],
];

/// One concept and its near-synonymous surface forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynonymGroup {
    pub concept: String,
    pub terms: Vec<String>,
}

impl SynonymGroup {
    pub fn new(concept: impl Into<String>, terms: &[&str]) -> Self {
        Self {
            concept: concept.into(),
            terms: terms.iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    /// Whether `term` belongs to this group: it contains one of the
    /// synonyms or is contained by one (case-insensitive).
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        if term.is_empty() {
            return false;
        }
        self.terms.iter().any(|syn| {
            let syn = syn.to_lowercase();
            term.contains(&syn) || syn.contains(&term)
        })
    }
}

/// Ordered collection of synonym groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SynonymTable {
    groups: Vec<SynonymGroup>,
}

impl SynonymTable {
    pub fn new(groups: Vec<SynonymGroup>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[SynonymGroup] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl Default for SynonymTable {
    fn default() -> Self {
        let groups = DEFAULT_GROUPS
            .iter()
            .map(|terms| SynonymGroup::new(terms[0], terms))
            .collect();
        Self { groups }
    }
}
