use std::collections::hash_map::{Entry, Values};
use std::collections::HashMap;

use crate::ontology::OntologyTerm;
use crate::GoTermId;

/// Storage of all [`OntologyTerm`]s, indexed by their [`GoTermId`]
pub(crate) struct Arena {
    terms: HashMap<GoTermId, OntologyTerm>,
}

impl Arena {
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Inserts the term, replacing a previous term with the same ID
    ///
    /// Returns `true` if the term was not present before
    pub fn insert(&mut self, term: OntologyTerm) -> bool {
        match self.terms.entry(term.id()) {
            Entry::Occupied(mut entry) => {
                entry.insert(term);
                false
            }
            Entry::Vacant(entry) => {
                entry.insert(term);
                true
            }
        }
    }

    pub fn get(&self, id: GoTermId) -> Option<&OntologyTerm> {
        self.terms.get(&id)
    }

    pub fn values(&self) -> Values<'_, GoTermId, OntologyTerm> {
        self.terms.values()
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            terms: HashMap::with_capacity(50_000),
        }
    }
}
