//! Lookup of GO term names and namespaces
//!
//! The export layer does not parse the Gene Ontology. It only needs to
//! resolve the name and namespace of a term, e.g. to print the name of a
//! representative term. Any ontology implementation can be used by
//! implementing [`OntologyLookup`]. [`Ontology`] is a simple in-memory
//! implementation.

use core::fmt::Debug;

use tracing::debug;

use crate::term::{GoTermId, Namespace};
use crate::{ReduceError, ReduceResult};

mod termarena;
use termarena::Arena;

/// Resolves [`GoTermId`]s to their name and namespace
pub trait OntologyLookup {
    /// Returns the name and namespace of the term, `None` if the term is unknown
    fn lookup(&self, id: GoTermId) -> Option<(&str, Namespace)>;

    /// Returns the name of the term
    ///
    /// # Errors
    ///
    /// If the term is not part of the ontology: [`ReduceError::DoesNotExist`]
    fn name(&self, id: GoTermId) -> ReduceResult<&str> {
        self.lookup(id)
            .map(|(name, _)| name)
            .ok_or(ReduceError::DoesNotExist(id))
    }

    /// Returns the namespace of the term
    ///
    /// # Errors
    ///
    /// If the term is not part of the ontology: [`ReduceError::DoesNotExist`]
    fn namespace(&self, id: GoTermId) -> ReduceResult<Namespace> {
        self.lookup(id)
            .map(|(_, namespace)| namespace)
            .ok_or(ReduceError::DoesNotExist(id))
    }
}

/// A single term of the [`Ontology`]
#[derive(Debug, Clone, PartialEq)]
pub struct OntologyTerm {
    id: GoTermId,
    name: String,
    namespace: Namespace,
}

impl OntologyTerm {
    /// Constructs a new `OntologyTerm`
    pub fn new(id: GoTermId, name: &str, namespace: Namespace) -> Self {
        Self {
            id,
            name: name.to_string(),
            namespace,
        }
    }

    /// The ID of the term
    pub fn id(&self) -> GoTermId {
        self.id
    }

    /// The name of the term
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The namespace of the term
    pub fn namespace(&self) -> Namespace {
        self.namespace
    }
}

/// In-memory ontology with the names and namespaces of GO terms
///
/// # Examples
///
/// ```
/// use revigo_export::{Namespace, Ontology, OntologyLookup};
///
/// let mut ontology = Ontology::default();
/// ontology.insert_term("GO:0005737", "cytoplasm", Namespace::CellularComponent).unwrap();
///
/// assert_eq!(ontology.name(5737u32.into()).unwrap(), "cytoplasm");
/// assert!(ontology.name(5738u32.into()).is_err());
/// ```
#[derive(Default)]
pub struct Ontology {
    terms: Arena,
}

impl Debug for Ontology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ontology with {} terms", self.terms.len())
    }
}

impl Ontology {
    /// Adds a term to the ontology, replacing any term with the same ID
    ///
    /// # Errors
    ///
    /// If `id` is not a valid GO term ID: [`ReduceError::ParseIntError`]
    pub fn insert_term<I>(&mut self, id: I, name: &str, namespace: Namespace) -> ReduceResult<GoTermId>
    where
        I: TryInto<GoTermId>,
        ReduceError: From<I::Error>,
    {
        let id = id.try_into()?;
        if !self.terms.insert(OntologyTerm::new(id, name, namespace)) {
            debug!("Replacing existing term {}", id);
        }
        Ok(id)
    }

    /// Returns the term with the given ID
    pub fn term(&self, id: GoTermId) -> Option<&OntologyTerm> {
        self.terms.get(id)
    }

    /// Returns the number of terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` if the ontology does not contain any terms
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates all terms, in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &OntologyTerm> {
        self.terms.values()
    }
}

impl OntologyLookup for Ontology {
    fn lookup(&self, id: GoTermId) -> Option<(&str, Namespace)> {
        self.terms
            .get(id)
            .map(|term| (term.name(), term.namespace()))
    }
}

impl FromIterator<OntologyTerm> for Ontology {
    fn from_iter<T: IntoIterator<Item = OntologyTerm>>(iter: T) -> Self {
        let mut ontology = Ontology::default();
        for term in iter {
            ontology.terms.insert(term);
        }
        ontology
    }
}
