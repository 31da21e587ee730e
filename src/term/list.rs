use std::collections::HashMap;

use crate::term::{GoTermId, Namespace, Term};
use crate::{ReduceError, ReduceResult, DEFAULT_NUM_TERMS};

/// An ordered list of [`Term`]s of one namespace
///
/// The list is created once per job and namespace and is never modified.
/// Re-ordering, e.g. by [`ClusterSort`](`crate::ClusterSort`), always
/// creates a new `TermList`.
///
/// # Examples
///
/// ```
/// use revigo_export::{Namespace, Term, TermList, TermProperties};
///
/// let terms = vec![
///     Term::try_new("GO:0008150", "biological_process", TermProperties::default()).unwrap(),
///     Term::try_new("GO:0007049", "cell cycle", TermProperties::default()).unwrap(),
/// ];
/// let list = TermList::try_new(Namespace::BiologicalProcess, terms).unwrap();
///
/// assert_eq!(list.len(), 2);
/// assert_eq!(list.position(7049u32.into()), Some(1));
/// assert_eq!(list.get(0).unwrap().name(), "biological_process");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TermList {
    namespace: Namespace,
    terms: Vec<Term>,
    index: HashMap<GoTermId, usize>,
}

impl TermList {
    /// Constructs a new `TermList`
    ///
    /// # Errors
    ///
    /// - The same term is present more than once: [`ReduceError::InvalidInput`]
    /// - The terms carry different numbers of user values: [`ReduceError::InvalidInput`]
    pub fn try_new(namespace: Namespace, terms: Vec<Term>) -> ReduceResult<Self> {
        let mut index = HashMap::with_capacity(terms.len().max(DEFAULT_NUM_TERMS));
        let user_values = terms.first().map(|t| t.properties().user_values().len());
        for (idx, term) in terms.iter().enumerate() {
            if index.insert(term.id(), idx).is_some() {
                return Err(ReduceError::InvalidInput(format!(
                    "{} is present more than once",
                    term.id()
                )));
            }
            if Some(term.properties().user_values().len()) != user_values {
                return Err(ReduceError::InvalidInput(format!(
                    "{} has {} user values, expected {}",
                    term.id(),
                    term.properties().user_values().len(),
                    user_values.unwrap_or_default()
                )));
            }
        }
        Ok(Self {
            namespace,
            terms,
            index,
        })
    }

    /// Returns an empty list
    pub fn empty(namespace: Namespace) -> Self {
        Self {
            namespace,
            terms: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The namespace of all terms in the list
    pub fn namespace(&self) -> Namespace {
        self.namespace
    }

    /// Returns the number of terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Returns `true` if there are no terms in the list
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns the term at position `idx`
    pub fn get(&self, idx: usize) -> Option<&Term> {
        self.terms.get(idx)
    }

    /// Returns the term with the given ID
    pub fn term(&self, id: GoTermId) -> Option<&Term> {
        self.position(id).map(|idx| &self.terms[idx])
    }

    /// Returns the position of the term with the given ID
    pub fn position(&self, id: GoTermId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Returns `true` if the term is part of the list
    pub fn contains(&self, id: GoTermId) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of user values of every term
    pub fn user_value_count(&self) -> usize {
        self.terms
            .first()
            .map_or(0, |t| t.properties().user_values().len())
    }

    /// Returns an iterator of all terms, in order
    pub fn iter(&self) -> Iter<'_> {
        self.into_iter()
    }

    /// Creates a new list with the terms in the order of `order`
    ///
    /// `order` contains the current positions of the terms. It must be a
    /// permutation of `0..self.len()`.
    ///
    /// # Errors
    ///
    /// If `order` is not a permutation: [`ReduceError::InvalidInput`]
    pub fn reordered(&self, order: &[usize]) -> ReduceResult<Self> {
        let mut seen = vec![false; self.len()];
        for &idx in order {
            match seen.get_mut(idx) {
                Some(flag) if !*flag => *flag = true,
                _ => {
                    return Err(ReduceError::InvalidInput(format!(
                        "position {idx} is invalid or used twice"
                    )))
                }
            }
        }
        if order.len() != self.len() {
            return Err(ReduceError::InvalidInput(format!(
                "expected {} positions, got {}",
                self.len(),
                order.len()
            )));
        }

        let terms = order.iter().map(|&idx| self.terms[idx].clone()).collect();
        Self::try_new(self.namespace, terms)
    }
}

impl<'a> IntoIterator for &'a TermList {
    type Item = &'a Term;
    type IntoIter = Iter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        Iter {
            inner: self.terms.iter(),
        }
    }
}

/// Iterates the [`Term`]s of a [`TermList`]
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, Term>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Term;
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl ExactSizeIterator for Iter<'_> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}
