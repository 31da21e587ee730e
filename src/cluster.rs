//! Re-ordering of [`TermList`]s by their clusters
//!
//! The job engine groups redundant terms into clusters that are headed by a
//! representative term. The exports list the terms cluster by cluster, so
//! that a representative is directly followed by the terms it represents.
//! Which terms belong together depends on the cutoff, so every export
//! requests its own ordering via [`ClusterSort`].

use std::collections::HashSet;

use tracing::debug;

use crate::term::{Term, TermList};
use crate::{ReduceError, ReduceResult};

/// Re-orders a [`TermList`] so that all terms of a cluster are adjacent
///
/// Implementations must return a new list with exactly the same terms
/// and must not depend on previous calls.
pub trait ClusterSort {
    /// Returns the terms grouped by their clusters at `cutoff`
    ///
    /// # Errors
    ///
    /// Implementations return an error if the cluster structure of `terms`
    /// is inconsistent, e.g. if a representative is missing.
    fn sort_by_clusters(&self, terms: &TermList, cutoff: f64) -> ReduceResult<TermList>;
}

/// Clusters terms by following their representative links
///
/// - A term with a dispensability above the cutoff belongs to the cluster
///   of its representative. If the representative is itself above the
///   cutoff, the link is followed further.
/// - All other terms head their own cluster.
/// - Clusters are ordered by the position of their head in the input.
///   The head comes first, followed by its members with increasing
///   dispensability. Ties keep the input order.
///
/// # Examples
///
/// ```
/// use revigo_export::{ClusterSort, Namespace, RepresentativeClusters, Term, TermList, TermProperties};
///
/// let terms = TermList::try_new(Namespace::BiologicalProcess, vec![
///     Term::try_new(1u32, "a", TermProperties::default()).unwrap(),
///     Term::try_new(2u32, "b", TermProperties::default()).unwrap(),
///     Term::try_new(3u32, "c", TermProperties::default()
///         .with_dispensability(0.5)
///         .with_representative(1u32)).unwrap(),
/// ]).unwrap();
///
/// let sorted = RepresentativeClusters.sort_by_clusters(&terms, 0.4).unwrap();
/// let ids: Vec<u32> = sorted.iter().map(|t| t.id().as_u32()).collect();
/// assert_eq!(ids, vec![1, 3, 2]);
///
/// // at a higher cutoff, every term forms its own cluster
/// let sorted = RepresentativeClusters.sort_by_clusters(&terms, 0.7).unwrap();
/// let ids: Vec<u32> = sorted.iter().map(|t| t.id().as_u32()).collect();
/// assert_eq!(ids, vec![1, 2, 3]);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct RepresentativeClusters;

impl RepresentativeClusters {
    /// A term heads its own cluster if it is kept at `cutoff` or has nobody to point to
    fn heads_cluster(term: &Term, cutoff: f64) -> bool {
        !term.is_eliminated(cutoff) || term.representative().is_none()
    }

    /// Returns the position of the head of the cluster the term at `idx` belongs to
    fn head(terms: &TermList, idx: usize, cutoff: f64) -> ReduceResult<usize> {
        let mut current = idx;
        let mut visited = HashSet::new();
        loop {
            let term = terms
                .get(current)
                .ok_or_else(|| ReduceError::InvalidInput(format!("no term at position {current}")))?;
            if Self::heads_cluster(term, cutoff) {
                return Ok(current);
            }
            if !visited.insert(current) {
                return Err(ReduceError::ClusterCycle(term.id()));
            }
            let Some(representative) = term.representative() else {
                return Ok(current);
            };
            current = terms
                .position(representative)
                .ok_or(ReduceError::UnresolvedRepresentative {
                    term: term.id(),
                    representative,
                })?;
        }
    }
}

impl ClusterSort for RepresentativeClusters {
    fn sort_by_clusters(&self, terms: &TermList, cutoff: f64) -> ReduceResult<TermList> {
        let mut members: Vec<Vec<usize>> = vec![Vec::new(); terms.len()];
        for idx in 0..terms.len() {
            let head = Self::head(terms, idx, cutoff)?;
            if head != idx {
                members[head].push(idx);
            }
        }

        let mut order = Vec::with_capacity(terms.len());
        let mut clusters = 0usize;
        for (head, mut cluster) in members.into_iter().enumerate() {
            let is_head = terms
                .get(head)
                .map_or(false, |term| Self::heads_cluster(term, cutoff));
            if !is_head {
                continue;
            }
            clusters += 1;
            cluster.sort_by(|a, b| {
                let a = terms.get(*a).map_or(0.0, |t| t.dispensability());
                let b = terms.get(*b).map_or(0.0, |t| t.dispensability());
                a.total_cmp(&b)
            });
            order.push(head);
            order.extend(cluster);
        }

        debug!(
            "Sorted {} {} terms into {} clusters at cutoff {}",
            terms.len(),
            terms.namespace(),
            clusters,
            cutoff
        );
        terms.reordered(&order)
    }
}
