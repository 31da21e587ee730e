//! The result of a finished reduction job
//!
//! A [`JobResult`] is a read-only snapshot of everything the job engine
//! calculated: one [`Visualizer`] per namespace and the weighted words
//! of the word clouds. The exports never modify it.

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::io::Write;
use std::time::Duration;

use crate::matrix::SimilarityMatrix;
use crate::term::{Namespace, TermList};
use crate::wordcloud::WeightedWord;
use crate::{ReduceError, ReduceResult};

mod ontologram;
pub use ontologram::{Edge, Node, Ontologram};

/// Serializes a graph of terms as XGMML, e.g. for Cytoscape
///
/// The layout of the document is up to the implementation, the export
/// only provides the output sink.
pub trait GraphExport: Send + Sync {
    /// Writes the complete XGMML document to `writer`
    ///
    /// # Errors
    ///
    /// Returns [`ReduceError::Io`] if writing fails
    fn write_xgmml(&self, writer: &mut dyn Write) -> ReduceResult<()>;
}

/// Data of one namespace of a job
///
/// The similarity matrix (if present) uses the same order as the terms.
pub struct Visualizer {
    terms: TermList,
    matrix: Option<SimilarityMatrix>,
    graph: Option<Box<dyn GraphExport>>,
}

impl Debug for Visualizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Visualizer for {} {} terms (matrix: {}, graph: {})",
            self.terms.len(),
            self.terms.namespace(),
            self.matrix.is_some(),
            self.graph.is_some()
        )
    }
}

impl Visualizer {
    /// Constructs a new `Visualizer` without matrix or graph
    pub fn new(terms: TermList) -> Self {
        Self {
            terms,
            matrix: None,
            graph: None,
        }
    }

    /// Adds the pairwise similarity scores of the terms
    ///
    /// # Errors
    ///
    /// If the dimension of the matrix does not match the number of terms:
    /// [`ReduceError::InvalidInput`]
    pub fn with_matrix(mut self, matrix: SimilarityMatrix) -> ReduceResult<Self> {
        if matrix.dim() != self.terms.len() {
            return Err(ReduceError::InvalidInput(format!(
                "similarity matrix has {} rows, but there are {} terms",
                matrix.dim(),
                self.terms.len()
            )));
        }
        self.matrix = Some(matrix);
        Ok(self)
    }

    /// Adds the graph of the terms
    #[must_use]
    pub fn with_graph<G: GraphExport + 'static>(mut self, graph: G) -> Self {
        self.graph = Some(Box::new(graph));
        self
    }

    /// The namespace of the terms
    pub fn namespace(&self) -> Namespace {
        self.terms.namespace()
    }

    /// All terms, in the order reported by the job engine
    pub fn terms(&self) -> &TermList {
        &self.terms
    }

    /// The pairwise similarity scores of the terms
    pub fn matrix(&self) -> Option<&SimilarityMatrix> {
        self.matrix.as_ref()
    }

    /// The graph of the terms
    pub fn graph(&self) -> Option<&dyn GraphExport> {
        self.graph.as_deref()
    }
}

/// The result of one reduction job
///
/// # Examples
///
/// ```
/// use revigo_export::{JobResult, Namespace, Term, TermList, TermProperties, Visualizer};
/// use revigo_export::wordcloud::WeightedWord;
///
/// let terms = TermList::try_new(
///     Namespace::CellularComponent,
///     vec![Term::try_new("GO:0005737", "cytoplasm", TermProperties::default()).unwrap()],
/// ).unwrap();
///
/// let job = JobResult::new(1, 0.7)
///     .with_visualizer(Visualizer::new(terms))
///     .with_enrichments(vec![WeightedWord::new("cytoplasm", 3.0)]);
///
/// assert!(job.visualizer(Namespace::CellularComponent).is_ok());
/// assert!(job.visualizer(Namespace::MolecularFunction).is_err());
/// assert!(job.correlations().is_none());
/// ```
#[derive(Debug, Default)]
pub struct JobResult {
    id: u32,
    cutoff: f64,
    min_columns: usize,
    visualizers: BTreeMap<Namespace, Visualizer>,
    enrichments: Option<Vec<WeightedWord>>,
    correlations: Option<Vec<WeightedWord>>,
    execution_time: Duration,
}

impl JobResult {
    /// Constructs an empty result for the job `id` that was run with `cutoff`
    pub fn new(id: u32, cutoff: f64) -> Self {
        Self {
            id,
            cutoff,
            min_columns: 1,
            ..Default::default()
        }
    }

    /// Sets the minimum number of value columns each input term had
    ///
    /// The first column is the value, all others are exported as user values
    #[must_use]
    pub fn with_min_columns(mut self, min_columns: usize) -> Self {
        self.min_columns = min_columns;
        self
    }

    /// Adds the data of one namespace, replacing previous data of that namespace
    #[must_use]
    pub fn with_visualizer(mut self, visualizer: Visualizer) -> Self {
        self.visualizers.insert(visualizer.namespace(), visualizer);
        self
    }

    /// Sets the words enriched in the term names
    #[must_use]
    pub fn with_enrichments(mut self, words: Vec<WeightedWord>) -> Self {
        self.enrichments = Some(words);
        self
    }

    /// Sets the words correlated with the term values
    #[must_use]
    pub fn with_correlations(mut self, words: Vec<WeightedWord>) -> Self {
        self.correlations = Some(words);
        self
    }

    /// Sets the time the job engine took to calculate the result
    #[must_use]
    pub fn with_execution_time(mut self, execution_time: Duration) -> Self {
        self.execution_time = execution_time;
        self
    }

    /// The ID of the job
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The cutoff the job was run with
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// The minimum number of value columns of the input terms
    pub fn min_columns(&self) -> usize {
        self.min_columns
    }

    /// Number of user value columns in the exports
    pub fn user_value_count(&self) -> usize {
        self.min_columns.saturating_sub(1)
    }

    /// Returns the data of `namespace`
    ///
    /// # Errors
    ///
    /// If the job has no data for the namespace: [`ReduceError::MissingVisualizer`]
    pub fn visualizer(&self, namespace: Namespace) -> ReduceResult<&Visualizer> {
        self.visualizers
            .get(&namespace)
            .ok_or(ReduceError::MissingVisualizer(namespace))
    }

    /// Iterates the data of all namespaces
    pub fn visualizers(&self) -> impl Iterator<Item = &Visualizer> {
        self.visualizers.values()
    }

    /// The words enriched in the term names, if calculated
    pub fn enrichments(&self) -> Option<&[WeightedWord]> {
        self.enrichments.as_deref()
    }

    /// The words correlated with the term values, if calculated
    pub fn correlations(&self) -> Option<&[WeightedWord]> {
        self.correlations.as_deref()
    }

    /// The time the job engine took to calculate the result
    pub fn execution_time(&self) -> Duration {
        self.execution_time
    }
}
