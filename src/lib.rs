#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

use std::convert::Infallible;
use std::num::ParseIntError;
use thiserror::Error;

pub mod cluster;
pub mod export;
pub mod format;
pub mod job;
pub mod matrix;
pub mod ontology;
pub mod term;
pub mod wordcloud;
pub mod worker;

pub use cluster::{ClusterSort, RepresentativeClusters};
pub use export::{ExportFormat, ExportOptions, Exporter};
pub use job::{GraphExport, JobResult, Ontologram, Visualizer};
pub use matrix::SimilarityMatrix;
pub use ontology::{Ontology, OntologyLookup};
pub use term::{GoTermId, Namespace, Term, TermList, TermProperties};
pub use wordcloud::{Compression, WeightedWord, WordSize};
pub use worker::{JobHandle, JobQueue};

/// Cutoff used to re-sort terms for the TreeMap export
///
/// It is deliberately permissive, so that (almost) every term
/// is assigned to a representative cluster.
pub const TREEMAP_CUTOFF: f64 = 0.1;

/// Smallest size of a word in a word cloud
pub const MIN_WORD_SIZE: f64 = 1.0;

/// Largest size of a word in a word cloud
pub const MAX_WORD_SIZE: f64 = 9.0;

const DEFAULT_NUM_TERMS: usize = 200;

/// Main Error type for this crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReduceError {
    /// Term does not exist in the Ontology
    #[error("term {0} does not exist")]
    DoesNotExist(GoTermId),
    /// Failed to parse an Integer
    #[error("unable to parse Integer")]
    ParseIntError,
    /// Input data is not valid
    #[error("invalid input data: {0}")]
    InvalidInput(String),
    /// A numeric property of a term is outside of its valid range
    #[error("{field} of {id} must be between 0 and 1, got {value}")]
    InvalidProperty {
        /// The term holding the property
        id: GoTermId,
        /// Name of the property
        field: &'static str,
        /// The offending value
        value: f64,
    },
    /// The representative of a term is not part of the Ontology
    #[error("representative {representative} of {term} cannot be resolved")]
    UnresolvedRepresentative {
        /// The term holding the representative link
        term: GoTermId,
        /// The representative that could not be resolved
        representative: GoTermId,
    },
    /// A term or its representative belongs to a different namespace
    #[error("{term} is not part of the {expected} namespace")]
    NamespaceMismatch {
        /// The term in question
        term: GoTermId,
        /// The namespace of the term list
        expected: Namespace,
    },
    /// Representative links form a loop
    #[error("representative links of {0} form a cycle")]
    ClusterCycle(GoTermId),
    /// The job result does not contain data for the namespace
    #[error("no visualizer available for {0}")]
    MissingVisualizer(Namespace),
    /// The requested artifact is not available for the job
    #[error("{0} is not available for {1}")]
    MissingArtifact(&'static str, Namespace),
    /// The job engine did not finish successfully
    #[error("job {job} failed: {reason}")]
    JobFailed {
        /// ID of the job
        job: u32,
        /// Reason for the failure
        reason: String,
    },
    /// Opening an output file failed
    #[error("cannot open file {0}")]
    CannotOpenFile(String),
    /// Writing to the output sink failed
    #[error("unable to write output: {0}")]
    Io(#[from] std::io::Error),
    /// Serializing the JSON output failed
    #[error("unable to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ParseIntError> for ReduceError {
    fn from(_: ParseIntError) -> Self {
        ReduceError::ParseIntError
    }
}

impl From<Infallible> for ReduceError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

/// Shortcut for `Result<T, ReduceError>`
pub type ReduceResult<T> = Result<T, ReduceError>;
