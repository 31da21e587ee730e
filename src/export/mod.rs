//! Export of job results to tables, matrices, graphs and word clouds
//!
//! All exports are written by the [`Exporter`]. Every export is independent
//! of all others: it re-sorts its own copy of the terms, writes to its own
//! sink and never modifies the [`JobResult`].

use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::cluster::ClusterSort;
use crate::job::JobResult;
use crate::ontology::OntologyLookup;
use crate::term::{GoTermId, Namespace, Term, TermList};
use crate::wordcloud::Compression;
use crate::{ReduceError, ReduceResult, TREEMAP_CUTOFF};

mod matrix;
mod scatterplot;
mod table;
mod treemap;
mod wordclouds;
mod xgmml;

/// The available export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// All terms with their values, one row per term
    Table,
    /// Like [`ExportFormat::Table`], including the 2-D coordinates
    Scatterplot,
    /// Non-redundant terms for a TreeMap visualization
    TreeMap,
    /// Pairwise similarity scores of all terms
    SimilarityMatrix,
    /// Graph of the terms in XGMML format, e.g. for Cytoscape
    Xgmml,
    /// Word clouds of enriched and correlated words, as JSON
    WordClouds,
}

impl ExportFormat {
    /// All formats
    pub const ALL: [ExportFormat; 6] = [
        ExportFormat::Table,
        ExportFormat::Scatterplot,
        ExportFormat::TreeMap,
        ExportFormat::SimilarityMatrix,
        ExportFormat::Xgmml,
        ExportFormat::WordClouds,
    ];

    /// The suffix of the output file name, including the extension
    pub fn suffix(&self) -> &'static str {
        match self {
            ExportFormat::Table => "Table.tsv",
            ExportFormat::Scatterplot => "Scatterplot.tsv",
            ExportFormat::TreeMap => "TreeMap.tsv",
            ExportFormat::SimilarityMatrix => "SimilarityMatrix.tsv",
            ExportFormat::Xgmml => "Cytoscape.xgmml",
            ExportFormat::WordClouds => "WordClouds.json",
        }
    }

    /// Returns `true` if the format is exported separately for every namespace
    pub fn is_per_namespace(&self) -> bool {
        !matches!(self, ExportFormat::WordClouds)
    }

    /// Returns the file name for the export, e.g. `Example1_BPTable.tsv`
    pub fn file_name(&self, prefix: &str, namespace: Option<Namespace>) -> String {
        match namespace {
            Some(namespace) if self.is_per_namespace() => {
                format!("{prefix}_{}{}", namespace.abbreviation(), self.suffix())
            }
            _ => format!("{prefix}_{}", self.suffix()),
        }
    }
}

impl Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ExportFormat::Table => "table",
            ExportFormat::Scatterplot => "scatterplot",
            ExportFormat::TreeMap => "treemap",
            ExportFormat::SimilarityMatrix => "similarity matrix",
            ExportFormat::Xgmml => "XGMML graph",
            ExportFormat::WordClouds => "word clouds",
        };
        f.write_str(name)
    }
}

/// Settings of the [`Exporter`]
///
/// # Examples
///
/// ```
/// use revigo_export::ExportOptions;
/// use revigo_export::wordcloud::Compression;
///
/// let options = ExportOptions::default()
///     .with_cutoff(0.5)
///     .with_enrichment_compression(Compression::None);
///
/// assert_eq!(options.cutoff(), Some(0.5));
/// assert_eq!(options.treemap_cutoff(), 0.1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportOptions {
    cutoff: Option<f64>,
    treemap_cutoff: f64,
    enrichment_compression: Compression,
    correlation_compression: Compression,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            cutoff: None,
            treemap_cutoff: TREEMAP_CUTOFF,
            enrichment_compression: Compression::SquareRoot,
            correlation_compression: Compression::None,
        }
    }
}

impl ExportOptions {
    /// Re-sorts Table and Scatterplot at `cutoff` instead of the cutoff of the job
    #[must_use]
    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = Some(cutoff);
        self
    }

    /// Sets the cutoff used to re-sort the TreeMap
    #[must_use]
    pub fn with_treemap_cutoff(mut self, cutoff: f64) -> Self {
        self.treemap_cutoff = cutoff;
        self
    }

    /// Sets the compression of the enrichment word weights
    #[must_use]
    pub fn with_enrichment_compression(mut self, compression: Compression) -> Self {
        self.enrichment_compression = compression;
        self
    }

    /// Sets the compression of the correlation word weights
    #[must_use]
    pub fn with_correlation_compression(mut self, compression: Compression) -> Self {
        self.correlation_compression = compression;
        self
    }

    /// The cutoff used for Table and Scatterplot, `None` uses the cutoff of the job
    pub fn cutoff(&self) -> Option<f64> {
        self.cutoff
    }

    /// The cutoff used to re-sort the TreeMap
    pub fn treemap_cutoff(&self) -> f64 {
        self.treemap_cutoff
    }

    /// Compression of the enrichment word weights
    pub fn enrichment_compression(&self) -> Compression {
        self.enrichment_compression
    }

    /// Compression of the correlation word weights
    pub fn correlation_compression(&self) -> Compression {
        self.correlation_compression
    }
}

/// A term with its resolved representative
pub(crate) struct Row<'a> {
    term: &'a Term,
    representative: Option<(GoTermId, &'a str)>,
}

#[cfg_attr(doc, aquamarine::aquamarine)]
/// Writes job results in all [`ExportFormat`]s
///
/// The `Exporter` needs an [`OntologyLookup`] to resolve representative
/// terms and a [`ClusterSort`] to order the terms by their clusters.
///
/// ```mermaid
/// graph LR
///     J[JobResult] --> V[Visualizer per namespace]
///     V -->|ClusterSort at job cutoff| T[Table / Scatterplot]
///     V -->|ClusterSort at 0.1 + dispensability filter| M[TreeMap]
///     V --> S[Similarity matrix]
///     V --> X[XGMML]
///     J -->|Enrichments / Correlations| W[Word clouds]
/// ```
///
/// # Examples
///
/// ```
/// use revigo_export::{
///     Exporter, JobResult, Namespace, Ontology, RepresentativeClusters,
///     Term, TermList, TermProperties, Visualizer,
/// };
///
/// let mut ontology = Ontology::default();
/// ontology.insert_term("GO:0008150", "biological_process", Namespace::BiologicalProcess).unwrap();
///
/// let terms = TermList::try_new(
///     Namespace::BiologicalProcess,
///     vec![Term::try_new("GO:0008150", "biological_process", TermProperties::default()).unwrap()],
/// ).unwrap();
/// let job = JobResult::new(1, 0.7).with_visualizer(Visualizer::new(terms));
///
/// let exporter = Exporter::new(&ontology, &RepresentativeClusters);
/// let mut out = Vec::new();
/// exporter.table(&job, Namespace::BiologicalProcess, &mut out).unwrap();
///
/// let table = String::from_utf8(out).unwrap();
/// assert_eq!(table.lines().count(), 2);
/// assert!(table.starts_with("TermID\tName\tValue\tLogSize"));
/// ```
pub struct Exporter<'a, O: ?Sized, C: ?Sized> {
    ontology: &'a O,
    clusters: &'a C,
    options: ExportOptions,
}

impl<'a, O, C> Exporter<'a, O, C>
where
    O: OntologyLookup + ?Sized,
    C: ClusterSort + ?Sized,
{
    /// Constructs a new `Exporter` with default [`ExportOptions`]
    pub fn new(ontology: &'a O, clusters: &'a C) -> Self {
        Self {
            ontology,
            clusters,
            options: ExportOptions::default(),
        }
    }

    /// Replaces the [`ExportOptions`]
    #[must_use]
    pub fn with_options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }

    /// The current [`ExportOptions`]
    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Writes all terms of `namespace`, grouped by cluster, as tab-separated table
    ///
    /// # Errors
    ///
    /// - The job has no data for `namespace`: [`ReduceError::MissingVisualizer`]
    /// - The terms have fewer user values than the job reports
    ///   or the cluster structure is invalid: [`ReduceError::InvalidInput`]
    /// - A representative cannot be resolved: [`ReduceError::UnresolvedRepresentative`]
    /// - Writing failed: [`ReduceError::Io`]
    pub fn table<W: Write>(&self, job: &JobResult, namespace: Namespace, writer: &mut W) -> ReduceResult<()> {
        let terms = self.sorted_terms(job, namespace, self.list_cutoff(job))?;
        let rows = self.rows(&terms)?;
        let user_values = self.user_values(job, &terms)?;
        table::write(writer, &rows, user_values)
    }

    /// Writes all terms of `namespace` with their 2-D coordinates
    ///
    /// # Errors
    ///
    /// Same as [`Exporter::table`]
    pub fn scatterplot<W: Write>(&self, job: &JobResult, namespace: Namespace, writer: &mut W) -> ReduceResult<()> {
        let terms = self.sorted_terms(job, namespace, self.list_cutoff(job))?;
        let rows = self.rows(&terms)?;
        scatterplot::write(writer, &rows)
    }

    /// Writes the non-redundant terms of `namespace` for a TreeMap
    ///
    /// The terms are sorted at the (very permissive) TreeMap cutoff and all
    /// terms that are eliminated at the cutoff of the job are omitted. Terms
    /// without a representative are always kept.
    ///
    /// # Errors
    ///
    /// Same as [`Exporter::table`]
    pub fn treemap<W: Write>(&self, job: &JobResult, namespace: Namespace, writer: &mut W) -> ReduceResult<()> {
        let terms = self.sorted_terms(job, namespace, self.options.treemap_cutoff)?;
        let rows = self.rows(&terms)?;
        let user_values = self.user_values(job, &terms)?;
        treemap::write(
            writer,
            &rows,
            user_values,
            self.options.treemap_cutoff,
            job.cutoff(),
        )
    }

    /// Writes the pairwise similarity scores of all terms of `namespace`
    ///
    /// # Errors
    ///
    /// - The job has no data or no matrix for `namespace`:
    ///   [`ReduceError::MissingVisualizer`], [`ReduceError::MissingArtifact`]
    /// - Writing failed: [`ReduceError::Io`]
    pub fn similarity_matrix<W: Write>(&self, job: &JobResult, namespace: Namespace, writer: &mut W) -> ReduceResult<()> {
        let visualizer = job.visualizer(namespace)?;
        let matrix = visualizer
            .matrix()
            .ok_or(ReduceError::MissingArtifact("similarity matrix", namespace))?;
        matrix::write(writer, visualizer.terms(), matrix)
    }

    /// Writes the graph of `namespace` as XGMML
    ///
    /// # Errors
    ///
    /// - The job has no data or no graph for `namespace`:
    ///   [`ReduceError::MissingVisualizer`], [`ReduceError::MissingArtifact`]
    /// - Writing failed: [`ReduceError::Io`]
    pub fn xgmml<W: Write>(&self, job: &JobResult, namespace: Namespace, writer: &mut W) -> ReduceResult<()> {
        let visualizer = job.visualizer(namespace)?;
        let graph = visualizer
            .graph()
            .ok_or(ReduceError::MissingArtifact("graph", namespace))?;
        xgmml::write(writer, graph)
    }

    /// Writes the word clouds of the job as JSON
    ///
    /// # Errors
    ///
    /// Writing failed: [`ReduceError::Io`] or [`ReduceError::Json`]
    pub fn word_clouds<W: Write>(&self, job: &JobResult, writer: &mut W) -> ReduceResult<()> {
        wordclouds::write(
            writer,
            job.enrichments(),
            job.correlations(),
            &self.options,
        )
    }

    /// Writes the export `format`
    ///
    /// `namespace` is ignored for [`ExportFormat::WordClouds`]
    ///
    /// # Errors
    ///
    /// See the individual export methods
    pub fn write<W: Write>(
        &self,
        format: ExportFormat,
        job: &JobResult,
        namespace: Namespace,
        writer: &mut W,
    ) -> ReduceResult<()> {
        debug!("Exporting {} of {} for job {}", format, namespace, job.id());
        match format {
            ExportFormat::Table => self.table(job, namespace, writer),
            ExportFormat::Scatterplot => self.scatterplot(job, namespace, writer),
            ExportFormat::TreeMap => self.treemap(job, namespace, writer),
            ExportFormat::SimilarityMatrix => self.similarity_matrix(job, namespace, writer),
            ExportFormat::Xgmml => self.xgmml(job, namespace, writer),
            ExportFormat::WordClouds => self.word_clouds(job, writer),
        }
    }

    /// Writes the export `format` into a new file at `path`
    ///
    /// The file is created (or truncated), written and flushed before this
    /// method returns. On error, the file might be incomplete.
    ///
    /// # Errors
    ///
    /// - The file cannot be created: [`ReduceError::CannotOpenFile`]
    /// - See the individual export methods
    pub fn export_file<P: AsRef<Path>>(
        &self,
        format: ExportFormat,
        job: &JobResult,
        namespace: Namespace,
        path: P,
    ) -> ReduceResult<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|err| ReduceError::CannotOpenFile(format!("{}: {err}", path.display())))?;
        let mut writer = BufWriter::new(file);
        self.write(format, job, namespace, &mut writer)?;
        // `BufWriter` ignores errors when it is dropped
        writer.flush()?;
        debug!("Wrote {}", path.display());
        Ok(())
    }

    /// Writes all available exports of `job` into `folder`
    ///
    /// Files are named `<prefix>_<namespace><suffix>`, see [`ExportFormat::file_name`].
    /// Exports that are not available, e.g. when a namespace has no similarity
    /// matrix, are skipped. A failing export does not stop the other exports.
    ///
    /// Returns the path and outcome of every attempted export.
    pub fn export_all<P: AsRef<Path>>(
        &self,
        job: &JobResult,
        folder: P,
        prefix: &str,
    ) -> Vec<(PathBuf, ReduceResult<()>)> {
        let folder = folder.as_ref();
        let mut outcomes = Vec::new();
        for visualizer in job.visualizers() {
            let namespace = visualizer.namespace();
            for format in ExportFormat::ALL.iter().filter(|f| f.is_per_namespace()) {
                let available = match format {
                    ExportFormat::SimilarityMatrix => visualizer.matrix().is_some(),
                    ExportFormat::Xgmml => visualizer.graph().is_some(),
                    _ => true,
                };
                if !available {
                    debug!("Skipping {} of {} for job {}", format, namespace, job.id());
                    continue;
                }
                let path = folder.join(format.file_name(prefix, Some(namespace)));
                let result = self.export_file(*format, job, namespace, &path);
                outcomes.push((path, result));
            }
        }

        if job.enrichments().is_some() || job.correlations().is_some() {
            let path = folder.join(ExportFormat::WordClouds.file_name(prefix, None));
            let result = self.export_file(
                ExportFormat::WordClouds,
                job,
                Namespace::BiologicalProcess,
                &path,
            );
            outcomes.push((path, result));
        }

        for (path, result) in &outcomes {
            if let Err(err) = result {
                warn!("Export to {} failed: {}", path.display(), err);
            }
        }
        outcomes
    }

    /// The cutoff for Table and Scatterplot
    fn list_cutoff(&self, job: &JobResult) -> f64 {
        self.options.cutoff.unwrap_or_else(|| job.cutoff())
    }

    fn sorted_terms(&self, job: &JobResult, namespace: Namespace, cutoff: f64) -> ReduceResult<TermList> {
        let visualizer = job.visualizer(namespace)?;
        self.clusters.sort_by_clusters(visualizer.terms(), cutoff)
    }

    /// Resolves the representatives of all terms before anything is written
    fn rows<'b>(&'b self, terms: &'b TermList) -> ReduceResult<Vec<Row<'b>>> {
        terms
            .iter()
            .map(|term| {
                let representative = match term.representative() {
                    Some(id) => Some((id, self.representative_name(term, id, terms.namespace())?)),
                    None => None,
                };
                Ok(Row {
                    term,
                    representative,
                })
            })
            .collect()
    }

    fn representative_name(&self, term: &Term, id: GoTermId, namespace: Namespace) -> ReduceResult<&'a str> {
        let (name, rep_namespace) =
            self.ontology
                .lookup(id)
                .ok_or(ReduceError::UnresolvedRepresentative {
                    term: term.id(),
                    representative: id,
                })?;
        if rep_namespace != namespace {
            return Err(ReduceError::NamespaceMismatch {
                term: id,
                expected: namespace,
            });
        }
        Ok(name)
    }

    /// Number of user values to export, checked against the terms
    fn user_values(&self, job: &JobResult, terms: &TermList) -> ReduceResult<usize> {
        let count = job.user_value_count();
        if !terms.is_empty() && terms.user_value_count() < count {
            return Err(ReduceError::InvalidInput(format!(
                "job {} reports {} user values, but the terms only have {}",
                job.id(),
                count,
                terms.user_value_count()
            )));
        }
        Ok(count)
    }
}
