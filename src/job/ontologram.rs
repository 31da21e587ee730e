//! A simple graph of GO terms connected by their similarity
use std::fmt::Display;
use std::io::Write;

use crate::format::Float;
use crate::job::GraphExport;
use crate::matrix::SimilarityMatrix;
use crate::term::{GoTermId, TermList};
use crate::ReduceResult;

/// A term in an [`Ontologram`]
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: GoTermId,
    name: String,
    value: f64,
    log_size: f64,
    uniqueness: f64,
}

impl Node {
    /// Constructs a new `Node`
    pub fn new(id: GoTermId, name: &str, value: f64, log_size: f64, uniqueness: f64) -> Self {
        Self {
            id,
            name: name.to_string(),
            value,
            log_size,
            uniqueness,
        }
    }

    /// The ID of the term
    pub fn id(&self) -> GoTermId {
        self.id
    }
}

/// An undirected, weighted connection of two [`Node`]s
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    source: GoTermId,
    target: GoTermId,
    similarity: f64,
}

impl Edge {
    /// Constructs a new `Edge`
    pub fn new(source: GoTermId, target: GoTermId, similarity: f64) -> Self {
        Self {
            source,
            target,
            similarity,
        }
    }

    /// The similarity of both terms
    pub fn similarity(&self) -> f64 {
        self.similarity
    }
}

/// Graph of the non-redundant terms of a job, written as XGMML
///
/// # Examples
///
/// ```
/// use revigo_export::{GraphExport, Ontologram};
/// use revigo_export::job::{Edge, Node};
///
/// let mut graph = Ontologram::new("Example");
/// graph.add_node(Node::new(8150u32.into(), "biological_process", -3.0, 5.1, 0.9));
/// graph.add_node(Node::new(7049u32.into(), "cell cycle", -2.1, 3.2, 0.8));
/// graph.add_edge(Edge::new(8150u32.into(), 7049u32.into(), 0.42));
///
/// let mut out = Vec::new();
/// graph.write_xgmml(&mut out).unwrap();
/// let xml = String::from_utf8(out).unwrap();
/// assert!(xml.contains("<node label=\"GO:0007049\" id=\"7049\">"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Ontologram {
    label: String,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Ontologram {
    /// Constructs an empty graph
    pub fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            ..Default::default()
        }
    }

    /// Builds the graph of all terms that are not eliminated at `cutoff`
    ///
    /// Terms without a representative are always part of the graph.
    /// Two terms are connected if their similarity is at least `min_similarity`.
    /// `matrix` must follow the order of `terms`.
    pub fn from_terms(
        label: &str,
        terms: &TermList,
        matrix: &SimilarityMatrix,
        cutoff: f64,
        min_similarity: f64,
    ) -> Self {
        let mut graph = Self::new(label);
        let kept: Vec<usize> = terms
            .iter()
            .enumerate()
            .filter(|(_, term)| term.representative().is_none() || !term.is_eliminated(cutoff))
            .map(|(idx, _)| idx)
            .collect();

        for &idx in &kept {
            if let Some(term) = terms.get(idx) {
                let props = term.properties();
                graph.add_node(Node::new(
                    term.id(),
                    term.name(),
                    props.value(),
                    props.log_size(),
                    props.uniqueness(),
                ));
            }
        }

        for (pos, &a) in kept.iter().enumerate() {
            for &b in &kept[pos + 1..] {
                let (Some(term_a), Some(term_b), Some(similarity)) =
                    (terms.get(a), terms.get(b), matrix.get(a, b))
                else {
                    continue;
                };
                if similarity >= min_similarity {
                    graph.add_edge(Edge::new(term_a.id(), term_b.id(), similarity));
                }
            }
        }
        graph
    }

    /// Adds a node
    pub fn add_node(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Adds an edge
    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    /// All nodes
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}

impl GraphExport for Ontologram {
    fn write_xgmml(&self, writer: &mut dyn Write) -> ReduceResult<()> {
        writeln!(
            writer,
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>"
        )?;
        writeln!(
            writer,
            "<graph label=\"{}\" directed=\"0\" xmlns=\"http://www.cs.rpi.edu/XGMML\">",
            XmlEscaped(&self.label)
        )?;
        for node in &self.nodes {
            writeln!(
                writer,
                "  <node label=\"{}\" id=\"{}\">",
                node.id,
                node.id.as_u32()
            )?;
            writeln!(
                writer,
                "    <att type=\"string\" name=\"description\" value=\"{}\"/>",
                XmlEscaped(&node.name)
            )?;
            writeln!(
                writer,
                "    <att type=\"real\" name=\"value\" value=\"{}\"/>",
                Float(node.value)
            )?;
            writeln!(
                writer,
                "    <att type=\"real\" name=\"log_size\" value=\"{}\"/>",
                Float(node.log_size)
            )?;
            writeln!(
                writer,
                "    <att type=\"real\" name=\"uniqueness\" value=\"{}\"/>",
                Float(node.uniqueness)
            )?;
            writeln!(writer, "  </node>")?;
        }
        for edge in &self.edges {
            let (source, target) = (edge.source.as_u32(), edge.target.as_u32());
            writeln!(
                writer,
                "  <edge label=\"{source} (similar) {target}\" source=\"{source}\" target=\"{target}\">"
            )?;
            writeln!(
                writer,
                "    <att type=\"real\" name=\"similarity\" value=\"{}\"/>",
                Float(edge.similarity)
            )?;
            writeln!(writer, "  </edge>")?;
        }
        writeln!(writer, "</graph>")?;
        Ok(())
    }
}

/// Escapes text for use in XML attributes
struct XmlEscaped<'a>(&'a str);

impl Display for XmlEscaped<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for c in self.0.chars() {
            match c {
                '&' => f.write_str("&amp;")?,
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&apos;")?,
                c => write!(f, "{c}")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Namespace, Term, TermProperties};

    #[test]
    fn escape_xml() {
        assert_eq!(
            XmlEscaped("5' & 3' <ends> \"x\"").to_string(),
            "5&apos; &amp; 3&apos; &lt;ends&gt; &quot;x&quot;"
        );
    }

    #[test]
    fn graph_from_terms() {
        let terms = TermList::try_new(
            Namespace::BiologicalProcess,
            vec![
                Term::try_new(1u32, "a", TermProperties::default()).unwrap(),
                Term::try_new(
                    2u32,
                    "b",
                    TermProperties::default()
                        .with_dispensability(0.9)
                        .with_representative(1u32),
                )
                .unwrap(),
                Term::try_new(3u32, "c", TermProperties::default()).unwrap(),
                Term::try_new(4u32, "d", TermProperties::default()).unwrap(),
            ],
        )
        .unwrap();
        let matrix = SimilarityMatrix::from_fn(4, |a, b| if a + b == 4 { 0.8 } else { 0.1 });

        let graph = Ontologram::from_terms("test", &terms, &matrix, 0.7, 0.5);
        let ids: Vec<u32> = graph.nodes().iter().map(|n| n.id().as_u32()).collect();
        assert_eq!(ids, vec![1, 3, 4]);
        // the only similar pair (idx 1 and 3) contains the eliminated term
        assert!(graph.edges().is_empty());

        let graph = Ontologram::from_terms("test", &terms, &matrix, 0.7, 0.1);
        assert_eq!(graph.edges().len(), 3);
    }

    #[test]
    fn dispensable_node_without_representative() {
        let terms = TermList::try_new(
            Namespace::BiologicalProcess,
            vec![
                Term::try_new(1u32, "a", TermProperties::default()).unwrap(),
                Term::try_new(2u32, "b", TermProperties::default().with_dispensability(0.9)).unwrap(),
            ],
        )
        .unwrap();
        let matrix = SimilarityMatrix::from_fn(2, |_, _| 1.0);
        let graph = Ontologram::from_terms("test", &terms, &matrix, 0.7, 0.5);
        let ids: Vec<u32> = graph.nodes().iter().map(|n| n.id().as_u32()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn write_document() {
        let mut graph = Ontologram::new("a & b");
        graph.add_node(Node::new(1u32.into(), "x", 1.0, 2.0, 0.5));
        graph.add_node(Node::new(2u32.into(), "y", 1.5, 2.0, 0.5));
        graph.add_edge(Edge::new(1u32.into(), 2u32.into(), 0.25));

        let mut out = Vec::new();
        graph.write_xgmml(&mut out).unwrap();
        let xml = String::from_utf8(out).unwrap();
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<graph label=\"a &amp; b\""));
        assert!(xml.contains("<att type=\"real\" name=\"value\" value=\"1.5\"/>"));
        assert!(xml.contains("source=\"1\" target=\"2\""));
        assert!(xml.contains("name=\"similarity\" value=\"0.25\""));
        assert!(xml.trim_end().ends_with("</graph>"));
    }
}
