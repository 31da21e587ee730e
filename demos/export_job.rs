//! Runs three small jobs in the background and exports all their results
//!
//! ```bash
//! cargo run --example export_job -- /tmp/revigo
//! ```
use std::path::PathBuf;

use revigo_export::{
    Exporter, JobQueue, JobResult, Namespace, Ontologram, Ontology, RepresentativeClusters,
    SimilarityMatrix, Term, TermList, TermProperties, Visualizer, WeightedWord,
};

/// (id, name, namespace)
const TERMS: [(u32, &str, Namespace); 8] = [
    (8150, "biological_process", Namespace::BiologicalProcess),
    (9987, "cellular process", Namespace::BiologicalProcess),
    (7049, "cell cycle", Namespace::BiologicalProcess),
    (51301, "cell division", Namespace::BiologicalProcess),
    (5575, "cellular_component", Namespace::CellularComponent),
    (5737, "cytoplasm", Namespace::CellularComponent),
    (3674, "molecular_function", Namespace::MolecularFunction),
    (5488, "binding", Namespace::MolecularFunction),
];

fn ontology() -> Ontology {
    let mut ontology = Ontology::default();
    for (id, name, namespace) in TERMS {
        ontology.insert_term(id, name, namespace).unwrap();
    }
    ontology
}

/// Stand-in for the job engine: the first term of every namespace
/// represents all others
fn run_engine(id: u32, cutoff: f64) -> JobResult {
    let mut job = JobResult::new(id, cutoff)
        .with_min_columns(2)
        .with_enrichments(vec![
            WeightedWord::new("cell", 9.0),
            WeightedWord::new("cycle", 4.0),
            WeightedWord::new("binding", 1.0),
        ]);

    for namespace in Namespace::ALL {
        let members: Vec<(u32, &str)> = TERMS
            .iter()
            .filter(|term| term.2 == namespace)
            .map(|term| (term.0, term.1))
            .collect();
        let head = members[0].0;
        let terms = members
            .iter()
            .enumerate()
            .map(|(idx, (term_id, name))| {
                let mut props = TermProperties::default()
                    .with_value(-(idx as f64) - 1.5)
                    .with_log_size(4.0 - idx as f64)
                    .with_frequency(0.5 / (idx + 1) as f64)
                    .with_uniqueness(1.0 - idx as f64 / 10.0)
                    .with_coordinates(&[idx as f64, -(id as f64)])
                    .with_user_values(vec![id as f64]);
                if idx > 0 {
                    props = props
                        .with_dispensability(idx as f64 / 4.0)
                        .with_representative(head);
                }
                Term::try_new(*term_id, name, props).unwrap()
            })
            .collect();
        let terms = TermList::try_new(namespace, terms).unwrap();
        let matrix = SimilarityMatrix::from_fn(terms.len(), |a, b| if a == b { 1.0 } else { 0.4 });
        let graph = Ontologram::from_terms(namespace.obo_name(), &terms, &matrix, cutoff, 0.3);
        let visualizer = Visualizer::new(terms)
            .with_matrix(matrix)
            .unwrap()
            .with_graph(graph);
        job = job.with_visualizer(visualizer);
    }
    job
}

fn main() {
    simple_logger::init_with_env().unwrap();

    let folder = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(std::env::temp_dir);
    std::fs::create_dir_all(&folder).unwrap();

    let ontology = ontology();
    let exporter = Exporter::new(&ontology, &RepresentativeClusters);

    let mut queue = JobQueue::new();
    for (id, cutoff) in [(1, 0.7), (2, 0.5), (3, 0.4)] {
        queue.spawn(id, move || Ok(run_engine(id, cutoff))).unwrap();
    }

    while let Some(result) = queue.next_finished() {
        let job = match result {
            Ok(job) => job,
            Err(err) => {
                println!("Error: {}", err);
                continue;
            }
        };
        println!(
            "Job {} has finished processing the data in {:.3} seconds",
            job.id(),
            job.execution_time().as_secs_f64()
        );
        let prefix = format!("Example{}", job.id());
        for (path, outcome) in exporter.export_all(&job, &folder, &prefix) {
            match outcome {
                Ok(()) => println!("Saved {}", path.display()),
                Err(err) => println!("Error: {}", err),
            }
        }
    }
}
