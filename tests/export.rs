use std::fs;
use std::path::PathBuf;

use rayon::prelude::*;

use revigo_export::job::{Edge, Node};
use revigo_export::{
    ExportFormat, ExportOptions, Exporter, GoTermId, JobResult, Namespace, Ontologram, Ontology,
    ReduceError, RepresentativeClusters, SimilarityMatrix, Term, TermList, TermProperties,
    Visualizer, WeightedWord,
};

/// (id, name, value, frequency, uniqueness, dispensability, representative)
const BP_TERMS: [(u32, &str, f64, f64, f64, f64, Option<u32>); 6] = [
    (8150, "biological_process", -5.2, 0.5, 0.95, 0.0, None),
    (9987, "cellular process", -3.1, 0.25, 0.4, 0.85, Some(8150)),
    (7049, "cell cycle", -4.0, 0.125, 0.7, 0.05, Some(8150)),
    (6915, "apoptotic process", -2.5, 0.0625, 0.8, 0.0, None),
    (12501, "programmed cell death", -2.0, 0.0625, 0.3, 0.6, Some(6915)),
    (8219, "cell death", -1.5, 0.125, 0.2, 0.75, Some(6915)),
];

fn ontology() -> Ontology {
    let mut ontology = Ontology::default();
    for (id, name, ..) in BP_TERMS {
        ontology
            .insert_term(id, name, Namespace::BiologicalProcess)
            .unwrap();
    }
    ontology
        .insert_term("GO:0005737", "cytoplasm", Namespace::CellularComponent)
        .unwrap();
    ontology
}

fn bp_terms() -> TermList {
    let terms = BP_TERMS
        .iter()
        .enumerate()
        .map(|(idx, (id, name, value, freq, uniq, disp, rep))| {
            let mut props = TermProperties::default()
                .with_value(*value)
                .with_log_size(1.0 + idx as f64)
                .with_frequency(*freq)
                .with_uniqueness(*uniq)
                .with_dispensability(*disp)
                .with_coordinates(&[idx as f64, 0.5 - idx as f64])
                .with_user_values(vec![idx as f64 * 10.0, 0.5]);
            if let Some(rep) = rep {
                props = props.with_representative(*rep);
            }
            Term::try_new(*id, name, props).unwrap()
        })
        .collect();
    TermList::try_new(Namespace::BiologicalProcess, terms).unwrap()
}

fn job() -> JobResult {
    let terms = bp_terms();
    let matrix = SimilarityMatrix::from_fn(terms.len(), |a, b| {
        if a == b {
            1.0
        } else {
            1.0 / (1 + a + b) as f64
        }
    });
    let graph = Ontologram::from_terms("Example", &terms, &matrix, 0.7, 0.2);
    let visualizer = Visualizer::new(terms)
        .with_matrix(matrix)
        .unwrap()
        .with_graph(graph);

    let cc = TermList::try_new(
        Namespace::CellularComponent,
        vec![Term::try_new(
            "GO:0005737",
            "cytoplasm",
            TermProperties::default()
                .with_frequency(0.4)
                .with_user_values(vec![1.0, 2.0]),
        )
        .unwrap()],
    )
    .unwrap();

    JobResult::new(1, 0.7)
        .with_min_columns(3)
        .with_visualizer(visualizer)
        .with_visualizer(Visualizer::new(cc))
        .with_enrichments(vec![
            WeightedWord::new("cell", 16.0),
            WeightedWord::new("death", 4.0),
            WeightedWord::new("process", 1.0),
        ])
        .with_correlations(vec![WeightedWord::new("cycle", 0.5)])
}

fn export(format: ExportFormat, job: &JobResult, namespace: Namespace) -> String {
    let ontology = ontology();
    let exporter = Exporter::new(&ontology, &RepresentativeClusters);
    let mut out = Vec::new();
    exporter.write(format, job, namespace, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn temp_folder(name: &str) -> PathBuf {
    let folder = std::env::temp_dir().join(format!(
        "revigo-export-{}-{}",
        name,
        std::process::id()
    ));
    fs::create_dir_all(&folder).unwrap();
    folder
}

#[test]
fn table_rows() {
    let job = job();
    let table = export(ExportFormat::Table, &job, Namespace::BiologicalProcess);
    let lines: Vec<&str> = table.lines().collect();

    assert_eq!(lines.len(), BP_TERMS.len() + 1);
    assert_eq!(
        lines[0],
        "TermID\tName\tValue\tUserValue_0\tUserValue_1\tLogSize\tFrequency\tUniqueness\tDispensability\tRepresentative"
    );
    for line in &lines {
        assert_eq!(line.split('\t').count(), 10, "{line}");
    }

    // eliminated terms follow their representative
    let ids: Vec<&str> = lines[1..]
        .iter()
        .map(|line| line.split('\t').next().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec![
            "\"GO:0008150\"",
            "\"GO:0009987\"",
            "\"GO:0007049\"",
            "\"GO:0006915\"",
            "\"GO:0008219\"",
            "\"GO:0012501\"",
        ]
    );

    assert_eq!(
        lines[2],
        "\"GO:0009987\"\t\"cellular process\"\t-3.1\t10\t0.5\t2\t25\t0.4\t0.85\t8150"
    );
    assert!(lines[1].ends_with("\t0.95\t0\tnull"));
}

#[test]
fn table_parses_back() {
    let job = job();
    let table = export(ExportFormat::Table, &job, Namespace::BiologicalProcess);
    let terms = bp_terms();

    for line in table.lines().skip(1) {
        let fields: Vec<&str> = line.split('\t').collect();
        let id = GoTermId::try_from(fields[0].trim_matches('"')).unwrap();
        let term = terms.term(id).unwrap();
        assert_eq!(fields[1].trim_matches('"'), term.name());
        assert_eq!(fields[2].parse::<f64>().unwrap(), term.properties().value());
        assert_eq!(
            fields[8].parse::<f64>().unwrap(),
            term.properties().dispensability()
        );
        match term.representative() {
            Some(rep) => assert_eq!(fields[9].parse::<u32>().unwrap(), rep.as_u32()),
            None => assert_eq!(fields[9], "null"),
        }
    }
}

#[test]
fn scatterplot_has_coordinates() {
    let job = job();
    let plot = export(ExportFormat::Scatterplot, &job, Namespace::BiologicalProcess);
    let lines: Vec<&str> = plot.lines().collect();
    assert_eq!(lines.len(), BP_TERMS.len() + 1);
    assert!(lines[0].contains("\tPC_0\tPC_1\t"));
    assert!(!lines[0].contains("UserValue"));
    // GO:0009987 is the second input term
    assert!(lines[2].ends_with("\t1\t-0.5\t8150"));
}

#[test]
fn treemap_skips_eliminated_terms() {
    let job = job();
    let treemap = export(ExportFormat::TreeMap, &job, Namespace::BiologicalProcess);
    let lines: Vec<&str> = treemap.lines().collect();

    assert!(lines[..4].iter().all(|line| line.starts_with('#')));
    assert_eq!(
        lines[4],
        "TermID\tName\tFrequency\tValue\tUserValue_0\tUserValue_1\tUniqueness\tDispensability\tRepresentative"
    );

    let rows = &lines[5..];
    let kept = BP_TERMS
        .iter()
        .filter(|(.., disp, _)| *disp <= job.cutoff())
        .count();
    assert_eq!(rows.len(), kept);
    assert!(!treemap.contains("GO:0009987"));
    assert!(!treemap.contains("GO:0008219"));

    // sorted at 0.1, so programmed cell death follows apoptotic process
    let ids: Vec<&str> = rows
        .iter()
        .map(|line| line.split('\t').next().unwrap())
        .collect();
    assert_eq!(
        ids,
        vec![
            "\"GO:0008150\"",
            "\"GO:0007049\"",
            "\"GO:0006915\"",
            "\"GO:0012501\"",
        ]
    );
    assert!(rows[1].ends_with("\t0.7\t0.05\t\"biological_process\""));
    assert!(rows[0].ends_with("\tnull"));
}

#[test]
fn custom_treemap_cutoff() {
    let job = job();
    let ontology = ontology();
    let exporter = Exporter::new(&ontology, &RepresentativeClusters)
        .with_options(ExportOptions::default().with_treemap_cutoff(0.4));
    let mut out = Vec::new();
    exporter
        .treemap(&job, Namespace::BiologicalProcess, &mut out)
        .unwrap();
    let treemap = String::from_utf8(out).unwrap();
    assert!(treemap.contains("(c=0.40)"));
}

#[test]
fn similarity_matrix() {
    let job = job();
    let matrix = export(
        ExportFormat::SimilarityMatrix,
        &job,
        Namespace::BiologicalProcess,
    );
    let lines: Vec<&str> = matrix.lines().collect();
    assert_eq!(lines.len(), BP_TERMS.len() + 1);
    for line in &lines {
        assert_eq!(line.split('\t').count(), BP_TERMS.len() + 1);
    }
    assert!(lines[0].starts_with("\tGO:0008150\tGO:0009987"));
    assert_eq!(lines[1], "GO:0008150\t1\t0.5\t0.3333333333333333\t0.25\t0.2\t0.16666666666666666");
}

#[test]
fn xgmml_document() {
    let job = job();
    let xml = export(ExportFormat::Xgmml, &job, Namespace::BiologicalProcess);
    assert!(xml.starts_with("<?xml"));
    assert!(!xml.contains("GO:0009987"));
    assert!(xml.contains("<node label=\"GO:0008150\" id=\"8150\">"));
}

#[test]
fn custom_graph() {
    let mut graph = Ontologram::new("custom");
    graph.add_node(Node::new(5737u32.into(), "cytoplasm", 0.0, 1.0, 1.0));
    graph.add_edge(Edge::new(5737u32.into(), 5737u32.into(), 1.0));
    let job = JobResult::new(3, 0.5).with_visualizer(
        Visualizer::new(TermList::empty(Namespace::CellularComponent)).with_graph(graph),
    );
    let xml = export(ExportFormat::Xgmml, &job, Namespace::CellularComponent);
    assert!(xml.contains("label=\"custom\""));
}

#[test]
fn word_clouds() {
    let job = job();
    let json = export(ExportFormat::WordClouds, &job, Namespace::BiologicalProcess);
    assert_eq!(
        json,
        r#"{"Enrichments":[{"Word":"cell","Size":9},{"Word":"death","Size":4},{"Word":"process","Size":1}],"Correlations":[{"Word":"cycle","Size":1}]}"#
    );
}

#[test]
fn missing_artifacts() {
    let job = job();
    let ontology = ontology();
    let exporter = Exporter::new(&ontology, &RepresentativeClusters);
    let mut out = Vec::new();

    assert!(matches!(
        exporter.similarity_matrix(&job, Namespace::CellularComponent, &mut out),
        Err(ReduceError::MissingArtifact(_, Namespace::CellularComponent))
    ));
    assert!(matches!(
        exporter.xgmml(&job, Namespace::CellularComponent, &mut out),
        Err(ReduceError::MissingArtifact(_, Namespace::CellularComponent))
    ));
    assert!(matches!(
        exporter.table(&job, Namespace::MolecularFunction, &mut out),
        Err(ReduceError::MissingVisualizer(Namespace::MolecularFunction))
    ));
    assert!(out.is_empty());
}

#[test]
fn unresolved_representative() {
    let job = job();
    let mut ontology = Ontology::default();
    ontology
        .insert_term(8150u32, "biological_process", Namespace::BiologicalProcess)
        .unwrap();
    let exporter = Exporter::new(&ontology, &RepresentativeClusters);

    let mut out = Vec::new();
    let res = exporter.table(&job, Namespace::BiologicalProcess, &mut out);
    assert!(matches!(
        res,
        Err(ReduceError::UnresolvedRepresentative { .. })
    ));
    // nothing is written before all representatives are resolved
    assert!(out.is_empty());
}

#[test]
fn representative_from_other_namespace() {
    let job = job();
    let mut ontology = ontology();
    ontology
        .insert_term(6915u32, "apoptotic process", Namespace::MolecularFunction)
        .unwrap();
    let exporter = Exporter::new(&ontology, &RepresentativeClusters);
    let mut out = Vec::new();
    assert!(matches!(
        exporter.treemap(&job, Namespace::BiologicalProcess, &mut out),
        Err(ReduceError::NamespaceMismatch { .. })
    ));
}

#[test]
fn too_few_user_values() {
    let job = job().with_min_columns(4);
    let ontology = ontology();
    let exporter = Exporter::new(&ontology, &RepresentativeClusters);
    let mut out = Vec::new();
    assert!(matches!(
        exporter.table(&job, Namespace::BiologicalProcess, &mut out),
        Err(ReduceError::InvalidInput(_))
    ));
}

#[test]
fn exports_are_independent() {
    let job = job();
    let before = export(ExportFormat::Table, &job, Namespace::BiologicalProcess);
    export(ExportFormat::TreeMap, &job, Namespace::BiologicalProcess);
    let after = export(ExportFormat::Table, &job, Namespace::BiologicalProcess);
    assert_eq!(before, after);

    let input_order: Vec<u32> = job
        .visualizer(Namespace::BiologicalProcess)
        .unwrap()
        .terms()
        .iter()
        .map(|term| term.id().as_u32())
        .collect();
    let expected: Vec<u32> = BP_TERMS.iter().map(|t| t.0).collect();
    assert_eq!(input_order, expected);
}

#[test]
fn parallel_exports() {
    let job = job();
    let ontology = ontology();
    let exporter = Exporter::new(&ontology, &RepresentativeClusters);

    let serial: Vec<Vec<u8>> = ExportFormat::ALL
        .iter()
        .map(|format| {
            let mut out = Vec::new();
            exporter
                .write(*format, &job, Namespace::BiologicalProcess, &mut out)
                .unwrap();
            out
        })
        .collect();

    let parallel: Vec<Vec<u8>> = ExportFormat::ALL[..]
        .par_iter()
        .map(|format| {
            let mut out = Vec::new();
            exporter
                .write(*format, &job, Namespace::BiologicalProcess, &mut out)
                .unwrap();
            out
        })
        .collect();

    assert_eq!(serial, parallel);
}

#[test]
fn export_all_files() {
    let job = job();
    let ontology = ontology();
    let exporter = Exporter::new(&ontology, &RepresentativeClusters);
    let folder = temp_folder("all");

    let outcomes = exporter.export_all(&job, &folder, "Example1");
    assert!(outcomes.iter().all(|(_, result)| result.is_ok()));

    let mut names: Vec<String> = outcomes
        .iter()
        .map(|(path, _)| path.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "Example1_BPCytoscape.xgmml",
            "Example1_BPScatterplot.tsv",
            "Example1_BPSimilarityMatrix.tsv",
            "Example1_BPTable.tsv",
            "Example1_BPTreeMap.tsv",
            "Example1_CCScatterplot.tsv",
            "Example1_CCTable.tsv",
            "Example1_CCTreeMap.tsv",
            "Example1_WordClouds.json",
        ]
    );

    let table = fs::read_to_string(folder.join("Example1_BPTable.tsv")).unwrap();
    assert_eq!(
        table,
        export(ExportFormat::Table, &job, Namespace::BiologicalProcess)
    );
    let cc = fs::read_to_string(folder.join("Example1_CCTable.tsv")).unwrap();
    assert!(cc.contains("\"GO:0005737\"\t\"cytoplasm\"\t0\t1\t2\t0\t40\t0\t0\tnull"));

    fs::remove_dir_all(&folder).unwrap();
}

#[test]
fn export_all_continues_after_failure() {
    let job = job();
    // representatives of BP terms cannot be resolved
    let mut ontology = Ontology::default();
    ontology
        .insert_term("GO:0005737", "cytoplasm", Namespace::CellularComponent)
        .unwrap();
    let exporter = Exporter::new(&ontology, &RepresentativeClusters);
    let folder = temp_folder("failure");

    let outcomes = exporter.export_all(&job, &folder, "Broken");
    let failed: Vec<String> = outcomes
        .iter()
        .filter(|(_, result)| result.is_err())
        .map(|(path, _)| path.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(
        failed,
        vec![
            "Broken_BPTable.tsv",
            "Broken_BPScatterplot.tsv",
            "Broken_BPTreeMap.tsv",
        ]
    );
    assert!(folder.join("Broken_BPSimilarityMatrix.tsv").is_file());
    assert!(folder.join("Broken_CCTable.tsv").is_file());
    assert!(folder.join("Broken_WordClouds.json").is_file());

    fs::remove_dir_all(&folder).unwrap();
}

#[test]
fn cannot_open_file() {
    let job = job();
    let ontology = ontology();
    let exporter = Exporter::new(&ontology, &RepresentativeClusters);
    let folder = temp_folder("missing");
    let path = folder.join("no-such-folder").join("x.tsv");
    let res = exporter.export_file(
        ExportFormat::Table,
        &job,
        Namespace::BiologicalProcess,
        &path,
    );
    assert!(matches!(res, Err(ReduceError::CannotOpenFile(_))));

    fs::remove_dir_all(&folder).unwrap();
}
