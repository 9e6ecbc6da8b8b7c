use std::fs;
use std::io::Write;

use ordered_float::OrderedFloat;
use tempfile::tempdir;

use transit_paths::analysis::{run_trials, ReportFiles};
use transit_paths::graph::{Graph, MutableGraph};
use transit_paths::io::{adjacency, network};
use transit_paths::{Error, InstrumentedDijkstra, TransitGraph};

type Weight = OrderedFloat<f64>;

fn sample_graph() -> TransitGraph<Weight> {
    let mut graph = TransitGraph::new();
    graph.insert_edge(1, 2, 5, OrderedFloat(1.0));
    graph.insert_edge(2, 3, 5, OrderedFloat(1.0));
    graph.insert_edge(1, 3, 11, OrderedFloat(0.5));
    graph
}

#[test]
fn network_load_skips_malformed_records() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("network.csv");
    let mut file = fs::File::create(&path).unwrap();
    writeln!(file, "start;stop;attributes").unwrap();
    writeln!(file, "1;2;{{'duration_avg': 1.5, 'd': 100}}").unwrap();
    writeln!(file, "not a record at all").unwrap();
    writeln!(file, "3;4;{{'lines': ['M49']}}").unwrap();
    writeln!(file, "2;3;{{'d': 250, 'duration_avg': 2.25}}").unwrap();
    drop(file);

    let mut graph: TransitGraph<Weight> = TransitGraph::new();
    let summary = network::load_network(&path, &mut graph).unwrap();

    assert_eq!(summary.records, 2);
    assert_eq!(summary.skipped, 2);
    assert_eq!(graph.edge_count(), 2);
    assert_eq!(graph.edge_weights(1, 2), Some((100, OrderedFloat(1.5))));
    assert_eq!(graph.edge_weights(2, 3), Some((250, OrderedFloat(2.25))));
    // Nodes of the unparseable record never made it in.
    assert!(!graph.has_node(4));
}

#[test]
fn missing_network_file_is_reported_not_fatal() {
    let dir = tempdir().unwrap();
    let mut graph: TransitGraph<Weight> = TransitGraph::new();
    let err = network::load_network(&dir.path().join("absent.csv"), &mut graph).unwrap_err();

    assert!(matches!(err, Error::Io(_)));
    assert!(!err.is_fatal());
}

#[test]
fn adjacency_file_round_trips() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("adjacency.csv");

    let original = sample_graph();
    adjacency::write_adjacency(&path, &original).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, "1;[2,5,1.00];[3,11,0.50]\n2;[3,5,1.00]\n");

    let mut reloaded: TransitGraph<Weight> = TransitGraph::new();
    let summary = adjacency::read_adjacency(&path, &mut reloaded).unwrap();

    assert_eq!(summary.records, 3);
    assert_eq!(summary.skipped, 0);
    assert_eq!(reloaded.node_count(), original.node_count());
    assert_eq!(reloaded.edge_count(), original.edge_count());
    for node in original.nodes() {
        for (target, distance, time) in original.outgoing_edges(node) {
            assert_eq!(reloaded.edge_weights(node, target), Some((distance, time)));
        }
    }
}

#[test]
fn adjacency_reader_registers_nodes_with_bad_groups() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("adjacency.csv");
    fs::write(&path, "7;[8,1,1.00];[broken\nnot-a-node;[9,1,1.00]\n").unwrap();

    let mut graph: TransitGraph<Weight> = TransitGraph::new();
    let summary = adjacency::read_adjacency(&path, &mut graph).unwrap();

    assert_eq!(summary.records, 1);
    assert_eq!(summary.skipped, 2);
    assert!(graph.has_node(7));
    assert!(graph.has_node(8));
    assert!(!graph.has_node(9));
}

#[test]
fn trial_reports_are_written_and_appended() {
    let dir = tempdir().unwrap();
    let reports = ReportFiles {
        paths: dir.path().join("paths.csv"),
        performance: dir.path().join("performance.csv"),
        details: dir.path().join("path_details.csv"),
    };

    let mut graph = sample_graph();
    // An isolated island so the reports carry an unreachable destination.
    graph.insert_edge(50, 60, 2, OrderedFloat(0.1));

    let engine = InstrumentedDijkstra::new();
    let history = run_trials(&engine, &graph, 1, 3, &reports).unwrap();
    assert_eq!(history.len(), 3);

    let paths = fs::read_to_string(&reports.paths).unwrap();
    let mut lines = paths.lines();
    assert_eq!(lines.next(), Some("Start Node;End Node;Path;Distance;Time"));
    assert_eq!(lines.next(), Some("1;2;1->2;5;1.00"));
    assert_eq!(lines.next(), Some("1;3;1->2->3;10;2.00"));
    assert_eq!(lines.next(), Some("1;50;No path;;"));
    assert_eq!(lines.next(), Some("1;60;No path;;"));
    assert_eq!(lines.next(), None);

    let performance = fs::read_to_string(&reports.performance).unwrap();
    let lines: Vec<&str> = performance.lines().collect();
    assert_eq!(
        lines[0],
        "Start Node,Trial,Execution Time (ms),Comparisons,Relaxations,Auxiliary Size,Avg Parent Changes"
    );
    // Header plus one row per trial.
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("1,1,"));
    assert!(lines[3].starts_with("1,3,"));

    // Counter columns are identical across trials of an unchanged graph.
    let counters = |row: &str| {
        row.split(',')
            .skip(3)
            .map(str::to_string)
            .collect::<Vec<_>>()
    };
    assert_eq!(counters(lines[1]), counters(lines[2]));
    assert_eq!(counters(lines[1]), counters(lines[3]));

    let details = fs::read_to_string(&reports.details).unwrap();
    let lines: Vec<&str> = details.lines().collect();
    assert_eq!(lines[0], "start node,trial,distance,parent");
    // One row per non-source destination per trial.
    assert_eq!(lines.len(), 1 + 4 * 3);
    assert_eq!(lines[1], "1,1,\"{0, 5}\",\"{[], [1]}\"");
    assert_eq!(lines[2], "1,1,\"{0, 5, 10}\",\"{[], [1], [2]}\"");
    assert_eq!(lines[3], "1,1,{},{}");
    assert_eq!(lines[5], "1,2,\"{0, 5}\",\"{[], [1]}\"");
}

#[test]
fn unknown_start_node_refuses_to_run() {
    let dir = tempdir().unwrap();
    let reports = ReportFiles {
        paths: dir.path().join("paths.csv"),
        performance: dir.path().join("performance.csv"),
        details: dir.path().join("path_details.csv"),
    };

    let graph = sample_graph();
    let engine = InstrumentedDijkstra::new();
    let err = run_trials(&engine, &graph, 42, 1, &reports).unwrap_err();

    assert!(matches!(err, Error::SourceNotFound(42)));
    // Nothing was computed, nothing was written.
    assert!(!reports.paths.exists());
}
