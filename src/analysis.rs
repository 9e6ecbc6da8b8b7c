//! Trial orchestration for one analysis session.
//!
//! A session runs a fixed number of independent trials of the engine against
//! an immutable graph and a single start node. Every trial gets fresh engine
//! state, its result is appended to the session history, and the three report
//! files are updated before the next trial starts.

use std::fmt::{Debug, Display};
use std::path::PathBuf;

use log::info;
use num_traits::{Float, Zero};

use crate::algorithm::{ShortestPathAlgorithm, ShortestPathResult};
use crate::graph::Graph;
use crate::io::report;
use crate::{Error, NodeId, Result};

/// Locations of the three per-session report files
#[derive(Debug, Clone)]
pub struct ReportFiles {
    /// Per-destination shortest paths, rewritten every trial
    pub paths: PathBuf,

    /// One counter row per trial
    pub performance: PathBuf,

    /// Per-destination distance and predecessor chains, per trial
    pub details: PathBuf,
}

impl Default for ReportFiles {
    fn default() -> Self {
        ReportFiles {
            paths: PathBuf::from("paths.csv"),
            performance: PathBuf::from("performance.csv"),
            details: PathBuf::from("path_details.csv"),
        }
    }
}

/// Runs `trials` independent executions of `algorithm` from `source`,
/// writing the report files after each one.
///
/// The start node is validated here; the engine itself treats an unknown
/// source as an empty result rather than an error. Returns the per-trial
/// result history in execution order.
pub fn run_trials<W, G, A>(
    algorithm: &A,
    graph: &G,
    source: NodeId,
    trials: u32,
    reports: &ReportFiles,
) -> Result<Vec<ShortestPathResult<W>>>
where
    W: Float + Zero + Debug + Copy + Display,
    G: Graph<W>,
    A: ShortestPathAlgorithm<W, G>,
{
    if !graph.has_node(source) {
        return Err(Error::SourceNotFound(source));
    }

    let mut history = Vec::with_capacity(trials as usize);
    for trial in 1..=trials {
        let result = algorithm.compute_shortest_paths(graph, source)?;

        report::write_path_report(&reports.paths, graph, &result)?;
        report::append_performance_report(&reports.performance, &result, trial)?;
        report::append_detail_report(&reports.details, graph, &result, trial)?;

        info!(
            "{} trial {}/{} from node {}: {} comparisons, {} relaxations, {:?}",
            algorithm.name(),
            trial,
            trials,
            source,
            result.counters.comparisons,
            result.counters.relaxations,
            result.counters.elapsed
        );
        history.push(result);
    }

    Ok(history)
}
