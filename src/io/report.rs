//! Per-trial report writers.
//!
//! Three files are produced for an analysis session:
//!
//! - the path report, one row per destination with the reconstructed route
//!   and its totals, rewritten every trial;
//! - the performance report, one row of counters per trial, created on the
//!   first trial and appended to afterwards;
//! - the detail report, the cumulative distance and predecessor chains of
//!   every destination, also created on trial 1 and appended to afterwards.

use std::fmt::{Debug, Display};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use num_traits::{Float, Zero};
use serde::Serialize;

use crate::algorithm::{reconstruct_path, PathDetail, ShortestPathResult};
use crate::graph::Graph;
use crate::{NodeId, Result};

/// One row of the performance report
#[derive(Debug, Serialize)]
struct PerformanceRow {
    #[serde(rename = "Start Node")]
    start_node: NodeId,
    #[serde(rename = "Trial")]
    trial: u32,
    #[serde(rename = "Execution Time (ms)")]
    execution_ms: String,
    #[serde(rename = "Comparisons")]
    comparisons: u64,
    #[serde(rename = "Relaxations")]
    relaxations: u64,
    #[serde(rename = "Auxiliary Size")]
    auxiliary_size: usize,
    #[serde(rename = "Avg Parent Changes")]
    avg_parent_changes: String,
}

/// Writes the shortest-path report for one trial, replacing any previous one
pub fn write_path_report<W, G>(path: &Path, graph: &G, result: &ShortestPathResult<W>) -> Result<()>
where
    W: Float + Zero + Debug + Copy + Display,
    G: Graph<W>,
{
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "Start Node;End Node;Path;Distance;Time")?;

    for node in graph.nodes() {
        if node == result.source {
            continue;
        }
        match reconstruct_path(result, node) {
            Some(detail) => {
                writeln!(
                    out,
                    "{};{};{};{};{:.2}",
                    result.source,
                    node,
                    render_route(&detail.nodes),
                    detail.total_distance(),
                    detail.total_time()
                )?;
            }
            None => writeln!(out, "{};{};No path;;", result.source, node)?,
        }
    }
    out.flush()?;
    Ok(())
}

/// Appends one trial's counters to the performance report. Trial 1 truncates
/// the file and writes the header row.
pub fn append_performance_report<W>(
    path: &Path,
    result: &ShortestPathResult<W>,
    trial: u32,
) -> Result<()>
where
    W: Float + Zero + Debug + Copy,
{
    let counters = &result.counters;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(trial == 1)
        .from_writer(open_report(path, trial)?);

    writer.serialize(PerformanceRow {
        start_node: result.source,
        trial,
        execution_ms: format!("{:.2}", counters.elapsed.as_secs_f64() * 1000.0),
        comparisons: counters.comparisons,
        relaxations: counters.relaxations,
        auxiliary_size: counters.auxiliary_size,
        avg_parent_changes: format!("{:.2}", counters.avg_parent_changes()),
    })?;
    writer.flush()?;
    Ok(())
}

/// Appends one trial's per-destination distance and predecessor chains to the
/// detail report. Trial 1 truncates the file and writes the header row.
///
/// Unreachable destinations emit empty `{}` chains.
pub fn append_detail_report<W, G>(
    path: &Path,
    graph: &G,
    result: &ShortestPathResult<W>,
    trial: u32,
) -> Result<()>
where
    W: Float + Zero + Debug + Copy,
    G: Graph<W>,
{
    let mut writer = csv::Writer::from_writer(open_report(path, trial)?);
    if trial == 1 {
        writer.write_record(["start node", "trial", "distance", "parent"])?;
    }

    for node in graph.nodes() {
        if node == result.source {
            continue;
        }
        let (distance_chain, parent_chain) = match reconstruct_path(result, node) {
            Some(detail) => (render_distance_chain(&detail), render_parent_chain(&detail)),
            None => ("{}".to_string(), "{}".to_string()),
        };
        writer.write_record([
            result.source.to_string(),
            trial.to_string(),
            distance_chain,
            parent_chain,
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn open_report(path: &Path, trial: u32) -> Result<File> {
    let file = if trial == 1 {
        File::create(path)?
    } else {
        OpenOptions::new().append(true).open(path)?
    };
    Ok(file)
}

fn render_route(nodes: &[NodeId]) -> String {
    nodes
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join("->")
}

fn render_distance_chain<W>(detail: &PathDetail<W>) -> String
where
    W: Float + Zero + Debug + Copy,
{
    let hops = detail
        .distances
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{}}}", hops)
}

fn render_parent_chain<W>(detail: &PathDetail<W>) -> String
where
    W: Float + Zero + Debug + Copy,
{
    let hops = detail
        .predecessors
        .iter()
        .map(|p| match p {
            Some(parent) => format!("[{}]", parent),
            None => "[]".to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{}}}", hops)
}
