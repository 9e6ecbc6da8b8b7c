//! Adjacency-list file format.
//!
//! One line per node with at least one outgoing edge, nodes in ascending
//! order:
//!
//! ```text
//! node;[target,distance,time];[target,distance,time];...
//! ```
//!
//! Times are written with two decimals. The reader accepts the same dialect
//! and is the source a fresh analysis session rebuilds its graph from.

use std::fmt::{Debug, Display};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::warn;
use num_traits::{Float, Zero};

use crate::graph::{Graph, MutableGraph};
use crate::io::network::LoadSummary;
use crate::{NodeId, Result};

/// Writes the full adjacency of `graph` to `path`
pub fn write_adjacency<W, G>(path: &Path, graph: &G) -> Result<()>
where
    W: Float + Zero + Debug + Copy + Display,
    G: Graph<W>,
{
    let mut out = BufWriter::new(File::create(path)?);
    for node in graph.nodes() {
        let mut edges = graph.outgoing_edges(node).peekable();
        if edges.peek().is_none() {
            continue;
        }
        write!(out, "{}", node)?;
        for (target, distance, time) in edges {
            write!(out, ";[{},{},{:.2}]", target, distance, time)?;
        }
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

/// Reads an adjacency-list file back into `graph`
///
/// Each line registers its node even when every edge group on the line is
/// malformed; bad groups are logged and skipped.
pub fn read_adjacency<W, G>(path: &Path, graph: &mut G) -> Result<LoadSummary>
where
    W: Float + Zero + Debug + Copy,
    G: MutableGraph<W>,
{
    let file = File::open(path)?;
    let mut summary = LoadSummary::default();

    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = line.split(';');
        let Some(node) = fields.next().and_then(|f| f.trim().parse::<NodeId>().ok()) else {
            warn!("skipping adjacency line {} with invalid node id", index + 1);
            summary.skipped += 1;
            continue;
        };
        graph.insert_node(node);

        for group in fields {
            match parse_edge_group::<W>(group) {
                Some((target, distance, time)) => {
                    graph.insert_edge(node, target, distance, time);
                    summary.records += 1;
                }
                None => {
                    warn!("skipping malformed edge group on adjacency line {}", index + 1);
                    summary.skipped += 1;
                }
            }
        }
    }

    Ok(summary)
}

/// Parses one `[target,distance,time]` group
fn parse_edge_group<W>(group: &str) -> Option<(NodeId, u32, W)>
where
    W: Float + Zero + Debug + Copy,
{
    let inner = group.trim().strip_prefix('[')?.strip_suffix(']')?;
    let mut parts = inner.splitn(3, ',');
    let target = parts.next()?.trim().parse().ok()?;
    let distance = parts.next()?.trim().parse().ok()?;
    let time = W::from(parts.next()?.trim().parse::<f64>().ok()?)?;
    Some((target, distance, time))
}
