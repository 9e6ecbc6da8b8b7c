//! Parser for raw network exports.
//!
//! Each line after the header describes one directed connection:
//!
//! ```text
//! source;target;{'field': value, ..., 'duration_avg': 4.27, ..., 'd': 310, ...}
//! ```
//!
//! The third field is a loosely formatted attribute dictionary; only the
//! `'duration_avg'` (travel time) and `'d'` (distance) entries are read.
//! Loading is best-effort over the line-oriented format: a record that cannot
//! be parsed is logged and skipped, never an abort.

use std::fmt::Debug;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, warn};
use num_traits::{Float, Zero};

use crate::graph::MutableGraph;
use crate::{NodeId, Result};

/// One well-formed connection record from a raw network file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeRecord<W> {
    pub source: NodeId,
    pub target: NodeId,
    pub distance: u32,
    pub time: W,
}

/// Outcome of a best-effort load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Records inserted into the graph
    pub records: usize,

    /// Malformed lines that were skipped
    pub skipped: usize,
}

/// Reads a raw network file into `graph`, skipping the header line and any
/// record that fails to parse.
pub fn load_network<W, G>(path: &Path, graph: &mut G) -> Result<LoadSummary>
where
    W: Float + Zero + Debug + Copy,
    G: MutableGraph<W>,
{
    let file = File::open(path)?;
    let mut lines = BufReader::new(file).lines();

    // Header line
    if let Some(header) = lines.next() {
        header?;
    }

    let mut summary = LoadSummary::default();
    for (index, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_edge_line(&line) {
            Some(record) => {
                graph.insert_edge(record.source, record.target, record.distance, record.time);
                summary.records += 1;
            }
            None => {
                // Line numbers are 1-based and include the header.
                warn!("skipping malformed record at line {}", index + 2);
                summary.skipped += 1;
            }
        }
    }

    debug!(
        "loaded {} records from {} ({} skipped)",
        summary.records,
        path.display(),
        summary.skipped
    );
    Ok(summary)
}

/// Parses one data line of a raw network file
pub fn parse_edge_line<W>(line: &str) -> Option<EdgeRecord<W>>
where
    W: Float + Zero + Debug + Copy,
{
    let mut fields = line.splitn(3, ';');
    let source = fields.next()?.trim().parse().ok()?;
    let target = fields.next()?.trim().parse().ok()?;
    let attributes = fields.next()?;

    let time = W::from(scan_attribute(attributes, "'duration_avg':")?)?;
    let distance = scan_attribute(attributes, "'d':")?;
    if distance < 0.0 || distance > f64::from(u32::MAX) {
        return None;
    }

    Some(EdgeRecord {
        source,
        target,
        distance: distance as u32,
        time,
    })
}

/// Finds `key` in the attribute dictionary and parses the number that follows
fn scan_attribute(attributes: &str, key: &str) -> Option<f64> {
    let start = attributes.find(key)? + key.len();
    let rest = attributes[start..].trim_start();
    let end = rest
        .find(|c: char| !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+')))
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordered_float::OrderedFloat;

    type Record = EdgeRecord<OrderedFloat<f64>>;

    #[test]
    fn parses_a_full_record() {
        let line = "9029704;9029651;{'lines': ['M49'], 'duration_avg': 1.97, 'd': 1003}";
        let record: Record = parse_edge_line(line).unwrap();

        assert_eq!(record.source, 9029704);
        assert_eq!(record.target, 9029651);
        assert_eq!(record.distance, 1003);
        assert_eq!(record.time, OrderedFloat(1.97));
    }

    #[test]
    fn attribute_order_does_not_matter() {
        let line = "1;2;{'d': 42, 'x': 0, 'duration_avg': 0.5}";
        let record: Record = parse_edge_line(line).unwrap();

        assert_eq!(record.distance, 42);
        assert_eq!(record.time, OrderedFloat(0.5));
    }

    #[test]
    fn rejects_missing_attributes() {
        assert!(parse_edge_line::<OrderedFloat<f64>>("1;2;{'lines': ['M49']}").is_none());
        assert!(parse_edge_line::<OrderedFloat<f64>>("1;2;{'d': 42}").is_none());
        assert!(parse_edge_line::<OrderedFloat<f64>>("1;2").is_none());
    }

    #[test]
    fn rejects_non_numeric_nodes() {
        let line = "one;2;{'duration_avg': 1.0, 'd': 1}";
        assert!(parse_edge_line::<OrderedFloat<f64>>(line).is_none());
    }

    #[test]
    fn rejects_negative_distance() {
        let line = "1;2;{'duration_avg': 1.0, 'd': -5}";
        assert!(parse_edge_line::<OrderedFloat<f64>>(line).is_none());
    }
}
