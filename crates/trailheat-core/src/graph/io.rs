//! Line-based interchange format.
//!
//! ```text
//! <node count>
//! <arc count>
//! <lat> <lon> [<external id> ...]     one line per node index
//! <from> <to> <cost> [...]            one line per arc
//! ```
//!
//! A node line of `-` marks an absent index; `nan nan` stands for a node
//! without a position. Extra columns are ignored.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{Result, TrailheatError};
use crate::graph::adjacency::Graph;
use crate::graph::node_info::{NodeInfo, NodeTable, Position};
use crate::graph::types::{Arc, Cost, NodeId};

const ABSENT_NODE: &str = "-";

/// A graph together with its node side table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphFile {
    pub graph: Graph,
    pub nodes: NodeTable,
}

/// Non-blank lines with their 1-based line numbers
fn numbered_lines<R: BufRead>(reader: R) -> impl Iterator<Item = Result<(usize, String)>> {
    reader
        .lines()
        .enumerate()
        .map(|(i, line)| line.map(|l| (i + 1, l)).map_err(TrailheatError::from))
        .filter(|entry| !matches!(entry, Ok((_, l)) if l.trim().is_empty()))
}

fn parse_field<T: std::str::FromStr>(line: usize, field: Option<&str>, what: &str) -> Result<T> {
    let raw = field.ok_or_else(|| TrailheatError::parse(line, format!("missing {what}")))?;
    raw.parse()
        .map_err(|_| TrailheatError::parse(line, format!("invalid {what} '{raw}'")))
}

fn parse_cost(line: usize, field: Option<&str>) -> Result<Cost> {
    let cost: f64 = parse_field(line, field, "cost")?;
    if !cost.is_finite() || cost < 0.0 {
        return Err(TrailheatError::parse(
            line,
            format!("cost must be finite and non-negative, got {cost}"),
        ));
    }
    Ok(Cost::new(cost))
}

fn parse_node_line(line: usize, text: &str) -> Result<Option<NodeInfo>> {
    let mut fields = text.split_whitespace();
    let first = fields.next();
    if first == Some(ABSENT_NODE) {
        return Ok(None);
    }
    let lat: f64 = parse_field(line, first, "latitude")?;
    let lon: f64 = parse_field(line, fields.next(), "longitude")?;
    let position = (!lat.is_nan() && !lon.is_nan()).then(|| Position::new(lat, lon));
    Ok(Some(NodeInfo {
        external_id: fields.next().map(str::to_string),
        position,
    }))
}

/// Reads a graph in the interchange format
pub fn read_graph<R: BufRead>(reader: R) -> Result<GraphFile> {
    let mut lines = numbered_lines(reader);
    let mut header = |what: &str| -> Result<usize> {
        let (line, text) = lines
            .next()
            .transpose()?
            .ok_or_else(|| TrailheatError::parse(0, format!("missing {what}")))?;
        parse_field(line, text.split_whitespace().next(), what)
    };
    let node_count = header("node count")?;
    let arc_count = header("arc count")?;

    // sized from the lines actually read, never from the header alone
    let mut infos = Vec::new();
    for node in 0..node_count {
        let (line, text) = lines.next().transpose()?.ok_or_else(|| {
            TrailheatError::parse(0, format!("expected {node_count} node lines, got {node}"))
        })?;
        infos.push(parse_node_line(line, &text)?);
    }

    let mut file = GraphFile {
        graph: Graph::with_size(infos.len()),
        nodes: NodeTable::new(),
    };
    for (node, info) in infos.into_iter().enumerate() {
        if let Some(info) = info {
            file.graph.add_node(node);
            file.nodes.insert(node, info);
        }
    }

    for arc in 0..arc_count {
        let (line, text) = lines.next().transpose()?.ok_or_else(|| {
            TrailheatError::parse(0, format!("expected {arc_count} arc lines, got {arc}"))
        })?;
        let mut fields = text.split_whitespace();
        let from: NodeId = parse_field(line, fields.next(), "source index")?;
        let to: NodeId = parse_field(line, fields.next(), "target index")?;
        let cost = parse_cost(line, fields.next())?;
        for endpoint in [from, to] {
            if !file.graph.contains_node(endpoint) {
                return Err(TrailheatError::parse(
                    line,
                    format!("arc references unknown node {endpoint}"),
                ));
            }
        }
        file.graph.add_edge(from, to, cost);
    }

    if let Some(extra) = lines.next().transpose()? {
        return Err(TrailheatError::parse(extra.0, "unexpected trailing content"));
    }
    tracing::debug!(
        nodes = file.graph.node_count(),
        arcs = file.graph.arc_count(),
        "read graph"
    );
    Ok(file)
}

pub fn read_graph_file(path: &Path) -> Result<GraphFile> {
    let file = File::open(path)?;
    read_graph(BufReader::new(file))
}

/// Writes `graph` and its node table in the interchange format.
///
/// Arcs are written in ascending `(from, to)` order.
pub fn write_graph<W: Write>(writer: &mut W, graph: &Graph, nodes: &NodeTable) -> Result<()> {
    writeln!(writer, "{}", graph.size())?;
    writeln!(writer, "{}", graph.arc_count())?;
    for node in 0..graph.size() {
        if !graph.contains_node(node) {
            writeln!(writer, "{ABSENT_NODE}")?;
            continue;
        }
        let info = nodes.get(node);
        match info.and_then(|i| i.position) {
            Some(p) => write!(writer, "{} {}", p.lat, p.lon)?,
            None => write!(writer, "nan nan")?,
        }
        if let Some(id) = info.and_then(|i| i.external_id.as_deref()) {
            write!(writer, " {id}")?;
        }
        writeln!(writer)?;
    }
    for (from, to, cost) in graph.arcs() {
        writeln!(writer, "{from} {to} {}", cost.value())?;
    }
    Ok(())
}

pub fn write_graph_file(path: &Path, graph: &Graph, nodes: &NodeTable) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_graph(&mut writer, graph, nodes)?;
    writer.flush()?;
    Ok(())
}

/// Reads `<index> [<weight>]` lines; `#` starts a comment.
///
/// Missing weights default to 1. Repeated indices keep the last weight.
pub fn read_node_list<R: BufRead>(reader: R) -> Result<BTreeMap<NodeId, f64>> {
    let mut list = BTreeMap::new();
    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line?;
        let content = line.split('#').next().unwrap_or_default();
        let mut fields = content.split_whitespace();
        let Some(first) = fields.next() else {
            continue;
        };
        let node: NodeId = parse_field(line_no, Some(first), "node index")?;
        let weight = match fields.next() {
            Some(raw) => {
                let w: f64 = parse_field(line_no, Some(raw), "weight")?;
                if !w.is_finite() || w < 0.0 {
                    return Err(TrailheatError::parse(line_no, format!("invalid weight {w}")));
                }
                w
            }
            None => 1.0,
        };
        list.insert(node, weight);
    }
    Ok(list)
}

pub fn read_node_list_file(path: &Path) -> Result<BTreeMap<NodeId, f64>> {
    read_node_list(BufReader::new(File::open(path)?))
}

/// Writes one `<from> <to> <weight>` line per arc
pub fn write_arc_weights<W: Write>(writer: &mut W, weights: &BTreeMap<Arc, f64>) -> Result<()> {
    for (&(from, to), weight) in weights {
        writeln!(writer, "{from} {to} {weight}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = "4\n3\n48.0 7.8 osm:1\n48.1 7.9\n-\nnan nan\n0 1 2.5\n1 0 2.5 extra\n3 1 4\n\n";

    #[test]
    fn test_read_graph() {
        let file = read_graph(Cursor::new(SAMPLE)).unwrap();
        assert_eq!(file.graph.size(), 4);
        assert_eq!(file.graph.nodes().collect::<Vec<_>>(), vec![0, 1, 3]);
        assert_eq!(file.graph.arc_cost(1, 0), Some(Cost::new(2.5)));
        assert_eq!(file.nodes.external_id(0), Some("osm:1"));
        assert_eq!(file.nodes.position(1), Some(Position::new(48.1, 7.9)));
        assert!(file.nodes.position(3).is_none());
    }

    #[test]
    fn test_write_then_read_preserves_graph() {
        let file = read_graph(Cursor::new(SAMPLE)).unwrap();
        let mut out = Vec::new();
        write_graph(&mut out, &file.graph, &file.nodes).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\n-\n"));
        assert!(text.ends_with("0 1 2.5\n1 0 2.5\n3 1 4\n"));
        let reread = read_graph(Cursor::new(text)).unwrap();
        assert_eq!(reread, file);
    }

    #[test]
    fn test_arc_to_unknown_node_is_parse_error() {
        let err = read_graph(Cursor::new("2\n1\n0 0\n0 0\n0 5 1\n")).unwrap_err();
        assert!(matches!(err, TrailheatError::Parse { line: 5, .. }), "{err}");
    }

    #[test]
    fn test_arc_to_absent_node_is_parse_error() {
        let err = read_graph(Cursor::new("2\n1\n0 0\n-\n0 1 1\n")).unwrap_err();
        assert!(matches!(err, TrailheatError::Parse { line: 5, .. }));
    }

    #[test]
    fn test_negative_cost_rejected() {
        let err = read_graph(Cursor::new("2\n1\n0 0\n0 0\n0 1 -3\n")).unwrap_err();
        assert!(err.to_string().contains("non-negative"));
    }

    #[test]
    fn test_truncated_file() {
        let err = read_graph(Cursor::new("3\n0\n0 0\n")).unwrap_err();
        assert!(matches!(err, TrailheatError::Parse { .. }));
        assert!(err.to_string().contains("node lines"));
    }

    #[test]
    fn test_oversized_node_count_is_parse_error() {
        let err = read_graph(Cursor::new("4611686018427387904\n0\n")).unwrap_err();
        assert!(matches!(err, TrailheatError::Parse { .. }), "{err}");
        assert!(err.to_string().contains("got 0"));
    }

    #[test]
    fn test_bad_header() {
        let err = read_graph(Cursor::new("many\n0\n")).unwrap_err();
        assert!(matches!(err, TrailheatError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_read_node_list() {
        let list = read_node_list(Cursor::new("# entries\n3\n5 120.5 # village\n\n7 0\n")).unwrap();
        assert_eq!(list, BTreeMap::from([(3, 1.0), (5, 120.5), (7, 0.0)]));
        let err = read_node_list(Cursor::new("3\nx\n")).unwrap_err();
        assert!(matches!(err, TrailheatError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_write_arc_weights() {
        let weights = BTreeMap::from([((1, 0), 0.5), ((0, 1), 2.0)]);
        let mut out = Vec::new();
        write_arc_weights(&mut out, &weights).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0 1 2\n1 0 0.5\n");
    }
}
