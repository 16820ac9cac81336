//! Flat-file import and export.
//!
//! One row per node, header required, columns in this order:
//!
//! | Column        | Meaning                                             |
//! |---------------|-----------------------------------------------------|
//! | `DugumId`     | node id                                             |
//! | `Ozellik_I`   | activity (real)                                     |
//! | `Ozellik_II`  | interaction count (integer)                         |
//! | `Ozellik_III` | degree; written on export, ignored on import        |
//! | `Komsular`    | comma-separated neighbor ids, possibly empty        |
//!
//! Unless [`ExportOptions::weightless`] is set, export appends an
//! `Agirliklar` column with the weights aligned to `Komsular`, followed by
//! an `Isim` column with the node name. Import reads columns by header name,
//! accepts the optional `Isim` column, and always re-derives weights through
//! the caller's weight function.
//!
//! Import runs in two passes: every row becomes a node first, then each
//! listed neighbor that exists is connected. Neighbor ids that match no row
//! are skipped with a warning rather than failing the load. A row that lists
//! its own id among its neighbors fails the whole import with
//! [`Error::SelfLoop`].

use log::{info, warn};
use socnet_core::{Error, NodeId, Result};
use std::io;
use std::path::Path;

use crate::types::default_name;
use crate::weight::WeightFunction;
use crate::{Graph, Node};

// ============================================================================
// Format constants and options
// ============================================================================

/// Node id column.
pub const ID_COLUMN: &str = "DugumId";
/// Activity column.
pub const ACTIVITY_COLUMN: &str = "Ozellik_I";
/// Interaction column.
pub const INTERACTION_COLUMN: &str = "Ozellik_II";
/// Degree column.
pub const DEGREE_COLUMN: &str = "Ozellik_III";
/// Neighbor list column.
pub const NEIGHBORS_COLUMN: &str = "Komsular";
/// Optional trailing weight list column.
pub const WEIGHTS_COLUMN: &str = "Agirliklar";
/// Optional node name column.
pub const NAME_COLUMN: &str = "Isim";

/// The five canonical columns, in order.
pub const HEADER: [&str; 5] = [
    ID_COLUMN,
    ACTIVITY_COLUMN,
    INTERACTION_COLUMN,
    DEGREE_COLUMN,
    NEIGHBORS_COLUMN,
];

/// Options shared by import and export.
#[derive(Clone, Copy, Debug)]
pub struct CsvOptions {
    /// Field delimiter.
    pub delimiter: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvOptions {
    /// Use a different field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }
}

/// Export options.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExportOptions {
    /// Delimiter settings.
    pub csv: CsvOptions,
    /// Write only the five canonical columns, without `Agirliklar` and `Isim`.
    pub weightless: bool,
}

impl ExportOptions {
    /// Only the five canonical columns.
    pub fn weightless() -> Self {
        Self {
            weightless: true,
            ..Self::default()
        }
    }

    /// Use a different field delimiter.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.csv.delimiter = delimiter;
        self
    }
}

/// Counters collected while importing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportStats {
    /// Rows turned into nodes.
    pub nodes_created: usize,
    /// Undirected edges actually added.
    pub edges_created: usize,
    /// `(row id, missing neighbor id)` references that were skipped.
    pub skipped_refs: Vec<(NodeId, NodeId)>,
}

// ============================================================================
// Import
// ============================================================================

/// Column positions resolved from the header row.
struct Columns {
    id: usize,
    activity: usize,
    interaction: usize,
    neighbors: Option<usize>,
    name: Option<usize>,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require =
            |name: &str| find(name).ok_or_else(|| Error::malformed(0, format!("missing column {name}")));

        Ok(Self {
            id: require(ID_COLUMN)?,
            activity: require(ACTIVITY_COLUMN)?,
            interaction: require(INTERACTION_COLUMN)?,
            neighbors: find(NEIGHBORS_COLUMN),
            name: find(NAME_COLUMN),
        })
    }
}

/// A parsed row waiting for its edges.
struct PendingRow {
    id: NodeId,
    neighbors: Vec<NodeId>,
}

/// Read a graph, deriving every edge weight with `weight_fn`.
pub fn from_csv_reader<R, W>(reader: R, weight_fn: &W, options: CsvOptions) -> Result<Graph>
where
    R: io::Read,
    W: WeightFunction + ?Sized,
{
    read_csv_with_stats(reader, weight_fn, options).map(|(graph, _)| graph)
}

/// Read a graph and report what was created and skipped.
pub fn read_csv_with_stats<R, W>(
    reader: R,
    weight_fn: &W,
    options: CsvOptions,
) -> Result<(Graph, ImportStats)>
where
    R: io::Read,
    W: WeightFunction + ?Sized,
{
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns = Columns::resolve(rdr.headers().map_err(from_csv_error)?)?;

    let mut graph = Graph::new();
    let mut stats = ImportStats::default();
    let mut pending = Vec::new();

    // Pass 1: nodes
    for (i, result) in rdr.records().enumerate() {
        let line = i + 1;
        let record = result.map_err(|e| Error::malformed(line, e.to_string()))?;

        let id: NodeId = parse_field(&record, columns.id, ID_COLUMN, line)?;
        let activity: f64 = parse_field(&record, columns.activity, ACTIVITY_COLUMN, line)?;
        let interaction: u64 =
            parse_field(&record, columns.interaction, INTERACTION_COLUMN, line)?;
        let name = columns
            .name
            .and_then(|idx| record.get(idx))
            .filter(|s| !s.is_empty())
            .map_or_else(|| default_name(id), str::to_string);
        let neighbors = match columns.neighbors.and_then(|idx| record.get(idx)) {
            Some(raw) => parse_id_list(raw, line)?,
            None => Vec::new(),
        };

        graph.add_node(
            Node::new(id, name)
                .with_activity(activity)
                .with_interaction(interaction),
        )?;
        stats.nodes_created += 1;
        pending.push(PendingRow { id, neighbors });
    }

    // Pass 2: edges
    for row in &pending {
        for &neighbor in &row.neighbors {
            if !graph.contains_node(neighbor) {
                warn!("node {} lists unknown neighbor {neighbor}; skipped", row.id);
                stats.skipped_refs.push((row.id, neighbor));
                continue;
            }
            let is_new = !graph.has_edge(row.id, neighbor);
            graph.add_weighted_edge(row.id, neighbor, weight_fn)?;
            if is_new {
                stats.edges_created += 1;
            }
        }
    }

    info!(
        "imported {} nodes, {} edges ({} unknown neighbor refs skipped)",
        stats.nodes_created,
        stats.edges_created,
        stats.skipped_refs.len()
    );
    Ok((graph, stats))
}

/// Read a graph from an in-memory string.
pub fn from_csv_str<W>(data: &str, weight_fn: &W, options: CsvOptions) -> Result<Graph>
where
    W: WeightFunction + ?Sized,
{
    from_csv_reader(data.as_bytes(), weight_fn, options)
}

/// Read a graph from a file.
pub fn import_csv<W>(path: impl AsRef<Path>, weight_fn: &W, options: CsvOptions) -> Result<Graph>
where
    W: WeightFunction + ?Sized,
{
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| Error::io_with_path(e, path))?;
    info!("importing graph from {}", path.display());
    from_csv_reader(io::BufReader::new(file), weight_fn, options)
}

fn parse_field<T: std::str::FromStr>(
    record: &csv::StringRecord,
    idx: usize,
    column: &str,
    line: usize,
) -> Result<T> {
    let raw = record
        .get(idx)
        .ok_or_else(|| Error::malformed(line, format!("missing value for {column}")))?;
    raw.parse()
        .map_err(|_| Error::malformed(line, format!("invalid {column} value {raw:?}")))
}

fn parse_id_list(raw: &str, line: usize) -> Result<Vec<NodeId>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse()
                .map_err(|_| Error::malformed(line, format!("invalid neighbor id {s:?}")))
        })
        .collect()
}

// ============================================================================
// Export
// ============================================================================

/// Write one row per node, in store order.
pub fn to_csv_writer<W: io::Write>(graph: &Graph, writer: W, options: ExportOptions) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(options.csv.delimiter)
        .from_writer(writer);

    let mut header: Vec<&str> = HEADER.to_vec();
    if !options.weightless {
        header.push(WEIGHTS_COLUMN);
        header.push(NAME_COLUMN);
    }
    wtr.write_record(&header).map_err(from_csv_error)?;

    for node in graph.nodes() {
        let edges = graph.edges_from(node.id);
        let mut row = vec![
            node.id.to_string(),
            node.activity.to_string(),
            node.interaction.to_string(),
            node.degree().to_string(),
            join(edges.iter().map(|e| e.to)),
        ];
        if !options.weightless {
            row.push(join(edges.iter().map(|e| e.weight)));
            row.push(node.name.clone());
        }
        wtr.write_record(&row).map_err(from_csv_error)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Render the graph as a string.
pub fn to_csv_string(graph: &Graph, options: ExportOptions) -> Result<String> {
    let mut buf = Vec::new();
    to_csv_writer(graph, &mut buf, options)?;
    String::from_utf8(buf).map_err(|e| Error::csv(e.to_string()))
}

/// Write the graph to a file, replacing any existing content.
pub fn export_csv(graph: &Graph, path: impl AsRef<Path>, options: ExportOptions) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path).map_err(|e| Error::io_with_path(e, path))?;
    to_csv_writer(graph, io::BufWriter::new(file), options)?;
    info!("exported {} to {}", graph.summary(), path.display());
    Ok(())
}

fn join<T: ToString>(items: impl Iterator<Item = T>) -> String {
    items.map(|x| x.to_string()).collect::<Vec<_>>().join(",")
}

fn from_csv_error(err: csv::Error) -> Error {
    match err.into_kind() {
        csv::ErrorKind::Io(e) => Error::Io(e),
        other => Error::csv(format!("{other:?}")),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weight::{AttributeSimilarity, UnitWeight};
    use std::collections::BTreeSet;
    use tempfile::tempdir;

    const SAMPLE: &str = "\
DugumId,Ozellik_I,Ozellik_II,Ozellik_III,Komsular
1,0.8,12,2,\"2,3\"
2,0.6,7,2,\"1,3\"
3,0.7,9,3,\"1,2,4\"
4,0.9,15,2,\"3,5\"
5,0.3,3,1,4
";

    fn edge_set(graph: &Graph) -> BTreeSet<(NodeId, NodeId)> {
        graph
            .undirected_edges()
            .into_iter()
            .map(|(a, b, _)| (a, b))
            .collect()
    }

    // ------------------------------------------------------------------------
    // Import
    // ------------------------------------------------------------------------

    #[test]
    fn test_import_sample() {
        let graph = from_csv_str(SAMPLE, &AttributeSimilarity, CsvOptions::default()).unwrap();

        assert_eq!(graph.node_count(), 5);
        assert_eq!(graph.edge_count(), 5);
        assert_eq!(graph.neighbors(3), vec![1, 2, 4]);
        assert_eq!(graph.node(3).unwrap().degree(), 3);
        assert_eq!(graph.node(4).unwrap().activity, 0.9);
        assert_eq!(graph.node(4).unwrap().interaction, 15);
        assert_eq!(graph.node(1).unwrap().name, "Node1");
    }

    #[test]
    fn test_import_ignores_recorded_degree() {
        let data = "DugumId,Ozellik_I,Ozellik_II,Ozellik_III,Komsular\n1,0.5,1,40,\n2,0.5,1,17,1\n";
        let graph = from_csv_str(data, &UnitWeight, CsvOptions::default()).unwrap();
        assert_eq!(graph.node(1).unwrap().degree(), 1);
        assert_eq!(graph.node(2).unwrap().degree(), 1);
    }

    #[test]
    fn test_import_skips_unknown_neighbors() {
        let data = "DugumId,Ozellik_I,Ozellik_II,Ozellik_III,Komsular\n1,0.5,1,0,\"2,99\"\n2,0.4,2,0,\"1,100\"\n";
        let (graph, stats) =
            read_csv_with_stats(data.as_bytes(), &UnitWeight, CsvOptions::default()).unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(edge_set(&graph), BTreeSet::from([(1, 2)]));
        assert_eq!(stats.nodes_created, 2);
        assert_eq!(stats.edges_created, 1);
        assert_eq!(stats.skipped_refs, vec![(1, 99), (2, 100)]);
    }

    #[test]
    fn test_import_optional_name_column() {
        let data = "DugumId,Isim,Ozellik_I,Ozellik_II,Ozellik_III,Komsular\n1,Ayse,0.8,12,0,\n2,,0.6,7,0,1\n";
        let graph = from_csv_str(data, &UnitWeight, CsvOptions::default()).unwrap();
        assert_eq!(graph.node(1).unwrap().name, "Ayse");
        assert_eq!(graph.node(2).unwrap().name, "Node2");
    }

    #[test]
    fn test_import_self_reference_fails() {
        let data = "DugumId,Ozellik_I,Ozellik_II,Ozellik_III,Komsular\n1,0.5,1,0,\"1,2\"\n2,0.5,1,0,1\n";
        let err = from_csv_str(data, &UnitWeight, CsvOptions::default()).unwrap_err();
        assert!(matches!(err, Error::SelfLoop(1)));
    }

    #[test]
    fn test_import_counts_each_edge_once() {
        let (_, stats) =
            read_csv_with_stats(SAMPLE.as_bytes(), &UnitWeight, CsvOptions::default()).unwrap();
        assert_eq!(stats.nodes_created, 5);
        assert_eq!(stats.edges_created, 5);
        assert!(stats.skipped_refs.is_empty());
    }

    #[test]
    fn test_import_without_neighbor_column() {
        let data = "DugumId,Ozellik_I,Ozellik_II\n1,0.1,1\n2,0.2,2\n";
        let graph = from_csv_str(data, &UnitWeight, CsvOptions::default()).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_import_malformed_activity() {
        let data = "DugumId,Ozellik_I,Ozellik_II,Ozellik_III,Komsular\n1,0.5,1,0,\n2,high,2,0,\n";
        let err = from_csv_str(data, &UnitWeight, CsvOptions::default()).unwrap_err();
        match err {
            Error::MalformedRecord { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains(ACTIVITY_COLUMN));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_import_malformed_neighbor_id() {
        let data = "DugumId,Ozellik_I,Ozellik_II,Ozellik_III,Komsular\n1,0.5,1,0,\"2,x\"\n2,0.5,1,0,\n";
        let err = from_csv_str(data, &UnitWeight, CsvOptions::default()).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_import_missing_required_column() {
        let data = "DugumId,Ozellik_II,Komsular\n1,1,\n";
        let err = from_csv_str(data, &UnitWeight, CsvOptions::default()).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { line: 0, .. }));
    }

    #[test]
    fn test_import_duplicate_id() {
        let data = "DugumId,Ozellik_I,Ozellik_II,Ozellik_III,Komsular\n1,0.5,1,0,\n1,0.6,2,0,\n";
        let err = from_csv_str(data, &UnitWeight, CsvOptions::default()).unwrap_err();
        assert!(err.is_duplicate_id());
    }

    #[test]
    fn test_import_semicolon_delimiter() {
        let data = "DugumId;Ozellik_I;Ozellik_II;Ozellik_III;Komsular\n1;0.5;1;1;2\n2;0.5;1;1;1\n";
        let graph = from_csv_str(data, &UnitWeight, CsvOptions::default().with_delimiter(b';'))
            .unwrap();
        assert!(graph.has_edge(1, 2));
    }

    // ------------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------------

    #[test]
    fn test_export_weightless_columns() {
        let graph = from_csv_str(SAMPLE, &UnitWeight, CsvOptions::default()).unwrap();
        let out = to_csv_string(&graph, ExportOptions::weightless()).unwrap();
        let mut lines = out.lines();

        assert_eq!(
            lines.next(),
            Some("DugumId,Ozellik_I,Ozellik_II,Ozellik_III,Komsular")
        );
        assert_eq!(lines.next(), Some("1,0.8,12,2,\"2,3\""));
        assert_eq!(lines.last(), Some("5,0.3,3,1,4"));
    }

    #[test]
    fn test_export_with_weights_column() {
        let graph = from_csv_str(SAMPLE, &UnitWeight, CsvOptions::default()).unwrap();
        let out = to_csv_string(&graph, ExportOptions::default()).unwrap();
        let mut lines = out.lines();

        assert_eq!(
            lines.next(),
            Some("DugumId,Ozellik_I,Ozellik_II,Ozellik_III,Komsular,Agirliklar,Isim")
        );
        assert_eq!(lines.next(), Some("1,0.8,12,2,\"2,3\",\"1,1\",Node1"));
    }

    #[test]
    fn test_export_isolated_node_has_empty_neighbors() {
        let mut graph = Graph::new();
        graph.add_node(Node::unnamed(1).with_activity(0.25)).unwrap();
        let out = to_csv_string(&graph, ExportOptions::weightless()).unwrap();
        assert_eq!(out.lines().nth(1), Some("1,0.25,0,0,"));
    }

    // ------------------------------------------------------------------------
    // Round trip
    // ------------------------------------------------------------------------

    #[test]
    fn test_file_round_trip_preserves_nodes_and_edges() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("graph.csv");

        let original = from_csv_str(SAMPLE, &AttributeSimilarity, CsvOptions::default()).unwrap();
        export_csv(&original, &path, ExportOptions::default()).unwrap();
        let loaded = import_csv(&path, &AttributeSimilarity, CsvOptions::default()).unwrap();

        assert_eq!(
            loaded.node_ids().collect::<Vec<_>>(),
            original.node_ids().collect::<Vec<_>>()
        );
        assert_eq!(edge_set(&loaded), edge_set(&original));
        assert_eq!(loaded.adjacency_list(), original.adjacency_list());
        // same rows, same insertion order: weights are reapplied identically
        assert_eq!(loaded.undirected_edges(), original.undirected_edges());
    }

    #[test]
    fn test_file_round_trip_preserves_names() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("graph.csv");

        let mut graph = Graph::new();
        graph.add_node(Node::new(1, "Ayşe").with_activity(0.8)).unwrap();
        graph.add_node(Node::new(2, "Ali, Jr.").with_activity(0.6)).unwrap();
        graph.add_undirected_edge(1, 2, 1.0).unwrap();

        export_csv(&graph, &path, ExportOptions::default()).unwrap();
        let loaded = import_csv(&path, &UnitWeight, CsvOptions::default()).unwrap();

        assert_eq!(loaded.node(1).unwrap().name, "Ayşe");
        assert_eq!(loaded.node(2).unwrap().name, "Ali, Jr.");
    }

    #[test]
    fn test_weightless_round_trip_uses_default_names() {
        let mut graph = Graph::new();
        graph.add_node(Node::new(4, "Zeynep")).unwrap();

        let out = to_csv_string(&graph, ExportOptions::weightless()).unwrap();
        let loaded = from_csv_str(&out, &UnitWeight, CsvOptions::default()).unwrap();
        assert_eq!(loaded.node(4).unwrap().name, "Node4");
    }

    #[test]
    fn test_import_missing_file() {
        let dir = tempdir().unwrap();
        let err = import_csv(dir.path().join("nope.csv"), &UnitWeight, CsvOptions::default())
            .unwrap_err();
        assert!(matches!(err, Error::IoWithPath { .. }));
    }
}
