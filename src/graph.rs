use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use tracing::{debug, info};

use crate::config::Mode;
use crate::endian::Endian;
use crate::error::{Error, Result};
use crate::record::{Edge, EdgeReader, RecordError};

/// One neighbor-list entry: neighbor id and weight.
pub type Link = (u32, f64);

/// Adjacency lists indexed by node id.
///
/// Ids are used as given while loading, so the store may hold many empty
/// lists until `renumber` compacts it.
#[derive(Clone, Debug, PartialEq)]
pub struct Graph {
    links: Vec<Vec<Link>>,
    mode: Mode,
    edges: u64,
}

impl Graph {
    pub fn new(mode: Mode) -> Graph {
        Graph { links: Vec::new(), mode, edges: 0 }
    }

    pub fn mode(&self) -> Mode { self.mode }
    pub fn nodes(&self) -> usize { self.links.len() }
    pub fn links(&self, node: usize) -> &[Link] { &self.links[node] }
    pub fn degree(&self, node: usize) -> usize { self.links[node].len() }

    /// Number of edges inserted, before any deduplication.
    pub fn edges_loaded(&self) -> u64 { self.edges }

    /// Total number of neighbor-list entries across all nodes.
    pub fn total_degree(&self) -> u64 {
        self.links.iter().map(|list| list.len() as u64).sum()
    }

    pub(crate) fn lists(&self) -> &[Vec<Link>] { &self.links }
    pub(crate) fn lists_mut(&mut self) -> &mut Vec<Vec<Link>> { &mut self.links }

    /// Adds an undirected edge, growing the store so both endpoints are valid indices.
    ///
    /// A self-loop is recorded once; any other edge appears in both endpoints' lists.
    pub fn insert(&mut self, edge: Edge) {
        let Edge { src, dst, weight } = edge;
        let max = src.max(dst) as usize;
        if self.links.len() <= max {
            self.links.resize_with(max + 1, Vec::new);
        }

        self.links[src as usize].push((dst, weight));
        if src != dst {
            self.links[dst as usize].push((src, weight));
        }
        self.edges += 1;
    }

    pub fn from_edges<I: IntoIterator<Item = Edge>>(edges: I, mode: Mode) -> Graph {
        let mut graph = Graph::new(mode);
        for edge in edges {
            graph.insert(edge);
        }
        graph
    }

    /// Builds a graph from an edge-record stream. `name` labels errors.
    pub fn from_reader<R>(reader: R, name: &Path, mode: Mode, endian: Endian) -> Result<Graph>
    where
        R: Read,
    {
        let mut graph = Graph::new(mode);
        for edge in EdgeReader::new(reader, mode, endian) {
            match edge {
                Ok(edge) => graph.insert(edge),
                Err(RecordError::Io(source)) => {
                    let path = name.to_path_buf();
                    return Err(Error::SourceUnavailable { path, source });
                }
                Err(RecordError::Truncated { record, read, expected }) => {
                    let path = name.to_path_buf();
                    return Err(Error::MalformedRecord { path, record, read, expected });
                }
            }
        }
        debug!(edges = graph.edges, nodes = graph.nodes(), "edge records decoded");
        Ok(graph)
    }

    /// Opens and reads a binary edge list.
    pub fn load<P: AsRef<Path>>(path: P, mode: Mode, endian: Endian) -> Result<Graph> {
        let path = path.as_ref();
        let file = File::open(path).map_err(Error::unreadable(path))?;
        let graph = Graph::from_reader(BufReader::new(file), path, mode, endian)?;
        info!(
            path = %path.display(),
            edges = graph.edges,
            nodes = graph.nodes(),
            "edge list loaded"
        );
        Ok(graph)
    }
}
