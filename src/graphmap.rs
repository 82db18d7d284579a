use std::path::{Path, PathBuf};

use crate::endian::Endian;
use crate::error::{Error, Result};
use crate::typedrw::TypedMemoryMap;

const HEADER: usize = 4;

/// Read-side view of a binary graph written by `Graph::save`.
pub struct GraphMMap {
    links:   TypedMemoryMap,
    weights: Option<TypedMemoryMap>,
    nodes:   usize,
    edges:   usize,
}

impl GraphMMap {
    /// Maps `path`, and `weights` if given, checking that file sizes agree with the header.
    pub fn open<P>(path: P, weights: Option<&Path>, endian: Endian) -> Result<GraphMMap>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let links = TypedMemoryMap::open(path, endian).map_err(Error::unreadable(path))?;
        let malformed = |reason: String| Error::MalformedGraph {
            path: PathBuf::from(path),
            reason,
        };

        if links.len() < HEADER {
            return Err(malformed(format!("{} bytes is too short for a header", links.len())));
        }
        let nodes = links.u32_at(0) as usize;
        let targets = HEADER + 8 * nodes;
        if links.len() < targets {
            let reason = format!("offsets for {} nodes exceed file length {}", nodes, links.len());
            return Err(malformed(reason));
        }
        let mut edges = 0u64;
        for node in 0..nodes {
            let offset = links.u64_at(HEADER + 8 * node);
            if offset < edges {
                return Err(malformed(format!("cumulative degree decreases at node {}", node)));
            }
            edges = offset;
        }
        let expected = edges.checked_mul(4).and_then(|bytes| bytes.checked_add(targets as u64));
        if expected != Some(links.len() as u64) {
            let reason = format!("{} links do not fit file length {}", edges, links.len());
            return Err(malformed(reason));
        }
        let edges = edges as usize;

        let weights = match weights {
            Some(wpath) => {
                let map = TypedMemoryMap::open(wpath, endian).map_err(Error::unreadable(wpath))?;
                if map.len() != 4 * edges {
                    return Err(Error::MalformedGraph {
                        path: wpath.to_path_buf(),
                        reason: format!(
                            "expected {} bytes of weights, found {}",
                            4 * edges,
                            map.len()
                        ),
                    });
                }
                Some(map)
            }
            None => None,
        };

        Ok(GraphMMap { links, weights, nodes, edges })
    }

    pub fn nodes(&self) -> usize { self.nodes }
    pub fn total_degree(&self) -> usize { self.edges }

    // cumulative degree through `node`
    fn offset(&self, node: usize) -> usize { self.links.u64_at(HEADER + 8 * node) as usize }

    // empty for nodes outside the graph
    fn range(&self, node: usize) -> (usize, usize) {
        if node >= self.nodes {
            return (0, 0);
        }
        let start = if node == 0 { 0 } else { self.offset(node - 1) };
        (start, self.offset(node))
    }

    pub fn degree(&self, node: usize) -> usize {
        let (start, limit) = self.range(node);
        limit - start
    }

    pub fn edges(&self, node: usize) -> impl Iterator<Item = u32> + '_ {
        let base = HEADER + 8 * self.nodes;
        let (start, limit) = self.range(node);
        (start..limit).map(move |i| self.links.u32_at(base + 4 * i))
    }

    /// Weights of `node`'s links, if a weight file was mapped.
    pub fn weights(&self, node: usize) -> Option<impl Iterator<Item = f32> + '_> {
        let weights = self.weights.as_ref()?;
        let (start, limit) = self.range(node);
        Some((start..limit).map(move |i| weights.f32_at(4 * i)))
    }
}
