use std::mem;

use tracing::info;

use crate::graph::Graph;

const UNUSED: u32 = u32::MAX;

/// Old-id to new-id mapping produced by `Graph::renumber`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Renumbering {
    map: Vec<u32>,
    used: usize,
}

impl Renumbering {
    /// New index of `old`, or `None` if `old` appeared in no edge.
    pub fn get(&self, old: u32) -> Option<u32> {
        match self.map.get(old as usize) {
            Some(&new) if new != UNUSED => Some(new),
            _ => None,
        }
    }

    /// Number of used ids, which is the node count after renumbering.
    pub fn len(&self) -> usize { self.used }
    pub fn is_empty(&self) -> bool { self.used == 0 }

    /// Size of the id range before renumbering.
    pub fn old_len(&self) -> usize { self.map.len() }
}

impl Graph {
    /// Compacts node ids to `0..n`, keeping only ids that occur in some edge.
    ///
    /// New ids follow the order of old ids. Neighbor references are rewritten
    /// and lists move to their new index; slots of unused ids are dropped.
    pub fn renumber(&mut self) -> Renumbering {
        let links = self.lists_mut();

        let mut linked = vec![false; links.len()];
        for (node, list) in links.iter().enumerate() {
            if !list.is_empty() {
                linked[node] = true;
            }
            for &(neighbor, _) in list {
                linked[neighbor as usize] = true;
            }
        }

        let mut map = vec![UNUSED; links.len()];
        let mut used = 0u32;
        for (node, &is_linked) in linked.iter().enumerate() {
            if is_linked {
                map[node] = used;
                used += 1;
            }
        }

        // new index never exceeds old index, so ascending moves never overwrite pending lists
        for node in 0..links.len() {
            if map[node] == UNUSED {
                continue;
            }
            let mut list = mem::take(&mut links[node]);
            for link in list.iter_mut() {
                link.0 = map[link.0 as usize];
            }
            links[map[node] as usize] = list;
        }

        let before = links.len();
        links.truncate(used as usize);
        links.shrink_to_fit();

        info!(nodes = used, dropped = before - used as usize, "node ids renumbered");
        Renumbering { map, used: used as usize }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use crate::record::Edge;
    use pretty_assertions::assert_eq;

    fn ids(graph: &Graph, node: usize) -> Vec<u32> {
        graph.links(node).iter().map(|&(id, _)| id).collect()
    }

    #[test]
    fn compacts_and_rewrites_references() {
        let mut graph = Graph::from_edges(
            vec![Edge::new(5, 2), Edge::new(2, 5), Edge::new(2, 2)],
            Mode::Unweighted,
        );
        let renumbering = graph.renumber();

        assert_eq!(graph.nodes(), 2);
        assert_eq!(ids(&graph, 0), vec![1, 1, 0]);
        assert_eq!(ids(&graph, 1), vec![0, 0]);
        assert_eq!(renumbering.get(2), Some(0));
        assert_eq!(renumbering.get(5), Some(1));
        assert_eq!(renumbering.get(3), None);
        assert_eq!(renumbering.len(), 2);
        assert_eq!(renumbering.old_len(), 6);
    }

    #[test]
    fn sparse_ids_collapse_to_two_nodes() {
        let mut graph = Graph::from_edges(vec![Edge::new(1000, 2_000_000)], Mode::Unweighted);
        let renumbering = graph.renumber();
        assert_eq!(graph.nodes(), 2);
        assert_eq!(graph.links(0), &[(1, 1.0)]);
        assert_eq!(graph.links(1), &[(0, 1.0)]);
        assert_eq!(renumbering.get(1000), Some(0));
        assert_eq!(renumbering.get(2_000_000), Some(1));
        assert_eq!(renumbering.get(1500), None);
    }

    #[test]
    fn dense_graph_is_unchanged() {
        let edges = vec![
            Edge::weighted(0, 1, 0.5),
            Edge::weighted(1, 2, 1.5),
            Edge::weighted(2, 0, 2.5),
        ];
        let mut graph = Graph::from_edges(edges, Mode::Weighted);
        let original = graph.clone();
        graph.renumber();
        assert_eq!(graph, original);
    }

    #[test]
    fn weights_travel_with_entries() {
        let mut graph = Graph::from_edges(vec![Edge::weighted(10, 30, 4.0)], Mode::Weighted);
        graph.renumber();
        assert_eq!(graph.links(0), &[(1, 4.0)]);
        assert_eq!(graph.links(1), &[(0, 4.0)]);
    }

    #[test]
    fn empty_graph_stays_empty() {
        let mut graph = Graph::new(Mode::Unweighted);
        let renumbering = graph.renumber();
        assert!(renumbering.is_empty());
        assert_eq!(graph.nodes(), 0);
    }
}
