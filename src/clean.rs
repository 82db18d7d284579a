use rayon::prelude::*;
use tracing::info;

use crate::graph::{Graph, Link};

impl Graph {
    /// Collapses repeated neighbors so each node lists every neighbor once, in ascending id order.
    ///
    /// Weighted graphs sum the weights of the collapsed entries; unweighted
    /// graphs keep the first entry as is. Nodes are processed independently.
    pub fn clean(&mut self) {
        let weighted = self.mode().is_weighted();
        let before = self.total_degree();

        self.lists_mut()
            .par_iter_mut()
            .for_each(|list| collapse(list, weighted));

        let after = self.total_degree();
        info!(entries = after, removed = before - after, "duplicate links collapsed");
    }
}

fn collapse(list: &mut Vec<Link>, weighted: bool) {
    // stable, so equal ids keep insertion order and sums match a sequential fold
    list.sort_by_key(|&(id, _)| id);
    list.dedup_by(|next, kept| {
        if next.0 != kept.0 {
            return false;
        }
        if weighted {
            kept.1 += next.1;
        }
        true
    });
    list.shrink_to_fit();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use crate::record::Edge;
    use pretty_assertions::assert_eq;

    #[test]
    fn unweighted_duplicates_collapse() {
        let mut graph = Graph::from_edges(
            vec![Edge::new(5, 2), Edge::new(2, 5), Edge::new(2, 2)],
            Mode::Unweighted,
        );
        graph.renumber();
        graph.clean();
        assert_eq!(graph.links(0), &[(0, 1.0), (1, 1.0)]);
        assert_eq!(graph.links(1), &[(0, 1.0)]);
    }

    #[test]
    fn weighted_duplicates_sum() {
        let mut graph = Graph::from_edges(
            vec![Edge::weighted(0, 1, 1.0), Edge::weighted(0, 1, 4.0)],
            Mode::Weighted,
        );
        assert_eq!(graph.links(0), &[(1, 1.0), (1, 4.0)]);
        graph.clean();
        assert_eq!(graph.links(0), &[(1, 5.0)]);
        assert_eq!(graph.links(1), &[(0, 5.0)]);
    }

    #[test]
    fn three_way_sum_and_sorted_order() {
        let mut graph = Graph::from_edges(
            vec![
                Edge::weighted(0, 3, 0.5),
                Edge::weighted(0, 1, 2.0),
                Edge::weighted(3, 0, 0.25),
                Edge::weighted(0, 3, 1.0),
            ],
            Mode::Weighted,
        );
        graph.clean();
        assert_eq!(graph.links(0), &[(1, 2.0), (3, 1.75)]);
    }

    #[test]
    fn unweighted_keeps_first_weight_without_summing() {
        let mut graph = Graph::from_edges(
            vec![
                Edge::weighted(0, 1, 1.0),
                Edge::weighted(0, 1, 1.0),
                Edge::weighted(0, 1, 1.0),
            ],
            Mode::Unweighted,
        );
        graph.clean();
        assert_eq!(graph.links(0), &[(1, 1.0)]);
    }

    #[test]
    fn clean_is_idempotent() {
        let mut graph = Graph::from_edges(
            vec![
                Edge::weighted(2, 1, 1.0),
                Edge::weighted(1, 2, 3.0),
                Edge::weighted(2, 2, 0.5),
                Edge::weighted(2, 2, 0.5),
            ],
            Mode::Weighted,
        );
        graph.clean();
        let once = graph.clone();
        graph.clean();
        assert_eq!(graph, once);
    }

    #[test]
    fn sums_keep_f64_precision_until_written() {
        // 2^24 + 1 is not representable in f32, so a running f32 sum would stay at 2^24
        let big = 16_777_216.0;
        let mut graph = Graph::from_edges(
            vec![
                Edge::weighted(0, 1, big),
                Edge::weighted(0, 1, 1.0),
                Edge::weighted(0, 1, 1.0),
            ],
            Mode::Weighted,
        );
        graph.clean();
        assert_eq!(graph.links(0), &[(1, big + 2.0)]);

        let f32_sum = [big as f32, 1.0, 1.0].iter().fold(0.0f32, |acc, w| acc + w);
        assert_eq!(f32_sum, 16_777_216.0);

        let mut bytes = Vec::new();
        graph.write_weights(&mut bytes, crate::endian::Endian::Little).unwrap();
        assert_eq!(&bytes[..4], &16_777_218.0f32.to_le_bytes());
    }
}
