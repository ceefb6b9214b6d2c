use serde::{Deserialize, Serialize};

use crate::edge::Edge;
use crate::node::Node;

/// An edge traversed in a given direction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub edge_idx: usize,
    pub fwd: bool,
}

impl Segment {
    pub fn start(&self, edges: &[Edge]) -> usize {
        let edge = &edges[self.edge_idx];
        if self.fwd { edge.node0 } else { edge.node1 }
    }

    pub fn end(&self, edges: &[Edge]) -> usize {
        let edge = &edges[self.edge_idx];
        if self.fwd { edge.node1 } else { edge.node0 }
    }

    /// Candidate continuations: edges through this segment's end node, on a
    /// different shape, that can still be visited.
    pub fn successors(&self, edges: &[Edge], nodes: &[Node]) -> Vec<Segment> {
        let end = self.end(edges);
        let shape_idx = edges[self.edge_idx].shape_idx;
        nodes[end]
            .edge_idxs
            .iter()
            .filter(|&&idx| {
                let edge = &edges[idx];
                edge.shape_idx != shape_idx && edge.visits < edge.expected_visits()
            })
            .map(|&idx| Segment { edge_idx: idx, fwd: edges[idx].node0 == end })
            .collect()
    }
}
