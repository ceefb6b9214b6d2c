use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::edge::Edge;
use crate::node::Node;
use crate::r2::R2;
use crate::segment::Segment;
use crate::shape::Shape;

/// One arc of a region's boundary, in traversal order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub shape_idx: usize,
    pub theta0: f64,
    pub theta1: f64,
    pub fwd: bool,
}

/// A face of the arrangement: a maximal connected area covered by exactly the
/// shapes in `key` and no others.
#[derive(Clone, Debug)]
pub struct Region {
    /// Indices of the shapes containing this region
    pub key: BTreeSet<usize>,
    pub segments: Vec<Segment>,
    /// Shoelace area of the polygon through the region's nodes
    pub polygon_area: f64,
    /// Signed sum of the arc corrections beyond that polygon
    pub secant_area: f64,
    /// Total hull area of island components nested directly inside this region
    pub island_area: f64,
}

impl Region {
    pub fn new(
        key: BTreeSet<usize>,
        segments: Vec<Segment>,
        edges: &[Edge],
        nodes: &[Node],
        shapes: &[Shape],
    ) -> Region {
        let polygon_area = polygon_area(&segments, edges, nodes);
        let secant_area = segments
            .iter()
            .map(|segment| {
                let edge = &edges[segment.edge_idx];
                let area = edge.secant_area(shapes);
                if key.contains(&edge.shape_idx) { area } else { -area }
            })
            .sum();
        Region { key, segments, polygon_area, secant_area, island_area: 0. }
    }

    pub fn key_string(&self) -> String {
        self.key.iter().map(|idx| idx.to_string()).join(",")
    }

    /// Area of this region alone, island holes excluded.
    pub fn area(&self) -> f64 {
        (self.polygon_area + self.secant_area).abs() - self.island_area
    }

    pub fn boundary(&self, edges: &[Edge]) -> Vec<Arc> {
        self.segments
            .iter()
            .map(|segment| {
                let edge = &edges[segment.edge_idx];
                Arc {
                    shape_idx: edge.shape_idx,
                    theta0: if segment.fwd { edge.theta0 } else { edge.theta1 },
                    theta1: if segment.fwd { edge.theta1 } else { edge.theta0 },
                    fwd: segment.fwd,
                }
            })
            .collect()
    }

    /// Whether p's membership pattern over `set_idxs` matches this region's key.
    pub fn contains(&self, p: &R2, set_idxs: &[usize], shapes: &[Shape]) -> bool {
        set_idxs
            .iter()
            .all(|idx| shapes[*idx].contains(p) == self.key.contains(idx))
    }
}

/// Shoelace area over the segments' start nodes, unsigned.
pub fn polygon_area(segments: &[Segment], edges: &[Edge], nodes: &[Node]) -> f64 {
    let points: Vec<R2> = segments.iter().map(|s| nodes[s.start(edges)].p).collect();
    let n = points.len();
    let twice: f64 = (0..n).map(|i| points[i].cross(&points[(i + 1) % n])).sum();
    (twice / 2.).abs()
}

impl Display for Region {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "R({}: {} segments, area {:.3})",
            self.key_string(),
            self.segments.len(),
            self.area(),
        )
    }
}
