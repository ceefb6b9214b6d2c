use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};

use crate::fmt::Deg;
use crate::shape::Shape;

/// Directed arc of one shape's boundary between two nodes, in the arrangement
/// arena; `theta1` is always greater than `theta0` (unwrapped past 2π when the
/// arc crosses the branch cut).
#[derive(Clone, Debug)]
pub struct Edge {
    pub idx: usize,
    pub shape_idx: usize,
    pub node0: usize,
    pub node1: usize,
    pub theta0: f64,
    pub theta1: f64,
    /// Shapes (other than `shape_idx`) that contain this arc
    pub container_idxs: BTreeSet<usize>,
    /// Whether the arc lies on the outer boundary of its connected component
    pub is_boundary: bool,
    pub visits: usize,
}

impl Edge {
    pub fn theta_span(&self) -> f64 {
        let span = self.theta1 - self.theta0;
        if span < 0. {
            panic!("Invalid edge {}, negative theta span: {}", self.idx, span)
        }
        span
    }

    /// Boundary arcs bound one region, internal arcs two.
    pub fn expected_visits(&self) -> usize {
        if self.is_boundary { 1 } else { 2 }
    }

    /// Shapes that contain this arc, or whose boundary it runs along.
    pub fn all_idxs(&self) -> BTreeSet<usize> {
        let mut idxs = self.container_idxs.clone();
        idxs.insert(self.shape_idx);
        idxs
    }

    /// Signed area between the arc and its chord: rx·ry/2·(Δθ - sin Δθ).
    /// Affine-invariant, so it holds for rotated ellipses as well.
    pub fn secant_area(&self, shapes: &[Shape]) -> f64 {
        let r = shapes[self.shape_idx].radii();
        let theta = self.theta_span();
        r.x * r.y / 2. * (theta - theta.sin())
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let containers: Vec<String> = self.container_idxs.iter().map(|idx| format!("{}", idx)).collect();
        write!(
            f,
            "C{}: {}({}) → {}({}), containers: [{}] ({})",
            self.shape_idx,
            self.node0, self.theta0.deg_str(),
            self.node1, self.theta1.deg_str(),
            containers.join(","),
            if self.is_boundary { "external" } else { "internal" },
        )
    }
}
