use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::fmt::{Deg, Fmt};
use crate::r2::R2;

/// Boundary coordinate of an intersection point on one shape, with its
/// trigonometric values cached.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Polar {
    pub theta: f64,
    pub cos: f64,
    pub sin: f64,
}

impl Polar {
    pub fn new(theta: f64) -> Polar {
        Polar { theta, cos: theta.cos(), sin: theta.sin() }
    }
}

/// Intersection point in the arrangement arena; referenced by index.
#[derive(Clone, Debug)]
pub struct Node {
    pub idx: usize,
    pub p: R2,
    /// Number of raw intersection points merged into this node
    pub n: usize,
    /// Boundary coordinate of this point on each shape passing through it
    pub shape_thetas: BTreeMap<usize, Polar>,
    pub edge_idxs: Vec<usize>,
}

impl Node {
    pub fn theta(&self, shape_idx: usize) -> f64 {
        self.shape_thetas
            .get(&shape_idx)
            .unwrap_or_else(|| panic!("node {} is not on shape {}", self.idx, shape_idx))
            .theta
    }

    /// Fold another raw intersection point into this node, averaging positions.
    pub fn merge(&mut self, p: R2, shape_idx0: usize, theta0: Polar, shape_idx1: usize, theta1: Polar) {
        let n = self.n as f64;
        self.p = (self.p * n + p) / (n + 1.);
        self.n += 1;
        self.shape_thetas.insert(shape_idx0, theta0);
        self.shape_thetas.insert(shape_idx1, theta1);
    }

    pub fn add_edge(&mut self, edge_idx: usize) {
        if !self.edge_idxs.contains(&edge_idx) {
            self.edge_idxs.push(edge_idx);
        }
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "N{}({}, {}: {})",
            self.idx,
            self.p.x.s(3),
            self.p.y.s(3),
            self.shape_thetas
                .iter()
                .map(|(idx, polar)| format!("C{}({})", idx, polar.theta.deg_str()))
                .collect::<Vec<String>>()
                .join(", "),
        )
    }
}
