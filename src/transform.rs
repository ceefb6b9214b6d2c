use std::ops::Neg;

use serde::{Deserialize, Serialize};

use crate::r2::R2;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Transform {
    Translate(R2),
    Rotate(f64),
    /// Componentwise scale
    Scale(R2),
}

use Transform::{Rotate, Scale, Translate};

impl Transform {
    pub fn apply(&self, p: &R2) -> R2 {
        match self {
            Translate(v) => *p + *v,
            Rotate(t) => p.rotate(*t),
            Scale(s) => *p * *s,
        }
    }
}

impl Neg for Transform {
    type Output = Transform;
    fn neg(self) -> Transform {
        match self {
            Translate(v) => Translate(-v),
            Rotate(t) => Rotate(-t),
            Scale(s) => Scale(s.recip()),
        }
    }
}

/// Sequence of transforms, applied first-to-last.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Projection(pub Vec<Transform>);

impl Neg for Projection {
    type Output = Projection;
    fn neg(self) -> Projection {
        Projection(self.0.into_iter().rev().map(|t| -t).collect())
    }
}

impl Neg for &Projection {
    type Output = Projection;
    fn neg(self) -> Projection {
        -self.clone()
    }
}

pub trait CanProject {
    type Output;
    fn apply(&self, projection: &Projection) -> Self::Output;
}

impl CanProject for R2 {
    type Output = R2;
    fn apply(&self, projection: &Projection) -> R2 {
        projection.0.iter().fold(*self, |p, t| t.apply(&p))
    }
}
