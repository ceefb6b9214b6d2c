use std::f64::consts::PI;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::fmt::Fmt;
use crate::r2::R2;
use crate::transform::{Projection, Transform::{Scale, Translate}};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub c: R2,
    pub r: f64,
}

impl Circle {
    pub fn area(&self) -> f64 {
        PI * self.r * self.r
    }

    /// Maps this circle to the unit circle at the origin.
    pub fn projection(&self) -> Projection {
        Projection(vec![
            Translate(-self.c),
            Scale(R2::new(1. / self.r, 1. / self.r)),
        ])
    }
}

impl Display for Circle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "C({}, {}, {})", self.c.x.s(3), self.c.y.s(3), self.r.s(3))
    }
}
