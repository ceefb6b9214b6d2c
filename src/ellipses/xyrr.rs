use std::f64::consts::PI;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::fmt::Fmt;
use crate::r2::R2;
use crate::transform::{Projection, Transform::{Scale, Translate}};

/// Axis-aligned ellipse: center and two radii.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct XYRR {
    pub c: R2,
    pub r: R2,
}

impl XYRR {
    pub fn area(&self) -> f64 {
        PI * self.r.x * self.r.y
    }

    /// Maps this ellipse to the unit circle at the origin.
    pub fn projection(&self) -> Projection {
        Projection(vec![
            Translate(-self.c),
            Scale(self.r.recip()),
        ])
    }
}

impl Display for XYRR {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "E({}, {}, {}, {})",
            self.c.x.s(3), self.c.y.s(3), self.r.x.s(3), self.r.y.s(3),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::transform::CanProject;

    use super::*;

    #[test]
    fn projection_roundtrip() {
        let e = XYRR { c: R2::new(1., -1.), r: R2::new(2., 3.) };
        let p = R2::new(3., -1.);  // rightmost vertex
        let projected = p.apply(&e.projection());
        assert_relative_eq!(projected, R2::new(1., 0.));
        assert_relative_eq!(projected.apply(&-&e.projection()), p);
    }
}
