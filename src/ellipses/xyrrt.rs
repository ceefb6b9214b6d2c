use std::f64::consts::PI;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::fmt::{Deg, Fmt};
use crate::r2::R2;
use crate::transform::{Projection, Transform::Rotate};

use super::xyrr::XYRR;

/// Ellipse with center, two radii, and counterclockwise rotation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct XYRRT {
    pub c: R2,
    pub r: R2,
    pub t: f64,
}

impl XYRRT {
    pub fn area(&self) -> f64 {
        PI * self.r.x * self.r.y
    }

    /// Rotate the plane so that this ellipse becomes axis-aligned.
    pub fn level(&self) -> XYRR {
        XYRR {
            c: self.c.rotate(-self.t),
            r: self.r,
        }
    }

    /// Maps this ellipse to the unit circle at the origin: rotate the plane to
    /// axis-alignment, then project the leveled ellipse.
    pub fn projection(&self) -> Projection {
        let leveled = self.level();
        let mut transforms = vec![Rotate(-self.t)];
        transforms.extend(leveled.projection().0);
        Projection(transforms)
    }
}

impl Display for XYRRT {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "E({}, {}, {}, {}, {}°)",
            self.c.x.s(3), self.c.y.s(3), self.r.x.s(3), self.r.y.s(3), self.t.deg_str(),
        )
    }
}
