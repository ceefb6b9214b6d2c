use log::debug;
use serde::{Deserialize, Serialize};

use crate::math::is_zero::IsZero;
use crate::math::quartic::{self, Root};
use crate::r2::R2;
use crate::transform::{Projection, Transform};

/// Implicit conic: Ax² + Bxy + Cy² + Dx + Ey + F = 0.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Conic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Conic {
    pub fn unit_circle() -> Conic {
        Conic { a: 1., b: 0., c: 1., d: 0., e: 0., f: -1. }
    }

    pub fn eval(&self, p: &R2) -> f64 {
        let Conic { a, b, c, d, e, f } = *self;
        let R2 { x, y } = *p;
        a * x * x + b * x * y + c * y * y + d * x + e * y + f
    }

    /// Conic satisfied by p + v whenever `self` is satisfied by p.
    pub fn translate(&self, v: &R2) -> Conic {
        let Conic { a, b, c, d, e, f } = *self;
        let R2 { x: vx, y: vy } = *v;
        Conic {
            a,
            b,
            c,
            d: -2. * a * vx - b * vy + d,
            e: -b * vx - 2. * c * vy + e,
            f: a * vx * vx + b * vx * vy + c * vy * vy - d * vx - e * vy + f,
        }
    }

    /// Conic satisfied by p rotated by t whenever `self` is satisfied by p.
    pub fn rotate(&self, t: f64) -> Conic {
        let Conic { a, b, c, d, e, f } = *self;
        let (sin, cos) = t.sin_cos();
        let (cc, ss, cs) = (cos * cos, sin * sin, cos * sin);
        Conic {
            a: a * cc - b * cs + c * ss,
            b: 2. * cs * (a - c) + b * (cc - ss),
            c: a * ss + b * cs + c * cc,
            d: d * cos - e * sin,
            e: d * sin + e * cos,
            f,
        }
    }

    /// Conic satisfied by p scaled componentwise by s whenever `self` is satisfied by p.
    pub fn scale(&self, s: &R2) -> Conic {
        let Conic { a, b, c, d, e, f } = *self;
        let R2 { x: kx, y: ky } = *s;
        Conic {
            a: a / (kx * kx),
            b: b / (kx * ky),
            c: c / (ky * ky),
            d: d / kx,
            e: e / ky,
            f,
        }
    }

    pub fn transform(&self, t: &Transform) -> Conic {
        match t {
            Transform::Translate(v) => self.translate(v),
            Transform::Rotate(t) => self.rotate(*t),
            Transform::Scale(s) => self.scale(s),
        }
    }

    pub fn apply(&self, projection: &Projection) -> Conic {
        projection.0.iter().fold(*self, |conic, t| conic.transform(t))
    }

    /// Rotation angle that eliminates the cross term B.
    pub fn level_theta(&self) -> f64 {
        self.b.atan2(self.a - self.c) / 2.
    }

    /// Intersections with the unit circle x² + y² = 1.
    ///
    /// Substituting y² = 1 - x² and squaring the remaining odd-y terms yields a
    /// quartic in x; each real root in [-1, 1] then lifts to y = ±√(1-x²), with
    /// the sign chosen by whichever satisfies the conic (both, for double roots).
    pub fn unit_intersections(&self) -> Vec<R2> {
        let Conic { a, b, c, d, e, f } = *self;
        let ac = a - c;
        let cf = c + f;
        let c4 = (ac * ac + b * b).zeroed();
        let c3 = (2. * d * ac + 2. * b * e).zeroed();
        let c2 = (d * d + 2. * ac * cf + e * e - b * b).zeroed();
        let c1 = (2. * d * cf - 2. * b * e).zeroed();
        let c0 = (cf * cf - e * e).zeroed();
        debug!("unit_intersections: x quartic [{}, {}, {}, {}, {}]", c4, c3, c2, c1, c0);
        let mut points = vec![];
        for Root(x, double) in quartic::quartic(c4, c3, c2, c1, c0) {
            if x.abs() > 1. + 1e-6 {
                continue;
            }
            let x = x.clamp(-1., 1.);
            let y = (1. - x * x).max(0.).sqrt();
            if double {
                points.push(R2 { x, y });
                if !y.is_zero() {
                    points.push(R2 { x, y: -y });
                }
            } else {
                let pos = R2 { x, y };
                let neg = R2 { x, y: -y };
                points.push(if self.eval(&pos).abs() <= self.eval(&neg).abs() { pos } else { neg });
            }
        }
        points
    }
}
