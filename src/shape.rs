use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt::{self, Display, Formatter};

use derive_more::From;
use serde::{Deserialize, Serialize};

use crate::circle::Circle;
use crate::conic::Conic;
use crate::ellipses::{xyrr::XYRR, xyrrt::XYRRT};
use crate::error::ShapeError;
use crate::math::is_zero::IsZero;
use crate::r2::R2;
use crate::transform::{CanProject, Projection};

#[derive(Clone, Copy, Debug, From, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Shape {
    Circle(Circle),
    XYRR(XYRR),
    XYRRT(XYRRT),
}

pub fn circle(x: f64, y: f64, r: f64) -> Shape {
    Shape::Circle(Circle { c: R2::new(x, y), r })
}

pub fn xyrr(x: f64, y: f64, rx: f64, ry: f64) -> Shape {
    Shape::XYRR(XYRR { c: R2::new(x, y), r: R2::new(rx, ry) })
}

pub fn xyrrt(x: f64, y: f64, rx: f64, ry: f64, t: f64) -> Shape {
    Shape::XYRRT(XYRRT { c: R2::new(x, y), r: R2::new(rx, ry), t })
}

impl Shape {
    pub fn center(&self) -> R2 {
        match self {
            Shape::Circle(c) => c.c,
            Shape::XYRR(e) => e.c,
            Shape::XYRRT(e) => e.c,
        }
    }

    pub fn radii(&self) -> R2 {
        match self {
            Shape::Circle(c) => R2::new(c.r, c.r),
            Shape::XYRR(e) => e.r,
            Shape::XYRRT(e) => e.r,
        }
    }

    pub fn rotation(&self) -> f64 {
        match self {
            Shape::XYRRT(e) => e.t,
            _ => 0.,
        }
    }

    pub fn area(&self) -> f64 {
        match self {
            Shape::Circle(c) => c.area(),
            Shape::XYRR(e) => e.area(),
            Shape::XYRRT(e) => e.area(),
        }
    }

    /// Maps this shape to the unit circle at the origin.
    pub fn projection(&self) -> Projection {
        match self {
            Shape::Circle(c) => c.projection(),
            Shape::XYRR(e) => e.projection(),
            Shape::XYRRT(e) => e.projection(),
        }
    }

    pub fn conic(&self) -> Conic {
        Conic::unit_circle().apply(&-self.projection())
    }

    pub fn contains(&self, p: &R2) -> bool {
        p.apply(&self.projection()).norm2() <= 1.
    }

    /// Boundary coordinate of p: its angle once projected onto the unit circle.
    pub fn theta(&self, p: &R2) -> f64 {
        p.apply(&self.projection()).atan2()
    }

    /// Boundary point at coordinate t.
    pub fn point(&self, t: f64) -> R2 {
        R2::new(t.cos(), t.sin()).apply(&-self.projection())
    }

    pub fn arc_midpoint(&self, t0: f64, t1: f64) -> R2 {
        self.point((t0 + t1) / 2.)
    }

    /// Boundary points at the four axis coordinates.
    pub fn vertices(&self) -> [R2; 4] {
        [
            self.point(0.),
            self.point(FRAC_PI_2),
            self.point(PI),
            self.point(3. * FRAC_PI_2),
        ]
    }

    /// Intersection points with another shape, in no particular order.
    ///
    /// The other shape's conic is carried into this shape's unit-circle frame,
    /// intersected there, and the points mapped back to the original plane.
    pub fn intersect(&self, o: &Shape) -> Vec<R2> {
        let projection = self.projection();
        let projected = o.conic().apply(&projection);
        projected
            .unit_intersections()
            .iter()
            .map(|p| p.apply(&-&projection))
            .collect()
    }

    /// Whether this shape wholly contains another; only meaningful when their
    /// boundaries do not intersect.
    pub fn contains_shape(&self, o: &Shape) -> bool {
        o.vertices().iter().all(|v| self.contains(v)) && self.contains(&o.center())
    }

    pub fn validate(&self) -> Result<(), ShapeError> {
        let c = self.center();
        let r = self.radii();
        let finite = c.x.is_finite() && c.y.is_finite() && r.x.is_finite() && r.y.is_finite() && self.rotation().is_finite();
        if !finite {
            return Err(ShapeError::NonFinite(format!("{}", self)));
        }
        for radius in [r.x, r.y] {
            if radius <= 0. {
                return Err(ShapeError::NonPositiveRadius { shape: format!("{}", self), radius });
            }
        }
        Ok(())
    }

    /// Recover center, radii and rotation from implicit conic coefficients.
    pub fn from_conic(conic: &Conic) -> Result<Shape, ShapeError> {
        let t = conic.level_theta();
        let leveled = conic.rotate(-t);
        let Conic { a, c, d, e, f, .. } = leveled;
        if a.is_zero() || c.is_zero() || (a < 0.) != (c < 0.) {
            return Err(ShapeError::NotAnEllipse(format!("{:?}", conic)));
        }
        // Normalize so the squared terms are positive
        let sign = if a < 0. { -1. } else { 1. };
        let (a, c, d, e, f) = (sign * a, sign * c, sign * d, sign * e, sign * f);
        let cx = -d / (2. * a);
        let cy = -e / (2. * c);
        let g = a * cx * cx + c * cy * cy - f;
        if g <= 0. {
            return Err(ShapeError::NotAnEllipse(format!("{:?}", conic)));
        }
        let r = R2::new((g / a).sqrt(), (g / c).sqrt());
        let center = R2::new(cx, cy).rotate(t);
        let shape = if t.is_zero() {
            Shape::XYRR(XYRR { c: center, r })
        } else {
            Shape::XYRRT(XYRRT { c: center, r, t })
        };
        shape.validate()?;
        Ok(shape)
    }
}

impl Display for Shape {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Circle(c) => c.fmt(f),
            Shape::XYRR(e) => e.fmt(f),
            Shape::XYRRT(e) => e.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_4, TAU};

    use itertools::Itertools;
    use test_log::test;

    use super::*;

    #[test]
    fn theta_point_roundtrip() {
        let shapes = [
            circle(1., -2., 3.),
            xyrr(0., 0., 2., 1.),
            xyrrt(1., 1., 2., 3., FRAC_PI_4),
        ];
        for shape in &shapes {
            for i in 0..8 {
                let t = TAU * i as f64 / 8.;
                let p = shape.point(t);
                let t2 = shape.theta(&p).rem_euclid(TAU);
                assert_relative_eq!(t2, t.rem_euclid(TAU), max_relative = 1e-9, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn conic_vanishes_on_boundary() {
        let shape = xyrrt(1., 1., 2., 3., FRAC_PI_4);
        let conic = shape.conic();
        for i in 0..8 {
            let p = shape.point(TAU * i as f64 / 8.);
            assert_relative_eq!(conic.eval(&p), 0., epsilon = 1e-9);
        }
    }

    #[test]
    fn from_conic_roundtrip() {
        let original = xyrrt(1., -2., 2., 3., 0.3);
        let recovered = Shape::from_conic(&original.conic()).unwrap();
        assert_relative_eq!(recovered.center(), original.center(), epsilon = 1e-9);
        let (r0, r1) = (recovered.radii(), original.radii());
        let mut rs0 = [r0.x, r0.y];
        let mut rs1 = [r1.x, r1.y];
        rs0.sort_by(|a, b| a.partial_cmp(b).unwrap());
        rs1.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_relative_eq!(rs0[0], rs1[0], max_relative = 1e-9);
        assert_relative_eq!(rs0[1], rs1[1], max_relative = 1e-9);
    }

    #[test]
    fn intersect_unit_circles() {
        let c0 = circle(0., 0., 1.);
        let c1 = circle(1., 0., 1.);
        let points = c0.intersect(&c1);
        assert_eq!(points.len(), 2);
        let s3 = 3_f64.sqrt() / 2.;
        let mut sorted = points.clone();
        sorted.sort_by(|a, b| a.y.partial_cmp(&b.y).unwrap());
        assert_relative_eq!(sorted[0], R2::new(0.5, -s3), epsilon = 1e-9);
        assert_relative_eq!(sorted[1], R2::new(0.5, s3), epsilon = 1e-9);
    }

    #[test]
    fn intersect_symmetric() {
        let e0 = xyrrt(0., 0., 2., 1., 0.);
        let e1 = xyrrt(0., 0., 4., 1., FRAC_PI_4);
        let p01 = e0.intersect(&e1);
        let p10 = e1.intersect(&e0);
        assert_eq!(p01.len(), 4);
        assert_eq!(p10.len(), 4);
        let key = |p: &R2| (p.x * 1e9).round() as i64;
        let s01: Vec<i64> = p01.iter().map(key).sorted().collect();
        let s10: Vec<i64> = p10.iter().map(key).sorted().collect();
        assert_eq!(s01, s10);
        for p in &p01 {
            // Each point lies on both boundaries
            assert_relative_eq!(p.apply(&e0.projection()).norm(), 1., max_relative = 1e-7);
            assert_relative_eq!(p.apply(&e1.projection()).norm(), 1., max_relative = 1e-7);
        }
    }

    #[test]
    fn intersect_ellipse_unit_circle() {
        let e = xyrrt(1., 1., 2., 3., FRAC_PI_4);
        let c = circle(0., 0., 1.);
        let mut points = e.intersect(&c);
        assert_eq!(points.len(), 2);
        points.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap());
        assert_relative_eq!(points[0], R2::new(-0.9661421617927795, 0.2580103160851765), epsilon = 1e-6);
        assert_relative_eq!(points[1], R2::new(0.25801031608517655, -0.9661421617927797), epsilon = 1e-6);
    }

    #[test]
    fn contains_shape() {
        let outer = circle(0., 0., 3.);
        let inner = xyrr(0.5, 0., 1., 1.5);
        assert!(outer.contains_shape(&inner));
        assert!(!inner.contains_shape(&outer));
    }

    #[test]
    fn validate() {
        assert!(circle(0., 0., 1.).validate().is_ok());
        assert!(circle(0., 0., -1.).validate().is_err());
        assert!(xyrr(f64::NAN, 0., 1., 1.).validate().is_err());
    }

    #[test]
    fn serde_roundtrip() {
        let shapes = vec![
            circle(1., -2., 3.),
            xyrr(0., 0.5, 2., 1.),
            xyrrt(1., 1., 2., 3., FRAC_PI_4),
        ];
        let json = serde_json::to_string(&shapes).unwrap();
        assert!(json.contains("\"kind\":\"Circle\""));
        let parsed: Vec<Shape> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, shapes);
    }
}
