use std::fmt::{self, Display, Formatter};
use std::ops::{Add, Div, Mul, Neg, Sub};

use approx::{AbsDiffEq, RelativeEq};
use derive_more::From;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, From, PartialEq, Serialize, Deserialize)]
pub struct R2 {
    pub x: f64,
    pub y: f64,
}

impl R2 {
    pub fn new(x: f64, y: f64) -> R2 {
        R2 { x, y }
    }
    pub fn norm2(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }
    pub fn norm(&self) -> f64 {
        self.norm2().sqrt()
    }
    pub fn atan2(&self) -> f64 {
        self.y.atan2(self.x)
    }
    pub fn distance(&self, o: &R2) -> f64 {
        (*self - *o).norm()
    }
    pub fn rotate(&self, t: f64) -> R2 {
        let (sin, cos) = t.sin_cos();
        R2 {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }
    /// Componentwise reciprocal
    pub fn recip(&self) -> R2 {
        R2 { x: 1. / self.x, y: 1. / self.y }
    }
    pub fn cross(&self, o: &R2) -> f64 {
        self.x * o.y - self.y * o.x
    }
}

impl Display for R2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

impl Add for R2 {
    type Output = R2;
    fn add(self, o: R2) -> R2 {
        R2 { x: self.x + o.x, y: self.y + o.y }
    }
}

impl Sub for R2 {
    type Output = R2;
    fn sub(self, o: R2) -> R2 {
        R2 { x: self.x - o.x, y: self.y - o.y }
    }
}

impl Neg for R2 {
    type Output = R2;
    fn neg(self) -> R2 {
        R2 { x: -self.x, y: -self.y }
    }
}

impl Mul<f64> for R2 {
    type Output = R2;
    fn mul(self, k: f64) -> R2 {
        R2 { x: self.x * k, y: self.y * k }
    }
}

impl Mul for R2 {
    type Output = R2;
    fn mul(self, o: R2) -> R2 {
        R2 { x: self.x * o.x, y: self.y * o.y }
    }
}

impl Div<f64> for R2 {
    type Output = R2;
    fn div(self, k: f64) -> R2 {
        R2 { x: self.x / k, y: self.y / k }
    }
}

impl Div for R2 {
    type Output = R2;
    fn div(self, o: R2) -> R2 {
        R2 { x: self.x / o.x, y: self.y / o.y }
    }
}

impl AbsDiffEq for R2 {
    type Epsilon = f64;
    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }
    fn abs_diff_eq(&self, o: &R2, epsilon: f64) -> bool {
        self.x.abs_diff_eq(&o.x, epsilon) && self.y.abs_diff_eq(&o.y, epsilon)
    }
}

impl RelativeEq for R2 {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }
    fn relative_eq(&self, o: &R2, epsilon: f64, max_relative: f64) -> bool {
        self.x.relative_eq(&o.x, epsilon, max_relative) && self.y.relative_eq(&o.y, epsilon, max_relative)
    }
}
