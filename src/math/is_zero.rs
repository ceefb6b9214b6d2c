/// Magnitudes below this threshold are treated as zero before root-finding;
/// otherwise near-degenerate leading coefficients send the solvers down
/// spurious branches.
pub const EPSILON: f64 = 1e-13;

pub trait IsZero {
    fn is_zero(&self) -> bool;
    fn lt_zero(&self) -> bool;
    /// Clamp to exactly zero when within [EPSILON] of it.
    fn zeroed(self) -> Self;
}

impl IsZero for f64 {
    fn is_zero(&self) -> bool {
        self.abs() < EPSILON
    }
    fn lt_zero(&self) -> bool {
        *self <= -EPSILON
    }
    fn zeroed(self) -> f64 {
        if self.is_zero() { 0. } else { self }
    }
}
