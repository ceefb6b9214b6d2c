use std::f64::consts::TAU;

pub trait Fmt {
    /// Fixed-width display with `n` decimal places, leading space for non-negatives.
    fn s(&self, n: usize) -> String;
}

impl Fmt for f64 {
    fn s(&self, n: usize) -> String {
        if self.is_sign_negative() {
            format!("{0:.1$}", self, n)
        } else {
            format!(" {0:.1$}", self, n)
        }
    }
}

pub trait Deg {
    /// Angle in degrees, rounded, right-aligned to 4 chars.
    fn deg_str(&self) -> String;
}

impl Deg for f64 {
    fn deg_str(&self) -> String {
        let deg = (self.rem_euclid(TAU)).to_degrees().round();
        // Display 2π as 360, not 0
        let deg = if deg == 0. && *self >= TAU - 1e-9 { 360. } else { deg };
        format!("{:4}", deg as i64)
    }
}
