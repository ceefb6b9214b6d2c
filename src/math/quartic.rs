use log::{debug, warn};

use super::{cubic, is_zero::{IsZero, EPSILON}, quadratic};

/// Real root of a quartic: (value, is_double_root).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root(pub f64, pub bool);

impl Root {
    pub fn double(&self) -> bool {
        self.1
    }
}

/// Real roots of a4·x⁴ + a3·x³ + a2·x² + a1·x + a0, ascending, with double
/// roots collapsed into a single flagged [Root]. Degree degrades gracefully as
/// leading coefficients vanish. Complex conjugate pairs are dropped silently.
pub fn quartic(a4: f64, a3: f64, a2: f64, a1: f64, a0: f64) -> Vec<Root> {
    let [a4, a3, a2, a1, a0] = [a4.zeroed(), a3.zeroed(), a2.zeroed(), a1.zeroed(), a0.zeroed()];
    let mut roots = if a4.is_zero() {
        cubic::cubic(a3, a2, a1, a0).reals()
    } else {
        quartic_scaled(a3 / a4, a2 / a4, a1 / a4, a0 / a4)
    };
    for r in &mut roots {
        *r = polish(*r, a4, a3, a2, a1, a0);
    }
    roots.sort_by(|a, b| a.partial_cmp(b).unwrap());
    collapse(roots)
}

/// Monic quartic: x⁴ + b·x³ + c·x² + d·x + e
pub fn quartic_scaled(b: f64, c: f64, d: f64, e: f64) -> Vec<f64> {
    debug!("quartic_scaled({}, {}, {}, {})", b, c, d, e);
    // Substitute x = y - b/4, eliminating the cubic term: y⁴ + py² + qy + r
    let b4 = b / 4.;
    let p = c - 6. * b4 * b4;
    let q = 8. * b4 * b4 * b4 - 2. * b4 * c + d;
    let r = -3. * b4 * b4 * b4 * b4 + b4 * b4 * c - b4 * d + e;
    quartic_depressed(p.zeroed(), q.zeroed(), r.zeroed())
        .into_iter()
        .map(|y| y - b4)
        .collect()
}

/// Depressed quartic: y⁴ + py² + qy + r
pub fn quartic_depressed(p: f64, q: f64, r: f64) -> Vec<f64> {
    debug!("quartic_depressed({}, {}, {})", p, q, r);
    if q.is_zero() {
        return biquadratic(p, r);
    }
    // Resolvent cubic; its largest real root factors the quartic into two quadratics
    let z0 = cubic::cubic_scaled(2. * p, p * p - 4. * r, -q * q)
        .reals()
        .into_iter()
        .fold(f64::NEG_INFINITY, f64::max);
    if z0 <= EPSILON {
        // Resolvent says q is effectively zero relative to p and r
        return biquadratic(p, r);
    }
    let s = z0.sqrt();
    let mut t0 = (p + z0 - q / s) / 2.;
    let mut t1 = (p + z0 + q / s) / 2.;
    // t0·t1 = r; recompute whichever constant suffered catastrophic cancellation
    if t0.abs() > t1.abs() {
        if t0 != 0. {
            t1 = r / t0;
        }
    } else if t1 != 0. {
        t0 = r / t1;
    }
    let mut roots = quadratic::quadratic_scaled(s, t0).reals();
    roots.extend(quadratic::quadratic_scaled(-s, t1).reals());
    roots
}

/// y⁴ + py² + r, i.e. a quadratic in y²
fn biquadratic(p: f64, r: f64) -> Vec<f64> {
    let mut roots = vec![];
    for u in quadratic::quadratic_scaled(p, r).reals() {
        if u.lt_zero() {
            continue;
        }
        let s = u.max(0.).sqrt();
        roots.push(-s);
        roots.push(s);
    }
    roots
}

/// A couple of guarded Newton steps against the original polynomial; a no-op
/// near multiple roots where the derivative vanishes.
fn polish(x: f64, a4: f64, a3: f64, a2: f64, a1: f64, a0: f64) -> f64 {
    let mut x = x;
    for _ in 0..2 {
        let f = (((a4 * x + a3) * x + a2) * x + a1) * x + a0;
        let fd = ((4. * a4 * x + 3. * a3) * x + 2. * a2) * x + a1;
        let scale = a4.abs() + a3.abs() + a2.abs() + a1.abs();
        if fd.abs() <= 1e-8 * scale.max(1.) {
            break;
        }
        x -= f / fd;
    }
    x
}

fn collapse(roots: Vec<f64>) -> Vec<Root> {
    let mut collapsed = vec![];
    let mut i = 0;
    while i < roots.len() {
        let mut j = i + 1;
        while j < roots.len() && (roots[j] - roots[i]).abs() <= 1e-9 * roots[i].abs().max(1.) {
            j += 1;
        }
        let order = j - i;
        let r = roots[i..j].iter().sum::<f64>() / order as f64;
        match order {
            1 => collapsed.push(Root(r, false)),
            2 => collapsed.push(Root(r, true)),
            _ => {
                warn!("Skipping multiple root {} ({})", r, order);
                collapsed.push(Root(r, false));
            }
        }
        i = j;
    }
    collapsed
}

#[cfg(test)]
mod tests {
    use log::debug;
    use test_log::test;

    use super::*;

    fn coeffs(rs: [f64; 4]) -> [f64; 4] {
        let [r0, r1, r2, r3] = rs;
        let a3 = -(r0 + r1 + r2 + r3);
        let a2 = r0 * r1 + r0 * r2 + r0 * r3 + r1 * r2 + r1 * r3 + r2 * r3;
        let a1 = -(r0 * r1 * r2 + r0 * r1 * r3 + r0 * r2 * r3 + r1 * r2 * r3);
        let a0 = r0 * r1 * r2 * r3;
        [a3, a2, a1, a0]
    }

    #[test]
    fn distinct_roots() {
        let [a3, a2, a1, a0] = coeffs([-3., -1., 2., 5.]);
        let roots = quartic(1., a3, a2, a1, a0);
        assert_eq!(roots.len(), 4);
        for (root, expected) in roots.iter().zip([-3., -1., 2., 5.]) {
            assert!(!root.double());
            assert_relative_eq!(root.0, expected, max_relative = 1e-9);
        }
    }

    #[test]
    fn double_roots() {
        // (x² - 1)² = x⁴ - 2x² + 1
        let roots = quartic(1., 0., -2., 0., 1.);
        assert_eq!(roots.len(), 2);
        assert!(roots[0].double());
        assert!(roots[1].double());
        assert_relative_eq!(roots[0].0, -1.);
        assert_relative_eq!(roots[1].0, 1.);
    }

    #[test]
    fn two_double_roots() {
        // (x + 10)²(x + 0.1)² = (x² + 10.1x + 1)²
        let roots = quartic(1., 20.2, 104.01, 20.2, 1.);
        assert_eq!(roots.len(), 2);
        assert!(roots[0].double());
        assert!(roots[1].double());
        assert_relative_eq!(roots[0].0, -10., max_relative = 1e-9);
        assert_relative_eq!(roots[1].0, -0.1, max_relative = 1e-9);
    }

    #[test]
    fn triple_root() {
        // (x + 10)³(x + 0.1); the resolvent cubic's root is triple here, so
        // the recovered roots cluster around -10 instead of landing exactly
        let roots = quartic(1., 30.1, 303., 1030., 100.);
        for expected in [-10., -0.1] {
            let best = roots
                .iter()
                .map(|r| (r.0 - expected).abs())
                .fold(f64::INFINITY, f64::min);
            assert!(best <= 2e-4, "missing root {}: {:?}", expected, roots);
        }
    }

    #[test]
    fn no_real_roots() {
        // (x² + 1)(x² + 4)
        assert_eq!(quartic(1., 0., 5., 0., 4.), vec![]);
    }

    #[test]
    fn two_reals_two_complex() {
        // (x² + 1)(x - 1)(x + 2) = x⁴ + x³ - x² + x - 2
        let roots = quartic(1., 1., -1., 1., -2.);
        assert_eq!(roots.len(), 2);
        assert_relative_eq!(roots[0].0, -2., max_relative = 1e-9);
        assert_relative_eq!(roots[1].0, 1., max_relative = 1e-9);
    }

    #[test]
    fn degenerate_cubic() {
        let roots = quartic(0., 1., -6., 11., -6.);
        let reals: Vec<f64> = roots.iter().map(|r| r.0).collect();
        assert_eq!(reals.len(), 3);
        for (&actual, expected) in reals.iter().zip([1., 2., 3.]) {
            assert_relative_eq!(actual, expected, max_relative = 1e-9);
        }
    }

    #[test]
    fn sweep() {
        let vals = [-10., -1., -0.1, 0., 0.1, 1., 10.];
        let n = vals.len();
        for i0 in 0..n {
            for i1 in i0..n {
                for i2 in i1..n {
                    for i3 in i2..n {
                        let rs = [vals[i0], vals[i1], vals[i2], vals[i3]];
                        let [a3, a2, a1, a0] = coeffs(rs);
                        let roots = quartic(1., a3, a2, a1, a0);
                        for expected in rs {
                            let best = roots
                                .iter()
                                .map(|r| (r.0 - expected).abs())
                                .fold(f64::INFINITY, f64::min);
                            assert!(
                                best <= 2e-5 * expected.abs().max(1.),
                                "missing root {} for {:?}: {:?}",
                                expected, rs, roots,
                            );
                        }
                        for Root(x, _) in &roots {
                            let f = (((x + a3) * x + a2) * x + a1) * x + a0;
                            let scale = x.powi(4).abs() + (a3 * x.powi(3)).abs() + (a2 * x * x).abs() + (a1 * x).abs() + a0.abs();
                            assert!(
                                f.abs() <= 1e-9 * scale.max(1.),
                                "residual {} at root {} for {:?}",
                                f, x, rs,
                            );
                        }
                    }
                }
            }
        }
    }

    // Factored out of a unit-intersection calculation for the ellipse:
    //
    // XYRR {
    //     c: R2 { x: -1.100285308561806, y: -1.1500279763995946e-5 },
    //     r: R2 { x:  1.000263820108834, y:  1.0000709021402923 }
    // }
    //
    // which is nearly a unit circle centered at (-1.1, 0), but with all 4 coordinates perturbed slightly.
    // See also: https://github.com/vorot/roots/issues/30.
    static A4: f64 = 0.000000030743755847066437;
    static A3: f64 = 0.000000003666731306801131;
    static A2: f64 = 1.0001928389119579;
    static A1: f64 = 0.000011499702220469921;
    static A0: f64 = -0.6976068572771268;

    #[test]
    fn almost_quadratic() {
        let roots = quartic(A4, A3, A2, A1, A0);
        let small: Vec<f64> = roots.iter().map(|r| r.0).filter(|x| x.abs() < 2.).collect();
        debug!("roots: {:?}", roots);
        assert_eq!(small.len(), 2);
        assert_relative_eq!(small[0], -0.835153846196954, max_relative = 1e-6);
        assert_relative_eq!(small[1],  0.835142346155438, max_relative = 1e-6);
    }

    #[test]
    fn almost_quadratic_sturm() {
        let results = roots::find_roots_sturm(&[A3 / A4, A2 / A4, A1 / A4, A0 / A4], &mut 1e-6);
        let roots: Vec<f64> = results.into_iter().filter_map(|r| r.ok()).collect();
        debug!("roots: {:?}", roots);
        assert_eq!(roots.len(), 2);
        assert_relative_eq!(roots[0], -0.835153846196954, max_relative = 1e-5);
        assert_relative_eq!(roots[1],  0.835142346155438, max_relative = 1e-5);
    }
}
