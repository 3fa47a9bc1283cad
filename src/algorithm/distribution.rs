//! Approximate cumulative distribution functions
//!
//! These are closed-form approximations, not exact distributions. The
//! p-values built on them are stable, documented outputs; callers compare
//! against them, so they must not be swapped for exact forms silently.

/// Standard normal CDF (Abramowitz and Stegun 7.1.26, max error about 1.5e-7)
#[must_use]
pub fn normal_cdf(x: f64) -> f64 {
    const A1: f64 = 0.254_829_592;
    const A2: f64 = -0.284_496_736;
    const A3: f64 = 1.421_413_741;
    const A4: f64 = -1.453_152_027;
    const A5: f64 = 1.061_405_429;
    const P: f64 = 0.327_591_1;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs() / std::f64::consts::SQRT_2;

    let t = 1.0 / (1.0 + P * x);
    let y = 1.0 - ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t * (-x * x).exp();

    0.5 * (1.0 + sign * y)
}

/// Two-tailed p-value of a z score under the normal approximation
#[must_use]
pub fn two_tailed_p_value(z: f64) -> f64 {
    2.0 * (1.0 - normal_cdf(z.abs()))
}

/// Simplified chi-square CDF
///
/// Exact closed forms for one and two degrees of freedom; above that a
/// normal approximation with mean `df` and variance `2 df`, which degrades
/// in the tails for small `df`.
#[must_use]
pub fn chi_square_cdf(x: f64, df: u32) -> f64 {
    if x <= 0.0 || df == 0 {
        return 0.0;
    }
    match df {
        1 => 2.0 * normal_cdf(x.sqrt()) - 1.0,
        2 => 1.0 - (-x / 2.0).exp(),
        _ => {
            let df = f64::from(df);
            normal_cdf((x - df) / (2.0 * df).sqrt())
        }
    }
}
