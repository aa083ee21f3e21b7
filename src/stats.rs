//! Statistics primitives: moments, percentiles, and critical-value lookup.
//!
//! Leaf module consumed by the outcome simulator and the interval
//! estimator. All functions are pure; none allocate beyond their inputs.

/// Arithmetic mean. Returns 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (divisor n, not n-1).
///
/// Returns 0.0 for an empty slice.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Median of a slice that is already sorted ascending.
pub fn median(sorted: &[f64]) -> f64 {
    percentile(sorted, 50.0)
}

/// Percentile of a slice that is already sorted ascending, with linear
/// interpolation between adjacent order statistics.
///
/// `pct` is on the 0..=100 scale; values outside it are clamped to the
/// extremes. Returns 0.0 for an empty slice.
pub fn percentile(sorted: &[f64], pct: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let last = sorted.len() - 1;
    let rank = (pct / 100.0 * last as f64).clamp(0.0, last as f64);
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = rank - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Inverse CDF (quantile function) of the standard normal distribution.
///
/// Acklam's rational approximation, accurate to roughly 1e-9 over (0, 1).
/// Returns negative/positive infinity at the endpoints.
pub fn normal_ppf(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];
    const P_LOW: f64 = 0.02425;

    let tail = |q: f64| -> f64 {
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    };

    if p <= 0.0 {
        f64::NEG_INFINITY
    } else if p >= 1.0 {
        f64::INFINITY
    } else if p < P_LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    }
}

/// Inverse CDF (quantile function) of Student's t distribution with `df`
/// degrees of freedom.
///
/// Exact closed forms for df 1 and 2; the Abramowitz & Stegun 26.7.5
/// expansion around the normal quantile for df >= 3 (error below ~5e-3 at
/// the usual critical levels, shrinking as df grows). Returns NaN for
/// df == 0, which has no defined quantile.
pub fn t_ppf(p: f64, df: u32) -> f64 {
    match df {
        0 => f64::NAN,
        1 => (std::f64::consts::PI * (p - 0.5)).tan(),
        2 => (2.0 * p - 1.0) * (2.0 / (4.0 * p * (1.0 - p))).sqrt(),
        _ => {
            let z = normal_ppf(p);
            let v = df as f64;
            let z2 = z * z;
            let z4 = z2 * z2;
            let z6 = z4 * z2;
            let z8 = z4 * z4;
            let g1 = (z2 + 1.0) * z / 4.0;
            let g2 = (5.0 * z4 + 16.0 * z2 + 3.0) * z / 96.0;
            let g3 = (3.0 * z6 + 19.0 * z4 + 17.0 * z2 - 15.0) * z / 384.0;
            let g4 = (79.0 * z8 + 776.0 * z6 + 1482.0 * z4 - 1920.0 * z2 - 945.0) * z / 92160.0;
            z + g1 / v + g2 / (v * v) + g3 / (v * v * v) + g4 / (v * v * v * v)
        }
    }
}

/// Two-tailed critical value of the standard normal distribution at the
/// given confidence level (e.g. 0.95 -> 1.96).
pub fn normal_critical_value(confidence_level: f64) -> f64 {
    normal_ppf(1.0 - (1.0 - confidence_level) / 2.0)
}

/// Two-tailed critical value of Student's t distribution at the given
/// confidence level with `df` degrees of freedom.
pub fn t_critical_value(confidence_level: f64, df: u32) -> f64 {
    t_ppf(1.0 - (1.0 - confidence_level) / 2.0, df)
}
