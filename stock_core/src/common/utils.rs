/// Parse a raw close field into a price.
///
/// Missing, blank, non-numeric and non-finite values yield `None`; callers
/// skip the row instead of failing.
pub fn parse_close(raw: Option<&str>) -> Option<f64> {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Sum of `values` divided by `divisor`, 0.0 for an empty slice.
pub fn mean_over(values: &[f64], divisor: usize) -> f64 {
    if values.is_empty() || divisor == 0 {
        return 0.0;
    }
    values.iter().sum::<f64>() / divisor as f64
}

#[cfg(test)]
pub(crate) fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() <= eps
}
