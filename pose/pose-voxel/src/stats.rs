//! Outlier-trimmed summary statistics.

/// Mean of `values` after discarding interquartile-range outliers.
///
/// Values outside `[Q1 - 1.5 * IQR, Q3 + 1.5 * IQR]` are excluded, where
/// Q1/Q3 are the 25th/75th percentiles of the sorted input (nearest-rank).
/// An empty input yields zero; if trimming removes everything the plain
/// mean is returned instead.
#[must_use]
pub fn iqr_trimmed_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);

    let q1 = sorted[sorted.len() / 4];
    let q3 = sorted[(sorted.len() * 3) / 4];
    let iqr = q3 - q1;
    let lo = q1 - 1.5 * iqr;
    let hi = q3 + 1.5 * iqr;

    let mut sum = 0.0;
    let mut kept = 0usize;
    for &v in &sorted {
        if v >= lo && v <= hi {
            sum += v;
            kept += 1;
        }
    }

    #[allow(clippy::cast_precision_loss)]
    if kept == 0 {
        sorted.iter().sum::<f64>() / sorted.len() as f64
    } else {
        sum / kept as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn plain_mean_without_outliers() {
        let mean = iqr_trimmed_mean(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_relative_eq!(mean, 3.0, epsilon = 1e-12);
    }

    #[test]
    fn outlier_discarded() {
        let with = iqr_trimmed_mean(&[1.0, 2.0, 2.0, 3.0, 2.0, 3.0, 1.0, 100.0]);
        let without = iqr_trimmed_mean(&[1.0, 2.0, 2.0, 3.0, 2.0, 3.0, 1.0]);
        assert_relative_eq!(with, without, epsilon = 0.2);
        assert!(with < 5.0);
    }

    #[test]
    fn empty_input() {
        assert_eq!(iqr_trimmed_mean(&[]), 0.0);
    }

    #[test]
    fn single_value() {
        assert_relative_eq!(iqr_trimmed_mean(&[7.0]), 7.0, epsilon = 1e-12);
    }

    #[test]
    fn identical_values() {
        assert_relative_eq!(iqr_trimmed_mean(&[4.0; 10]), 4.0, epsilon = 1e-12);
    }
}
