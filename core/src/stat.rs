//! Descriptive statistics and tests.
//!
//! All estimators of spread use the unbiased `N - 1` denominator. Statistics that are undefined
//! for the provided number of values are returned as NaN rather than as errors.

use statrs::{
    distribution::{ContinuousCDF, StudentsT},
    statistics::Statistics,
};

/// Returns the arithmetic mean.
pub fn mean(values: &[f64]) -> f64 {
    values.mean()
}

/// Returns Pearson's correlation coefficient between two equally long samples.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len());

    x.covariance(y) / (x.std_dev() * y.std_dev())
}

/// Returns the sample standard deviation.
pub fn std_dev(values: &[f64]) -> f64 {
    values.std_dev()
}

/// A two-tailed one-sample Student's t-test.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TTest {
    /// Sample mean.
    pub mean: f64,
    /// Standard error of the mean.
    pub se: f64,
    /// t-statistic.
    pub t: f64,
    /// Degrees of freedom.
    pub df: f64,
    /// Two-tailed p-value.
    pub p_value: f64,
}

impl TTest {
    /// Tests whether the mean of the values differs from the provided population mean.
    pub fn one_sample(values: &[f64], population_mean: f64) -> Self {
        let n = values.len() as f64;
        let mean = values.mean();
        let se = values.std_dev() / n.sqrt();
        let t = (mean - population_mean) / se;
        let df = n - 1.0;

        Self {
            mean,
            se,
            t,
            df,
            p_value: two_tailed_p_value(t, df),
        }
    }
}

fn two_tailed_p_value(t: f64, df: f64) -> f64 {
    if t.is_nan() {
        return f64::NAN;
    } else if t.is_infinite() {
        return 0.0;
    }

    match StudentsT::new(0.0, 1.0, df) {
        Ok(distribution) => (2.0 * distribution.sf(t.abs())).min(1.0),
        Err(_) => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_approx_eq!(mean(&[1.0, 3.0]), 2.0);
        assert!(mean(&[]).is_nan());
    }

    #[test]
    fn test_std_dev() {
        assert_approx_eq!(std_dev(&[1.0, 3.0]), 2f64.sqrt());
        assert_approx_eq!(std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]), 2.13808994);
        assert!(std_dev(&[1.0]).is_nan());
    }

    #[test]
    fn test_pearson() {
        assert_approx_eq!(pearson(&[1.0, 2.0, 3.0], &[2.0, 4.0, 6.0]), 1.0);
        assert_approx_eq!(pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]), -1.0);
        assert_approx_eq!(
            pearson(&[1.0, 2.0, 3.0, 4.0], &[1.0, 3.0, 2.0, 4.0]),
            0.8
        );
    }

    #[test]
    fn test_pearson_undefined() {
        assert!(pearson(&[1.0], &[2.0]).is_nan());
        assert!(pearson(&[1.0, 1.0], &[2.0, 3.0]).is_nan());
    }

    #[test]
    fn test_one_sample_t_test() {
        let test = TTest::one_sample(&[1.0, 2.0, 3.0, 4.0, 5.0], 0.0);

        assert_approx_eq!(test.mean, 3.0);
        assert_approx_eq!(test.se, 0.5f64.sqrt());
        assert_approx_eq!(test.t, 4.24264069, epsilon = 1e-6);
        assert_approx_eq!(test.df, 4.0);
        assert_approx_eq!(test.p_value, 0.0132356, epsilon = 1e-6);
    }

    #[test]
    fn test_one_sample_t_test_negative_mean() {
        let test = TTest::one_sample(&[-1.0, -2.0, -3.0, -4.0, -5.0], 0.0);

        assert_approx_eq!(test.t, -4.24264069, epsilon = 1e-6);
        assert_approx_eq!(test.p_value, 0.0132356, epsilon = 1e-6);
    }

    #[test]
    fn test_one_sample_t_test_population_mean() {
        let test = TTest::one_sample(&[1.0, 2.0, 3.0, 4.0, 5.0], 3.0);

        assert_approx_eq!(test.t, 0.0);
        assert_approx_eq!(test.p_value, 1.0);
    }

    #[test]
    fn test_one_sample_t_test_single_value() {
        let test = TTest::one_sample(&[0.5], 0.0);

        assert_approx_eq!(test.mean, 0.5);
        assert!(test.se.is_nan());
        assert!(test.p_value.is_nan());
    }

    #[test]
    fn test_one_sample_t_test_constant_values() {
        let test = TTest::one_sample(&[0.5, 0.5, 0.5], 0.0);

        assert_approx_eq!(test.se, 0.0);
        assert_approx_eq!(test.p_value, 0.0);
    }
}
