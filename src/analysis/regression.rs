use statrs::statistics::Statistics;

use crate::domain::{Axis, ChartError, Curve, Line};

/// Least-squares line of best fit. Points do not have to be in order.
///
/// Uses the centred form `m = Σ(x-x̄)(y-ȳ) / Σ(x-x̄)²`, algebraically equal to
/// `(nΣxy - ΣxΣy) / (nΣx² - (Σx)²)` but stable for epoch-sized x values.
/// Zero x-variance is rejected rather than returning NaN.
pub fn line_best_fit(points: &Curve) -> Result<Line, ChartError> {
    let n = points.num_points();
    if n == 0 {
        return Err(ChartError::InsufficientData { needed: 2, got: 0 });
    }

    let mean_x = points.x().mean();
    let mean_y = points.y().mean();

    let (sxy, sxx) = points
        .points()
        .fold((0.0, 0.0), |(sxy, sxx), (x, y)| {
            let dx = x - mean_x;
            (sxy + dx * (y - mean_y), sxx + dx * dx)
        });

    if sxx <= 0.0 || !sxx.is_finite() {
        return Err(ChartError::DegenerateRange(Axis::X));
    }

    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    if !slope.is_finite() || !intercept.is_finite() {
        return Err(ChartError::DegenerateRange(Axis::Y));
    }

    Ok(Line::new(slope, intercept))
}

/// Sample standard deviation (denominator `n - 1`).
pub fn std_dev(values: &[f64]) -> Result<f64, ChartError> {
    if values.len() <= 1 {
        return Err(ChartError::InsufficientData {
            needed: 2,
            got: values.len(),
        });
    }
    Ok(values.std_dev())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_exact_line() {
        let curve = Curve::from_points((0..10).map(|i| {
            let x = i as f64;
            (x, 2.0 * x + 3.0)
        }));
        let line = line_best_fit(&curve).unwrap();
        assert!((line.slope - 2.0).abs() < 1e-9);
        assert!((line.intercept - 3.0).abs() < 1e-9);
    }

    #[test]
    fn epoch_scale_x_stays_accurate() {
        let curve = Curve::from_points((0..50).map(|i| {
            let x = 1_600_000_000.0 + i as f64 * 3600.0;
            (x, 0.001 * x - 1_500_000.0)
        }));
        let line = line_best_fit(&curve).unwrap();
        assert!((line.slope - 0.001).abs() < 1e-9);
    }

    #[test]
    fn identical_x_is_degenerate() {
        let curve = Curve::from_points([(4.0, 1.0), (4.0, 2.0), (4.0, 3.0)]);
        assert_eq!(line_best_fit(&curve), Err(ChartError::DegenerateRange(Axis::X)));
    }

    #[test]
    fn empty_fit_is_insufficient() {
        assert!(matches!(
            line_best_fit(&Curve::empty()),
            Err(ChartError::InsufficientData { .. })
        ));
    }

    #[test]
    fn sample_std_dev() {
        let sd = std_dev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        // Population sd is 2.0; sample sd uses n - 1
        assert!((sd - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
        assert!(std_dev(&[1.0]).is_err());
    }
}
