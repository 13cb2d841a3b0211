use itertools::Itertools;

use crate::domain::{Axis, ChartError, Curve};

/// x positions where a derivative curve changes sign.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocalOptima {
    /// Negative-to-positive flips.
    pub minima: Vec<f64>,
    /// Positive-to-negative flips.
    pub maxima: Vec<f64>,
}

/// Finite-difference slope between adjacent points, placed at the midpoint x.
/// Output has one point fewer than the input (empty for fewer than two points).
pub fn derivative(curve: &Curve) -> Result<Curve, ChartError> {
    let mut dv = Curve::empty();

    for ((x0, y0), (x1, y1)) in curve.points().tuple_windows() {
        let dx = x1 - x0;
        if dx == 0.0 {
            return Err(ChartError::DegenerateRange(Axis::X));
        }
        dv.add_point((x0 + x1) / 2.0, (y1 - y0) / dx);
    }

    Ok(dv)
}

/// Scans adjacent derivative samples for strict sign changes. Zero samples
/// never count as a flip.
pub fn local_optima(dv: &Curve) -> LocalOptima {
    let mut optima = LocalOptima::default();

    for ((x0, y0), (x1, y1)) in dv.points().tuple_windows() {
        let mid = (x0 + x1) / 2.0;
        if y0 < 0.0 && y1 > 0.0 {
            optima.minima.push(mid);
        } else if y0 > 0.0 && y1 < 0.0 {
            optima.maxima.push(mid);
        }
    }

    optima
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derivative_has_one_fewer_point() {
        let curve = Curve::from_points([(0.0, 0.0), (1.0, 2.0), (3.0, 4.0), (4.0, 1.0)]);
        let dv = derivative(&curve).unwrap();

        assert_eq!(dv.num_points(), curve.num_points() - 1);
        assert_eq!(dv.x(), &[0.5, 2.0, 3.5]);
        // Non-uniform spacing: second step is 2 units wide
        assert_eq!(dv.y(), &[2.0, 1.0, -3.0]);
    }

    #[test]
    fn derivative_of_single_point_is_empty() {
        let curve = Curve::from_points([(5.0, 1.0)]);
        assert!(derivative(&curve).unwrap().is_empty());
    }

    #[test]
    fn derivative_rejects_repeated_x() {
        let curve = Curve::from_points([(1.0, 1.0), (1.0, 2.0)]);
        assert_eq!(derivative(&curve), Err(ChartError::DegenerateRange(Axis::X)));
    }

    #[test]
    fn optima_report_midpoints_of_sign_flips() {
        let dv = Curve::new(
            vec![0.0, 1.0, 2.0, 3.0, 4.0],
            vec![-1.0, -1.0, 1.0, 1.0, -1.0],
        )
        .unwrap();
        let optima = local_optima(&dv);

        assert_eq!(optima.minima, vec![1.5]);
        assert_eq!(optima.maxima, vec![3.5]);
    }

    #[test]
    fn zero_samples_are_not_flips() {
        let dv = Curve::from_points([(0.0, -1.0), (1.0, 0.0), (2.0, 1.0)]);
        assert_eq!(local_optima(&dv), LocalOptima::default());
    }
}
