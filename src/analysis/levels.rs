use crate::domain::{ChartError, Curve, Line};

use super::calculus::LocalOptima;
use super::regression::line_best_fit;

/// Support and resistance fits. Each side fails on its own (e.g. too few optima).
#[derive(Debug, Clone, PartialEq)]
pub struct Levels {
    pub support: Result<Line, ChartError>,
    pub resistance: Result<Line, ChartError>,
}

// Index of the sample whose x is closest to `x`. `xs` must be ascending.
fn nearest_index(xs: &[f64], x: f64) -> Option<usize> {
    if xs.is_empty() {
        return None;
    }
    let right = xs.partition_point(|&v| v < x);
    if right == 0 {
        return Some(0);
    }
    if right == xs.len() {
        return Some(xs.len() - 1);
    }
    let left = right - 1;
    if (x - xs[left]).abs() <= (xs[right] - x).abs() {
        Some(left)
    } else {
        Some(right)
    }
}

// Price points at the optima positions, extremes first, at most `num_peaks`.
fn extreme_points(price: &Curve, positions: &[f64], num_peaks: usize, lowest: bool) -> Curve {
    let mut indices: Vec<usize> = positions
        .iter()
        .filter_map(|&x| nearest_index(price.x(), x))
        .collect();
    indices.sort_unstable();
    indices.dedup();

    let y = price.y();
    indices.sort_by(|&a, &b| {
        if lowest {
            y[a].total_cmp(&y[b])
        } else {
            y[b].total_cmp(&y[a])
        }
    });

    Curve::from_points(
        indices
            .into_iter()
            .take(num_peaks)
            .map(|i| (price.x()[i], y[i])),
    )
}

/// Fits a support line through the `num_peaks` lowest local minima and a
/// resistance line through the `num_peaks` highest local maxima. When fewer
/// optima exist, all of them are used.
///
/// `price` must be sorted by x. Optima positions are snapped to the nearest
/// price sample.
pub fn support_resistance(price: &Curve, optima: &LocalOptima, num_peaks: usize) -> Levels {
    let support_points = extreme_points(price, &optima.minima, num_peaks, true);
    let resistance_points = extreme_points(price, &optima.maxima, num_peaks, false);

    Levels {
        support: line_best_fit(&support_points),
        resistance: line_best_fit(&resistance_points),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::calculus::{derivative, local_optima};
    use crate::domain::Axis;

    fn zigzag() -> Curve {
        // Lows at x = 1, 5, 9 rising slowly, highs at x = 3, 7, 11 rising faster
        Curve::from_points([
            (0.0, 5.0),
            (1.0, 1.0),
            (2.0, 4.0),
            (3.0, 8.0),
            (4.0, 5.0),
            (5.0, 2.0),
            (6.0, 6.0),
            (7.0, 10.0),
            (8.0, 6.0),
            (9.0, 3.0),
            (10.0, 8.0),
            (11.0, 12.0),
            (12.0, 9.0),
        ])
    }

    #[test]
    fn fits_lines_through_extreme_optima() {
        let price = zigzag();
        let optima = local_optima(&derivative(&price).unwrap());
        assert_eq!(optima.minima, vec![1.0, 5.0, 9.0]);
        assert_eq!(optima.maxima, vec![3.0, 7.0, 11.0]);

        let levels = support_resistance(&price, &optima, 3);
        let support = levels.support.unwrap();
        let resistance = levels.resistance.unwrap();

        assert!((support.slope - 0.25).abs() < 1e-9);
        assert!((support.compute_y(1.0) - 1.0).abs() < 1e-9);
        assert!((resistance.slope - 0.5).abs() < 1e-9);
    }

    #[test]
    fn uses_all_optima_when_fewer_than_requested() {
        let price = zigzag();
        let optima = LocalOptima {
            minima: vec![1.0, 5.0],
            maxima: vec![7.0],
        };
        let levels = support_resistance(&price, &optima, 3);

        assert!(levels.support.is_ok());
        // A single maximum cannot define a line
        assert_eq!(levels.resistance, Err(ChartError::DegenerateRange(Axis::X)));
    }

    #[test]
    fn nearest_index_snaps_to_closest_sample() {
        let xs = [0.0, 10.0, 20.0];
        assert_eq!(nearest_index(&xs, -5.0), Some(0));
        assert_eq!(nearest_index(&xs, 14.0), Some(1));
        assert_eq!(nearest_index(&xs, 16.0), Some(2));
        assert_eq!(nearest_index(&xs, 99.0), Some(2));
        assert_eq!(nearest_index(&[], 1.0), None);
    }
}
