use rand::Rng;

use crate::domain::{ChartError, Curve};

use super::regression::line_best_fit;

/// Share of the curve (from the end) used to fit the trend.
const PAST_RATIO: f64 = 0.5;

/// Naive forward projection: a random walk biased by the trend of the
/// trailing half of `prices`.
///
/// Starts at the last observed point and steps by `granularity` up to and
/// including `end_time`. Each step adds `slope * granularity` plus uniform
/// noise in `[-noise/2, noise/2]`. Pass a seeded `rng` (or `noise = 0`) for
/// reproducible output.
pub fn predict_price<R: Rng>(
    prices: &Curve,
    end_time: f64,
    granularity: f64,
    noise: f64,
    rng: &mut R,
) -> Result<Curve, ChartError> {
    if granularity <= 0.0 || !granularity.is_finite() {
        return Err(ChartError::InvalidParameter("projection granularity must be > 0"));
    }

    let num_points = prices.num_points();
    let start = (num_points as f64 * PAST_RATIO).round() as usize;
    let trend = line_best_fit(&prices.slice(start, num_points))?;

    let (start_time, start_price) = prices
        .last_point()
        .ok_or(ChartError::InsufficientData { needed: 2, got: 0 })?;

    let mut projection = Curve::empty();
    let mut curr_y = start_price;
    let mut t = start_time;

    while t <= end_time {
        projection.add_point(t, curr_y);
        curr_y += trend.slope * granularity + noise * (rng.r#gen::<f64>() - 0.5);
        t += granularity;
    }

    Ok(projection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rising(n: usize) -> Curve {
        Curve::from_points((0..n).map(|i| (i as f64 * 60.0, 100.0 + i as f64)))
    }

    #[test]
    fn noiseless_projection_follows_trend() {
        let prices = rising(20);
        let mut rng = StdRng::seed_from_u64(7);
        let projection = predict_price(&prices, 19.0 * 60.0 + 600.0, 60.0, 0.0, &mut rng).unwrap();

        assert_eq!(projection.num_points(), 11);
        assert_eq!(projection.x()[0], 19.0 * 60.0);
        assert_eq!(projection.y()[0], 119.0);
        let (last_x, last_y) = projection.last_point().unwrap();
        assert!(last_x > prices.last_point().unwrap().0);
        assert!((last_y - 129.0).abs() < 1e-9);
    }

    #[test]
    fn seeded_noise_is_reproducible_and_bounded() {
        let prices = rising(20);
        let end = 19.0 * 60.0 + 6000.0;
        let a = predict_price(&prices, end, 60.0, 15.0, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = predict_price(&prices, end, 60.0, 15.0, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);

        for pair in a.y().windows(2) {
            let step = pair[1] - pair[0] - 1.0;
            assert!(step.abs() <= 7.5 + 1e-9);
        }
    }

    #[test]
    fn rejects_non_positive_granularity() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(predict_price(&rising(10), 1e6, 0.0, 0.0, &mut rng).is_err());
    }

    #[test]
    fn too_short_history_propagates_fit_error() {
        let mut rng = StdRng::seed_from_u64(1);
        let single = Curve::from_points([(0.0, 1.0)]);
        assert!(predict_price(&single, 100.0, 10.0, 0.0, &mut rng).is_err());
    }
}
