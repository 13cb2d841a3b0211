/// Trailing simple moving average.
///
/// The front is warm-started: index `i < window` averages the `i + 1` points
/// available so far instead of padding with zeros.
pub fn moving_average(data: &[f64], window_size: usize) -> Vec<f64> {
    if window_size <= 1 {
        return data.to_vec();
    }

    let mut averages = Vec::with_capacity(data.len());
    let mut running_sum = 0.0;

    for (i, &value) in data.iter().enumerate() {
        running_sum += value;
        if i >= window_size {
            running_sum -= data[i - window_size];
        }
        let divisor = window_size.min(i + 1);
        averages.push(running_sum / divisor as f64);
    }

    averages
}

/// Exponential moving average with `k = 2 / (window + 1)`, seeded with `data[0]`.
pub fn exp_moving_average(data: &[f64], window_size: usize) -> Vec<f64> {
    let Some(&seed) = data.first() else {
        return Vec::new();
    };

    let k = 2.0 / (window_size.max(1) as f64 + 1.0);

    std::iter::once(seed)
        .chain(data[1..].iter().scan(seed, |ema, &value| {
            *ema = k * value + (1.0 - k) * *ema;
            Some(*ema)
        }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn sma_warm_starts_then_uses_trailing_window() {
        let data = [2.0, 4.0, 6.0, 8.0, 10.0, 12.0];
        let sma = moving_average(&data, 3);

        assert_eq!(sma.len(), data.len());
        assert!((sma[0] - 2.0).abs() < TOLERANCE);
        assert!((sma[1] - 3.0).abs() < TOLERANCE);
        assert!((sma[2] - 4.0).abs() < TOLERANCE);
        assert!((sma[3] - 6.0).abs() < TOLERANCE);
        assert!((sma[5] - 10.0).abs() < TOLERANCE);
    }

    #[test]
    fn sma_window_larger_than_data_is_cumulative_mean() {
        let data = [1.0, 2.0, 3.0];
        let sma = moving_average(&data, 10);
        assert!((sma[2] - 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn ema_single_value_is_identity() {
        for window in [1, 2, 5, 50] {
            assert_eq!(exp_moving_average(&[7.5], window), vec![7.5]);
        }
    }

    #[test]
    fn ema_seed_is_exact_for_longer_series() {
        // 0.1 does not survive k*v + (1-k)*v for k = 2/51
        let ema = exp_moving_average(&[0.1, 0.1, 0.1], 50);
        assert_eq!(ema[0], 0.1);
        assert_eq!(ema.len(), 3);
    }

    #[test]
    fn ema_follows_recurrence() {
        let data = [10.0, 20.0, 30.0];
        let ema = exp_moving_average(&data, 3);
        // k = 0.5
        assert_eq!(ema.len(), 3);
        assert!((ema[0] - 10.0).abs() < TOLERANCE);
        assert!((ema[1] - 15.0).abs() < TOLERANCE);
        assert!((ema[2] - 22.5).abs() < TOLERANCE);
    }

    #[test]
    fn ema_of_empty_is_empty() {
        assert!(exp_moving_average(&[], 5).is_empty());
    }
}
