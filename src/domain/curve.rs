use super::error::ChartError;

/// Parametric line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub slope: f64,
    pub intercept: f64,
}

impl Line {
    pub const fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// Horizontal line through `y`.
    pub const fn horizontal(y: f64) -> Self {
        Self::new(0.0, y)
    }

    pub fn compute_y(&self, x: f64) -> f64 {
        x * self.slope + self.intercept
    }

    /// Inverse of `compute_y`. A horizontal line has no unique x for a given y.
    pub fn compute_x(&self, y: f64) -> Result<f64, ChartError> {
        if self.slope == 0.0 {
            return Err(ChartError::DivisionByZero);
        }
        Ok((y - self.intercept) / self.slope)
    }
}

/// An ordered (x, y) series. `x.len() == y.len()` always holds.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Curve {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Curve {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, ChartError> {
        if x.len() != y.len() {
            return Err(ChartError::ShapeMismatch {
                x_len: x.len(),
                y_len: y.len(),
            });
        }
        Ok(Self { x, y })
    }

    /// True if every x and y is a finite number.
    pub fn is_finite(&self) -> bool {
        self.x.iter().chain(&self.y).all(|v| v.is_finite())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a curve from (x, y) pairs.
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let (x, y) = points.into_iter().unzip();
        Self { x, y }
    }

    pub fn add_point(&mut self, x: f64, y: f64) {
        self.x.push(x);
        self.y.push(y);
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn num_points(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    pub fn last_point(&self) -> Option<(f64, f64)> {
        Some((*self.x.last()?, *self.y.last()?))
    }

    /// Same x positions, different y values.
    pub fn with_y(&self, y: Vec<f64>) -> Result<Self, ChartError> {
        Self::new(self.x.clone(), y)
    }

    /// Points `start..end` as a new curve. Out-of-range bounds are clamped.
    pub fn slice(&self, start: usize, end: usize) -> Self {
        let end = end.min(self.num_points());
        let start = start.min(end);
        Self {
            x: self.x[start..end].to_vec(),
            y: self.y[start..end].to_vec(),
        }
    }

    /// Splits into (non-negative, negative) sub-curves by the sign of y.
    pub fn split_by_sign(&self) -> (Self, Self) {
        let (positive, negative): (Vec<_>, Vec<_>) = self.points().partition(|&(_, y)| y >= 0.0);
        (Self::from_points(positive), Self::from_points(negative))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_lengths_fail() {
        let err = Curve::new(vec![1.0, 2.0], vec![1.0]).unwrap_err();
        assert_eq!(err, ChartError::ShapeMismatch { x_len: 2, y_len: 1 });
    }

    #[test]
    fn add_point_keeps_lengths_equal() {
        let mut curve = Curve::new(vec![0.0], vec![5.0]).unwrap();
        curve.add_point(1.0, 6.0);
        curve.add_point(2.0, 7.0);
        assert_eq!(curve.num_points(), 3);
        assert_eq!(curve.x().len(), curve.y().len());
        assert_eq!(curve.last_point(), Some((2.0, 7.0)));
    }

    #[test]
    fn line_inverse_is_guarded() {
        let line = Line::new(2.0, 3.0);
        assert_eq!(line.compute_y(1.0), 5.0);
        assert_eq!(line.compute_x(5.0), Ok(1.0));
        assert_eq!(Line::horizontal(4.0).compute_x(4.0), Err(ChartError::DivisionByZero));
    }

    #[test]
    fn split_by_sign_keeps_zero_on_positive_side() {
        let curve = Curve::from_points([(0.0, -1.0), (1.0, 0.0), (2.0, 2.0), (3.0, -0.5)]);
        let (pos, neg) = curve.split_by_sign();
        assert_eq!(pos.x(), &[1.0, 2.0]);
        assert_eq!(neg.x(), &[0.0, 3.0]);
    }

    #[test]
    fn slice_clamps_bounds() {
        let curve = Curve::from_points((0..5).map(|i| (i as f64, i as f64)));
        assert_eq!(curve.slice(3, 10).num_points(), 2);
        assert!(curve.slice(7, 10).is_empty());
    }
}
