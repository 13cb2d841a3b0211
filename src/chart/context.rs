use argminmax::ArgMinMax;

use crate::config::PaddingPct;
use crate::domain::{Axis, ChartError, Curve};

use super::names::ContextName;

/// Visible domain window of one plotting area. Fields stay `None` until data
/// or an explicit `set_context` provides them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Context {
    pub x_low: Option<f64>,
    pub x_high: Option<f64>,
    pub y_low: Option<f64>,
    pub y_high: Option<f64>,
}

/// Fully known, non-degenerate bounds. Only `Context::bounds` builds these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_low: f64,
    pub x_high: f64,
    pub y_low: f64,
    pub y_high: f64,
}

impl Bounds {
    pub fn x_span(&self) -> f64 {
        self.x_high - self.x_low
    }

    pub fn y_span(&self) -> f64 {
        self.y_high - self.y_low
    }
}

/// Data extents of a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub x_low: f64,
    pub x_high: f64,
    pub y_low: f64,
    pub y_high: f64,
}

impl BoundingBox {
    pub fn of(curve: &Curve) -> Option<Self> {
        if curve.is_empty() {
            return None;
        }
        let (x_min, x_max) = curve.x().argminmax();
        let (y_min, y_max) = curve.y().argminmax();
        Some(Self {
            x_low: curve.x()[x_min],
            x_high: curve.x()[x_max],
            y_low: curve.y()[y_min],
            y_high: curve.y()[y_max],
        })
    }
}

/// Outcome of fitting a context to new data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsUpdate {
    /// Some bounds were unset and have now been filled in.
    Initialized,
    /// Data fits inside the existing bounds.
    Stable,
    /// At least one bound moved outwards; everything drawn so far is stale.
    Expanded,
}

impl BoundsUpdate {
    pub fn needs_redraw(&self) -> bool {
        matches!(self, BoundsUpdate::Expanded)
    }
}

impl Context {
    pub fn new(x_low: f64, x_high: f64, y_low: f64, y_high: f64) -> Self {
        Self {
            x_low: Some(x_low),
            x_high: Some(x_high),
            y_low: Some(y_low),
            y_high: Some(y_high),
        }
    }

    /// Partial context carrying only an x range.
    pub fn x_range(x_low: f64, x_high: f64) -> Self {
        Self {
            x_low: Some(x_low),
            x_high: Some(x_high),
            ..Self::default()
        }
    }

    /// Partial context carrying only a y range.
    pub fn y_range(y_low: f64, y_high: f64) -> Self {
        Self {
            y_low: Some(y_low),
            y_high: Some(y_high),
            ..Self::default()
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.x_low.is_some()
            && self.x_high.is_some()
            && self.y_low.is_some()
            && self.y_high.is_some()
    }

    pub fn bounds(&self, name: &ContextName) -> Result<Bounds, ChartError> {
        let (Some(x_low), Some(x_high), Some(y_low), Some(y_high)) =
            (self.x_low, self.x_high, self.y_low, self.y_high)
        else {
            return Err(ChartError::ContextNotInitialized(name.to_string()));
        };

        if ![x_low, x_high, y_low, y_high].iter().all(|v| v.is_finite()) {
            return Err(ChartError::InvalidParameter("context bounds must be finite"));
        }
        if x_high == x_low {
            return Err(ChartError::DegenerateRange(Axis::X));
        }
        if y_high == y_low {
            return Err(ChartError::DegenerateRange(Axis::Y));
        }
        if x_high < x_low || y_high < y_low {
            return Err(ChartError::InvalidParameter("context bounds are inverted"));
        }

        Ok(Bounds {
            x_low,
            x_high,
            y_low,
            y_high,
        })
    }

    /// Overwrites only the fields `partial` provides.
    pub fn merged(&self, partial: &Context) -> Context {
        Context {
            x_low: partial.x_low.or(self.x_low),
            x_high: partial.x_high.or(self.x_high),
            y_low: partial.y_low.or(self.y_low),
            y_high: partial.y_high.or(self.y_high),
        }
    }

    /// Grows the context to cover `bbox`. Unset fields are initialised from the
    /// data, y with `padding` of the data's y span on each side. Existing bounds
    /// only ever move outwards.
    pub fn fit(&mut self, bbox: &BoundingBox, padding: PaddingPct) -> BoundsUpdate {
        let pad = padding.value() * (bbox.y_high - bbox.y_low);
        let mut initialized = false;
        let mut expanded = false;

        // 1. Initialise whatever is still unset
        if self.x_low.is_none() {
            self.x_low = Some(bbox.x_low);
            initialized = true;
        }
        if self.x_high.is_none() {
            self.x_high = Some(bbox.x_high);
            initialized = true;
        }
        if self.y_low.is_none() {
            self.y_low = Some(bbox.y_low - pad);
            initialized = true;
        }
        if self.y_high.is_none() {
            self.y_high = Some(bbox.y_high + pad);
            initialized = true;
        }

        // 2. Expand where the data escapes the current window
        if self.x_low.is_some_and(|v| v > bbox.x_low) {
            self.x_low = Some(bbox.x_low);
            expanded = true;
        }
        if self.x_high.is_some_and(|v| v < bbox.x_high) {
            self.x_high = Some(bbox.x_high);
            expanded = true;
        }
        if self.y_low.is_some_and(|v| v > bbox.y_low) {
            self.y_low = Some(bbox.y_low - pad);
            expanded = true;
        }
        if self.y_high.is_some_and(|v| v < bbox.y_high) {
            self.y_high = Some(bbox.y_high + pad);
            expanded = true;
        }

        if expanded {
            BoundsUpdate::Expanded
        } else if initialized {
            BoundsUpdate::Initialized
        } else {
            BoundsUpdate::Stable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(x_low: f64, x_high: f64, y_low: f64, y_high: f64) -> BoundingBox {
        BoundingBox {
            x_low,
            x_high,
            y_low,
            y_high,
        }
    }

    #[test]
    fn first_fit_initialises_with_padding() {
        let mut ctx = Context::default();
        let update = ctx.fit(&bbox(0.0, 10.0, 100.0, 200.0), PaddingPct::new(0.2));

        assert_eq!(update, BoundsUpdate::Initialized);
        assert!(!update.needs_redraw());
        assert_eq!(ctx, Context::new(0.0, 10.0, 80.0, 220.0));
    }

    #[test]
    fn data_inside_bounds_is_stable() {
        let mut ctx = Context::new(0.0, 10.0, 0.0, 100.0);
        let before = ctx;
        let update = ctx.fit(&bbox(2.0, 8.0, 10.0, 90.0), PaddingPct::new(0.2));

        assert_eq!(update, BoundsUpdate::Stable);
        assert_eq!(ctx, before);
    }

    #[test]
    fn data_outside_bounds_expands() {
        let mut ctx = Context::new(0.0, 10.0, 0.0, 100.0);
        let update = ctx.fit(&bbox(-5.0, 8.0, 10.0, 150.0), PaddingPct::NONE);

        assert!(update.needs_redraw());
        assert_eq!(ctx, Context::new(-5.0, 10.0, 0.0, 150.0));
    }

    #[test]
    fn partial_context_keeps_preset_fields() {
        let mut ctx = Context::y_range(0.0, 100.0);
        let update = ctx.fit(&bbox(5.0, 15.0, 40.0, 60.0), PaddingPct::new(0.5));

        assert_eq!(update, BoundsUpdate::Initialized);
        assert_eq!(ctx, Context::new(5.0, 15.0, 0.0, 100.0));
    }

    #[test]
    fn bounds_reject_missing_and_degenerate_ranges() {
        let name = ContextName::default();
        assert!(matches!(
            Context::x_range(0.0, 1.0).bounds(&name),
            Err(ChartError::ContextNotInitialized(_))
        ));
        assert_eq!(
            Context::new(1.0, 1.0, 0.0, 1.0).bounds(&name),
            Err(ChartError::DegenerateRange(Axis::X))
        );
        assert_eq!(
            Context::new(0.0, 1.0, 3.0, 3.0).bounds(&name),
            Err(ChartError::DegenerateRange(Axis::Y))
        );
    }

    #[test]
    fn bounds_reject_inverted_ranges() {
        let name = ContextName::default();
        assert!(matches!(
            Context::new(10.0, 0.0, 0.0, 1.0).bounds(&name),
            Err(ChartError::InvalidParameter(_))
        ));
        assert!(matches!(
            Context::new(0.0, 1.0, 5.0, -5.0).bounds(&name),
            Err(ChartError::InvalidParameter(_))
        ));
        assert!(Context::new(0.0, 1.0, -5.0, 5.0).bounds(&name).is_ok());
    }

    #[test]
    fn merge_only_touches_provided_fields() {
        let ctx = Context::new(0.0, 10.0, 0.0, 100.0);
        let merged = ctx.merged(&Context {
            x_high: Some(20.0),
            ..Context::default()
        });
        assert_eq!(merged, Context::new(0.0, 20.0, 0.0, 100.0));
    }

    #[test]
    fn bounding_box_of_curve() {
        let curve = Curve::from_points([(3.0, -1.0), (1.0, 4.0), (2.0, 0.5)]);
        assert_eq!(BoundingBox::of(&curve), Some(bbox(1.0, 3.0, -1.0, 4.0)));
        assert_eq!(BoundingBox::of(&Curve::empty()), None);
    }
}
