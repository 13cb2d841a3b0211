// Domain types and value objects
mod candle;
mod curve;
mod error;

pub use candle::Candle;
pub use curve::{Curve, Line};
pub use error::{Axis, ChartError};
