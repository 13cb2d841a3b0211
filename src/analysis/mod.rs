// Technical-analysis indicator library. Everything here is pure.
pub mod calculus;
pub mod levels;
pub mod oscillators;
pub mod projection;
pub mod regression;
pub mod smoothing;

pub use calculus::{LocalOptima, derivative, local_optima};
pub use levels::{Levels, support_resistance};
pub use oscillators::{Bands, Macd, bollinger_bands, macd, rsi};
pub use projection::predict_price;
pub use regression::{line_best_fit, std_dev};
pub use smoothing::{exp_moving_average, moving_average};
