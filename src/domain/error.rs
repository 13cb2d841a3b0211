use std::error::Error;
use std::fmt;

/// Which axis of a context collapsed to zero width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Contract violations raised by the curve primitives, the indicator library
/// and the chart engine.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartError {
    ShapeMismatch { x_len: usize, y_len: usize },
    LengthMismatch { bottom: usize, top: usize },
    NotACurve,
    ContextNotInitialized(String),
    UnknownContext(String),
    UnknownLayer(String),
    DegenerateRange(Axis),
    DivisionByZero,
    InsufficientData { needed: usize, got: usize },
    InvalidParameter(&'static str),
    InvalidName(String),
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ChartError::ShapeMismatch { x_len, y_len } => {
                write!(f, "Curve shape mismatch: {} x values vs {} y values", x_len, y_len)
            }
            ChartError::LengthMismatch { bottom, top } => write!(
                f,
                "Cannot highlight between curves of unequal length ({} vs {})",
                bottom, top
            ),
            ChartError::NotACurve => write!(f, "Expected a curve, got a line"),
            ChartError::ContextNotInitialized(name) => {
                write!(f, "Context \"{}\" has no bounds yet", name)
            }
            ChartError::UnknownContext(name) => write!(f, "Context \"{}\" not defined", name),
            ChartError::UnknownLayer(name) => write!(f, "Layer \"{}\" not defined", name),
            ChartError::DegenerateRange(axis) => {
                write!(f, "Degenerate {} range: low and high bounds are equal", axis)
            }
            ChartError::DivisionByZero => write!(f, "Division by zero: line has zero slope"),
            ChartError::InsufficientData { needed, got } => {
                write!(f, "Insufficient data: needed {} points, got {}", needed, got)
            }
            ChartError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            ChartError::InvalidName(name) => write!(f, "Invalid name: \"{}\"", name),
        }
    }
}

impl Error for ChartError {}
