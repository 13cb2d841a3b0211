use std::fmt;

use crate::domain::ChartError;

// Non-empty names without surrounding whitespace.
fn validate(name: String) -> Result<String, ChartError> {
    if name.is_empty() || name.trim() != name {
        return Err(ChartError::InvalidName(name));
    }
    Ok(name)
}

macro_rules! chart_name {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            pub fn new(name: impl Into<String>) -> Result<Self, ChartError> {
                validate(name.into()).map(Self)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = ChartError;

            fn try_from(name: &str) -> Result<Self, Self::Error> {
                Self::new(name)
            }
        }
    };
}

chart_name!(
    /// Key of a coordinate context inside a chart.
    ContextName
);

chart_name!(
    /// Key of a drawable layer inside a chart.
    LayerName
);

impl ContextName {
    pub const DEFAULT: &'static str = "default";
}

impl Default for ContextName {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl LayerName {
    pub const AXES: &'static str = "axes";
    pub const MAIN: &'static str = "main";
    pub const OVERLAY: &'static str = "overlay";

    pub fn axes() -> Self {
        Self(Self::AXES.to_string())
    }

    pub fn main() -> Self {
        Self(Self::MAIN.to_string())
    }

    pub fn overlay() -> Self {
        Self(Self::OVERLAY.to_string())
    }
}

impl Default for LayerName {
    fn default() -> Self {
        Self::main()
    }
}
