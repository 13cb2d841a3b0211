mod chart_view;
mod panels;
mod ticker;

pub use chart_view::show_chart;
pub use panels::{SelectionChange, selection_panel};
pub use ticker::{PriceDirection, TickerDisplay};
