mod root;
mod state;

pub use state::{AppState, LoadStatus, Selection};

pub use root::App;
