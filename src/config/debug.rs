//! Debugging feature flags.

#[allow(dead_code)]
pub struct LogFlags {
    /// Emit verbose logging for live price polling ticks.
    pub log_price_stream_updates: bool,

    /// Log every full chart redraw and how many entities were replayed.
    pub log_redraws: bool,

    /// Log context initialisation / expansion decisions.
    pub log_context_updates: bool,

    /// Log each step of an analysis pass.
    pub log_analysis_steps: bool,

    /// Anything about ticker / timescale selection changes
    pub log_selection: bool,

    /// Report chart operations that run slower than their threshold
    pub log_performance: bool,
}

pub const DF: LogFlags = LogFlags {
    log_selection: true,
    log_analysis_steps: true,

    log_redraws: false,
    log_context_updates: false,
    log_price_stream_updates: false,
    log_performance: false,
};
