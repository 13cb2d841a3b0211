//! Indicator windows and analysis-pass constants

pub struct MacdSettings {
    pub period_short: usize,
    pub period_long: usize,
}

pub struct BollingerSettings {
    pub window: usize,
    pub num_std: f64,
}

pub struct ProjectionSettings {
    /// Amplitude of the uniform noise added per step
    pub noise: f64,
    /// How far past the last candle to project, as a fraction of the observed time span
    pub horizon_pct: f64,
}

pub struct RsiSettings {
    pub window: usize,
    /// Guide band drawn behind the RSI curve
    pub oversold: f64,
    pub overbought: f64,
}

pub struct AnalysisConfig {
    pub ma_window: usize,
    pub num_peaks: usize,
    pub macd: MacdSettings,
    pub rsi: RsiSettings,
    pub bollinger: BollingerSettings,
    pub projection: ProjectionSettings,
}

pub const ANALYSIS: AnalysisConfig = AnalysisConfig {
    ma_window: 5,
    num_peaks: 3,
    macd: MacdSettings {
        period_short: 12,
        period_long: 26,
    },
    rsi: RsiSettings {
        window: 14,
        oversold: 30.0,
        overbought: 70.0,
    },
    bollinger: BollingerSettings {
        window: 20,
        num_std: 2.0,
    },
    projection: ProjectionSettings {
        noise: 15.0,
        horizon_pct: 0.5,
    },
};
