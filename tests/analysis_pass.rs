use rand::SeedableRng;
use rand::rngs::StdRng;

use trend_scope::chart::{ContextName, DrawCommand, LayerName};
use trend_scope::domain::Candle;
use trend_scope::engine::{ChartSet, MA_DERIVATIVE_CONTEXT, analysis};

fn rising_candles(n: usize) -> Vec<Candle> {
    (0..n)
        .map(|i| {
            let mid = 100.0 + 3.0 * i as f64;
            Candle::new(i as i64 * 300, mid - 2.0, mid + 2.0, mid - 1.0, mid + 1.0, 5.0)
        })
        .collect()
}

// Zig-zag around an upward drift so the derivative changes sign
fn choppy_candles(n: usize) -> Vec<Candle> {
    (0..n)
        .map(|i| {
            let swing = if (i / 3) % 2 == 0 { (i % 3) as f64 } else { 2.0 - (i % 3) as f64 };
            let mid = 100.0 + 0.5 * i as f64 + 4.0 * swing;
            let (open, close) = if i % 2 == 0 {
                (mid - 0.5, mid + 0.5)
            } else {
                (mid + 0.5, mid - 0.5)
            };
            Candle::new(i as i64 * 60, mid - 1.0, mid + 1.0, open, close, 1.0)
        })
        .collect()
}

#[test]
fn rising_market_trends_up_and_projects_forward() {
    let mut charts = ChartSet::default();
    let mut rng = StdRng::seed_from_u64(42);
    let report = analysis(&rising_candles(20), &mut charts, 300.0, &mut rng).unwrap();

    let trend = report.trend.expect("trend line");
    assert!(trend.slope > 0.0);

    let last_time = 19.0 * 300.0;
    let projection = report.projection.expect("projection");
    let (end_x, _) = projection.last_point().unwrap();
    assert!(end_x > last_time);
    assert!(end_x <= report.horizon);

    // Every candle closes above its open
    assert!(report.rsi.iter().all(|&v| v > 50.0));
}

#[test]
fn every_chart_gets_its_plots() {
    let mut charts = ChartSet::default();
    let mut rng = StdRng::seed_from_u64(5);
    analysis(&choppy_candles(60), &mut charts, 60.0, &mut rng).unwrap();

    for name in ["price", "bollinger", "trendline", "price_ma", "prediction"] {
        assert!(charts.price.entity(name).is_some(), "price chart is missing {}", name);
    }
    assert!(charts.indicator_top.entity("macd_zero").is_some());
    assert!(charts.indicator_top.has_context(&ContextName::new(MA_DERIVATIVE_CONTEXT).unwrap()));
    assert!(charts.indicator_bot.entity("rsi").is_some());
    assert!(charts.indicator_bot.entity("rsi_band").is_some());

    let overlay = charts.price.layer(&LayerName::overlay()).unwrap();
    assert!(
        overlay
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::FillTriangles { .. }))
    );
}

#[test]
fn redraw_reproduces_the_same_layers() {
    let mut charts = ChartSet::default();
    let mut rng = StdRng::seed_from_u64(9);
    analysis(&choppy_candles(60), &mut charts, 60.0, &mut rng).unwrap();

    let before: Vec<_> = charts.charts().iter().map(|c| c.layers().to_vec()).collect();
    charts.redraw_all().unwrap();
    let after: Vec<_> = charts.charts().iter().map(|c| c.layers().to_vec()).collect();

    assert_eq!(before, after);
}

#[test]
fn second_pass_starts_from_fresh_contexts() {
    let mut charts = ChartSet::default();
    let mut rng = StdRng::seed_from_u64(1);
    analysis(&rising_candles(20), &mut charts, 300.0, &mut rng).unwrap();

    // A shorter batch must not inherit the wider x range of the first
    let report = analysis(&choppy_candles(60), &mut charts, 60.0, &mut rng).unwrap();
    let ctx = charts.price.context(&ContextName::default()).unwrap();

    assert_eq!(ctx.x_low, Some(0.0));
    assert_eq!(ctx.x_high, Some(report.horizon));
    assert!(report.horizon < 19.0 * 300.0);
}
