use eframe::egui::{ComboBox, RichText, Ui};
use strum::IntoEnumIterator;

use crate::config::{Ticker, Timescale};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Ticker(Ticker),
    Timescale(Timescale),
}

/// Ticker drop-down plus one toggle per timescale.
pub fn selection_panel(
    ui: &mut Ui,
    ticker: Ticker,
    timescale: Timescale,
) -> Option<SelectionChange> {
    let mut change = None;

    ui.horizontal(|ui| {
        let mut picked = ticker;
        ComboBox::from_id_salt("ticker_select")
            .selected_text(picked.to_string())
            .show_ui(ui, |ui| {
                for t in Ticker::iter() {
                    ui.selectable_value(&mut picked, t, t.to_string());
                }
            });
        if picked != ticker {
            change = Some(SelectionChange::Ticker(picked));
        }

        ui.separator();

        for ts in Timescale::iter() {
            let label = RichText::new(ts.to_string()).monospace();
            if ui.selectable_label(ts == timescale, label).clicked() && ts != timescale {
                change = Some(SelectionChange::Timescale(ts));
            }
        }
    });

    change
}
