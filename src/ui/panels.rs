use eframe::egui::{self, RichText, Ui};

use crate::color::NeighborhoodPalette;
use crate::ui::surface::ChartCanvas;
use crate::views::VIEW_COUNT;

// ---------------------------------------------------------------------------
// Top panel – figure and title
// ---------------------------------------------------------------------------

/// Render the slide header: title on the left, position on the right.
pub fn title_bar(ui: &mut Ui, canvas: &ChartCanvas) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading(RichText::new(&canvas.title).strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            if let Some(view) = canvas.view {
                ui.label(format!("{} / {VIEW_COUNT}", view + 1));
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Bottom panel – neighborhood legend and key help
// ---------------------------------------------------------------------------

/// Render the colour legend and the navigation hint.
pub fn status_bar(ui: &mut Ui, palette: &NeighborhoodPalette) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for (name, color) in palette.legend_entries() {
            ui.label(RichText::new("■").color(color));
            ui.label(name);
            ui.add_space(8.0);
        }

        ui.separator();
        ui.weak("→ / espaço: avançar   ← : voltar   Esc: sair");
    });
}
