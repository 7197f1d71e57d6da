use eframe::egui;

use crate::color::NeighborhoodPalette;
use crate::data::filter::AllowList;
use crate::data::model::{Chart, RawTables};
use crate::error::DataError;
use crate::state::RenderRequest;
use crate::views::VIEWS;

// ---------------------------------------------------------------------------
// Rendering collaborator
// ---------------------------------------------------------------------------

/// Anything that can show one prepared slide at a time.
pub trait ChartSurface {
    fn clear(&mut self);
    fn draw(&mut self, view: usize, chart: Chart);
    fn set_title(&mut self, title: String);
    fn request_redraw(&mut self);
}

/// Carry out a render request: clear, prepare, draw, title, redraw.
///
/// Preparation errors are returned untouched; the surface is left cleared.
pub fn present(
    request: RenderRequest,
    tables: &RawTables,
    allow: &AllowList,
    palette: &NeighborhoodPalette,
    surface: &mut dyn ChartSurface,
) -> Result<(), DataError> {
    let view = &VIEWS[request.view];
    surface.clear();
    let chart = (view.prepare)(tables, allow, palette)?;
    log::debug!("{}: {:?}", view.figure, chart.totals());
    surface.draw(request.view, chart);
    surface.set_title(format!("{} – {}", view.figure, view.title));
    surface.request_redraw();
    Ok(())
}

// ---------------------------------------------------------------------------
// egui implementation
// ---------------------------------------------------------------------------

/// The slide currently on screen.
pub struct ChartCanvas {
    ctx: egui::Context,
    pub view: Option<usize>,
    pub chart: Option<Chart>,
    pub title: String,
}

impl ChartCanvas {
    pub fn new(ctx: egui::Context) -> Self {
        ChartCanvas {
            ctx,
            view: None,
            chart: None,
            title: String::new(),
        }
    }
}

impl ChartSurface for ChartCanvas {
    fn clear(&mut self) {
        self.view = None;
        self.chart = None;
        self.title.clear();
    }

    fn draw(&mut self, view: usize, chart: Chart) {
        self.view = Some(view);
        self.chart = Some(chart);
    }

    fn set_title(&mut self, title: String) {
        self.title = title;
    }

    fn request_redraw(&mut self) {
        self.ctx.request_repaint();
    }
}
