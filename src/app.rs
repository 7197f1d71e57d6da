use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use anyhow::Result;
use eframe::egui;

use crate::color::NeighborhoodPalette;
use crate::config::AppConfig;
use crate::data::filter::AllowList;
use crate::data::loader::load_tables;
use crate::data::model::RawTables;
use crate::error::DataError;
use crate::state::{SlideController, SlideEvent, Transition};
use crate::ui::surface::{present, ChartCanvas};
use crate::ui::{chart, panels};
use crate::views::{VIEWS, VIEW_COUNT};

// ---------------------------------------------------------------------------
// Slide data: everything the preparation routines read
// ---------------------------------------------------------------------------

/// Tables plus neighborhood configuration, immutable for the session.
pub struct SlideData {
    pub tables: RawTables,
    pub allow: AllowList,
    pub palette: NeighborhoodPalette,
}

impl SlideData {
    /// Load configuration and tables from `data_dir`.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let config = AppConfig::load(data_dir)?;
        let tables = load_tables(data_dir, &config.sources)?;
        Ok(SlideData {
            tables,
            allow: AllowList::new(config.chart.neighborhoods.iter().cloned()),
            palette: NeighborhoodPalette::from_hex(&config.chart.colors)?,
        })
    }

    /// Prepare every slide once so configuration bugs surface before the
    /// window opens.
    pub fn validate(&self) -> Result<(), DataError> {
        for view in &VIEWS {
            let chart = (view.prepare)(&self.tables, &self.allow, &self.palette)?;
            log::debug!("{} prepared with {} rows", view.figure, chart.len());
        }
        Ok(())
    }
}

/// Decode a key press into a navigation event.
pub fn slide_event(key: egui::Key) -> Option<SlideEvent> {
    match key {
        egui::Key::ArrowRight | egui::Key::Space => Some(SlideEvent::Advance),
        egui::Key::ArrowLeft => Some(SlideEvent::Retreat),
        egui::Key::Escape => Some(SlideEvent::Terminate),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// Slot for the error that ended a session early. `main` reads it back once
/// the window has closed.
pub type SessionFailure = Rc<RefCell<Option<DataError>>>;

pub struct SlidesApp {
    data: SlideData,
    controller: SlideController,
    canvas: ChartCanvas,
    failure: SessionFailure,
}

impl SlidesApp {
    /// Open the session on the first slide.
    pub fn new(
        ctx: egui::Context,
        data: SlideData,
        failure: SessionFailure,
    ) -> Result<Self, DataError> {
        let controller = SlideController::new(VIEW_COUNT);
        let mut canvas = ChartCanvas::new(ctx);
        present(
            controller.initial_request(),
            &data.tables,
            &data.allow,
            &data.palette,
            &mut canvas,
        )?;
        Ok(SlidesApp {
            data,
            controller,
            canvas,
            failure,
        })
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        if self.controller.is_terminated() {
            return;
        }
        let events: Vec<SlideEvent> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|e| match e {
                    egui::Event::Key {
                        key, pressed: true, ..
                    } => slide_event(*key),
                    _ => None,
                })
                .collect()
        });

        if events.into_iter().any(|event| self.apply(event)) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    /// Feed one event to the controller and draw the result. Returns `true`
    /// when the session is over, either by request or because a slide failed.
    fn apply(&mut self, event: SlideEvent) -> bool {
        match self.controller.handle(event) {
            Transition::Moved(request) => {
                match present(
                    request,
                    &self.data.tables,
                    &self.data.allow,
                    &self.data.palette,
                    &mut self.canvas,
                ) {
                    Ok(()) => false,
                    Err(e) => {
                        log::error!("Failed to prepare slide {}: {e}", request.view + 1);
                        *self.failure.borrow_mut() = Some(e);
                        true
                    }
                }
            }
            Transition::Terminated => true,
            Transition::Unchanged => false,
        }
    }
}

impl eframe::App for SlidesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);

        // ---- Top panel: figure and title ----
        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            panels::title_bar(ui, &self.canvas);
        });

        // ---- Bottom panel: legend and key help ----
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            panels::status_bar(ui, &self.data.palette);
        });

        // ---- Central panel: chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            if let (Some(view), Some(prepared)) = (self.canvas.view, &self.canvas.chart) {
                chart::slide_chart(ui, &VIEWS[view], prepared);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_mapping() {
        assert_eq!(slide_event(egui::Key::ArrowRight), Some(SlideEvent::Advance));
        assert_eq!(slide_event(egui::Key::Space), Some(SlideEvent::Advance));
        assert_eq!(slide_event(egui::Key::ArrowLeft), Some(SlideEvent::Retreat));
        assert_eq!(slide_event(egui::Key::Escape), Some(SlideEvent::Terminate));
    }

    #[test]
    fn test_other_keys_are_ignored() {
        for key in [egui::Key::ArrowUp, egui::Key::Enter, egui::Key::A, egui::Key::Q] {
            assert_eq!(slide_event(key), None);
        }
    }

    #[test]
    fn test_load_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = SlideData::load(dir.path()).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<DataError>(),
            Some(DataError::MissingTable { .. })
        ));
    }

    #[test]
    fn test_validate_reports_missing_color() {
        let (allow, _) = crate::data::prepare::tests::defaults();
        let data = SlideData {
            tables: crate::data::prepare::tests::fixture_tables(),
            allow,
            palette: NeighborhoodPalette::from_hex(&Default::default()).unwrap(),
        };
        assert!(matches!(data.validate(), Err(DataError::MissingColor(_))));
    }

    fn fixture_app(tables: RawTables) -> (SlidesApp, SessionFailure) {
        let (allow, palette) = crate::data::prepare::tests::defaults();
        let data = SlideData {
            tables,
            allow,
            palette,
        };
        let failure = SessionFailure::default();
        let app = SlidesApp::new(egui::Context::default(), data, failure.clone()).unwrap();
        (app, failure)
    }

    #[test]
    fn test_slide_failure_ends_session_with_error() {
        let mut tables = crate::data::prepare::tests::fixture_tables();
        tables.age_brackets.columns[1] = "Sexo masculino".into();
        let (mut app, failure) = fixture_app(tables);

        assert!(!app.apply(SlideEvent::Advance));
        assert!(failure.borrow().is_none());
        assert!(app.apply(SlideEvent::Advance));
        assert!(matches!(
            failure.borrow().as_ref(),
            Some(DataError::MissingColumn { .. })
        ));
    }

    #[test]
    fn test_escape_ends_session_without_error() {
        let (mut app, failure) = fixture_app(crate::data::prepare::tests::fixture_tables());
        assert!(!app.apply(SlideEvent::Retreat));
        assert!(app.apply(SlideEvent::Terminate));
        assert!(failure.borrow().is_none());
    }
}
