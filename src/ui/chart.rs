use std::ops::RangeInclusive;

use eframe::egui::{Align2, Color32, RichText, Stroke, Ui};
use egui_plot::{uniform_grid_spacer, Bar, BarChart, GridMark, Legend, Plot, PlotPoint, Text};

use crate::color::{female_series, male_series};
use crate::data::model::{Chart, Measure};
use crate::views::{slot, Orientation, ViewSpec, CATEGORY_AXIS};

const SINGLE_WIDTH: f64 = 0.7;
const PAIR_WIDTH: f64 = 0.35;
const PAIR_OFFSET: f64 = PAIR_WIDTH / 2.0;
const HEADROOM: f64 = 1.15;

// ---------------------------------------------------------------------------
// Bar layout (independent of egui_plot)
// ---------------------------------------------------------------------------

/// One bar to draw.
#[derive(Debug, Clone, PartialEq)]
struct BarSpec {
    series: usize,
    position: f64,
    value: f64,
    width: f64,
    fill: Color32,
    name: String,
}

fn bar_specs(view: &ViewSpec, chart: &Chart) -> Vec<BarSpec> {
    let mut bars = Vec::with_capacity(chart.len() * 2);
    for (i, row) in chart.rows.iter().enumerate() {
        match (view.series, row.measure) {
            (Some(_), Measure::BySex { male, female }) => {
                bars.push(BarSpec {
                    series: 0,
                    position: slot(i) - PAIR_OFFSET,
                    value: male,
                    width: PAIR_WIDTH,
                    fill: male_series(),
                    name: row.neighborhood.clone(),
                });
                bars.push(BarSpec {
                    series: 1,
                    position: slot(i) + PAIR_OFFSET,
                    value: female,
                    width: PAIR_WIDTH,
                    fill: female_series(),
                    name: row.neighborhood.clone(),
                });
            }
            (_, measure) => bars.push(BarSpec {
                series: 0,
                position: slot(i),
                value: measure.total(),
                width: SINGLE_WIDTH,
                fill: row.color,
                name: row.neighborhood.clone(),
            }),
        }
    }
    bars
}

/// Tick text for the category axis: the neighborhood on integer slots.
fn category_label(names: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    names.get(rounded as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Slide chart (central panel)
// ---------------------------------------------------------------------------

/// Render a prepared slide in the central panel.
pub fn slide_chart(ui: &mut Ui, view: &ViewSpec, chart: &Chart) {
    if chart.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Nenhum bairro selecionado nesta tabela");
        });
        return;
    }

    let names: Vec<String> = chart.rows.iter().map(|r| r.neighborhood.clone()).collect();
    let value_max = chart.peak() * HEADROOM;
    let category_min = -0.5;
    let category_max = chart.len() as f64 - 0.5;
    let ticks = move |mark: GridMark, _range: &RangeInclusive<f64>| category_label(&names, mark.value);

    let mut plot = Plot::new(view.figure)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .allow_double_click_reset(false);

    plot = match view.orientation {
        Orientation::Vertical => plot
            .x_axis_label(CATEGORY_AXIS)
            .y_axis_label(view.value_axis)
            .x_axis_formatter(ticks)
            .x_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
            .show_grid([false, true])
            .include_x(category_min)
            .include_x(category_max)
            .include_y(0.0)
            .include_y(value_max),
        Orientation::Horizontal => plot
            .x_axis_label(view.value_axis)
            .y_axis_label(CATEGORY_AXIS)
            .y_axis_formatter(ticks)
            .y_grid_spacer(uniform_grid_spacer(|_| [1.0, 5.0, 10.0]))
            .show_grid([true, false])
            .include_y(category_min)
            .include_y(category_max)
            .include_x(0.0)
            .include_x(value_max),
    };
    if view.series.is_some() {
        plot = plot.legend(Legend::default());
    }

    let specs = bar_specs(view, chart);
    let label_pad = chart.peak() * 0.02;

    plot.show(ui, |plot_ui| {
        let series_names: Vec<&str> = match view.series {
            Some(names) => names.to_vec(),
            None => vec![view.title],
        };
        for (series, series_name) in series_names.iter().enumerate() {
            let bars: Vec<Bar> = specs
                .iter()
                .filter(|b| b.series == series)
                .map(|b| {
                    Bar::new(b.position, b.value)
                        .width(b.width)
                        .fill(b.fill.gamma_multiply(0.9))
                        .stroke(Stroke::new(1.5, Color32::BLACK))
                        .name(&b.name)
                })
                .collect();
            let mut bar_chart = BarChart::new(bars).name(*series_name);
            if let Some(fill) = specs.iter().find(|b| b.series == series).map(|b| b.fill) {
                bar_chart = bar_chart.color(fill);
            }
            if view.orientation == Orientation::Horizontal {
                bar_chart = bar_chart.horizontal();
            }
            plot_ui.bar_chart(bar_chart);
        }

        for b in &specs {
            let text = RichText::new(view.format.label(b.value)).strong();
            let (point, anchor) = match view.orientation {
                Orientation::Vertical => (
                    PlotPoint::new(b.position, b.value + label_pad),
                    Align2::CENTER_BOTTOM,
                ),
                Orientation::Horizontal => (
                    PlotPoint::new(b.value + label_pad / 2.0, b.position),
                    Align2::LEFT_CENTER,
                ),
            };
            plot_ui.text(Text::new(point, text).anchor(anchor));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ChartRow;
    use crate::data::prepare::tests::{defaults, fixture_tables};
    use crate::views::VIEWS;

    fn chart() -> Chart {
        Chart {
            rows: vec![
                ChartRow {
                    neighborhood: "Realengo".into(),
                    measure: Measure::BySex {
                        male: 40.0,
                        female: 42.0,
                    },
                    color: Color32::RED,
                },
                ChartRow {
                    neighborhood: "Bangu".into(),
                    measure: Measure::BySex {
                        male: 50.0,
                        female: 55.0,
                    },
                    color: Color32::GREEN,
                },
            ],
        }
    }

    #[test]
    fn test_pair_bars_straddle_slot() {
        let specs = bar_specs(&VIEWS[2], &chart());
        assert_eq!(specs.len(), 4);
        assert_eq!(specs[0].position, -PAIR_OFFSET);
        assert_eq!(specs[1].position, PAIR_OFFSET);
        assert_eq!(specs[2].position, 1.0 - PAIR_OFFSET);
        assert_eq!(specs[0].fill, male_series());
        assert_eq!(specs[3].fill, female_series());
        assert_eq!(specs[3].value, 55.0);
    }

    #[test]
    fn test_single_bars_use_neighborhood_color() {
        let mut c = chart();
        for r in &mut c.rows {
            r.measure = Measure::Single(r.measure.total());
        }
        let specs = bar_specs(&VIEWS[0], &c);
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].fill, Color32::RED);
        assert_eq!(specs[1].position, 1.0);
        assert_eq!(specs[1].value, 105.0);
    }

    #[test]
    fn test_horizontal_ascending_draws_largest_on_top() {
        let (allow, palette) = defaults();
        let tables = fixture_tables();
        for index in [2, 5] {
            let prepared = (VIEWS[index].prepare)(&tables, &allow, &palette).unwrap();
            let specs = bar_specs(&VIEWS[index], &prepared);
            let largest = specs
                .iter()
                .max_by(|a, b| a.value.total_cmp(&b.value))
                .unwrap();
            let topmost = specs
                .iter()
                .map(|b| b.position)
                .fold(f64::MIN, f64::max);
            assert_eq!(largest.position, topmost, "view {index}");
        }
    }

    #[test]
    fn test_category_label_only_on_slots() {
        let names = vec!["Bangu".to_string(), "Realengo".to_string()];
        assert_eq!(category_label(&names, 0.0), "Bangu");
        assert_eq!(category_label(&names, 1.0), "Realengo");
        assert_eq!(category_label(&names, 0.5), "");
        assert_eq!(category_label(&names, 2.0), "");
        assert_eq!(category_label(&names, -1.0), "");
    }
}
