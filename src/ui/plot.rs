use std::f32::consts::TAU;

use eframe::egui::{self, Color32, Pos2, RichText, Sense, Shape, Stroke, Ui};
use egui_plot::{Bar, BarChart, GridMark, Plot};

use ai_jobs_dashboard::data::aggregate::{AggregateView, Insight, Measure};
use ai_jobs_dashboard::data::error::SchemaGap;

use crate::color::{generate_palette, ColorScale};

const BAR_ROW_HEIGHT: f32 = 26.0;
const MIN_PLOT_HEIGHT: f32 = 180.0;

// ---------------------------------------------------------------------------
// One dashboard section per insight
// ---------------------------------------------------------------------------

/// Heading plus chart for one insight, or a warning when its column is missing.
pub fn insight_section(
    ui: &mut Ui,
    insight: Insight,
    result: &Result<AggregateView, SchemaGap>,
) {
    ui.add_space(12.0);
    ui.heading(insight.title());

    let view = match result {
        Ok(view) => view,
        Err(gap) => {
            ui.label(RichText::new(gap.to_string()).color(Color32::YELLOW));
            return;
        }
    };
    if view.is_empty() {
        ui.label("No data to chart.");
        return;
    }

    match insight {
        Insight::RemoteDistribution => pie_chart(ui, view),
        Insight::TopCountries | Insight::SalaryByCompanySize => column_chart(ui, insight, view),
        _ => bar_chart(ui, insight, view),
    }
}

fn measure_label(measure: Measure) -> &'static str {
    match measure {
        Measure::Count => "Number of Jobs",
        Measure::MeanSalary => "Average Salary (USD)",
    }
}

fn format_value(measure: Measure, value: f64) -> String {
    match measure {
        Measure::Count => format!("{value:.0}"),
        Measure::MeanSalary => format!("${value:.0}"),
    }
}

/// Category name for an axis tick, blank between categories.
fn category_tick(labels: &[String], position: f64) -> String {
    if (position - position.round()).abs() > 1e-6 || position < 0.0 {
        return String::new();
    }
    labels.get(position.round() as usize).cloned().unwrap_or_default()
}

fn bars(insight: Insight, view: &AggregateView, position: impl Fn(usize) -> f64) -> Vec<Bar> {
    let scale = ColorScale::for_insight(insight);
    let max = view.max_value();
    view.entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            Bar::new(position(i), e.value)
                .name(format!("{}: {}", e.label, format_value(view.measure, e.value)))
                .fill(scale.color_for(e.value, max))
                .width(0.7)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Horizontal bars (first entry on top)
// ---------------------------------------------------------------------------

fn bar_chart(ui: &mut Ui, insight: Insight, view: &AggregateView) {
    let n = view.len();
    // Position i holds entry n-1-i, so labels are listed bottom-up.
    let labels: Vec<String> = view.labels().into_iter().rev().collect();
    let chart = BarChart::new("", bars(insight, view, |i| (n - 1 - i) as f64))
        .horizontal()
        .element_formatter(Box::new(|bar: &Bar, _: &BarChart| bar.name.clone()));

    Plot::new(insight.title())
        .height((n as f32 * BAR_ROW_HEIGHT).max(MIN_PLOT_HEIGHT))
        .x_axis_label(measure_label(view.measure))
        .y_axis_label(insight.category_label())
        .y_axis_min_width(120.0)
        .y_axis_formatter(move |mark: GridMark, _range| category_tick(&labels, mark.value))
        .include_x(0.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .show_y(false)
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

// ---------------------------------------------------------------------------
// Vertical bars
// ---------------------------------------------------------------------------

fn column_chart(ui: &mut Ui, insight: Insight, view: &AggregateView) {
    let labels = view.labels();
    let chart = BarChart::new("", bars(insight, view, |i| i as f64))
        .element_formatter(Box::new(|bar: &Bar, _: &BarChart| bar.name.clone()));

    Plot::new(insight.title())
        .height(260.0)
        .x_axis_label(insight.category_label())
        .y_axis_label(measure_label(view.measure))
        .x_axis_formatter(move |mark: GridMark, _range| category_tick(&labels, mark.value))
        .include_y(0.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_x(false)
        .show_y(false)
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

// ---------------------------------------------------------------------------
// Pie chart (egui_plot has none, so paint wedges directly)
// ---------------------------------------------------------------------------

fn pie_chart(ui: &mut Ui, view: &AggregateView) {
    let total: f64 = view.entries.iter().map(|e| e.value).sum();
    if total <= 0.0 {
        ui.label("No data to chart.");
        return;
    }
    let colors = generate_palette(view.len());

    ui.horizontal(|ui: &mut Ui| {
        let size = 220.0;
        let (response, painter) = ui.allocate_painter(egui::vec2(size, size), Sense::hover());
        let center = response.rect.center();
        let radius = size * 0.45;

        let mut start = -TAU / 4.0;
        for (entry, &color) in view.entries.iter().zip(&colors) {
            let sweep = (entry.value / total) as f32 * TAU;
            // Thin triangles keep every piece convex.
            let steps = ((sweep / 0.05).ceil() as usize).max(1);
            for s in 0..steps {
                let a0 = start + sweep * s as f32 / steps as f32;
                let a1 = start + sweep * (s + 1) as f32 / steps as f32;
                let wedge = vec![
                    center,
                    point_on_circle(center, radius, a0),
                    point_on_circle(center, radius, a1),
                ];
                painter.add(Shape::convex_polygon(wedge, color, Stroke::NONE));
            }
            start += sweep;
        }

        ui.vertical(|ui: &mut Ui| {
            for (entry, &color) in view.entries.iter().zip(&colors) {
                let share = entry.value / total * 100.0;
                ui.label(
                    RichText::new(format!("{}  {:.0} ({share:.1}%)", entry.label, entry.value))
                        .color(color),
                );
            }
        });
    });
}

fn point_on_circle(center: Pos2, radius: f32, angle: f32) -> Pos2 {
    center + egui::vec2(angle.cos(), angle.sin()) * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticks_only_label_whole_positions() {
        let labels = vec!["a".to_string(), "b".to_string()];
        assert_eq!(category_tick(&labels, 0.0), "a");
        assert_eq!(category_tick(&labels, 1.0), "b");
        assert_eq!(category_tick(&labels, 0.5), "");
        assert_eq!(category_tick(&labels, 2.0), "");
        assert_eq!(category_tick(&labels, -1.0), "");
    }

    #[test]
    fn salary_values_are_formatted_as_dollars() {
        assert_eq!(format_value(Measure::MeanSalary, 123456.7), "$123457");
        assert_eq!(format_value(Measure::Count, 12.0), "12");
    }
}
