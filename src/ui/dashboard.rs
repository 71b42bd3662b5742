use eframe::egui::{self, Ui};

use ai_jobs_dashboard::data::aggregate::Insight;
use ai_jobs_dashboard::data::model::JobRecord;
use ai_jobs_dashboard::state::{AppState, Session};

use super::{panels, plot, table};

// ---------------------------------------------------------------------------
// Central panel – the scrolling dashboard
// ---------------------------------------------------------------------------

/// Insights shown before the filtered-jobs block; the rest follow it.
const INSIGHTS_BEFORE_FILTER: usize = 5;

pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    let Some(session) = &state.session else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Upload a CSV file to continue  (File → Open…, or drop it here)");
        });
        return;
    };

    let mut export_clicked = false;
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(egui::RichText::new("AI Job Data Analysis Dashboard").size(26.0));

            sample_data(ui, session);
            overview(ui, session);

            let (before, after) = session
                .insights
                .split_at(INSIGHTS_BEFORE_FILTER.min(session.insights.len()));
            for (insight, result) in before {
                plot::insight_section(ui, *insight, result);
            }

            export_clicked = filtered_jobs(ui, session);

            for (insight, result) in after {
                plot::insight_section(ui, *insight, result);
            }
            ui.add_space(24.0);
        });

    if export_clicked {
        panels::save_file_dialog(state);
    }
}

fn sample_data(ui: &mut Ui, session: &Session) {
    ui.add_space(8.0);
    ui.heading("Sample Data");
    let rows: Vec<&JobRecord> = session.summary.preview.iter().collect();
    table::records_table(ui, "sample_data", &session.summary.columns, &rows, 160.0);
}

fn overview(ui: &mut Ui, session: &Session) {
    let summary = &session.summary;
    let (rows, cols) = summary.shape();

    ui.add_space(12.0);
    ui.heading("Dataset Overview");
    ui.label(format!("Shape of data: ({rows}, {cols})"));
    ui.label(format!("Columns: {}", summary.columns.join(", ")));

    let has_skills = session
        .insights
        .iter()
        .any(|(i, r)| *i == Insight::TopSkills && r.is_ok());
    if !has_skills {
        ui.label("Skill analysis is unavailable for this dataset.");
    }

    egui::CollapsingHeader::new("Missing values per column")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("null_counts")
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    for (column, nulls) in &summary.null_counts {
                        ui.label(column.as_str());
                        ui.label(nulls.to_string());
                        ui.end_row();
                    }
                });
        });
}

/// Returns whether the download button was clicked.
fn filtered_jobs(ui: &mut Ui, session: &Session) -> bool {
    ui.add_space(12.0);
    ui.heading("Filtered Jobs");

    if let Some(c) = &session.criteria {
        ui.label(format!(
            "Year {} · {} · {}: {} jobs",
            c.year,
            c.location,
            c.experience_level,
            session.visible_indices.len()
        ));
    }

    let view = session.filtered_view();
    let rows: Vec<&JobRecord> = view.records().collect();
    table::records_table(ui, "filtered_jobs", view.columns(), &rows, 300.0);

    ui.button("Download Filtered Data as CSV").clicked()
}
