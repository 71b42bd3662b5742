use eframe::egui::{self, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use ai_jobs_dashboard::data::model::JobRecord;

const ROW_HEIGHT: f32 = 18.0;

/// Render rows as a striped, scrollable table with one column per header.
pub fn records_table(
    ui: &mut Ui,
    id: &str,
    columns: &[String],
    rows: &[&JobRecord],
    max_height: f32,
) {
    if rows.is_empty() {
        ui.label("No matching rows.");
    }

    ui.push_id(id, |ui: &mut Ui| {
        egui::ScrollArea::horizontal()
            .id_salt("hscroll")
            .show(ui, |ui: &mut Ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .resizable(true)
                    .cell_layout(Layout::left_to_right(egui::Align::Center))
                    .columns(Column::auto().at_least(60.0).clip(true), columns.len())
                    .min_scrolled_height(0.0)
                    .max_scroll_height(max_height)
                    .header(ROW_HEIGHT + 4.0, |mut header| {
                        for name in columns {
                            header.col(|ui: &mut Ui| {
                                ui.strong(name);
                            });
                        }
                    })
                    .body(|body| {
                        body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                            let rec = rows[row.index()];
                            for i in 0..columns.len() {
                                let cell = rec.cells.get(i).map(String::as_str).unwrap_or("");
                                row.col(|ui: &mut Ui| {
                                    ui.label(cell);
                                });
                            }
                        });
                    });
            });
    });
}
