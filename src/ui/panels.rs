use eframe::egui::{self, Color32, RichText, Ui};

use ai_jobs_dashboard::state::{AppState, NoticeLevel};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Jobs");
    ui.separator();

    let session = match &state.session {
        Some(s) => s,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    // Clone what we need so we can mutate state after the widgets.
    let options = session.options.clone();
    let Some(criteria) = session.criteria.clone() else {
        ui.label("The dataset has no year, location or experience level values to filter on.");
        return;
    };
    let n_visible = session.visible_indices.len();

    let mut year = criteria.year;
    ui.strong("Select Year");
    egui::ComboBox::from_id_salt("filter_year")
        .selected_text(year.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for &y in &options.years {
                ui.selectable_value(&mut year, y, y.to_string());
            }
        });

    let mut location = criteria.location.clone();
    ui.strong("Select Location");
    egui::ComboBox::from_id_salt("filter_location")
        .selected_text(location.as_str())
        .show_ui(ui, |ui: &mut Ui| {
            for l in &options.locations {
                ui.selectable_value(&mut location, l.clone(), l.as_str());
            }
        });

    let mut level = criteria.experience_level.clone();
    ui.strong("Select Experience Level");
    egui::ComboBox::from_id_salt("filter_level")
        .selected_text(level.as_str())
        .show_ui(ui, |ui: &mut Ui| {
            for e in &options.experience_levels {
                ui.selectable_value(&mut level, e.clone(), e.as_str());
            }
        });

    ui.separator();
    ui.label(format!("{n_visible} matching jobs"));

    if year != criteria.year {
        state.set_year(year);
    }
    if location != criteria.location {
        state.set_location(location);
    }
    if level != criteria.experience_level {
        state.set_experience_level(level);
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let has_data = state.session.is_some();
            if ui
                .add_enabled(has_data, egui::Button::new("Export filtered…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(session) = &state.session {
            ui.label(format!(
                "{}: {} jobs loaded, {} match the filters",
                session.source,
                session.dataset.len(),
                session.visible_indices.len()
            ));
        }

        ui.separator();

        if let Some(notice) = &state.notice {
            let color = match notice.level {
                NoticeLevel::Success => Color32::GREEN,
                NoticeLevel::Warning => Color32::YELLOW,
                NoticeLevel::Error => Color32::RED,
            };
            ui.label(RichText::new(notice.text.as_str()).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open AI job data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.load_from_path(&path);
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    if state.session.is_none() {
        return;
    }
    let file = rfd::FileDialog::new()
        .set_title("Export filtered jobs")
        .set_file_name(state.config.export_file_name.as_str())
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.export_filtered(&path);
    }
}
