use eframe::egui::{self, Color32, DragValue, RichText, Slider, Ui};

use crate::config;
use crate::data::model::{ControlKind, Feature};
use crate::state::AppState;
use crate::ui::{chart, tables};

// ---------------------------------------------------------------------------
// Left side panel – employee inputs
// ---------------------------------------------------------------------------

/// Render the bounded input controls for the five features.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Input Employee Details");
    ui.separator();

    let mut changed = false;
    for feature in Feature::ALL {
        let range = feature.range();
        let value = state.record.get_mut(feature);
        ui.label(feature.label());
        let response = match feature.control() {
            ControlKind::Slider => ui.add(Slider::new(value, range)),
            ControlKind::Number => ui.add(DragValue::new(value).range(range).speed(0.1)),
        };
        changed |= response.changed();
        ui.add_space(6.0);
    }

    if changed {
        state.input_changed();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Upload CSV…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let has_batch = matches!(state.batch_result, Some(Ok(_)));
            if ui
                .add_enabled(has_batch, egui::Button::new("Save Predictions…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(format!("Model: {}", state.model.name()));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – single and batch prediction
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(config::HEADING);
            ui.label(config::SUBHEADING);
            ui.add_space(8.0);

            single_section(ui, state);

            ui.add_space(8.0);
            ui.separator();
            batch_section(ui, state);
        });
}

fn single_section(ui: &mut Ui, state: &mut AppState) {
    ui.strong("Input Preview");
    tables::record_table(ui, &state.record);
    ui.add_space(6.0);

    if ui
        .add_enabled(state.can_predict(), egui::Button::new("Predict Salary Class"))
        .clicked()
    {
        state.predict_single();
    }
    if state.awaiting_input() {
        ui.weak("Inputs changed. Press Predict Salary Class to update.");
    }

    match &state.single_result {
        Some(Ok(class)) => {
            ui.label(
                RichText::new(format!("Prediction: {class}"))
                    .strong()
                    .color(state.colors.color_for(*class)),
            );
        }
        Some(Err(msg)) => error_label(ui, msg),
        None => {}
    }
}

fn batch_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Batch Prediction");
    ui.label(format!(
        "Upload a CSV file with 5 columns: {}",
        crate::data::model::required_columns_list()
    ));
    if ui.button("Upload CSV…").clicked() {
        open_file_dialog(state);
    }
    ui.add_space(6.0);

    let mut download = false;
    match &state.batch_result {
        Some(Ok(outcome)) => {
            ui.strong("Uploaded File Preview");
            tables::preview_table(ui, "upload_preview", &outcome.uploaded, config::PREVIEW_ROWS);
            ui.add_space(6.0);

            ui.label(RichText::new("Batch prediction completed!").color(Color32::DARK_GREEN));
            tables::result_table(ui, &outcome.annotated, &state.colors);
            ui.add_space(6.0);

            chart::class_count_chart(ui, &outcome.classes, &state.colors);
            download = ui.button("Download Predictions CSV").clicked();
        }
        Some(Err(msg)) => error_label(ui, msg),
        None => {}
    }

    if download {
        save_file_dialog(state);
    }
}

fn error_label(ui: &mut Ui, msg: &str) {
    ui.label(RichText::new(msg).color(Color32::RED));
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Upload employee data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.predict_batch(&path);
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Download predictions")
        .set_file_name(config::DOWNLOAD_FILE_NAME)
        .add_filter("CSV (text/csv)", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.save_batch(&path);
    }
}
