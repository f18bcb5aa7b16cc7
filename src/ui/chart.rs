use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Plot};

use crate::color::ClassColors;
use crate::model::predict::{SalaryClass, class_counts};

// ---------------------------------------------------------------------------
// Class count chart (batch results)
// ---------------------------------------------------------------------------

/// Bar chart with one bar per salary class.
pub fn class_count_chart(ui: &mut Ui, classes: &[SalaryClass], colors: &ClassColors) {
    let bars: Vec<Bar> = class_counts(classes)
        .into_iter()
        .enumerate()
        .map(|(i, (class, count))| {
            Bar::new(i as f64, count as f64)
                .name(class.as_str())
                .fill(colors.color_for(class))
                .width(0.6)
        })
        .collect();

    Plot::new("class_counts")
        .height(160.0)
        .show_x(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(|mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > f64::EPSILON || idx < 0.0 {
                return String::new();
            }
            SalaryClass::ALL
                .get(idx as usize)
                .map(|c| c.as_str().to_string())
                .unwrap_or_default()
        })
        .y_axis_label("Employees")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Predicted class"));
        });
}
