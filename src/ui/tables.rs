use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::ClassColors;
use crate::data::export::PREDICTION_COLUMN;
use crate::data::model::{Feature, FeatureRecord, UploadedTable};
use crate::model::predict::SalaryClass;

const ROW_HEIGHT: f32 = 18.0;
const MAX_TABLE_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Tables (central panel)
// ---------------------------------------------------------------------------

/// One-row preview of the side panel inputs.
pub fn record_table(ui: &mut Ui, record: &FeatureRecord) {
    ui.push_id("record_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .columns(Column::auto().at_least(70.0), Feature::ALL.len())
            .header(ROW_HEIGHT, |mut header| {
                for feature in Feature::ALL {
                    header.col(|ui: &mut Ui| {
                        ui.strong(feature.column());
                    });
                }
            })
            .body(|mut body| {
                body.row(ROW_HEIGHT, |mut row| {
                    for value in record.values() {
                        row.col(|ui: &mut Ui| {
                            ui.label(value.to_string());
                        });
                    }
                });
            });
    });
}

/// The first `n` rows of an upload, all columns.
pub fn preview_table(ui: &mut Ui, id: &str, table: &UploadedTable, n: usize) {
    let rows = table.head(n);
    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .columns(Column::auto().at_least(60.0), table.column_count())
            .header(ROW_HEIGHT, |mut header| {
                for name in &table.headers {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let cells = &rows[row.index()];
                    for cell in cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    });
}

/// The annotated batch table, with the prediction cells coloured by class.
pub fn result_table(ui: &mut Ui, table: &UploadedTable, colors: &ClassColors) {
    let prediction_idx = table.column_index(PREDICTION_COLUMN);
    ui.push_id("result_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .max_scroll_height(MAX_TABLE_HEIGHT)
            .columns(Column::auto().at_least(60.0), table.column_count())
            .header(ROW_HEIGHT, |mut header| {
                for name in &table.headers {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, table.len(), |mut row| {
                    let cells = &table.rows[row.index()];
                    for (col_idx, cell) in cells.iter().enumerate() {
                        row.col(|ui: &mut Ui| {
                            let class = (Some(col_idx) == prediction_idx)
                                .then(|| SalaryClass::ALL.into_iter().find(|c| *cell == c.as_str()))
                                .flatten();
                            match class {
                                Some(class) => {
                                    ui.label(RichText::new(cell).color(colors.color_for(class)));
                                }
                                None => {
                                    ui.label(cell);
                                }
                            }
                        });
                    }
                });
            });
    });
}
