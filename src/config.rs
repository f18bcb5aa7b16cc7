// ---------------------------------------------------------------------------
// Compile-time settings
// ---------------------------------------------------------------------------

/// Model artifact, relative to the working directory.
pub const MODEL_PATH: &str = "best_model.json";

/// File name proposed by the save dialog for batch results.
pub const DOWNLOAD_FILE_NAME: &str = "predicted_classes.csv";

/// Rows shown in the uploaded-file preview.
pub const PREVIEW_ROWS: usize = 5;

pub const WINDOW_TITLE: &str = "Employee Salary Classification";
pub const WINDOW_SIZE: [f32; 2] = [1000.0, 760.0];
pub const WINDOW_MIN_SIZE: [f32; 2] = [600.0, 400.0];

pub const HEADING: &str = "Employee Salary Classification App";
pub const SUBHEADING: &str =
    "Predict whether an employee earns >50K or ≤50K based on 5 numeric features.";
