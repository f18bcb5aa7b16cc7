use std::path::Path;
use std::sync::Arc;

use crate::color::ClassColors;
use crate::data::export::{save_csv, to_csv_bytes};
use crate::data::model::FeatureRecord;
use crate::model::predict::{Classifier, SalaryClass, predict_record};
use crate::pipeline::{BatchOutcome, run_batch_file};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Where the current interaction cycle stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    AwaitingInput,
    Computing,
    DisplayingResult,
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded once at start-up, read-only afterwards.
    pub model: Arc<dyn Classifier>,

    /// Side panel inputs.
    pub record: FeatureRecord,

    /// Result of the last "Predict Salary Class" press.
    pub single_result: Option<Result<SalaryClass, String>>,

    /// Result of the last upload.
    pub batch_result: Option<Result<BatchOutcome, String>>,

    pub phase: Phase,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,

    pub colors: ClassColors,
}

impl AppState {
    pub fn new(model: Arc<dyn Classifier>) -> Self {
        Self {
            model,
            record: FeatureRecord::default(),
            single_result: None,
            batch_result: None,
            phase: Phase::Idle,
            status_message: None,
            colors: ClassColors::default(),
        }
    }

    /// A side panel control changed; any shown single result is stale.
    pub fn input_changed(&mut self) {
        self.record = self.record.clamped();
        self.single_result = None;
        self.phase = Phase::AwaitingInput;
    }

    /// Predict the class of the side panel record.
    pub fn predict_single(&mut self) {
        self.phase = Phase::Computing;
        let outcome = predict_record(self.model.as_ref(), &self.record);
        match &outcome {
            Ok(class) => log::info!("Predicted {class} (label {})", class.label()),
            Err(e) => log::error!("Single prediction failed: {e}"),
        }
        self.single_result = Some(outcome.map_err(|e| format!("Error: {e}")));
        self.phase = Phase::DisplayingResult;
    }

    /// Load an uploaded CSV and run the batch prediction on it.
    pub fn predict_batch(&mut self, path: &Path) {
        self.phase = Phase::Computing;
        let outcome = run_batch_file(self.model.as_ref(), path);
        if let Err(e) = &outcome {
            log::error!("Batch prediction failed: {e}");
        }
        self.batch_result = Some(outcome.map_err(|e| e.to_string()));
        self.phase = Phase::DisplayingResult;
    }

    /// Write the annotated batch table to `path`.
    pub fn save_batch(&mut self, path: &Path) {
        let Some(Ok(outcome)) = &self.batch_result else {
            return;
        };
        let result = to_csv_bytes(&outcome.annotated).and_then(|bytes| save_csv(path, &bytes));
        match result {
            Ok(()) => {
                log::info!("Saved predictions to {}", path.display());
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to save predictions: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// The trigger button is disabled while a prediction runs.
    pub fn can_predict(&self) -> bool {
        self.phase != Phase::Computing
    }

    /// Inputs changed since the last shown result.
    pub fn awaiting_input(&self) -> bool {
        self.phase == Phase::AwaitingInput
    }

    /// Rendering finished; the next event starts a new cycle.
    /// `AwaitingInput` holds until the next submit.
    pub fn end_cycle(&mut self) {
        if self.phase == Phase::DisplayingResult {
            self.phase = Phase::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::data::loader::load_file;
    use crate::model::predict::tests::FixedClassifier;

    fn state() -> AppState {
        AppState::new(Arc::new(FixedClassifier::by_age()))
    }

    #[test]
    fn starts_with_default_record() {
        let state = state();
        assert_eq!(state.record, FeatureRecord::default());
        assert_eq!(state.phase, Phase::Idle);
    }

    #[test]
    fn single_prediction_cycle() {
        let mut state = state();
        state.record.age = 60;
        state.input_changed();
        assert_eq!(state.phase, Phase::AwaitingInput);

        state.predict_single();
        assert_eq!(state.single_result, Some(Ok(SalaryClass::Above50K)));
        assert_eq!(state.phase, Phase::DisplayingResult);

        state.end_cycle();
        assert_eq!(state.phase, Phase::Idle);

        state.record.age = 500;
        state.input_changed();
        assert_eq!(state.record.age, 75);
        assert!(state.single_result.is_none());
    }

    #[test]
    fn awaiting_input_holds_until_submit() {
        let mut state = state();
        state.input_changed();
        state.end_cycle();
        assert!(state.awaiting_input());
        assert!(state.can_predict());

        state.predict_single();
        assert!(!state.awaiting_input());
        state.end_cycle();
        assert_eq!(state.phase, Phase::Idle);
    }

    #[test]
    fn cannot_predict_while_computing() {
        let mut state = state();
        state.phase = Phase::Computing;
        assert!(!state.can_predict());
        state.end_cycle();
        assert_eq!(state.phase, Phase::Computing);
    }

    #[test]
    fn batch_errors_are_kept_for_display() {
        let mut state = state();
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "age,education,occupation").unwrap();
        writeln!(file, "30,12,4").unwrap();

        state.predict_batch(file.path());
        let Some(Err(msg)) = &state.batch_result else {
            panic!("expected an error");
        };
        assert!(msg.starts_with("Uploaded CSV must include these columns"));
    }

    #[test]
    fn save_writes_annotated_table() {
        let mut state = state();
        let dir = tempfile::tempdir().unwrap();
        let upload = dir.path().join("upload.csv");
        std::fs::write(
            &upload,
            "age,education,occupation,hours-per-week,experience,name\n45,12,4,40,5,Ann\n",
        )
        .unwrap();
        state.predict_batch(&upload);

        let out = dir.path().join("predicted_classes.csv");
        state.save_batch(&out);
        assert!(state.status_message.is_none());

        let saved = load_file(&out).unwrap();
        assert_eq!(saved.headers.last().unwrap(), "Prediction");
        assert_eq!(saved.rows[0], vec!["45", "12", "4", "40", "5", "Ann", ">50K"]);
    }

    #[test]
    fn save_failure_sets_status() {
        let mut state = state();
        let dir = tempfile::tempdir().unwrap();
        let upload = dir.path().join("upload.csv");
        std::fs::write(
            &upload,
            "age,education,occupation,hours-per-week,experience\n30,12,4,40,5\n",
        )
        .unwrap();
        state.predict_batch(&upload);

        state.save_batch(&dir.path().join("missing").join("out.csv"));
        assert!(state.status_message.as_deref().unwrap().starts_with("Error: writing"));
    }
}
