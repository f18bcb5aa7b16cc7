use std::fmt;
use std::ops::RangeInclusive;

// ---------------------------------------------------------------------------
// Feature – one of the five model inputs
// ---------------------------------------------------------------------------

/// The five numeric inputs the classifier was trained on, in column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    Age,
    Education,
    Occupation,
    HoursPerWeek,
    Experience,
}

/// How the side panel renders a feature control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Slider,
    Number,
}

impl Feature {
    /// All features in the order the model expects them.
    pub const ALL: [Feature; 5] = [
        Feature::Age,
        Feature::Education,
        Feature::Occupation,
        Feature::HoursPerWeek,
        Feature::Experience,
    ];

    /// Column name as it appears in uploaded CSV headers.
    pub fn column(self) -> &'static str {
        match self {
            Feature::Age => "age",
            Feature::Education => "education",
            Feature::Occupation => "occupation",
            Feature::HoursPerWeek => "hours-per-week",
            Feature::Experience => "experience",
        }
    }

    /// Human-readable label for the input control.
    pub fn label(self) -> &'static str {
        match self {
            Feature::Age => "Age",
            Feature::Education => "Education (numeric)",
            Feature::Occupation => "Occupation (numeric code)",
            Feature::HoursPerWeek => "Hours per Week",
            Feature::Experience => "Experience (years)",
        }
    }

    pub fn range(self) -> RangeInclusive<i64> {
        match self {
            Feature::Age => 18..=75,
            Feature::Education => 0..=16,
            Feature::Occupation => 0..=20,
            Feature::HoursPerWeek => 1..=99,
            Feature::Experience => 0..=50,
        }
    }

    pub fn default_value(self) -> i64 {
        match self {
            Feature::Age => 30,
            Feature::Education => 12,
            Feature::Occupation => 4,
            Feature::HoursPerWeek => 40,
            Feature::Experience => 5,
        }
    }

    pub fn control(self) -> ControlKind {
        match self {
            Feature::Age | Feature::HoursPerWeek => ControlKind::Slider,
            _ => ControlKind::Number,
        }
    }

    /// Position of this feature in [`Feature::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Required column names, comma separated, for user-facing messages.
pub fn required_columns_list() -> String {
    Feature::ALL
        .iter()
        .map(|f| f.column())
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// FeatureRecord – the single-record input
// ---------------------------------------------------------------------------

/// One employee as entered through the side panel controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureRecord {
    pub age: i64,
    pub education: i64,
    pub occupation: i64,
    pub hours_per_week: i64,
    pub experience: i64,
}

impl Default for FeatureRecord {
    fn default() -> Self {
        Self {
            age: Feature::Age.default_value(),
            education: Feature::Education.default_value(),
            occupation: Feature::Occupation.default_value(),
            hours_per_week: Feature::HoursPerWeek.default_value(),
            experience: Feature::Experience.default_value(),
        }
    }
}

impl FeatureRecord {
    pub fn get(&self, feature: Feature) -> i64 {
        match feature {
            Feature::Age => self.age,
            Feature::Education => self.education,
            Feature::Occupation => self.occupation,
            Feature::HoursPerWeek => self.hours_per_week,
            Feature::Experience => self.experience,
        }
    }

    pub fn get_mut(&mut self, feature: Feature) -> &mut i64 {
        match feature {
            Feature::Age => &mut self.age,
            Feature::Education => &mut self.education,
            Feature::Occupation => &mut self.occupation,
            Feature::HoursPerWeek => &mut self.hours_per_week,
            Feature::Experience => &mut self.experience,
        }
    }

    /// Copy with every value forced into its declared range.
    pub fn clamped(mut self) -> Self {
        for feature in Feature::ALL {
            let range = feature.range();
            let value = self.get_mut(feature);
            *value = (*value).clamp(*range.start(), *range.end());
        }
        self
    }

    /// Values in model column order.
    pub fn values(&self) -> [i64; 5] {
        Feature::ALL.map(|f| self.get(f))
    }

    /// A one-row table for the predictor.
    pub fn to_table(&self) -> FeatureTable {
        FeatureTable {
            rows: vec![self.values().map(|v| v as f64)],
        }
    }
}

// ---------------------------------------------------------------------------
// FeatureTable – model input
// ---------------------------------------------------------------------------

/// Rows of the five feature values, always in [`Feature::ALL`] column order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureTable {
    pub rows: Vec<[f64; 5]>,
}

impl FeatureTable {
    pub fn columns(&self) -> [&'static str; 5] {
        Feature::ALL.map(Feature::column)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// UploadedTable – a CSV as the user supplied it
// ---------------------------------------------------------------------------

/// Raw uploaded CSV: header names plus the cell text of every row.
/// Cells are kept verbatim so extra columns survive into the download.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UploadedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl UploadedTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// First `n` rows, for previews.
    pub fn head(&self, n: usize) -> &[Vec<String>] {
        &self.rows[..n.min(self.rows.len())]
    }
}
