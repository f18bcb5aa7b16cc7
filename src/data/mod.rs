/// Data layer: input types, CSV loading, column checks and export.
///
/// Architecture:
/// ```text
///   side panel controls        uploaded .csv
///          │                        │
///          ▼                        ▼
///   ┌───────────────┐         ┌──────────┐
///   │ FeatureRecord │         │  loader   │  parse file → UploadedTable
///   └───────────────┘         └──────────┘
///          │                        │
///          │                        ▼
///          │                  ┌──────────┐
///          │                  │ validate  │  required columns → FeatureTable
///          │                  └──────────┘
///          ▼                        ▼
///   ┌──────────────────────────────────┐
///   │  model::predict  → SalaryClass    │
///   └──────────────────────────────────┘
///                                   │
///                                   ▼
///                             ┌──────────┐
///                             │  export   │  append Prediction → CSV bytes
///                             └──────────┘
/// ```

pub mod export;
pub mod loader;
pub mod model;
pub mod validate;
