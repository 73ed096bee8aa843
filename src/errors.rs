/// All application errors, categorized by pipeline stage.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ── Payload ──
    #[error("No value at position {0} in the Eurostat payload")]
    MissingValue(usize),

    #[error("No label for geo code {0} in the Eurostat payload")]
    MissingLabel(String),

    // ── Persistence ──
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read file: {0}")]
    FileRead(String),

    #[error("Failed to write file: {0}")]
    FileWrite(String),

    // ── Combine ──
    #[error("Dataset {category} does not align with the first category: {detail}")]
    DatasetMismatch { category: String, detail: String },

    #[error("No categories supplied to combine")]
    NothingToCombine,

    // ── Dashboard ──
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    // ── Serialization ──
    #[error("Serialization error: {0}")]
    Serialization(String),
}

// ── Conversions from external errors ──

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::FileRead(err.to_string())
    }
}
