use std::path::PathBuf;
use thiserror::Error;

// Terminal failures while reading the transactions file. No partial table is ever returned.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("The file '{}' was not found", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Could not read '{}': {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing a required column '{column}' in '{}'", .path.display())]
    MissingColumn { path: PathBuf, column: String },

    #[error("Date format error at line {line}: could not parse '{value}' ({reason})")]
    UnparseableDate { line: u64, value: String, reason: String },

    #[error("Invalid number in column '{column}' at line {line}: '{value}'")]
    InvalidNumber { line: u64, column: String, value: String },

    #[error("CSV format error in '{}': {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl LoadError {
    /// Follow-up advice shown under the error message.
    pub fn hint(&self) -> &'static str {
        match self {
            LoadError::FileNotFound { .. } | LoadError::Unreadable { .. } => {
                "Make sure the full data file is in the project folder and readable."
            }
            LoadError::MissingColumn { .. } => {
                "Make sure you are using the full sales data file with all required columns."
            }
            LoadError::UnparseableDate { .. } => {
                "Please ensure order dates look like '12-Sep-24' (day-month-year)."
            }
            LoadError::InvalidNumber { .. } => {
                "Sales and Cost must be plain numbers; thousands separators are allowed."
            }
            LoadError::Csv { .. } => "Please check that every row has the same number of fields.",
        }
    }
}

// Non-terminal: the affected KPI is reported as undefined, the rest of the result stays valid.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComputationError {
    #[error("undefined: net sales is zero")]
    ZeroNetSales,

    #[error("undefined: ratio is not a finite number")]
    NonFinite,
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("Parameter '{name}' = {value} is outside the allowed range [{min}, {max}]")]
    ParameterOutOfRange { name: String, value: f64, min: f64, max: f64 },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}
