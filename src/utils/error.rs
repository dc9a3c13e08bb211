use thiserror::Error;

#[derive(Error, Debug)]
pub enum QpcrError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Validation,
    Serialization,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl QpcrError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            QpcrError::IoError(_) => ErrorCategory::Io,
            QpcrError::SerializationError(_) | QpcrError::CsvError(_) => {
                ErrorCategory::Serialization
            }
            QpcrError::ConfigError { .. } | QpcrError::ConfigValidationError { .. } => {
                ErrorCategory::Configuration
            }
            QpcrError::InvalidConfigValueError { .. } => ErrorCategory::Validation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Serialization => ErrorSeverity::Medium,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            QpcrError::IoError(_) => {
                "Check that the experiment file exists and the output directory is writable"
            }
            QpcrError::SerializationError(_) | QpcrError::CsvError(_) => {
                "Re-run with --format table, or report the input that triggered this"
            }
            QpcrError::ConfigError { .. } | QpcrError::ConfigValidationError { .. } => {
                "Check the experiment file syntax against the [samples], [recipe] and [primers] layout"
            }
            QpcrError::InvalidConfigValueError { .. } => {
                "Fix the highlighted field, or drop --strict to compute with the value as given"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            QpcrError::IoError(e) => format!("Could not access a file: {}", e),
            QpcrError::SerializationError(e) => format!("Could not produce JSON output: {}", e),
            QpcrError::CsvError(e) => format!("Could not produce CSV output: {}", e),
            QpcrError::ConfigError { message } => format!("Configuration problem: {}", message),
            QpcrError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            QpcrError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("'{}' = '{}' is not allowed: {}", field, value, reason),
        }
    }
}

pub type Result<T> = std::result::Result<T, QpcrError>;
