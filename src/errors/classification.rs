use super::types::RollupError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub exit_code: i32,
}

impl RollupError {
    /// Classify this error to determine its type and the process exit code it maps to.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            RollupError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                exit_code: 2,
            },
            RollupError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                exit_code: 2,
            },

            RollupError::Io(_) => ErrorClassification {
                error_type: "IoError",
                exit_code: 3,
            },

            // Bad input data
            RollupError::MissingColumn(_) => ErrorClassification {
                error_type: "MissingColumnError",
                exit_code: 4,
            },
            RollupError::InvalidMetric(_) => ErrorClassification {
                error_type: "InvalidMetricError",
                exit_code: 4,
            },
            RollupError::InvalidDate(_) => ErrorClassification {
                error_type: "InvalidDateError",
                exit_code: 4,
            },
            // csv wraps its own io errors; those are still I/O failures
            RollupError::Csv(e) => match e.kind() {
                csv::ErrorKind::Io(_) => ErrorClassification {
                    error_type: "IoError",
                    exit_code: 3,
                },
                _ => ErrorClassification {
                    error_type: "CsvError",
                    exit_code: 4,
                },
            },

            RollupError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                exit_code: 1,
            },
        }
    }
}
