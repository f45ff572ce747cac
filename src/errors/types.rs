use thiserror::Error;

#[derive(Debug, Error)]
pub enum RollupError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Invalid metric value: {0}")]
    InvalidMetric(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
