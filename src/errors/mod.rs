pub mod types;
pub mod classification;

pub use types::RollupError;
pub use classification::ErrorClassification;
