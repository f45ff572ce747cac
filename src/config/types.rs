use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Optional run settings loaded from a YAML file. Command-line flags win.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ReformatConfig {
    /// Cut-off date; records dated on or after it are dropped.
    pub today: Option<NaiveDate>,
    /// Field delimiter for both the input and output tables.
    pub delimiter: Option<char>,
    /// Print the run summary as JSON on stdout.
    pub json_summary: Option<bool>,
}

impl ReformatConfig {
    pub const DEFAULT_DELIMITER: char = ',';

    pub fn delimiter_or_default(&self) -> char {
        self.delimiter.unwrap_or(Self::DEFAULT_DELIMITER)
    }

    /// Overlay `other` on top of `self`; values set in `other` win.
    pub fn merge(self, other: ReformatConfig) -> ReformatConfig {
        ReformatConfig {
            today: other.today.or(self.today),
            delimiter: other.delimiter.or(self.delimiter),
            json_summary: other.json_summary.or(self.json_summary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full() {
        let yaml = "today: 2024-03-15\ndelimiter: \"\\t\"\njson_summary: true\n";
        let config: ReformatConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.today, NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(config.delimiter, Some('\t'));
        assert_eq!(config.json_summary, Some(true));
    }

    #[test]
    fn test_deserialize_empty_mapping() {
        let config: ReformatConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, ReformatConfig::default());
        assert_eq!(config.delimiter_or_default(), ',');
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<ReformatConfig, _> = serde_yaml::from_str("vocabulary: [US]\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_prefers_overlay() {
        let file = ReformatConfig {
            today: NaiveDate::from_ymd_opt(2024, 1, 1),
            delimiter: Some(';'),
            json_summary: Some(true),
        };
        let flags = ReformatConfig {
            delimiter: Some('|'),
            ..Default::default()
        };
        let merged = file.merge(flags);
        assert_eq!(merged.delimiter, Some('|'));
        assert_eq!(merged.today, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(merged.json_summary, Some(true));
    }
}
