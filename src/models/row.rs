use super::metrics::{MetricSums, METRIC_KEYS};

/// Output column order. The written header is exactly this list.
pub const OUTPUT_COLUMNS: [&str; 16] = [
    "geo",
    "channel",
    "os",
    "date",
    METRIC_KEYS[0],
    METRIC_KEYS[1],
    METRIC_KEYS[2],
    METRIC_KEYS[3],
    METRIC_KEYS[4],
    METRIC_KEYS[5],
    METRIC_KEYS[6],
    METRIC_KEYS[7],
    METRIC_KEYS[8],
    METRIC_KEYS[9],
    METRIC_KEYS[10],
    METRIC_KEYS[11],
];

/// Address of one accumulator cell. Ordering is geo, channel, os, date.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellKey {
    pub geo: String,
    pub channel: String,
    pub os: String,
    pub date: String,
}

impl CellKey {
    pub fn new(
        geo: impl Into<String>,
        channel: impl Into<String>,
        os: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            geo: geo.into(),
            channel: channel.into(),
            os: os.into(),
            date: date.into(),
        }
    }
}

/// A flattened cell: facet values, date, then every metric sum.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow {
    pub key: CellKey,
    pub sums: MetricSums,
}

impl OutputRow {
    pub fn new(key: CellKey, sums: MetricSums) -> Self {
        Self { key, sums }
    }

    /// Field values in [`OUTPUT_COLUMNS`] order.
    pub fn fields(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(OUTPUT_COLUMNS.len());
        out.push(self.key.geo.clone());
        out.push(self.key.channel.clone());
        out.push(self.key.os.clone());
        out.push(self.key.date.clone());
        out.extend(self.sums.values().iter().map(|v| v.to_string()));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::metrics::MetricValue;

    #[test]
    fn test_output_columns_start_with_facets() {
        assert_eq!(&OUTPUT_COLUMNS[..4], &["geo", "channel", "os", "date"]);
        assert_eq!(&OUTPUT_COLUMNS[4..], &METRIC_KEYS[..]);
    }

    #[test]
    fn test_fields_follow_column_order() {
        let mut values = [MetricValue::Int(0); 12];
        values[0] = MetricValue::Int(30);
        values[1] = MetricValue::Float(2.5);
        let row = OutputRow::new(
            CellKey::new("all", "release", "WINNT", "2024-03-14"),
            MetricSums::from_values(values),
        );
        let fields = row.fields();
        assert_eq!(fields.len(), OUTPUT_COLUMNS.len());
        assert_eq!(&fields[..6], &["all", "release", "WINNT", "2024-03-14", "30", "2.5"]);
    }

    #[test]
    fn test_cell_key_ordering() {
        let a = CellKey::new("CA", "beta", "Linux", "2024-01-02");
        let b = CellKey::new("CA", "beta", "Linux", "2024-01-03");
        let c = CellKey::new("US", "aurora", "Darwin", "2023-12-31");
        assert!(a < b);
        assert!(b < c);
    }
}
