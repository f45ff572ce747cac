use std::fmt;
use std::ops::AddAssign;

use crate::errors::RollupError;

/// Summed data columns, in output order.
pub const METRIC_KEYS: [&str; 12] = [
    "actives",
    "hours",
    "inactives",
    "new_records",
    "five_of_seven",
    "total_records",
    "crashes",
    "default",
    "google",
    "bing",
    "yahoo",
    "other",
];

pub const METRIC_COUNT: usize = METRIC_KEYS.len();

/// A numeric cell value. Integers stay integers until a float is mixed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Int(i128),
    Float(f64),
}

impl MetricValue {
    /// Parse as an integer when the text is lexically one, otherwise as a float.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if let Ok(i) = trimmed.parse::<i128>() {
            return Some(MetricValue::Int(i));
        }
        trimmed.parse::<f64>().ok().map(MetricValue::Float)
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            MetricValue::Int(i) => i as f64,
            MetricValue::Float(f) => f,
        }
    }

    pub fn is_float(&self) -> bool {
        matches!(self, MetricValue::Float(_))
    }
}

impl Default for MetricValue {
    fn default() -> Self {
        MetricValue::Int(0)
    }
}

impl AddAssign for MetricValue {
    fn add_assign(&mut self, rhs: Self) {
        *self = match (*self, rhs) {
            (MetricValue::Int(a), MetricValue::Int(b)) => match a.checked_add(b) {
                Some(sum) => MetricValue::Int(sum),
                None => MetricValue::Float(a as f64 + b as f64),
            },
            (a, b) => MetricValue::Float(a.as_f64() + b.as_f64()),
        };
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MetricValue::Int(i) => write!(f, "{}", i),
            MetricValue::Float(v) => f.write_str(&float_repr(v)),
        }
    }
}

/// Shortest round-trip rendering: scientific notation below 1e-4 and from
/// 1e16 up (`1e+16`, `1.5e-05`), otherwise positional with at least one
/// fractional digit (`30.0`).
fn float_repr(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let sci = format!("{:e}", v);
    let exponent = sci
        .split_once('e')
        .and_then(|(mantissa, exp)| exp.parse::<i32>().ok().map(|exp| (mantissa, exp)));
    match exponent {
        Some((mantissa, exp)) if v != 0.0 && !(-4..16).contains(&exp) => {
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exp.abs())
        }
        _ => {
            let plain = v.to_string();
            if plain.contains('.') {
                plain
            } else {
                format!("{}.0", plain)
            }
        }
    }
}

/// One value per entry of [`METRIC_KEYS`], same order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricSums {
    values: [MetricValue; METRIC_COUNT],
}

impl MetricSums {
    pub fn from_values(values: [MetricValue; METRIC_COUNT]) -> Self {
        Self { values }
    }

    /// Parse all metric columns of one record via `lookup`.
    pub fn parse_with<'a, F>(mut lookup: F) -> Result<Self, RollupError>
    where
        F: FnMut(&'static str) -> Result<&'a str, RollupError>,
    {
        let mut values = [MetricValue::default(); METRIC_COUNT];
        for (slot, key) in values.iter_mut().zip(METRIC_KEYS) {
            let raw = lookup(key)?;
            *slot = MetricValue::parse(raw).ok_or_else(|| {
                RollupError::InvalidMetric(format!("{}={:?} is not a number", key, raw))
            })?;
        }
        Ok(Self { values })
    }

    pub fn add(&mut self, other: &MetricSums) {
        for (acc, v) in self.values.iter_mut().zip(other.values.iter()) {
            *acc += *v;
        }
    }

    pub fn get(&self, key: &str) -> Option<MetricValue> {
        METRIC_KEYS
            .iter()
            .position(|k| *k == key)
            .map(|idx| self.values[idx])
    }

    pub fn values(&self) -> &[MetricValue; METRIC_COUNT] {
        &self.values
    }
}
