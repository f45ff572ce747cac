/// Synthetic roll-up category summing every value of a facet.
pub const ALL: &str = "all";

/// Bucket for geography and channel values outside their vocabularies.
pub const OTHER: &str = "Other";

/// Countries reported individually. Everything else folds into [`OTHER`].
pub const GEOGRAPHIES: [&str; 16] = [
    "US", "CA", "BR", "MX", "FR", "ES", "IT", "PL", "TR", "RU", "DE", "IN", "ID", "CN", "JP", "GB",
];

/// Release channels reported individually. Everything else folds into [`OTHER`].
pub const CHANNELS: [&str; 4] = ["release", "beta", "aurora", "nightly"];

/// Display names for raw OS identifiers.
///
/// Not applied during aggregation: OS values pass through verbatim.
pub const OS_DISPLAY_NAMES: [(&str, &str); 4] = [
    ("WINNT", "Windows"),
    ("Darwin", "Mac"),
    ("Linux", "Linux"),
    ("Other", "Other"),
];

/// The three categorical dimensions of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Geography,
    Channel,
    Os,
}

impl Facet {
    pub fn column(&self) -> &'static str {
        match self {
            Facet::Geography => "geo",
            Facet::Channel => "channel",
            Facet::Os => "os",
        }
    }

    /// Map a raw facet value onto the value used for accumulation.
    pub fn normalize<'a>(&self, value: &'a str) -> &'a str {
        match self {
            Facet::Geography => normalize_geography(value),
            Facet::Channel => normalize_channel(value),
            Facet::Os => value,
        }
    }
}

pub fn normalize_geography(geo: &str) -> &str {
    if GEOGRAPHIES.contains(&geo) {
        geo
    } else {
        OTHER
    }
}

pub fn normalize_channel(channel: &str) -> &str {
    if CHANNELS.contains(&channel) {
        channel
    } else {
        OTHER
    }
}

pub fn os_display_name(os: &str) -> Option<&'static str> {
    OS_DISPLAY_NAMES
        .iter()
        .find(|(raw, _)| *raw == os)
        .map(|(_, display)| *display)
}

/// True when the value is the synthetic roll-up category, i.e. the row came
/// out of a previous reformat pass.
pub fn is_rollup(value: &str) -> bool {
    value == ALL
}
