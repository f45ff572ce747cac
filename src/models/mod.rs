pub mod facet;
pub mod metrics;
pub mod record;
pub mod row;

pub use facet::*;
pub use metrics::*;
pub use record::*;
pub use row::*;
