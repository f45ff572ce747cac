pub mod reader;
pub mod writer;

pub use reader::{parse_records, read_records};
pub use writer::{write_rows, write_table};
