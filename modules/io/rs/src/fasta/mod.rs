mod precursors;
mod reader;
mod record;
pub mod validate;

pub use precursors::{load_precursors, read_precursors};
pub use reader::Reader;
pub use record::Record;
