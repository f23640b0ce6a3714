pub mod compression;
pub mod fasta;
pub mod hits;
pub mod isomirs;
pub mod mature;
mod traits;

pub use traits::{ReadRecord, WriteRecord};
