pub use error::Error;
pub use hit::Hit;
pub use reference::{MatureArm, Matures, Precursors};

mod error;
mod hit;
pub mod parallelism;
pub mod reference;
pub mod seq;
