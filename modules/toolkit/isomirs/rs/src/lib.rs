pub use aggregate::{ReadAggregate, Reads};
pub use annotate::annotate;
pub use builder::EngineBuilder;
pub use classify::classify;
pub use config::Config;
pub use engine::Engine;
pub use isomir::{Isomir, Substitution};
pub use realign::realign;
pub use resolve::resolve;
pub use result::{Annotated, Stats};
pub use tabulate::{read_count, tabulate, Table};
pub use variation::Variation;

mod aggregate;
mod annotate;
mod builder;
mod classify;
mod config;
mod engine;
mod isomir;
mod realign;
mod resolve;
mod result;
pub mod scoring;
mod tabulate;
mod variation;
