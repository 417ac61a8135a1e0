//! Infrastructure layer: I/O implementations
//!
//! This layer implements the I/O boundary the curriculum parsers depend on.

pub mod traits;

pub use traits::{DefinitionFetcher, FsFetcher, InMemoryFetcher};
