//! Domain layer: curriculum terms, trees and dictionaries
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod ascii;
pub mod dictionary;
pub mod error;
pub mod field_path;
pub mod lang;
pub mod lom;
pub mod taxonomy;
pub mod term;

pub use arena::{TermArena, TermNode};
pub use ascii::{ascii_dump, TermTreeConvert};
pub use dictionary::{Dictionary, DictionaryEntry};
pub use error::{DomainError, DomainResult};
pub use lang::{resolve_lang_value, LangString};
pub use lom::Lom;
pub use taxonomy::{
    Classification, Purpose, Taxon, TaxonNode, TaxonPath, TaxonTreeRecord, DEFAULT_PURPOSE,
};
pub use term::*;
