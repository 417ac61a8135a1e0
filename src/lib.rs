//! Curriculum standards of the national learning-resource catalog, folded
//! into one term tree.
//!
//! Four standards are supported: the educa vocabularies, the classification
//! system (LOM-CH v1.0), Lehrplan 21 and the Plan d'études romand. Each parses
//! its own definition payload into a [`domain::Dictionary`] and a
//! [`domain::TermArena`], and can rebuild that tree from the taxonomy paths or
//! taxonomy trees stored in LOM records.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
