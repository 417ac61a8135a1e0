//! LOM classification records: flat taxonomy paths and nested taxonomy trees

use serde::{Deserialize, Serialize};

use crate::domain::lang::LangString;

pub const DEFAULT_PURPOSE: &str = "discipline";

/// LOM vocabulary value, e.g. `{"source": "LOMv1.0", "value": "discipline"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purpose {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub value: String,
}

impl Purpose {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            source: None,
            value: value.into(),
        }
    }
}

/// One classification record (LOM-CH field 9).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    #[serde(default)]
    pub purpose: Purpose,
    #[serde(default)]
    pub taxon_path: Vec<TaxonPath>,
}

/// A root-to-leaf list of taxa from one source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonPath {
    pub source: LangString,
    #[serde(default)]
    pub taxon: Vec<Taxon>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Taxon {
    pub id: String,
    /// Display name as stored in the record; may be stale and is never trusted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<LangString>,
}

/// One curriculum record (LOM-CH field 10).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonTreeRecord {
    pub source: LangString,
    #[serde(default)]
    pub taxon_tree: Vec<TaxonNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxonNode {
    pub id: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub term_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<LangString>,
    #[serde(default)]
    pub child_taxons: Vec<TaxonNode>,
}

impl Classification {
    /// Convenience constructor: one path per slice of ids, all from `source`.
    pub fn from_ids(purpose: &str, source: &str, paths: &[&[&str]]) -> Self {
        Self {
            purpose: Purpose::new(purpose),
            taxon_path: paths
                .iter()
                .map(|ids| TaxonPath {
                    source: LangString::plain(source),
                    taxon: ids
                        .iter()
                        .map(|id| Taxon {
                            id: (*id).to_string(),
                            entry: None,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

impl TaxonNode {
    pub fn leaf(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            term_type: None,
            entry: None,
            child_taxons: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<TaxonNode>) -> Self {
        self.child_taxons = children;
        self
    }
}
