//! LOM-CH description documents
//!
//! Thin wrapper over the raw JSON document. Only the classification (field 9)
//! and curriculum (field 10) blocks are typed; everything else is read through
//! dotted paths with language fallback.

use serde_json::Value;

use crate::domain::error::DomainResult;
use crate::domain::field_path::{get_field, set_field};
use crate::domain::lang::resolve_lang_value;
use crate::domain::taxonomy::{Classification, TaxonTreeRecord};

const CLASSIFICATION_FIELD: &str = "classification";
const CURRICULUM_FIELD: &str = "curriculum";

#[derive(Debug, Clone, PartialEq)]
pub struct Lom {
    document: Value,
}

impl Lom {
    pub fn new(document: Value) -> Self {
        Self { document }
    }

    pub fn from_json(payload: &str) -> serde_json::Result<Self> {
        serde_json::from_str(payload).map(Self::new)
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn field(&self, path: &str) -> Option<&Value> {
        get_field(&self.document, path)
    }

    /// Field value with language-tagged objects resolved against the fallbacks.
    pub fn lang_field<S: AsRef<str>>(&self, path: &str, fallback_languages: &[S]) -> Option<Value> {
        self.field(path)
            .map(|value| resolve_lang_value(value, fallback_languages))
    }

    /// Set a dotted-path field; array segments may only address an existing
    /// item or append one.
    pub fn set_field(&mut self, path: &str, value: Value) -> DomainResult<&mut Self> {
        set_field(&mut self.document, path, value)?;
        Ok(self)
    }

    /// Classification records; an absent field yields no records.
    pub fn classification(&self) -> serde_json::Result<Vec<Classification>> {
        self.typed_list(CLASSIFICATION_FIELD)
    }

    /// Curriculum (taxonomy tree) records; an absent field yields no records.
    pub fn curricula(&self) -> serde_json::Result<Vec<TaxonTreeRecord>> {
        self.typed_list(CURRICULUM_FIELD)
    }

    fn typed_list<T: serde::de::DeserializeOwned>(&self, path: &str) -> serde_json::Result<Vec<T>> {
        match self.field(path) {
            Some(value) => serde_json::from_value(value.clone()),
            None => Ok(Vec::new()),
        }
    }
}
