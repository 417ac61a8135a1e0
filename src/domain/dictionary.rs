//! Flat identifier → {name, type, attributes} lookup for one curriculum

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::lang::LangString;

/// One dictionary record, keyed by the standard's native identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DictionaryEntry {
    pub id: String,
    pub name: LangString,
    #[serde(rename = "type")]
    pub term_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub school_years: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cycles: Vec<u8>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cantons: Vec<String>,
}

impl DictionaryEntry {
    pub fn new(id: impl Into<String>, term_type: impl Into<String>, name: LangString) -> Self {
        Self {
            id: id.into(),
            name,
            term_type: term_type.into(),
            code: None,
            version: None,
            url: None,
            school_years: Vec::new(),
            cycles: Vec::new(),
            cantons: Vec::new(),
        }
    }

    pub fn with_code(mut self, code: Option<String>) -> Self {
        self.code = code;
        self
    }

    pub fn with_version(mut self, version: Option<String>) -> Self {
        self.version = version;
        self
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }

    pub fn with_school_years(mut self, school_years: Vec<String>) -> Self {
        self.school_years = school_years;
        self
    }

    pub fn with_cycles(mut self, cycles: Vec<u8>) -> Self {
        self.cycles = cycles;
        self
    }

    pub fn with_cantons(mut self, cantons: Vec<String>) -> Self {
        self.cantons = cantons;
        self
    }
}

/// Source of truth for term types and names, built once per definition load.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    entries: BTreeMap<String, DictionaryEntry>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, replacing any previous entry with the same id.
    pub fn insert(&mut self, entry: DictionaryEntry) {
        self.entries.insert(entry.id.clone(), entry);
    }

    /// Insert an entry unless its id is already known. Returns true if inserted.
    pub fn insert_if_absent(&mut self, entry: DictionaryEntry) -> bool {
        match self.entries.entry(entry.id.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(entry);
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    pub fn get(&self, id: &str) -> Option<&DictionaryEntry> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn term_type(&self, id: &str) -> Option<&str> {
        self.get(id).map(|e| e.term_type.as_str())
    }

    pub fn term_name(&self, id: &str) -> Option<&LangString> {
        self.get(id).map(|e| &e.name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by identifier.
    pub fn iter(&self) -> impl Iterator<Item = &DictionaryEntry> {
        self.entries.values()
    }
}
