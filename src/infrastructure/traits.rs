//! I/O boundary traits for testability
//!
//! Curriculum parsers never touch the network or the filesystem directly;
//! every raw payload comes through a [`DefinitionFetcher`].

use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

/// One-shot, blocking fetch of a raw curriculum definition payload.
///
/// Implementations must fail rather than hand back an empty or partial payload.
pub trait DefinitionFetcher: Send + Sync {
    /// Fetch the payload addressed by `locator` (relative path or API link).
    fn fetch(&self, locator: &str) -> io::Result<String>;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// Reads payloads from a directory mirror of the remote API.
///
/// `objectifs/12` maps to `<base>/objectifs/12.json`; query strings are folded
/// into the file name (`objectifs?page=2` → `objectifs_page_2.json`).
#[derive(Debug, Clone)]
pub struct FsFetcher {
    base_dir: PathBuf,
}

impl FsFetcher {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// File path a locator resolves to.
    ///
    /// A leading `/` is read as API-root relative. Locators that would leave
    /// `base_dir` (`..`, drive prefixes, nested roots) fail with
    /// [`io::ErrorKind::InvalidInput`].
    pub fn resolve(&self, locator: &str) -> io::Result<PathBuf> {
        let flattened: String = locator
            .trim_start_matches('/')
            .chars()
            .map(|c| match c {
                '?' | '=' | '&' => '_',
                other => other,
            })
            .collect();
        let relative = Path::new(&flattened);
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
        {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("locator escapes definition directory: {locator}"),
            ));
        }
        let mut path = self.base_dir.join(relative);
        if path.extension().is_none() {
            path.set_extension("json");
        }
        Ok(path)
    }
}

impl DefinitionFetcher for FsFetcher {
    fn fetch(&self, locator: &str) -> io::Result<String> {
        let path = self.resolve(locator)?;
        debug!("fetch: {} -> {}", locator, path.display());
        let content = std::fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("empty payload: {}", path.display()),
            ));
        }
        Ok(content)
    }
}

/// Serves payloads from memory, keyed by exact locator.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFetcher {
    documents: HashMap<String, String>,
}

impl InMemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, locator: impl Into<String>, payload: impl Into<String>) -> Self {
        self.insert(locator, payload);
        self
    }

    pub fn insert(&mut self, locator: impl Into<String>, payload: impl Into<String>) {
        self.documents.insert(locator.into(), payload.into());
    }
}

impl DefinitionFetcher for InMemoryFetcher {
    fn fetch(&self, locator: &str) -> io::Result<String> {
        self.documents.get(locator).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no payload for {locator}"))
        })
    }
}
