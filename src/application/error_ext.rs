//! Error conversion helpers for fetch results
//!
//! Provides an extension trait for cleaner error handling with locator context.

use std::io;

use crate::application::{ApplicationError, ApplicationResult};

/// Extension trait for converting `io::Result` to `ApplicationResult` with context.
pub trait FetchResultExt<T> {
    /// Add the locator that was being fetched to an I/O error.
    ///
    /// # Example
    /// ```ignore
    /// let body = fetcher.fetch(&href).with_locator_context(&href)?;
    /// ```
    fn with_locator_context(self, locator: &str) -> ApplicationResult<T>;
}

impl<T> FetchResultExt<T> for io::Result<T> {
    fn with_locator_context(self, locator: &str) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::Fetch {
            locator: locator.to_string(),
            source: e,
        })
    }
}
