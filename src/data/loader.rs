//! CSV Data Loader Module
//! Reads the raw player table with Polars. Caching is a decorator around any source.

use crate::config::DataSourceConfig;
use polars::prelude::*;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Data file not found: {0}")]
    NotFound(String),
}

/// Anything that can hand out the raw (uncleaned) player table.
pub trait TableSource {
    fn load(&self) -> Result<DataFrame, LoaderError>;
}

/// Reads the delimited file named by a [`DataSourceConfig`] on every call.
pub struct CsvTableSource {
    config: DataSourceConfig,
}

impl CsvTableSource {
    pub fn new(config: DataSourceConfig) -> Self {
        Self { config }
    }
}

impl TableSource for CsvTableSource {
    /// Every column is read as text; numeric coercion is the cleaner's job
    /// so that bad cells become nulls instead of failing the read.
    fn load(&self) -> Result<DataFrame, LoaderError> {
        let path = &self.config.path;
        if !path.exists() {
            return Err(LoaderError::NotFound(path.display().to_string()));
        }

        log::info!("Reading player table from {}", path.display());

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_separator(self.config.separator)
            .with_infer_schema_length(Some(0))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        log::info!("Loaded {} rows, {} columns", df.height(), df.width());
        Ok(df)
    }
}

/// Memoizes the first successful load of the wrapped source.
///
/// Callers each receive their own `DataFrame` handle; the cleaner only ever
/// builds new columns, so nothing done to one copy shows up in another.
pub struct CachedTableSource<S> {
    inner: S,
    cache: Mutex<Option<DataFrame>>,
}

impl<S: TableSource> CachedTableSource<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            cache: Mutex::new(None),
        }
    }

    /// Drop the memoized table so the next load reads the source again.
    pub fn invalidate(&self) {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        *cache = None;
    }

    pub fn is_cached(&self) -> bool {
        self.cache
            .lock()
            .map(|cache| cache.is_some())
            .unwrap_or(false)
    }
}

impl<S: TableSource> TableSource for CachedTableSource<S> {
    fn load(&self) -> Result<DataFrame, LoaderError> {
        let mut cache = self.cache.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(df) = cache.as_ref() {
            log::debug!("Player table served from cache");
            return Ok(df.clone());
        }

        let df = self.inner.load()?;
        *cache = Some(df.clone());
        Ok(df)
    }
}
