//! Loading the repeater document.
//!
//! A [`RepeaterSource`] produces the raw JSON text; [`load_repeater_data`]
//! turns it into a [`RepeaterData`]. Loading happens once, before any
//! rendering, and a failure means "no data" rather than an error: it is
//! logged and the caller renders nothing.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::error::{Error, Result};
use crate::repeater::RepeaterData;

/// Where the repeater document comes from.
#[async_trait]
pub trait RepeaterSource: Send + Sync {
    /// Human-readable location of the document, for log messages.
    fn describe(&self) -> String;

    /// Fetch the raw document text.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read.
    async fn fetch(&self) -> Result<String>;
}

/// Reads the document from a file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Source reading from `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file this source reads.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl RepeaterSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<String> {
        debug!("Reading repeater data from {}", self.path.display());
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| Error::data_read(&self.path, source))
    }
}

/// Serves a document held in memory.
#[derive(Debug, Clone)]
pub struct StaticSource {
    body: String,
}

impl StaticSource {
    /// Source returning `body` verbatim.
    #[must_use]
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

#[async_trait]
impl RepeaterSource for StaticSource {
    fn describe(&self) -> String {
        "<inline>".to_string()
    }

    async fn fetch(&self) -> Result<String> {
        Ok(self.body.clone())
    }
}

impl RepeaterData {
    /// Parse a `{ "repeaters": [...] }` document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DataParse`] if the text is not valid JSON of that shape.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Fetch and parse a document from a source.
    ///
    /// # Errors
    ///
    /// Returns an error if fetching or parsing fails.
    pub async fn load(source: &dyn RepeaterSource) -> Result<Self> {
        let body = source.fetch().await?;
        Self::from_json(&body)
    }
}

/// Load the repeater document, logging and swallowing any failure.
///
/// Returns `None` when the document could not be fetched or parsed. Callers
/// treat that as "nothing to render".
pub async fn load_repeater_data(source: &dyn RepeaterSource) -> Option<RepeaterData> {
    match RepeaterData::load(source).await {
        Ok(data) => {
            info!(
                "Loaded {} repeaters from {}",
                data.len(),
                source.describe()
            );
            Some(data)
        }
        Err(e) => {
            error!("Error loading repeater data: {e}");
            None
        }
    }
}
