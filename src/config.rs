//! Catalog configuration file.
//!
//! ```json
//! {
//!   "implicit_query": "id!=000;",
//!   "fields": [{ "label": "agent.id", "description": "Agent ID" }],
//!   "values": { "agent.id": [{ "label": "001" }] }
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::language::LanguageParameters;
use crate::provider::{Candidate, CatalogProvider};
use crate::validator::ValidationOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read catalog '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid catalog: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implicit_query: Option<String>,
    #[serde(default)]
    pub fields: Vec<Candidate>,
    #[serde(default)]
    pub values: HashMap<String, Vec<Candidate>>,
}

impl CatalogConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        debug!(
            path = %path.display(),
            fields = config.fields.len(),
            "loaded catalog"
        );
        Ok(config)
    }

    pub fn validation_options(&self) -> ValidationOptions {
        ValidationOptions::new(self.fields.iter().map(|c| c.label.clone()))
    }

    pub fn provider(&self) -> CatalogProvider {
        CatalogProvider::new(self.fields.clone(), self.values.clone())
    }

    /// Language parameters with this catalog as both providers.
    pub fn parameters(&self) -> LanguageParameters {
        let params = LanguageParameters::from_catalog(self.provider());
        match &self.implicit_query {
            Some(query) => params.with_implicit_query(query.as_str()),
            None => params,
        }
    }
}
