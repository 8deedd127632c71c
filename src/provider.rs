//! Candidate sources consulted by the suggestion engine.
//!
//! Field and value providers are asynchronous because real ones fetch from a
//! remote API or from storage. [`CatalogProvider`] is an in-memory
//! implementation backed by a [`CatalogConfig`](crate::config::CatalogConfig).

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

/// A candidate field name or value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Candidate {
    pub fn new(label: impl Into<String>) -> Self {
        Candidate {
            label: label.into(),
            description: None,
        }
    }

    pub fn with_description(label: impl Into<String>, description: impl Into<String>) -> Self {
        Candidate {
            label: label.into(),
            description: Some(description.into()),
        }
    }
}

/// The clause a value is being typed for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueContext {
    pub previous_field: Option<String>,
    pub previous_operator_compare: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait FieldProvider: Send + Sync {
    async fn fields(&self) -> Result<Vec<Candidate>, ProviderError>;
}

#[async_trait]
pub trait ValueProvider: Send + Sync {
    /// Values for the field in `context`. `current` is the value typed so far,
    /// or `None` when the user has only typed the operator.
    async fn values(
        &self,
        current: Option<&str>,
        context: &ValueContext,
    ) -> Result<Vec<Candidate>, ProviderError>;
}

/// Fixed field and value lists held in memory.
#[derive(Debug, Clone, Default)]
pub struct CatalogProvider {
    fields: Vec<Candidate>,
    values: HashMap<String, Vec<Candidate>>,
}

impl CatalogProvider {
    pub fn new(fields: Vec<Candidate>, values: HashMap<String, Vec<Candidate>>) -> Self {
        CatalogProvider { fields, values }
    }
}

#[async_trait]
impl FieldProvider for CatalogProvider {
    async fn fields(&self) -> Result<Vec<Candidate>, ProviderError> {
        Ok(self.fields.clone())
    }
}

#[async_trait]
impl ValueProvider for CatalogProvider {
    async fn values(
        &self,
        current: Option<&str>,
        context: &ValueContext,
    ) -> Result<Vec<Candidate>, ProviderError> {
        let Some(known) = context
            .previous_field
            .as_deref()
            .and_then(|field| self.values.get(field))
        else {
            trace!(field = ?context.previous_field, "no catalog values for field");
            return Ok(Vec::new());
        };

        // Refining keeps values that extend what was typed, not the exact value.
        Ok(known
            .iter()
            .filter(|c| match current {
                Some(cur) => c.label.starts_with(cur) && c.label != cur,
                None => true,
            })
            .cloned()
            .collect())
    }
}
