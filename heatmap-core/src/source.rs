use anyhow::Context;
use async_trait::async_trait;
use std::fmt::Debug;
use tracing::info;

use crate::parse::{InvalidRowPolicy, ParsedDataset, parse_records};

pub mod file;

pub use file::FileSource;

/// Where the single dataset comes from.
#[async_trait]
pub trait DatasetSource: Send + Sync + Debug {
    /// Human-readable origin, used in errors and logs.
    fn describe(&self) -> String;

    async fn read(&self) -> anyhow::Result<String>;
}

/// Dataset held in memory.
#[derive(Debug, Clone)]
pub struct InlineSource {
    name: String,
    contents: String,
}

impl InlineSource {
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

#[async_trait]
impl DatasetSource for InlineSource {
    fn describe(&self) -> String {
        self.name.clone()
    }

    async fn read(&self) -> anyhow::Result<String> {
        Ok(self.contents.clone())
    }
}

/// Read the source once and parse it under `policy`.
pub async fn load_dataset(
    source: &dyn DatasetSource,
    policy: InvalidRowPolicy,
) -> anyhow::Result<ParsedDataset> {
    let text = source
        .read()
        .await
        .with_context(|| format!("Failed to load dataset from {}", source.describe()))?;

    let parsed = parse_records(&text, policy)
        .with_context(|| format!("Failed to parse dataset from {}", source.describe()))?;

    info!(
        source = %source.describe(),
        records = parsed.records.len(),
        rejected = parsed.rejected.len(),
        "loaded dataset"
    );

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn inline_source_loads_and_parses() {
        let source = InlineSource::new(
            "inline",
            "date,max_temperature,min_temperature\n2020-01-01,5,1\n2020-01-02,x,1\n",
        );

        let parsed = load_dataset(&source, InvalidRowPolicy::Skip).await.unwrap();

        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.rejected.len(), 1);
    }

    #[tokio::test]
    async fn parse_failure_names_the_source() {
        let source = InlineSource::new("inline", "date,max_temperature,min_temperature\nbad,1,1\n");

        let err = load_dataset(&source, InvalidRowPolicy::Reject).await.unwrap_err();

        let msg = format!("{err:#}");
        assert!(msg.contains("Failed to parse dataset from inline"));
        assert!(msg.contains("line 2"));
    }
}
