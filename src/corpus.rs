use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One corpus entry: a frozen page snapshot, the product title it must
/// yield, and the URL it was originally fetched from. The same snapshot file
/// may appear under several category URLs.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Fixture {
    pub file: String,
    #[serde(rename = "title")]
    pub expected_title: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FixtureGroup {
    pub name: String,
    pub fixtures: Vec<Fixture>,
}

/// Load the corpus manifest: a JSON array of fixture triples.
pub fn load_manifest(path: &Path) -> Result<Vec<Fixture>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read corpus manifest {}", path.display()))?;
    let fixtures: Vec<Fixture> =
        serde_json::from_str(&raw).context("Failed to parse corpus manifest")?;
    Ok(fixtures)
}

/// Split the corpus into bounded groups so a large run never holds more
/// than one batch of results in flight on a constrained test runner.
pub fn partition(fixtures: Vec<Fixture>, batch_size: usize) -> Result<Vec<FixtureGroup>> {
    if batch_size == 0 {
        return Err(anyhow::anyhow!("batch size must be at least 1"));
    }

    let groups = fixtures
        .chunks(batch_size)
        .enumerate()
        .map(|(index, chunk)| FixtureGroup {
            name: format!("group-{}", index + 1),
            fixtures: chunk.to_vec(),
        })
        .collect();

    Ok(groups)
}
