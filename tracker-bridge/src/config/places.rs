//! Linked places: which platform place mirrors which repository. Loaded from a JSON file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::github::RepoRef;
use crate::tiles::RECENT_ISSUES_TILE;

fn default_tile_name() -> String {
    RECENT_ISSUES_TILE.to_string()
}

/// A platform place linked to a tracker repository, with its tile instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkedPlace {
    pub place_url: String,
    pub tile_url: String,
    /// Tile definition name of the instance; only the recent-issues tile is handled.
    #[serde(default = "default_tile_name")]
    pub tile_name: String,
    pub owner: String,
    pub repo: String,
    pub access_token: String,
}

impl LinkedPlace {
    pub fn repo_ref(&self) -> RepoRef {
        RepoRef::new(&self.owner, &self.repo)
    }
}

/// Reads a JSON array of [`LinkedPlace`].
pub fn load_places(path: impl AsRef<Path>) -> Result<Vec<LinkedPlace>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read places file {}", path.display()))?;
    let places: Vec<LinkedPlace> = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid places file {}", path.display()))?;
    Ok(places)
}
