//! CLI parser and config loading.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;

use crate::config::{load_places, BridgeConfig, LinkedPlace};

#[derive(Parser)]
#[command(name = "tracker-bridge")]
#[command(about = "Issue tracker to collaboration platform bridge", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register webhooks for every linked place and refresh their tiles until Ctrl-C.
    Run {
        /// JSON file listing linked places.
        #[arg(short, long)]
        places: PathBuf,
    },
    /// Relay an `issues` webhook delivery (JSON file) as a platform discussion.
    Relay {
        #[arg(short, long)]
        places: PathBuf,
        #[arg(long)]
        owner: String,
        #[arg(long)]
        repo: String,
        #[arg(short, long)]
        event: PathBuf,
    },
    /// Relay an `issue_comment` webhook delivery (JSON file) as a reply on the issue's discussion.
    RelayComment {
        #[arg(short, long)]
        places: PathBuf,
        #[arg(long)]
        owner: String,
        #[arg(long)]
        repo: String,
        #[arg(short, long)]
        event: PathBuf,
    },
    /// Mirror a platform comment event (JSON file) onto its tracker issue.
    Mirror {
        #[arg(short, long)]
        places: PathBuf,
        #[arg(short, long)]
        event: PathBuf,
    },
}

/// Load BridgeConfig from env and the linked places from `places`.
pub fn load_config(places: &Path) -> Result<(BridgeConfig, Vec<LinkedPlace>)> {
    let config = BridgeConfig::load()?;
    let places = load_places(places)?;
    Ok((config, places))
}

/// Reads a JSON event payload.
pub fn read_event<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read event file {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid event file {}", path.display()))
}
