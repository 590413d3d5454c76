//! Writes a genesis header into a node configuration file.
//!
//! The file must be a JSON object with a `Consensus` object. The header is
//! stored under `Consensus.Goat` and the whole file is rewritten with
//! two-space indentation. Config keys come out in sorted order; the header
//! keeps its own field order, `parentHash` first and `hash` last.

use serde::Serialize;
use serde_json::{Map, Value};
use shared_types::BlockHeader;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Key of the consensus section.
pub const CONSENSUS_KEY: &str = "Consensus";
/// Key the header is written under, inside the consensus section.
pub const HEADER_KEY: &str = "Goat";

#[derive(Debug, Error)]
pub enum PatchError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("config {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("config is not a JSON object")]
    NotAnObject,

    #[error("config has no `Consensus` object")]
    MissingConsensus,

    #[error("failed to encode header: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A config tree with the header spliced in.
#[derive(Serialize)]
#[serde(untagged)]
enum Node<'a> {
    Json(&'a Value),
    Header(&'a BlockHeader),
    Object(BTreeMap<&'a str, Node<'a>>),
}

fn object(map: &Map<String, Value>) -> BTreeMap<&str, Node<'_>> {
    map.iter().map(|(k, v)| (k.as_str(), Node::Json(v))).collect()
}

/// Render `config` with `Consensus.Goat` set to `header`.
pub fn render_patched(config: &Value, header: &BlockHeader) -> Result<String, PatchError> {
    let root = config.as_object().ok_or(PatchError::NotAnObject)?;
    let consensus = root
        .get(CONSENSUS_KEY)
        .and_then(Value::as_object)
        .ok_or(PatchError::MissingConsensus)?;

    let mut section = object(consensus);
    section.insert(HEADER_KEY, Node::Header(header));
    let mut top = object(root);
    top.insert(CONSENSUS_KEY, Node::Object(section));

    Ok(serde_json::to_string_pretty(&top)?)
}

/// Read, patch and rewrite the config at `path`.
///
/// Nothing is written unless the whole patch succeeds.
pub fn patch_config(path: &Path, header: &BlockHeader) -> Result<(), PatchError> {
    let raw = std::fs::read(path).map_err(|source| PatchError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Value = serde_json::from_slice(&raw).map_err(|source| PatchError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let rendered = render_patched(&config, header)?;
    std::fs::write(path, rendered).map_err(|source| PatchError::Write {
        path: path.to_path_buf(),
        source,
    })
}
