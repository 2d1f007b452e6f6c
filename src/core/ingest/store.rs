//! JSON persistence for ingestion artifacts.
//!
//! Two files are written between pipeline stages:
//!
//! - `papers.json`: the paper manifest produced by the download step
//! - `chunks.json`: a flat array of chunk records produced by the
//!   process step and consumed by the index step
//!
//! Both are pretty-printed so they can be inspected by hand.

use crate::core::error::{PaperRagError, Result};
use crate::core::types::{Chunk, Document};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Write chunks to `path`, creating parent directories as needed
pub fn save_chunks(path: &Path, chunks: &[Chunk]) -> Result<()> {
    write_json(path, chunks)?;
    tracing::info!("Saved {} chunks to {:?}", chunks.len(), path);
    Ok(())
}

/// Load chunks written by [`save_chunks`]
///
/// Records missing any field are rejected rather than defaulted.
pub fn load_chunks(path: &Path) -> Result<Vec<Chunk>> {
    let chunks: Vec<Chunk> = read_json(path)?;
    tracing::debug!("Loaded {} chunks from {:?}", chunks.len(), path);
    Ok(chunks)
}

/// Write the paper manifest
pub fn save_manifest(path: &Path, documents: &[Document]) -> Result<()> {
    write_json(path, documents)?;
    tracing::info!("Saved manifest of {} papers to {:?}", documents.len(), path);
    Ok(())
}

/// Load the paper manifest
pub fn load_manifest(path: &Path) -> Result<Vec<Document>> {
    read_json(path)
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    if !path.exists() {
        return Err(PaperRagError::ChunkFileError(format!(
            "{} not found",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|e| {
        PaperRagError::ChunkFileError(format!("{} is malformed: {e}", path.display()))
    })
}
