//! Id-keyed battle collection with idempotent upsert

use crate::{FlatBattle, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// Outcome of a bulk upsert
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulkSummary {
    pub inserted: usize,
    pub updated: usize,
}

/// Flat battles keyed by id
///
/// Upserting a battle whose id is already present replaces it, so feeding the
/// same battles twice leaves the index unchanged.
#[derive(Debug, Clone, Default)]
pub struct BattleIndex {
    documents: BTreeMap<String, FlatBattle>,
}

impl BattleIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an index from a JSON-lines file; a missing file yields an empty index
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut index = Self::new();

        if !path.exists() {
            debug!("No index at {}, starting empty", path.display());
            return Ok(index);
        }

        let reader = BufReader::new(File::open(path)?);
        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let battle: FlatBattle = serde_json::from_str(&line)?;
            index.upsert(battle);
        }

        info!("Loaded {} battles from {}", index.len(), path.display());
        Ok(index)
    }

    /// Write the index as JSON lines, ordered by id
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut writer = BufWriter::new(File::create(path)?);
        self.write_jsonl(&mut writer)?;
        writer.flush()?;

        info!("Saved {} battles to {}", self.len(), path.display());
        Ok(())
    }

    /// Serialize every document as one JSON object per line
    pub fn write_jsonl<W: Write>(&self, writer: &mut W) -> Result<()> {
        for battle in self.documents.values() {
            serde_json::to_writer(&mut *writer, battle)?;
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Insert or replace a battle; returns true when an existing one was replaced
    pub fn upsert(&mut self, battle: FlatBattle) -> bool {
        self.documents.insert(battle.id.clone(), battle).is_some()
    }

    /// Upsert many battles at once
    pub fn bulk_upsert<I>(&mut self, battles: I) -> BulkSummary
    where
        I: IntoIterator<Item = FlatBattle>,
    {
        let mut summary = BulkSummary::default();
        for battle in battles {
            if self.upsert(battle) {
                summary.updated += 1;
            } else {
                summary.inserted += 1;
            }
        }
        debug!(
            "Bulk upsert: {} inserted, {} updated",
            summary.inserted, summary.updated
        );
        summary
    }

    /// Look up a battle by id
    pub fn get(&self, id: &str) -> Option<&FlatBattle> {
        self.documents.get(id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Documents in id order
    pub fn documents(&self) -> impl Iterator<Item = &FlatBattle> {
        self.documents.values()
    }
}
