//! # splatlog-statink
//!
//! Flat document projection for battles already structured by stat.ink.
//!
//! ## Features
//!
//! - Field-by-field projection of a stat.ink battle into a [`FlatBattle`]
//! - Consolidated player list (our team first, then theirs)
//! - X Match lobby filtering
//! - Id-keyed [`BattleIndex`] with idempotent upsert and JSON-lines persistence
//!
//! ## Example
//!
//! ```no_run
//! use splatlog_statink::{flatten_battles, retain_xmatch, BattleIndex};
//!
//! fn main() -> splatlog_statink::Result<()> {
//!     let raw = std::fs::read_to_string("battles.json")?;
//!     let battles: Vec<serde_json::Value> = serde_json::from_str(&raw)?;
//!
//!     let flat = flatten_battles(&retain_xmatch(battles))?;
//!
//!     let mut index = BattleIndex::load("battles.jsonl")?;
//!     let summary = index.bulk_upsert(flat);
//!     index.save("battles.jsonl")?;
//!
//!     println!("{} new, {} updated", summary.inserted, summary.updated);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod index;
pub mod transform;

// Re-exports
pub use error::{Error, Result};
pub use index::{BattleIndex, BulkSummary};
pub use transform::{flatten_battle, flatten_battles, retain_xmatch, FlatBattle, PlayerStats, Team};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
