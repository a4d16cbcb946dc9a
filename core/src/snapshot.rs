//! Snapshot persistence for the index.
//!
//! Serializes the complete index state (words, staged below-threshold words,
//! delete buckets, bigrams, longest-word length and the construction
//! parameters) with bincode, so a dictionary does not have to be re-ingested
//! on every start. Loading validates a data version; stored construction
//! parameters win over the current instance's, with a logged warning.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::Result;
use crate::symspell::SymSpell;

/// Bumped whenever the serialized layout changes incompatibly.
pub const SNAPSHOT_VERSION: u32 = 3;

#[derive(Serialize, Deserialize)]
struct SnapshotData {
    data_version: u32,
    count_threshold: u64,
    max_dictionary_edit_distance: usize,
    prefix_length: usize,
    below_threshold_words: AHashMap<String, u64>,
    bigrams: AHashMap<String, u64>,
    deletes: AHashMap<String, Vec<String>>,
    words: AHashMap<String, u64>,
    max_length: usize,
}

impl SymSpell {
    /// Write the index state to `path`.
    pub fn save_snapshot<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.write_snapshot(BufWriter::new(file))
    }

    /// Write the index state to an arbitrary sink (callers may wrap a
    /// compressing encoder).
    pub fn write_snapshot<W: Write>(&self, writer: W) -> Result<()> {
        let data = SnapshotData {
            data_version: SNAPSHOT_VERSION,
            count_threshold: self.count_threshold,
            max_dictionary_edit_distance: self.max_dictionary_edit_distance,
            prefix_length: self.prefix_length,
            below_threshold_words: self.below_threshold_words.clone(),
            bigrams: self.bigrams.clone(),
            deletes: self.deletes.clone(),
            words: self.words.clone(),
            max_length: self.max_length,
        };
        bincode::serialize_into(writer, &data)?;
        Ok(())
    }

    /// Replace the index state with a snapshot read from `path`. Returns
    /// `false` (leaving the instance untouched) on a data version mismatch.
    pub fn load_snapshot<P: AsRef<Path>>(&mut self, path: P) -> Result<bool> {
        let file = File::open(path)?;
        self.read_snapshot(BufReader::new(file))
    }

    /// Stream flavor of [`SymSpell::load_snapshot`].
    pub fn read_snapshot<R: Read>(&mut self, reader: R) -> Result<bool> {
        let data: SnapshotData = bincode::deserialize_from(reader)?;
        if data.data_version != SNAPSHOT_VERSION {
            warn!(
                found = data.data_version,
                expected = SNAPSHOT_VERSION,
                "snapshot data version mismatch, not loading"
            );
            return Ok(false);
        }
        if data.count_threshold != self.count_threshold
            || data.max_dictionary_edit_distance != self.max_dictionary_edit_distance
            || data.prefix_length != self.prefix_length
        {
            warn!(
                count_threshold = data.count_threshold,
                max_dictionary_edit_distance = data.max_dictionary_edit_distance,
                prefix_length = data.prefix_length,
                "snapshot construction parameters differ, overwriting instance parameters"
            );
        }
        self.count_threshold = data.count_threshold;
        self.max_dictionary_edit_distance = data.max_dictionary_edit_distance;
        self.prefix_length = data.prefix_length;
        self.below_threshold_words = data.below_threshold_words;
        self.bigrams = data.bigrams;
        self.deletes = data.deletes;
        self.words = data.words;
        self.max_length = data.max_length;
        self.bigram_count_min = self.bigrams.values().copied().min().unwrap_or(u64::MAX);
        debug!(words = self.words.len(), "snapshot loaded");
        Ok(true)
    }
}
