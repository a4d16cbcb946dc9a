//! libspell-core
//!
//! Approximate string lookup and compound spelling correction over a static
//! frequency dictionary, built on a symmetric-delete index: instead of
//! generating every insert/replace/transpose variant at query time, the
//! index precomputes character deletions of every dictionary term so that a
//! query only needs deletions of its own prefix to meet all candidates
//! within the edit-distance budget.
//!
//! Public API:
//! - `SymSpell` - the index: ingestion, `lookup`, `lookup_compound`,
//!   `word_segmentation`, snapshot save/load
//! - `Suggestion`, `Verbosity` - lookup results and result-breadth policy
//! - `EditDistance`, `DistanceAlgorithm` - the underlying comparers
//! - `Composition` - word segmentation result
//! - `Config` - construction parameters with TOML (de)serialization
//!
//! Queries are read-only: a frozen index can serve `lookup`,
//! `lookup_compound` and `word_segmentation` from several threads, since all
//! per-call scratch state (comparer cost rows, candidate queues, the
//! segmentation ring buffer) is call-local. Mutations (entry creation and
//! deletion, dictionary loads, snapshot loads) must be serialized by the
//! caller.

use serde::{Deserialize, Serialize};

pub mod edit_distance;
pub use edit_distance::{DistanceAlgorithm, DistanceComparer, EditDistance};

pub mod error;
pub use error::{Result, SpellError};

pub mod helpers;

pub mod suggestion;
pub use suggestion::{Suggestion, Verbosity};

pub mod symspell;
pub use symspell::{LookupOptions, SymSpell, CORPUS_WORD_COUNT};

pub mod compound;
pub use compound::CompoundOptions;

pub mod segmentation;
pub use segmentation::{Composition, SegmentationOptions};

pub mod snapshot;
pub use snapshot::SNAPSHOT_VERSION;

/// Construction parameters for [`SymSpell`].
///
/// `prefix_length` bounds how many leading characters of a term contribute
/// to its delete neighborhood; larger values mean better pruning and a
/// bigger index. `count_threshold` is the minimum frequency for a term to
/// count as correctly spelled; rarer observations are staged until they
/// accumulate enough weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Maximum edit distance lookups are prepared for.
    pub max_dictionary_edit_distance: usize,
    /// Length of term prefixes used to build the delete index.
    pub prefix_length: usize,
    /// Minimum frequency for a term to be considered correctly spelled.
    pub count_threshold: u64,
    /// Edit-distance algorithm used by all queries.
    pub distance_algorithm: DistanceAlgorithm,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_dictionary_edit_distance: 2,
            prefix_length: 7,
            count_threshold: 1,
            distance_algorithm: DistanceAlgorithm::DamerauOsa,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Check the parameter constraints the index relies on.
    pub fn validate(&self) -> Result<()> {
        if self.prefix_length < 1 || self.prefix_length <= self.max_dictionary_edit_distance {
            return Err(SpellError::Configuration(format!(
                "prefix_length ({}) must be at least 1 and greater than \
                 max_dictionary_edit_distance ({})",
                self.prefix_length, self.max_dictionary_edit_distance
            )));
        }
        Ok(())
    }
}
