//! MinionConfig struct definition.

use serde_yaml::{Mapping, Value};

/// Key salt reads the master list from.
pub const DEFAULT_MASTER_KEY: &str = "master";

/// Capitalized spelling found in hand-written configs; kept when present.
pub const LEGACY_MASTER_KEY: &str = "Master";

/// In-memory view of a minion config file.
///
/// `masters` is in priority order: the first entry is the primary master.
/// The rest of the file lives in `document`, where the master key keeps its
/// slot (holding `Null` until the record is encoded) so that re-encoding
/// writes it back at the same position.
#[derive(Debug, Clone, PartialEq)]
pub struct MinionConfig {
    /// Master addresses, primary first.
    pub masters: Vec<String>,

    /// Spelling of the master key as found in the file.
    pub(super) master_key: String,

    /// Every top-level entry of the file.
    pub(super) document: Mapping,
}

impl Default for MinionConfig {
    fn default() -> Self {
        let mut document = Mapping::new();
        document.insert(Value::from(DEFAULT_MASTER_KEY), Value::Null);
        Self {
            masters: Vec::new(),
            master_key: DEFAULT_MASTER_KEY.to_string(),
            document,
        }
    }
}

impl MinionConfig {
    /// The key the master list is stored under.
    pub fn master_key(&self) -> &str {
        &self.master_key
    }

    /// Value of a top-level key other than the master list.
    pub fn get(&self, key: &str) -> Option<&Value> {
        if key == self.master_key {
            return None;
        }
        self.document.get(key)
    }

    /// Number of top-level keys other than the master list.
    pub fn other_keys_len(&self) -> usize {
        self.document.len().saturating_sub(1)
    }
}
