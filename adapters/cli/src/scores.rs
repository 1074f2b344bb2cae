use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context as _, Result};
use serde::{Deserialize, Serialize};

/// Best results per level name. Reports can only improve an entry: a score
/// is kept when it beats the stored one, and the completion flag never
/// clears once set.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct ScoreTable {
    levels: BTreeMap<String, ScoreEntry>,
}

/// One level's best result so far.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct ScoreEntry {
    /// Whether the level has ever been completed.
    pub done: bool,
    /// The highest score ever reported.
    pub score: i32,
}

impl ScoreTable {
    /// Reads the table from `path`. A missing file is an empty table.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading score table {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing score table {}", path.display()))
    }

    /// Folds one run's result into the table.
    pub(crate) fn report(&mut self, level: &str, score: i32, done: bool) {
        let entry = self.levels.entry(level.to_owned()).or_default();
        if score > entry.score {
            entry.score = score;
        }
        if done {
            entry.done = true;
        }
    }

    /// The stored entry for a level, if any run has been reported.
    pub(crate) fn entry(&self, level: &str) -> Option<&ScoreEntry> {
        self.levels.get(level)
    }

    /// Writes the table to `path` as pretty-printed JSON.
    pub(crate) fn store(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("serialising score table")?;
        fs::write(path, json).with_context(|| format!("writing score table {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_only_ever_improve() {
        let mut table = ScoreTable::default();
        table.report("cavern", 120, false);
        table.report("cavern", 80, true);
        table.report("cavern", 90, false);

        let entry = table.entry("cavern").expect("entry exists");
        assert_eq!(entry.score, 120);
        assert!(entry.done);
    }

    #[test]
    fn levels_are_tracked_independently() {
        let mut table = ScoreTable::default();
        table.report("cavern", 10, false);
        table.report("chasm", 20, true);

        assert_eq!(table.entry("cavern").map(|entry| entry.score), Some(10));
        assert_eq!(table.entry("chasm").map(|entry| entry.done), Some(true));
    }

    #[test]
    fn table_round_trips_through_json() {
        let mut table = ScoreTable::default();
        table.report("cavern", 266, true);
        table.report("chasm", 35, false);

        let json = serde_json::to_string_pretty(&table).expect("table serialises");
        let parsed: ScoreTable = serde_json::from_str(&json).expect("table parses");
        assert_eq!(table, parsed);
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let table =
            ScoreTable::load(Path::new("no-such-scores.json")).expect("missing file is fine");
        assert_eq!(table, ScoreTable::default());
    }
}
