//! The history model: a flat, ordered list of entries where each entry's
//! `level` encodes its depth in the user's ad-hoc call tree.
//!
//! The list is the tree's pre-order flattening. Mutations trust the caller to
//! keep it tree-shaped; [`History::check_structure`] reports jumps without
//! repairing them.

use crate::link::validate_link;
use crate::types::{Entry, EntryId, HistoryError, Outcome, MAX_LEVEL};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// How `move_up` / `move_down` pick the slot an entry moves to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MovePolicy {
    /// Swap with the immediate neighbour, only if it has the same level.
    #[default]
    AdjacentSwap,
    /// Jump over entries of other levels to the nearest same-level entry.
    NearestSibling,
}

impl MovePolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            MovePolicy::AdjacentSwap => "adjacent-swap",
            MovePolicy::NearestSibling => "nearest-sibling",
        }
    }
}

impl fmt::Display for MovePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "adjacent-swap" | "swap" => Ok(MovePolicy::AdjacentSwap),
            "nearest-sibling" | "sibling" => Ok(MovePolicy::NearestSibling),
            other => Err(format!(
                "unknown move policy '{other}' (expected adjacent-swap or nearest-sibling)"
            )),
        }
    }
}

/// An entry whose level jumps more than one step past its predecessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureIssue {
    pub index: usize,
    pub level: u8,
    pub previous_level: u8,
}

impl fmt::Display for StructureIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entry {} is at level {} but follows an entry at level {}",
            self.index, self.level, self.previous_level
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<Entry>,
    policy: MovePolicy,
}

impl History {
    pub fn new(policy: MovePolicy) -> Self {
        Self {
            entries: Vec::new(),
            policy,
        }
    }

    /// Rebuild a history from persisted entries.
    ///
    /// Levels above [`MAX_LEVEL`] are clamped; empty or duplicate ids are
    /// replaced with fresh ones. Order is kept as loaded.
    pub fn restore(entries: Vec<Entry>, policy: MovePolicy) -> Self {
        let mut seen: HashSet<EntryId> = HashSet::with_capacity(entries.len());
        let mut repaired = Vec::with_capacity(entries.len());
        for (index, mut entry) in entries.into_iter().enumerate() {
            if entry.level > MAX_LEVEL {
                tracing::warn!(
                    index,
                    level = entry.level,
                    "clamping restored entry level to {MAX_LEVEL}"
                );
                entry.level = MAX_LEVEL;
            }
            if entry.id.is_empty() || seen.contains(&entry.id) {
                let fresh = fresh_id(|id| seen.contains(id));
                tracing::warn!(index, old = %entry.id, new = %fresh, "reassigning entry id");
                entry.id = fresh;
            }
            seen.insert(entry.id.clone());
            repaired.push(entry);
        }
        Self {
            entries: repaired,
            policy,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn policy(&self) -> MovePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: MovePolicy) {
        self.policy = policy;
    }

    /// Record a new root-level entry at the end of the history.
    ///
    /// `link` is kept only when `linking_enabled` is set.
    pub fn append(
        &mut self,
        name: impl Into<String>,
        link: Option<String>,
        linking_enabled: bool,
    ) -> &Entry {
        let id = fresh_id(|id| self.entries.iter().any(|e| &e.id == id));
        let link = if linking_enabled { link } else { None };
        self.entries.push(Entry::new(id, name, link));
        &self.entries[self.entries.len() - 1]
    }

    pub fn delete(&mut self, index: usize) -> Outcome {
        if index >= self.entries.len() {
            return Outcome::Skipped;
        }
        self.entries.remove(index);
        Outcome::Applied
    }

    pub fn increase_level(&mut self, index: usize) -> Result<Outcome, HistoryError> {
        let Some(entry) = self.entries.get_mut(index) else {
            return Ok(Outcome::Skipped);
        };
        if entry.level >= MAX_LEVEL {
            return Err(HistoryError::LevelLimitReached { max: MAX_LEVEL });
        }
        entry.level += 1;
        Ok(Outcome::Applied)
    }

    pub fn decrease_level(&mut self, index: usize) -> Result<Outcome, HistoryError> {
        let Some(entry) = self.entries.get_mut(index) else {
            return Ok(Outcome::Skipped);
        };
        if entry.level == 0 {
            return Err(HistoryError::AlreadyAtRoot);
        }
        entry.level -= 1;
        Ok(Outcome::Applied)
    }

    pub fn move_up(&mut self, index: usize) -> Result<Outcome, HistoryError> {
        if index >= self.entries.len() {
            return Ok(Outcome::Skipped);
        }
        match self.policy {
            MovePolicy::AdjacentSwap => {
                if index == 0 || self.entries[index - 1].level != self.entries[index].level {
                    return Err(HistoryError::LevelMismatch);
                }
                self.entries.swap(index - 1, index);
            }
            MovePolicy::NearestSibling => {
                let level = self.entries[index].level;
                let target = self.entries[..index]
                    .iter()
                    .rposition(|e| e.level == level)
                    .ok_or(HistoryError::NoSameLevelSibling)?;
                let entry = self.entries.remove(index);
                self.entries.insert(target, entry);
            }
        }
        Ok(Outcome::Applied)
    }

    pub fn move_down(&mut self, index: usize) -> Result<Outcome, HistoryError> {
        let len = self.entries.len();
        if index >= len {
            return Ok(Outcome::Skipped);
        }
        match self.policy {
            MovePolicy::AdjacentSwap => {
                if index + 1 == len || self.entries[index + 1].level != self.entries[index].level
                {
                    return Err(HistoryError::LevelMismatch);
                }
                self.entries.swap(index, index + 1);
            }
            MovePolicy::NearestSibling => {
                let level = self.entries[index].level;
                let target = self.entries[index + 1..]
                    .iter()
                    .position(|e| e.level == level)
                    .map(|offset| index + 1 + offset)
                    .ok_or(HistoryError::NoSameLevelSibling)?;
                // After removal the sibling sits at `target - 1`; insert right after it.
                let entry = self.entries.remove(index);
                self.entries.insert(target, entry);
            }
        }
        Ok(Outcome::Applied)
    }

    /// Replace the link of the entry at `index` with the trimmed `new_link`.
    pub fn edit_link(&mut self, index: usize, new_link: &str) -> Result<Outcome, HistoryError> {
        let Some(entry) = self.entries.get_mut(index) else {
            return Ok(Outcome::Skipped);
        };
        entry.link = Some(validate_link(new_link)?);
        Ok(Outcome::Applied)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Report entries nested more than one level deeper than their
    /// predecessor. The first entry's level is never reported.
    pub fn check_structure(&self) -> Vec<StructureIssue> {
        self.entries
            .windows(2)
            .enumerate()
            .filter(|(_, pair)| pair[1].level > pair[0].level + 1)
            .map(|(i, pair)| StructureIssue {
                index: i + 1,
                level: pair[1].level,
                previous_level: pair[0].level,
            })
            .collect()
    }
}

/// Generate an id that `taken` does not claim.
fn fresh_id(taken: impl Fn(&EntryId) -> bool) -> EntryId {
    loop {
        let id = EntryId::generate();
        if !taken(&id) {
            return id;
        }
    }
}
