use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Deepest level an entry may be indented to.
pub const MAX_LEVEL: u8 = 10;

/// Widest indentation unit, in spaces, the export renders.
pub const MAX_INDENT_UNIT_WIDTH: usize = 64;

/// Prefix shared by every generated entry id.
pub const ENTRY_ID_PREFIX: &str = "id-";

/// Number of random characters following [`ENTRY_ID_PREFIX`].
pub const ENTRY_ID_RANDOM_LEN: usize = 16;

/// Opaque entry identifier: `id-<16 alphanumeric chars>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Draw a fresh random id.
    pub fn generate() -> Self {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(ENTRY_ID_RANDOM_LEN)
            .map(char::from)
            .collect();
        Self(format!("{ENTRY_ID_PREFIX}{token}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for EntryId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One recorded function reference (one element of the persisted history).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub id: EntryId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub level: u8,
}

impl Entry {
    /// A root-level entry with the given id.
    pub fn new(id: EntryId, name: impl Into<String>, link: Option<String>) -> Self {
        Self {
            id,
            name: name.into(),
            link,
            level: 0,
        }
    }

    /// Label used in the export: `name (link)` when links are shown.
    pub fn label(&self, include_links: bool) -> String {
        match (&self.link, include_links) {
            (Some(link), true) => format!("{} ({})", self.name, link),
            _ => self.name.clone(),
        }
    }
}

/// Formatting knobs for [`crate::format::serialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub enclosing_line: String,
    pub arrow_prefix: String,
    pub indent_unit_width: usize,
    pub include_links: bool,
}

/// Result of a mutation that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    /// The history changed.
    Applied,
    /// The index was out of range; nothing happened.
    Skipped,
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

/// Recoverable refusals. A failed operation leaves the history untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HistoryError {
    #[error("Maximum hierarchy level reached ({max}).")]
    LevelLimitReached { max: u8 },
    #[error("Function is already at the top level.")]
    AlreadyAtRoot,
    #[error("Cannot move function: the neighbouring function is at a different hierarchy level.")]
    LevelMismatch,
    #[error("Cannot move function: no function at the same hierarchy level in that direction.")]
    NoSameLevelSibling,
    #[error("Invalid URL format: {0}")]
    InvalidLinkFormat(String),
    #[error("URL cannot be empty.")]
    EmptyLink,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_id_shape() {
        let id = EntryId::generate();
        let s = id.as_str();
        assert!(s.starts_with(ENTRY_ID_PREFIX));
        let token = &s[ENTRY_ID_PREFIX.len()..];
        assert_eq!(token.len(), ENTRY_ID_RANDOM_LEN);
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn label_with_and_without_link() {
        let mut e = Entry::new("id-x".into(), "main()", Some("https://a.test/main".into()));
        assert_eq!(e.label(true), "main() (https://a.test/main)");
        assert_eq!(e.label(false), "main()");
        e.link = None;
        assert_eq!(e.label(true), "main()");
    }

    #[test]
    fn entry_json_shape() {
        let e = Entry::new("id-abc".into(), "f", None);
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "id-abc", "name": "f", "link": null, "level": 0})
        );
    }

    #[test]
    fn entry_missing_fields_default() {
        let e: Entry = serde_json::from_str(r#"{"name": "g"}"#).unwrap();
        assert!(e.id.is_empty());
        assert_eq!(e.level, 0);
        assert!(e.link.is_none());
    }
}
