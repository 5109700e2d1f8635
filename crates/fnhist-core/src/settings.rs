//! Persisted settings bundle: export formatting, link capture, active URL
//! patterns, panel width and move policy.

use crate::history::MovePolicy;
use crate::link::is_valid_url_pattern;
use crate::types::{FormatOptions, MAX_INDENT_UNIT_WIDTH};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENCLOSING_LINE: &str = "--------------------";
pub const DEFAULT_ARROW: &str = "+->";
pub const DEFAULT_INDENTATION: usize = 2;
pub const INDENTATION_MAX: usize = MAX_INDENT_UNIT_WIDTH;

/// Accepted panel widths, in pixels.
pub const PANEL_WIDTH_MIN: u32 = 200;
pub const PANEL_WIDTH_MAX: u32 = 600;

/// Keys accepted by [`Settings::set`] and [`Settings::get`].
pub const KEYS: &[&str] = &[
    "enclosing_line",
    "arrow",
    "indentation",
    "include_links",
    "active_urls",
    "panel_width",
    "move_policy",
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("unknown setting '{0}' (known: {keys})", keys = KEYS.join(", "))]
    UnknownKey(String),
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
    #[error("Invalid URL patterns:\n{}", .0.join("\n"))]
    InvalidPatterns(Vec<String>),
    #[error("panel width {0} is outside {min}..={max}", min = PANEL_WIDTH_MIN, max = PANEL_WIDTH_MAX)]
    PanelWidthOutOfRange(u32),
    #[error("indentation {0} is outside 0..={max}", max = INDENTATION_MAX)]
    IndentationOutOfRange(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub enclosing_line: String,
    pub arrow: String,
    /// Spaces per level in the export.
    pub indentation: usize,
    /// Capture links on record and show them in the export.
    pub include_links: bool,
    pub active_urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub panel_width: Option<u32>,
    pub move_policy: MovePolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enclosing_line: DEFAULT_ENCLOSING_LINE.to_string(),
            arrow: DEFAULT_ARROW.to_string(),
            indentation: DEFAULT_INDENTATION,
            include_links: false,
            active_urls: Vec::new(),
            panel_width: None,
            move_policy: MovePolicy::default(),
        }
    }
}

impl Settings {
    /// Export options. Empty delimiter or arrow fall back to the defaults.
    pub fn format_options(&self) -> FormatOptions {
        FormatOptions {
            enclosing_line: non_empty_or(&self.enclosing_line, DEFAULT_ENCLOSING_LINE),
            arrow_prefix: non_empty_or(&self.arrow, DEFAULT_ARROW),
            indent_unit_width: self.indentation,
            include_links: self.include_links,
        }
    }

    /// Check URL patterns, indentation and panel width.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid: Vec<String> = self
            .active_urls
            .iter()
            .filter(|p| !is_valid_url_pattern(p))
            .cloned()
            .collect();
        if !invalid.is_empty() {
            return Err(SettingsError::InvalidPatterns(invalid));
        }
        check_indentation(self.indentation)?;
        if let Some(w) = self.panel_width {
            check_panel_width(w)?;
        }
        Ok(())
    }

    /// Drop or reset every value [`Settings::validate`] would reject, so a
    /// hand-edited file still loads. Returns one message per repaired value.
    pub fn repair(&mut self) -> Vec<SettingsError> {
        let mut repaired = Vec::new();
        let (kept, invalid): (Vec<String>, Vec<String>) = std::mem::take(&mut self.active_urls)
            .into_iter()
            .partition(|p| is_valid_url_pattern(p));
        self.active_urls = kept;
        if !invalid.is_empty() {
            repaired.push(SettingsError::InvalidPatterns(invalid));
        }
        if let Err(e) = check_indentation(self.indentation) {
            self.indentation = DEFAULT_INDENTATION;
            repaired.push(e);
        }
        if let Some(Err(e)) = self.panel_width.map(check_panel_width) {
            self.panel_width = None;
            repaired.push(e);
        }
        repaired
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        match key {
            "enclosing_line" => self.enclosing_line = value.to_string(),
            "arrow" => self.arrow = value.to_string(),
            "indentation" => {
                let width = parse_value(key, value)?;
                check_indentation(width)?;
                self.indentation = width;
            }
            "include_links" => self.include_links = parse_value(key, value)?,
            "active_urls" => {
                let patterns = split_patterns(value);
                let invalid: Vec<String> = patterns
                    .iter()
                    .filter(|p| !is_valid_url_pattern(p))
                    .cloned()
                    .collect();
                if !invalid.is_empty() {
                    return Err(SettingsError::InvalidPatterns(invalid));
                }
                self.active_urls = patterns;
            }
            "panel_width" => {
                self.panel_width = match value.trim() {
                    "" | "none" => None,
                    v => {
                        let w: u32 = parse_value(key, v)?;
                        check_panel_width(w)?;
                        Some(w)
                    }
                }
            }
            "move_policy" => {
                self.move_policy =
                    value
                        .parse()
                        .map_err(|reason| SettingsError::InvalidValue {
                            key: key.to_string(),
                            value: value.to_string(),
                            reason,
                        })?
            }
            other => return Err(SettingsError::UnknownKey(other.to_string())),
        }
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String, SettingsError> {
        let value = match key {
            "enclosing_line" => self.enclosing_line.clone(),
            "arrow" => self.arrow.clone(),
            "indentation" => self.indentation.to_string(),
            "include_links" => self.include_links.to_string(),
            "active_urls" => self.active_urls.join("\n"),
            "panel_width" => self
                .panel_width
                .map(|w| w.to_string())
                .unwrap_or_else(|| "none".to_string()),
            "move_policy" => self.move_policy.to_string(),
            other => return Err(SettingsError::UnknownKey(other.to_string())),
        };
        Ok(value)
    }

    /// All settings as `(key, value)` pairs, in [`KEYS`] order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        KEYS.iter()
            .filter_map(|k| self.get(k).ok().map(|v| (*k, v)))
            .collect()
    }

    /// Add a pattern. Returns `false` if it was already present.
    pub fn add_active_url(&mut self, pattern: &str) -> Result<bool, SettingsError> {
        let pattern = pattern.trim();
        if !is_valid_url_pattern(pattern) {
            return Err(SettingsError::InvalidPatterns(vec![pattern.to_string()]));
        }
        if self.active_urls.iter().any(|p| p == pattern) {
            return Ok(false);
        }
        self.active_urls.push(pattern.to_string());
        Ok(true)
    }

    /// Remove a pattern. Returns `false` if it was not present.
    pub fn remove_active_url(&mut self, pattern: &str) -> bool {
        let pattern = pattern.trim();
        let before = self.active_urls.len();
        self.active_urls.retain(|p| p != pattern);
        self.active_urls.len() != before
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

fn check_indentation(width: usize) -> Result<(), SettingsError> {
    if width <= INDENTATION_MAX {
        Ok(())
    } else {
        Err(SettingsError::IndentationOutOfRange(width))
    }
}

fn check_panel_width(w: u32) -> Result<(), SettingsError> {
    if (PANEL_WIDTH_MIN..=PANEL_WIDTH_MAX).contains(&w) {
        Ok(())
    } else {
        Err(SettingsError::PanelWidthOutOfRange(w))
    }
}

/// One pattern per line; blanks are dropped. Commas are legal in URLs.
fn split_patterns(value: &str) -> Vec<String> {
    value
        .lines()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, SettingsError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| SettingsError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_map_to_format_options() {
        let o = Settings::default().format_options();
        assert_eq!(o.enclosing_line, DEFAULT_ENCLOSING_LINE);
        assert_eq!(o.arrow_prefix, DEFAULT_ARROW);
        assert_eq!(o.indent_unit_width, 2);
        assert!(!o.include_links);
    }

    #[test]
    fn empty_delimiters_fall_back() {
        let s = Settings {
            enclosing_line: String::new(),
            arrow: String::new(),
            ..Settings::default()
        };
        let o = s.format_options();
        assert_eq!(o.enclosing_line, DEFAULT_ENCLOSING_LINE);
        assert_eq!(o.arrow_prefix, DEFAULT_ARROW);
    }

    #[test]
    fn set_and_get_typed_values() {
        let mut s = Settings::default();
        s.set("indentation", "4").unwrap();
        s.set("include_links", "true").unwrap();
        s.set("arrow", "=>").unwrap();
        s.set("move_policy", "nearest-sibling").unwrap();
        s.set("panel_width", "350").unwrap();
        assert_eq!(s.indentation, 4);
        assert!(s.include_links);
        assert_eq!(s.get("arrow").unwrap(), "=>");
        assert_eq!(s.move_policy, MovePolicy::NearestSibling);
        assert_eq!(s.get("panel_width").unwrap(), "350");
        s.set("panel_width", "none").unwrap();
        assert_eq!(s.panel_width, None);
    }

    #[test]
    fn set_rejects_bad_input() {
        let mut s = Settings::default();
        assert!(matches!(
            s.set("colour", "red"),
            Err(SettingsError::UnknownKey(_))
        ));
        assert!(matches!(
            s.set("indentation", "wide"),
            Err(SettingsError::InvalidValue { .. })
        ));
        assert_eq!(
            s.set("panel_width", "900"),
            Err(SettingsError::PanelWidthOutOfRange(900))
        );
        assert_eq!(
            s.set("indentation", &usize::MAX.to_string()),
            Err(SettingsError::IndentationOutOfRange(usize::MAX))
        );
        assert!(matches!(
            s.set("move_policy", "sideways"),
            Err(SettingsError::InvalidValue { .. })
        ));
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn active_urls_are_validated() {
        let mut s = Settings::default();
        s.set("active_urls", "https://github.com/*\n\n https://docs.rs/a,b/* ")
            .unwrap();
        assert_eq!(s.active_urls, ["https://github.com/*", "https://docs.rs/a,b/*"]);
        assert_eq!(s.get("active_urls").unwrap(), "https://github.com/*\nhttps://docs.rs/a,b/*");
        let err = s.set("active_urls", "https://ok.test\nnope").unwrap_err();
        assert_eq!(err, SettingsError::InvalidPatterns(vec!["nope".into()]));
        assert_eq!(s.active_urls.len(), 2);
    }

    #[test]
    fn add_and_remove_patterns() {
        let mut s = Settings::default();
        assert_eq!(s.add_active_url("https://a.test/*"), Ok(true));
        assert_eq!(s.add_active_url(" https://a.test/* "), Ok(false));
        assert!(s.add_active_url("bad pattern").is_err());
        assert!(s.remove_active_url("https://a.test/*"));
        assert!(!s.remove_active_url("https://a.test/*"));
    }

    #[test]
    fn validate_catches_hand_edited_files() {
        let s = Settings {
            active_urls: vec!["garbage".into()],
            ..Settings::default()
        };
        assert!(s.validate().is_err());
        let s = Settings {
            panel_width: Some(10),
            ..Settings::default()
        };
        assert_eq!(s.validate(), Err(SettingsError::PanelWidthOutOfRange(10)));
        let s = Settings {
            indentation: INDENTATION_MAX + 1,
            ..Settings::default()
        };
        assert_eq!(
            s.validate(),
            Err(SettingsError::IndentationOutOfRange(INDENTATION_MAX + 1))
        );
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn repair_keeps_valid_values() {
        let mut s = Settings {
            active_urls: vec!["https://a.test/*".into(), "nope".into()],
            indentation: 1000,
            panel_width: Some(10),
            arrow: "=>".into(),
            ..Settings::default()
        };
        let repaired = s.repair();
        assert_eq!(repaired.len(), 3);
        assert_eq!(
            repaired[0],
            SettingsError::InvalidPatterns(vec!["nope".into()])
        );
        assert_eq!(s.active_urls, ["https://a.test/*"]);
        assert_eq!(s.indentation, DEFAULT_INDENTATION);
        assert_eq!(s.panel_width, None);
        assert_eq!(s.arrow, "=>");
        assert!(s.validate().is_ok());
        assert!(s.repair().is_empty());
    }

    #[test]
    fn entries_cover_every_key() {
        let entries = Settings::default().entries();
        assert_eq!(entries.len(), KEYS.len());
        assert_eq!(entries[0], ("enclosing_line", DEFAULT_ENCLOSING_LINE.to_string()));
    }

    #[test]
    fn partial_json_uses_defaults() {
        let s: Settings = serde_json::from_str(r#"{"arrow": "->"}"#).unwrap();
        assert_eq!(s.arrow, "->");
        assert_eq!(s.enclosing_line, DEFAULT_ENCLOSING_LINE);
        assert_eq!(s.move_policy, MovePolicy::AdjacentSwap);
    }
}
