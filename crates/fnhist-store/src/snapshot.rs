use crate::paths::StorePaths;
use anyhow::{Context, Result};
use fnhist_core::{Entry, History, MovePolicy, Settings};
use serde::{Deserialize, Serialize};

/// Current on-disk format of `function_history.json`.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Durable copy of the history, rewritten after every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySnapshot {
    #[serde(default)]
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

/// Load the history. A missing file yields an empty history.
pub fn load_history(paths: &StorePaths, policy: MovePolicy) -> Result<History> {
    let path = &paths.history_json;
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no saved history, starting empty");
        return Ok(History::new(policy));
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading history: {}", path.display()))?;
    let snapshot: HistorySnapshot = serde_json::from_str(&content)
        .with_context(|| format!("parsing history: {}", path.display()))?;
    if snapshot.version > SNAPSHOT_VERSION {
        anyhow::bail!(
            "history {} has format version {}, newer than supported {}",
            path.display(),
            snapshot.version,
            SNAPSHOT_VERSION
        );
    }
    tracing::debug!(entries = snapshot.entries.len(), "loaded history");
    Ok(History::restore(snapshot.entries, policy))
}

/// Save the history atomically.
pub fn save_history(paths: &StorePaths, history: &History) -> Result<()> {
    let snapshot = HistorySnapshot {
        version: SNAPSHOT_VERSION,
        saved_at: Some(now_rfc3339()?),
        entries: history.entries().to_vec(),
    };
    let data = serde_json::to_string_pretty(&snapshot)?;
    crate::write_atomic(&paths.history_json, data.as_bytes())
        .with_context(|| format!("saving history: {}", paths.history_json.display()))?;
    tracing::debug!(entries = history.len(), "saved history");
    Ok(())
}

/// Load settings. A missing file yields defaults. Values that fail
/// validation are dropped or reset with a warning, so the commands that
/// edit settings keep working on a hand-edited file.
pub fn load_settings(paths: &StorePaths) -> Result<Settings> {
    let path = &paths.settings_json;
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading settings: {}", path.display()))?;
    let mut settings: Settings = serde_json::from_str(&content)
        .with_context(|| format!("parsing settings: {}", path.display()))?;
    for problem in settings.repair() {
        tracing::warn!(path = %path.display(), "ignoring stored setting: {problem}");
    }
    Ok(settings)
}

/// Save settings atomically.
pub fn save_settings(paths: &StorePaths, settings: &Settings) -> Result<()> {
    let data = serde_json::to_string_pretty(settings)?;
    crate::write_atomic(&paths.settings_json, data.as_bytes())
        .with_context(|| format!("saving settings: {}", paths.settings_json.display()))?;
    Ok(())
}

fn now_rfc3339() -> Result<String> {
    let now = time::OffsetDateTime::now_utc();
    Ok(now.format(&time::format_description::well_known::Rfc3339)?)
}
