//! One recording session: the store lock, the settings bundle and the live
//! history, loaded once and saved after every applied mutation.

use anyhow::{Context, Result};
use fnhist_core::link::validate_link;
use fnhist_core::{Command, Entry, History, Outcome, Settings};
use fnhist_gate::Gate;
use fnhist_store::{LockGuard, StorePaths};

pub struct Session {
    pub paths: StorePaths,
    pub settings: Settings,
    pub history: History,
    page: Option<String>,
    _lock: LockGuard,
}

impl Session {
    /// Lock the store, load settings, run the page gate (when a page is
    /// given) and only then load the history.
    pub fn open(paths: StorePaths, page: Option<&str>) -> Result<Self> {
        paths.ensure_layout()?;
        let lock = fnhist_store::lock_file(&paths.lock_file)?;
        let settings = fnhist_store::load_settings(&paths)?;
        if let Some(page) = page {
            let gate = Gate::new(&settings.active_urls);
            if !gate.allows(page) {
                tracing::info!(page, "page is not enabled for function history");
                anyhow::bail!(
                    "This page is not enabled for function history: {page}\n\
                     Add a pattern with `fnhist url add <pattern>`."
                );
            }
        }
        let history = fnhist_store::load_history(&paths, settings.move_policy)?;
        Ok(Self {
            paths,
            settings,
            history,
            page: page.map(str::to_string),
            _lock: lock,
        })
    }

    /// Record a clicked function as a new root entry.
    ///
    /// Relative links are resolved against the session page. With link
    /// capture disabled the link is ignored without being checked.
    pub fn record(&mut self, name: &str, link: Option<&str>) -> Result<Entry> {
        let link = match link {
            Some(raw) if self.settings.include_links => Some(self.resolve_link(raw)?),
            _ => None,
        };
        let entry = self
            .history
            .append(name.trim(), link, self.settings.include_links)
            .clone();
        self.save()?;
        Ok(entry)
    }

    /// Apply a command. Refusals become errors carrying the user-facing
    /// message; out-of-range indices are reported as `Skipped`.
    pub fn run(&mut self, cmd: &Command) -> Result<Outcome> {
        let outcome = self.history.apply(cmd)?;
        match outcome {
            Outcome::Applied => self.save()?,
            Outcome::Skipped => tracing::debug!(?cmd, "index out of range, nothing to do"),
        }
        Ok(outcome)
    }

    pub fn save(&self) -> Result<()> {
        fnhist_store::save_history(&self.paths, &self.history)
    }

    fn resolve_link(&self, raw: &str) -> Result<String> {
        match &self.page {
            Some(page) => {
                let base = url::Url::parse(page)
                    .with_context(|| format!("invalid page URL: {page}"))?;
                let joined = base
                    .join(raw.trim())
                    .with_context(|| format!("cannot resolve link {raw} against {page}"))?;
                Ok(joined.to_string())
            }
            None => Ok(validate_link(raw)?),
        }
    }
}
