use clap::Subcommand;
use fnhist_core::Settings;
use fnhist_store::StorePaths;

// ── CLI Schema ──

#[derive(Subcommand)]
pub enum ConfigCmd {
    /// Set a setting
    Set {
        /// Setting key (enclosing_line, arrow, indentation, include_links,
        /// active_urls, panel_width, move_policy)
        key: String,
        /// New value
        value: String,
    },
    /// Get a setting
    Get {
        /// Setting key
        key: String,
    },
    /// List all settings
    List,
}

// ── Dispatch ──

pub fn run(cmd: ConfigCmd, paths: &StorePaths) -> anyhow::Result<()> {
    match cmd {
        ConfigCmd::Set { key, value } => set(paths, &key, &value),
        ConfigCmd::Get { key } => get(paths, &key),
        ConfigCmd::List => list(paths),
    }
}

// ── Command Implementations ──

/// Load, mutate and save the settings bundle under the store lock.
pub fn update<T>(
    paths: &StorePaths,
    f: impl FnOnce(&mut Settings) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    paths.ensure_layout()?;
    let _lock = fnhist_store::lock_file(&paths.lock_file)?;
    let mut settings = fnhist_store::load_settings(paths)?;
    let out = f(&mut settings)?;
    fnhist_store::save_settings(paths, &settings)?;
    Ok(out)
}

/// `fnhist config set <key> <value>`
pub fn set(paths: &StorePaths, key: &str, value: &str) -> anyhow::Result<()> {
    let shown = update(paths, |s| {
        s.set(key, value)?;
        Ok(s.get(key)?)
    })?;
    println!("{key} = {shown}");
    println!("Settings have been saved.");
    Ok(())
}

/// `fnhist config get <key>`
pub fn get(paths: &StorePaths, key: &str) -> anyhow::Result<()> {
    let settings = fnhist_store::load_settings(paths)?;
    println!("{}", settings.get(key)?);
    Ok(())
}

/// `fnhist config list`
pub fn list(paths: &StorePaths) -> anyhow::Result<()> {
    let settings = fnhist_store::load_settings(paths)?;
    for (k, v) in settings.entries() {
        println!("{k} = {v}");
    }
    Ok(())
}
