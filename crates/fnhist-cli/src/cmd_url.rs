use crate::cmd_config::update;
use clap::Subcommand;
use fnhist_gate::Gate;
use fnhist_store::StorePaths;

#[derive(Subcommand)]
pub enum UrlCmd {
    /// Enable recording on pages matching a pattern (e.g. https://github.com/*)
    Add {
        pattern: String,
    },
    /// Remove an active pattern
    Remove {
        pattern: String,
    },
    /// List active patterns
    List,
    /// Show whether recording is enabled on a page
    Check {
        /// Page URL
        page_url: String,
    },
}

pub fn run(cmd: UrlCmd, paths: &StorePaths) -> anyhow::Result<()> {
    match cmd {
        UrlCmd::Add { pattern } => add(paths, &pattern),
        UrlCmd::Remove { pattern } => remove(paths, &pattern),
        UrlCmd::List => list(paths),
        UrlCmd::Check { page_url } => check(paths, &page_url),
    }
}

pub fn add(paths: &StorePaths, pattern: &str) -> anyhow::Result<()> {
    if update(paths, |s| Ok(s.add_active_url(pattern)?))? {
        println!("Added pattern: {}", pattern.trim());
    } else {
        println!("Pattern already active: {}", pattern.trim());
    }
    Ok(())
}

pub fn remove(paths: &StorePaths, pattern: &str) -> anyhow::Result<()> {
    if !update(paths, |s| Ok(s.remove_active_url(pattern)))? {
        anyhow::bail!("Pattern '{}' not found.", pattern.trim());
    }
    println!("Removed pattern: {}", pattern.trim());
    Ok(())
}

pub fn list(paths: &StorePaths) -> anyhow::Result<()> {
    let settings = fnhist_store::load_settings(paths)?;
    if settings.active_urls.is_empty() {
        println!("(no active patterns)");
        return Ok(());
    }
    for p in &settings.active_urls {
        println!("{p}");
    }
    Ok(())
}

pub fn check(paths: &StorePaths, page_url: &str) -> anyhow::Result<()> {
    let settings = fnhist_store::load_settings(paths)?;
    let gate = Gate::new(&settings.active_urls);
    match gate.matching(page_url) {
        Some(pattern) => println!("Enabled on {page_url} (pattern: {pattern})"),
        None => println!("Not enabled on {page_url}"),
    }
    Ok(())
}
