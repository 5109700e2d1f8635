use crate::session::Session;
use fnhist_core::{Entry, History};
use fnhist_store::StorePaths;

/// One display row per entry: index, level dashes, name and (optionally) link.
pub fn render_rows(entries: &[Entry], include_links: bool) -> Vec<String> {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let mut row = format!("{i:>3}  {}", "-".repeat(usize::from(e.level)));
            if e.level > 0 {
                row.push(' ');
            }
            row.push_str(&e.name);
            if let (true, Some(link)) = (include_links, &e.link) {
                row.push_str(&format!("  <{link}>"));
            }
            row
        })
        .collect()
}

/// `fnhist list`
pub fn list(paths: StorePaths, page: Option<&str>, json: bool) -> anyhow::Result<()> {
    let session = Session::open(paths, page)?;
    if json {
        for e in session.history.entries() {
            println!("{}", serde_json::to_string(e)?);
        }
        return Ok(());
    }
    print_history(&session.history, session.settings.include_links);
    Ok(())
}

pub fn print_history(history: &History, include_links: bool) {
    println!("Function History ({})", history.len());
    if history.is_empty() {
        println!("  (no functions recorded)");
        return;
    }
    for row in render_rows(history.entries(), include_links) {
        println!("{row}");
    }
}

/// `fnhist check`
pub fn check(paths: StorePaths, page: Option<&str>) -> anyhow::Result<()> {
    let session = Session::open(paths, page)?;
    let issues = session.history.check_structure();
    if issues.is_empty() {
        println!("Structure OK ({} entries)", session.history.len());
        return Ok(());
    }
    println!("{} level jump(s):", issues.len());
    for issue in &issues {
        println!("  {issue}");
    }
    Ok(())
}
