use crate::cmd_list::print_history;
use crate::session::Session;
use fnhist_core::{Command, Outcome};
use fnhist_store::StorePaths;

/// `fnhist add <name> [--link <url>]`
pub fn record(
    paths: StorePaths,
    page: Option<&str>,
    name: &str,
    link: Option<&str>,
) -> anyhow::Result<()> {
    let mut session = Session::open(paths, page)?;
    let entry = session.record(name, link)?;
    println!("Recorded {} ({})", entry.name, entry.id);
    print_history(&session.history, session.settings.include_links);
    Ok(())
}

/// `fnhist delete|indent|outdent|up|down|edit-link ...`
pub fn execute(paths: StorePaths, page: Option<&str>, cmd: Command) -> anyhow::Result<()> {
    let mut session = Session::open(paths, page)?;
    match session.run(&cmd)? {
        Outcome::Applied => println!("{}", cmd.notice()),
        Outcome::Skipped => eprintln!("No function at that index; nothing changed."),
    }
    print_history(&session.history, session.settings.include_links);
    Ok(())
}

/// `fnhist clear --yes`
pub fn clear(paths: StorePaths, page: Option<&str>, yes: bool) -> anyhow::Result<()> {
    let mut session = Session::open(paths, page)?;
    if !yes {
        anyhow::bail!(
            "Refusing to clear {} function(s) without --yes.",
            session.history.len()
        );
    }
    let cmd = Command::Clear;
    let _ = session.run(&cmd)?;
    println!("{}", cmd.notice());
    Ok(())
}
