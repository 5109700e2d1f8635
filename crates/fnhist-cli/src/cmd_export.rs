use crate::session::Session;
use fnhist_core::format::{sample_entries, serialize};
use fnhist_store::StorePaths;
use std::path::Path;

/// `fnhist export [--output <file>]`
pub fn export(paths: StorePaths, page: Option<&str>, output: Option<&Path>) -> anyhow::Result<()> {
    let session = Session::open(paths, page)?;
    let text = session
        .history
        .serialize(&session.settings.format_options());
    match output {
        Some(path) => {
            fnhist_store::write_atomic(path, text.as_bytes())?;
            println!(
                "History exported to {} ({} entries).",
                path.display(),
                session.history.len()
            );
        }
        None => println!("{text}"),
    }
    Ok(())
}

/// `fnhist preview` renders a fixed sample outline with the saved settings.
pub fn preview(paths: StorePaths) -> anyhow::Result<()> {
    let settings = fnhist_store::load_settings(&paths)?;
    println!("{}", serialize(&sample_entries(), &settings.format_options()));
    Ok(())
}
