pub mod command;
pub mod format;
pub mod history;
pub mod link;
pub mod settings;
pub mod types;

pub use command::Command;
pub use history::{History, MovePolicy, StructureIssue};
pub use settings::{Settings, SettingsError};
pub use types::*;
