//! Explicit command dispatch: one variant per user gesture.

use crate::history::History;
use crate::types::{HistoryError, Outcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Delete(usize),
    IncreaseLevel(usize),
    DecreaseLevel(usize),
    MoveUp(usize),
    MoveDown(usize),
    EditLink { index: usize, link: String },
    Clear,
}

impl Command {
    /// Notice shown after the command was applied.
    pub fn notice(&self) -> &'static str {
        match self {
            Command::Delete(_) => "Function deleted successfully.",
            Command::IncreaseLevel(_) => "Function level increased.",
            Command::DecreaseLevel(_) => "Function level decreased.",
            Command::MoveUp(_) => "Function moved up.",
            Command::MoveDown(_) => "Function moved down.",
            Command::EditLink { .. } => "URL updated successfully.",
            Command::Clear => "All history cleared.",
        }
    }
}

impl History {
    pub fn apply(&mut self, cmd: &Command) -> Result<Outcome, HistoryError> {
        match cmd {
            Command::Delete(i) => Ok(self.delete(*i)),
            Command::IncreaseLevel(i) => self.increase_level(*i),
            Command::DecreaseLevel(i) => self.decrease_level(*i),
            Command::MoveUp(i) => self.move_up(*i),
            Command::MoveDown(i) => self.move_down(*i),
            Command::EditLink { index, link } => self.edit_link(*index, link),
            Command::Clear => {
                self.clear();
                Ok(Outcome::Applied)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MovePolicy;

    #[test]
    fn apply_routes_to_operations() {
        let mut h = History::new(MovePolicy::AdjacentSwap);
        let _ = h.append("a", None, false);
        let _ = h.append("b", None, false);

        assert_eq!(h.apply(&Command::IncreaseLevel(1)), Ok(Outcome::Applied));
        assert_eq!(h.entries()[1].level, 1);
        assert_eq!(
            h.apply(&Command::MoveUp(1)),
            Err(HistoryError::LevelMismatch)
        );
        assert_eq!(h.apply(&Command::DecreaseLevel(1)), Ok(Outcome::Applied));
        assert_eq!(h.apply(&Command::MoveUp(1)), Ok(Outcome::Applied));
        assert_eq!(h.entries()[0].name, "b");
        assert_eq!(
            h.apply(&Command::EditLink {
                index: 0,
                link: "https://a.test/b".into()
            }),
            Ok(Outcome::Applied)
        );
        assert_eq!(h.apply(&Command::Delete(7)), Ok(Outcome::Skipped));
        assert_eq!(h.apply(&Command::Clear), Ok(Outcome::Applied));
        assert!(h.is_empty());
    }

    #[test]
    fn notices_match_gestures() {
        assert_eq!(Command::Delete(0).notice(), "Function deleted successfully.");
        assert_eq!(Command::Clear.notice(), "All history cleared.");
    }
}
