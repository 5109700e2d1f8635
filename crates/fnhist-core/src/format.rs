//! Indented text export.

use crate::history::History;
use crate::types::{Entry, EntryId, FormatOptions, MAX_INDENT_UNIT_WIDTH};

/// Render `entries` as an indented outline framed by `options.enclosing_line`.
///
/// Root entries are printed bare; deeper entries get the arrow prefix.
/// There is no newline after the closing delimiter. The indentation unit is
/// capped at [`MAX_INDENT_UNIT_WIDTH`].
pub fn serialize(entries: &[Entry], options: &FormatOptions) -> String {
    let unit = options.indent_unit_width.min(MAX_INDENT_UNIT_WIDTH);
    let mut out = String::new();
    out.push_str(&options.enclosing_line);
    out.push('\n');
    for entry in entries {
        let indent = " ".repeat(unit.saturating_mul(usize::from(entry.level)));
        let label = entry.label(options.include_links);
        out.push_str(&indent);
        if entry.level > 0 {
            out.push_str(&options.arrow_prefix);
            out.push(' ');
        }
        out.push_str(&label);
        out.push('\n');
    }
    out.push_str(&options.enclosing_line);
    out
}

impl History {
    pub fn serialize(&self, options: &FormatOptions) -> String {
        serialize(self.entries(), options)
    }
}

/// Fixed outline used to preview formatting settings.
pub fn sample_entries() -> Vec<Entry> {
    [
        ("demo()", 0),
        ("test()", 1),
        ("test-nest()", 2),
        ("test-nest2()", 2),
        ("test2()", 1),
        ("test-nest()", 2),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, level))| {
        let slug = name.trim_end_matches("()");
        Entry {
            id: EntryId::from(format!("id-sample{i}")),
            name: name.to_string(),
            link: Some(format!("http://example.com/{slug}")),
            level,
        }
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MovePolicy;

    fn opts(include_links: bool) -> FormatOptions {
        FormatOptions {
            enclosing_line: "----".to_string(),
            arrow_prefix: "+->".to_string(),
            indent_unit_width: 2,
            include_links,
        }
    }

    fn entry(name: &str, level: u8, link: Option<&str>) -> Entry {
        Entry {
            id: EntryId::from(format!("id-{name}")),
            name: name.to_string(),
            link: link.map(str::to_string),
            level,
        }
    }

    #[test]
    fn renders_outline() {
        let h = History::restore(
            vec![entry("a", 0, None), entry("b", 1, None), entry("c", 1, None)],
            MovePolicy::AdjacentSwap,
        );
        assert_eq!(h.serialize(&opts(false)), "----\na\n  +-> b\n  +-> c\n----");
    }

    #[test]
    fn empty_history_is_just_delimiters() {
        assert_eq!(serialize(&[], &opts(false)), "----\n----");
    }

    #[test]
    fn links_only_when_enabled_and_present() {
        let entries = vec![
            entry("a", 0, Some("https://a.test/a")),
            entry("b", 2, None),
        ];
        assert_eq!(
            serialize(&entries, &opts(true)),
            "----\na (https://a.test/a)\n    +-> b\n----"
        );
        assert_eq!(serialize(&entries, &opts(false)), "----\na\n    +-> b\n----");
    }

    #[test]
    fn frame_and_line_shape() {
        let entries = sample_entries();
        let o = opts(true);
        let text = serialize(&entries, &o);
        assert!(text.starts_with(&o.enclosing_line));
        assert!(text.ends_with(&o.enclosing_line));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), entries.len() + 2);
        for (line, e) in lines[1..lines.len() - 1].iter().zip(&entries) {
            let indent = " ".repeat(o.indent_unit_width * usize::from(e.level));
            if e.level > 0 {
                assert!(line.starts_with(&format!("{indent}{}", o.arrow_prefix)));
            } else {
                assert!(line.starts_with(&e.name));
            }
        }
    }

    #[test]
    fn serialize_is_pure() {
        let entries = sample_entries();
        let first = serialize(&entries, &opts(true));
        assert_eq!(first, serialize(&entries, &opts(true)));
    }

    #[test]
    fn oversized_indent_unit_is_capped() {
        let mut o = opts(false);
        o.indent_unit_width = usize::MAX;
        let text = serialize(&[entry("x", 2, None)], &o);
        let indent = " ".repeat(MAX_INDENT_UNIT_WIDTH * 2);
        assert_eq!(text, format!("----\n{indent}+-> x\n----"));
    }

    #[test]
    fn zero_width_keeps_arrows() {
        let mut o = opts(false);
        o.indent_unit_width = 0;
        let text = serialize(&[entry("x", 3, None)], &o);
        assert_eq!(text, "----\n+-> x\n----");
    }
}
