//! Line-level structure of the PCHR text format: markers, depth, and the
//! three kinds of content line.

/// First colon on a line separates a leaf's key from its value
pub const LEAF_SEPARATOR: char = ':';

pub const START_MARKER: &str = "---------version:";
pub const END_MARKER: &str = "-----------------";

/// Content line inside a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `key: value`
    Leaf,
    /// `Name 1`, `Name 2`, ... : one element of a repeated sibling block
    CollectionHeader { name: &'a str, index: u32 },
    /// `Name` : a nested block whose body follows at a greater depth
    Block { name: &'a str },
}

/// Count of leading blank characters. A blank-only line yields its own length.
pub fn depth(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

pub fn is_end_marker(line: &str) -> bool {
    line.trim_end() == END_MARKER
}

/// Version text of a start marker line, or `None` if the line is not one
pub fn start_marker_version(line: &str) -> Option<&str> {
    line.strip_prefix(START_MARKER).map(str::trim)
}

pub fn classify(line: &str) -> LineKind<'_> {
    if line.contains(LEAF_SEPARATOR) {
        return LineKind::Leaf;
    }

    let trimmed = line.trim();
    if let Some((name, suffix)) = trimmed.rsplit_once(char::is_whitespace) {
        let name = name.trim_end();
        if !name.is_empty()
            && !suffix.is_empty()
            && suffix.bytes().all(|b| b.is_ascii_digit())
            && let Ok(index) = suffix.parse::<u32>()
        {
            return LineKind::CollectionHeader { name, index };
        }
    }

    LineKind::Block { name: trimmed }
}

/// Field name under which a list of `name` blocks is stored
pub fn plural(name: &str) -> String {
    format!("{}s", name)
}
