use std::sync::LazyLock;

use regex::Regex;

// Labels are bare, dotted or quoted names followed by a colon at the start of
// the (trimmed) line. The character class also covers `$` and `-`, which are
// legal in LLVM identifiers.
static BLOCK_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(".*"|[\w.$-]*):"#).unwrap());

static FUNCTION_DEFINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^define ").unwrap());

static FUNCTION_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"@(".*?"|[\w.$-]+)\("#).unwrap());

/// What a single line of a textual IR listing introduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'line> {
    /// A `define` line, carrying the `@name` of the function.
    Define { function: &'line str },
    /// A block label line, carrying the block's name.
    Label { block: &'line str },
    /// A blank line or a `;` comment.
    Skip,
    /// Anything else: instructions, globals, metadata, closing braces.
    Other,
}

/// A textual IR listing, split into 1-based lines.
#[derive(Debug)]
pub struct SourceText {
    lines: Vec<String>,
}

impl SourceText {
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            lines: text.lines().map(String::from).collect(),
        }
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// The text of a 1-based line, if it exists.
    #[must_use]
    pub fn line(&self, number: usize) -> Option<&str> {
        number
            .checked_sub(1)
            .and_then(|index| self.lines.get(index))
            .map(String::as_str)
    }

    /// Iterates `(line_number, text)` pairs; line numbers start at 1.
    pub fn numbered_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines
            .iter()
            .enumerate()
            .map(|(index, line)| (index + 1, line.as_str()))
    }

    /// Classifies a line. Leading whitespace is insignificant, and quoted
    /// names are unwrapped.
    #[must_use]
    pub fn classify(line: &str) -> LineKind<'_> {
        let line = line.trim_start();

        if line.is_empty() || line.starts_with(';') {
            return LineKind::Skip;
        }

        if FUNCTION_DEFINE.is_match(line) {
            return FUNCTION_NAME.find(line).map_or(LineKind::Other, |bounds| {
                // The match includes the leading `@` and the trailing `(`.
                LineKind::Define {
                    function: strip_quotes(&line[bounds.start() + 1..bounds.end() - 1]),
                }
            });
        }

        if let Some(bounds) = BLOCK_LABEL.find(line) {
            // The match includes the trailing `:`.
            return LineKind::Label {
                block: strip_quotes(&line[bounds.start()..bounds.end() - 1]),
            };
        }

        LineKind::Other
    }
}

fn strip_quotes(name: &str) -> &str {
    if name.len() >= 2 && name.starts_with('"') && name.ends_with('"') {
        &name[1..name.len() - 1]
    } else {
        name
    }
}
