use tracing::trace;

use crate::block::{Block, List, SourceBlock};

/// How a raw answer is turned into blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Classify lines into paragraphs, spacers, titles and lists.
    #[default]
    Markdown,
    /// One paragraph per line, verbatim, with no classification.
    Plain,
}

impl Mode {
    pub fn from_markdown_flag(enabled: bool) -> Self {
        if enabled { Mode::Markdown } else { Mode::Plain }
    }
}

/// Parse raw answer text into a list of blocks.
///
/// `None` and the empty string both yield no blocks. Lines are split on
/// `'\n'` only, so a trailing newline produces a trailing empty line.
pub fn parse(text: Option<&str>, mode: Mode) -> Vec<SourceBlock> {
    let text = match text {
        Some(text) if !text.is_empty() => text,
        _ => return Vec::new(),
    };

    match mode {
        Mode::Plain => text
            .split('\n')
            .enumerate()
            .map(|(line, content)| SourceBlock {
                line,
                block: Block::paragraph(content),
            })
            .collect(),
        Mode::Markdown => {
            let mut blocks = Vec::new();
            let mut list = ListState::default();

            for (index, line) in text.split('\n').enumerate() {
                process_line(index, line, &mut list, &mut blocks);
            }
            // Close a list left open by the last line
            list.flush(&mut blocks);

            blocks
        }
    }
}

/// A run of same-style bullet lines being accumulated.
#[derive(Debug)]
struct OpenList {
    start: usize,
    items: Vec<String>,
}

#[derive(Debug, Default)]
enum ListState {
    #[default]
    None,
    Ordered(OpenList),
    Unordered(OpenList),
}

impl ListState {
    /// Emit the open list, if any, and return to `None`.
    fn flush(&mut self, blocks: &mut Vec<SourceBlock>) {
        let (ordered, open) = match std::mem::take(self) {
            ListState::None => return,
            ListState::Ordered(open) => (true, open),
            ListState::Unordered(open) => (false, open),
        };

        trace!(
            line = open.start,
            ordered,
            items = open.items.len(),
            "flushed list"
        );
        blocks.push(SourceBlock {
            line: open.start,
            block: Block::List(List {
                ordered,
                items: open.items,
            }),
        });
    }

    /// Append an item, closing the current list first if its style differs.
    fn push_item(&mut self, ordered: bool, line: usize, body: &str, blocks: &mut Vec<SourceBlock>) {
        match self {
            ListState::Ordered(open) if ordered => {
                open.items.push(body.to_string());
                return;
            }
            ListState::Unordered(open) if !ordered => {
                open.items.push(body.to_string());
                return;
            }
            _ => {}
        }

        self.flush(blocks);
        let open = OpenList {
            start: line,
            items: vec![body.to_string()],
        };
        *self = if ordered {
            ListState::Ordered(open)
        } else {
            ListState::Unordered(open)
        };
    }
}

fn process_line(index: usize, line: &str, list: &mut ListState, blocks: &mut Vec<SourceBlock>) {
    let trimmed = trim(line);

    // Bullets win over titles: "- Notes:" is a list item
    if let Some((ordered, body)) = bullet_item(trimmed) {
        list.push_item(ordered, index, body, blocks);
        return;
    }

    list.flush(blocks);

    let block = if trimmed.is_empty() {
        Block::Spacer
    } else if trimmed.len() > 1 && trimmed.ends_with(':') {
        Block::title(trimmed)
    } else {
        Block::paragraph(line)
    };

    trace!(line = index, kind = block.kind(), "classified line");
    blocks.push(SourceBlock { line: index, block });
}

/// Whitespace as browsers trim it: Unicode White_Space plus the byte order
/// mark, without NEL.
fn is_blank(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

fn trim(line: &str) -> &str {
    line.trim_matches(is_blank)
}

/// Match a trimmed line against `^([•\-*]|\d+\.)\s+(.*)$`.
/// Returns whether the marker was numbered, and the item body.
fn bullet_item(trimmed: &str) -> Option<(bool, &str)> {
    let (ordered, rest) = if let Some(rest) = trimmed.strip_prefix(['•', '-', '*']) {
        (false, rest)
    } else {
        let digits = trimmed.len()
            - trimmed
                .trim_start_matches(|c: char| c.is_ascii_digit())
                .len();
        if digits == 0 {
            return None;
        }
        (true, trimmed[digits..].strip_prefix('.')?)
    };

    // At least one whitespace character must separate marker and body
    let body = rest.trim_start_matches(is_blank);
    if body.len() == rest.len() {
        return None;
    }
    // The body is a single logical line
    if body.contains(['\r', '\u{2028}', '\u{2029}']) {
        return None;
    }

    Some((ordered, body))
}
