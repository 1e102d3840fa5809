use crate::block::{Block, List};
use crate::config::Config;
use crate::search::Segment;

/// Convert blocks to Typst markup
pub fn blocks_to_typst(blocks: &[Block], config: &Config) -> String {
    let mut out = String::new();

    // Set up paragraph settings to prevent widows/orphans
    out.push_str("#set par(linebreaks: \"optimized\")\n");
    if config.page.numbers {
        out.push_str("#set page(numbering: \"1\")\n");
    }
    out.push('\n');

    let mut i = 0;
    while i < blocks.len() {
        let block = &blocks[i];

        match block {
            Block::Title { .. } => {
                // Keep a title on the same page as the content it introduces
                out.push_str("#block(breakable: false)[\n");
                emit_block(block, &mut out);

                if i + 1 < blocks.len() {
                    i += 1;
                    emit_block(&blocks[i], &mut out);
                }
                out.push_str("]\n\n");
            }
            _ => {
                emit_block(block, &mut out);
            }
        }

        i += 1;
    }

    out
}

/// Convert highlight segments to inline Typst markup
pub fn segments_to_typst(segments: &[Segment]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        if segment.is_match {
            // Highlight content starts a new markup block
            out.push_str("#highlight[");
            escape_line(segment.text, &mut out);
            out.push(']');
        } else if i == 0 {
            escape_line(segment.text, &mut out);
        } else {
            escape_into(segment.text, &mut out);
        }
    }
    out
}

fn emit_block(block: &Block, out: &mut String) {
    match block {
        Block::Paragraph { text } => {
            escape_line(text, out);
            out.push_str("\n\n");
        }
        Block::Spacer => {
            out.push_str("#v(0.5em)\n\n");
        }
        Block::Title { text } => {
            out.push('*');
            escape_into(text, out);
            out.push_str("*\n\n");
        }
        Block::List(list) => {
            // Keep small lists together, allow large ones to break
            if list.items.len() <= 5 {
                out.push_str("#block(breakable: false)[\n");
                list_to_typst(list, out);
                out.push_str("]\n\n");
            } else {
                list_to_typst(list, out);
                out.push('\n');
            }
        }
    }
}

fn list_to_typst(list: &List, out: &mut String) {
    let prefix = if list.ordered { "+" } else { "-" };

    for item in &list.items {
        out.push_str(prefix);
        out.push(' ');
        escape_line(item, out);
        out.push('\n');
    }
}

/// Escape text placed at the start of a line, where list, enum and heading
/// markers would otherwise be picked up.
fn escape_line(text: &str, out: &mut String) {
    let body = text.trim_start();
    out.push_str(&text[..text.len() - body.len()]);

    let digits = body.len() - body.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 && body[digits..].starts_with('.') {
        out.push_str(&body[..digits]);
        out.push('\\');
        escape_into(&body[digits..], out);
        return;
    }

    if body.starts_with(['-', '+']) {
        out.push('\\');
    }
    escape_into(body, out);
}

fn escape_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '#' | '*' | '_' | '@' | '$' | '\\' | '`' | '<' | '>' | '[' | ']' | '=' | '/' | '~' => {
                out.push('\\');
                out.push(ch);
            }
            '\r' => {}
            _ => out.push(ch),
        }
    }
}
