use crate::block::{Block, List};
use crate::config::HtmlConfig;
use crate::search::Segment;

/// Convert blocks to an HTML fragment
pub fn render(blocks: &[Block], config: &HtmlConfig) -> String {
    let mut out = String::new();

    if blocks.is_empty() {
        return out;
    }

    // The container preserves whitespace, so no separators between elements
    open_tag("div", &config.container_class, &mut out);
    for block in blocks {
        emit_block(block, config, &mut out);
    }
    out.push_str("</div>");

    out
}

/// Convert highlight segments to inline HTML, marking matches
pub fn render_segments(segments: &[Segment], config: &HtmlConfig) -> String {
    let mut out = String::new();
    for segment in segments {
        if segment.is_match {
            open_tag("mark", &config.mark_class, &mut out);
            escape_into(segment.text, &mut out);
            out.push_str("</mark>");
        } else {
            escape_into(segment.text, &mut out);
        }
    }
    out
}

fn emit_block(block: &Block, config: &HtmlConfig, out: &mut String) {
    match block {
        Block::Paragraph { text } => {
            open_tag("div", &config.paragraph_class, out);
            escape_into(text, out);
            out.push_str("</div>");
        }
        Block::Spacer => {
            open_tag("div", &config.spacer_class, out);
            out.push_str("</div>");
        }
        Block::Title { text } => {
            open_tag("div", &config.title_class, out);
            escape_into(text, out);
            out.push_str("</div>");
        }
        Block::List(list) => list_to_html(list, config, out),
    }
}

fn list_to_html(list: &List, config: &HtmlConfig, out: &mut String) {
    let (tag, class) = if list.ordered {
        ("ol", &config.ordered_list_class)
    } else {
        ("ul", &config.unordered_list_class)
    };

    open_tag(tag, class, out);
    for item in &list.items {
        open_tag("li", &config.item_class, out);
        escape_into(item, out);
        out.push_str("</li>");
    }
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn open_tag(tag: &str, class: &str, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    if !class.is_empty() {
        out.push_str(" class=\"");
        escape_into(class, out);
        out.push('"');
    }
    out.push('>');
}

fn escape_into(text: &str, out: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use crate::search::highlight;

    fn bare() -> HtmlConfig {
        HtmlConfig {
            container_class: String::new(),
            paragraph_class: String::new(),
            spacer_class: String::new(),
            title_class: String::new(),
            ordered_list_class: String::new(),
            unordered_list_class: String::new(),
            item_class: String::new(),
            mark_class: String::new(),
        }
    }

    #[test]
    fn empty_renders_nothing() {
        assert_eq!(render(&[], &HtmlConfig::default()), "");
    }

    #[test]
    fn paragraph_and_spacer() {
        assert_eq!(
            render(&parse("one\n\ntwo"), &bare()),
            "<div><div>one</div><div></div><div>two</div></div>"
        );
    }

    #[test]
    fn title_and_lists() {
        assert_eq!(
            render(&parse("Steps:\n- a\n1. b"), &bare()),
            "<div><div>Steps:</div><ul><li>a</li></ul><ol><li>b</li></ol></div>"
        );
    }

    #[test]
    fn default_classes() {
        let html = render(&parse("- a"), &HtmlConfig::default());
        assert_eq!(
            html,
            "<div class=\"whitespace-pre-wrap\"><ul class=\"list-disc list-inside ml-4 space-y-1 my-2\"><li class=\"leading-relaxed\">a</li></ul></div>"
        );
    }

    #[test]
    fn escapes_special_chars() {
        assert_eq!(
            render(&parse("<b> & \"q\" 'x'"), &bare()),
            "<div><div>&lt;b&gt; &amp; &quot;q&quot; &#39;x&#39;</div></div>"
        );
    }

    #[test]
    fn no_whitespace_between_elements() {
        let html = render(&parse("one\ntwo\n- a\n- b"), &HtmlConfig::default());
        assert!(!html.contains('\n'));
        assert!(!html.contains(">  <"));
        assert_eq!(
            render(&parse("one\ntwo\n- a\n- b"), &bare()),
            "<div><div>one</div><div>two</div><ul><li>a</li><li>b</li></ul></div>"
        );
    }

    #[test]
    fn marks_matches() {
        let segments = highlight("Reset <your> password", "PASSWORD");
        assert_eq!(
            render_segments(&segments, &HtmlConfig::default()),
            "Reset &lt;your&gt; <mark class=\"bg-accent text-accent-foreground rounded px-1\">password</mark>"
        );
    }
}
