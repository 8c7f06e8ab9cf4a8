//! Markdown rendering for meeting-note previews.
//!
//! pulldown-cmark with tables, strikethrough and task lists. Raw HTML in
//! the source is downgraded to text so shared notes cannot inject markup.

use pulldown_cmark::{html::push_html, Event, Options, Parser};

fn get_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Render a note body to HTML
pub fn render(text: &str) -> String {
    let events = Parser::new_ext(text, get_options()).map(|ev| match ev {
        Event::Html(html) | Event::InlineHtml(html) => Event::Text(html),
        other => other,
    });
    let mut html_output = String::new();
    push_html(&mut html_output, events);
    html_output
}

/// Render for inline use (strips outer <p> tags)
pub fn render_inline(text: &str) -> String {
    let html = render(text);

    html.trim()
        .strip_prefix("<p>")
        .and_then(|s| s.strip_suffix("</p>"))
        .map(|s| s.to_string())
        .unwrap_or(html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_and_lists_render() {
        let html = render("# Agenda\n\n- item one\n- item two\n");
        assert!(html.contains("<h1>Agenda</h1>"));
        assert!(html.contains("<li>item one</li>"));
    }

    #[test]
    fn task_lists_render_checkboxes() {
        let html = render("- [ ] open\n- [x] done\n");
        assert_eq!(html.matches("type=\"checkbox\"").count(), 2);
    }

    #[test]
    fn raw_html_is_neutralized() {
        let html = render("hello <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn inline_render_strips_paragraph_wrapper() {
        assert_eq!(render_inline("some **bold** text"), "some <strong>bold</strong> text");
    }
}
