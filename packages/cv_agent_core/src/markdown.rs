//! Renders the small markdown subset the agent answers with into display markup.
//!
//! Blocks are decided line by line: `#` headings, `- `/`* ` bullets, `1. `
//! numbered items (both grouped as `<ul>`), fenced code, and every other line as
//! its own `<p>`. pulldown-cmark only handles the inline spans (`**strong**`,
//! `*em*`, `` `code` ``). All text, including raw HTML, is escaped.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};

#[derive(Debug, PartialEq)]
enum Line<'a> {
    Blank,
    Fence,
    Heading(usize, &'a str),
    Item(&'a str),
    Text(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Line::Blank;
    }
    if line.starts_with("```") {
        return Line::Fence;
    }
    if let Some((level, text)) = heading(line) {
        return Line::Heading(level, text);
    }
    if let Some(text) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return Line::Item(text.trim_start());
    }
    if let Some(text) = numbered_item(line) {
        return Line::Item(text.trim_start());
    }
    Line::Text(line)
}

fn heading(line: &str) -> Option<(usize, &str)> {
    let level = line.len() - line.trim_start_matches('#').len();
    if !(1..=6).contains(&level) {
        return None;
    }
    line[level..].strip_prefix(' ').map(|text| (level, text.trim()))
}

fn numbered_item(line: &str) -> Option<&str> {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    line[digits..].strip_prefix(". ")
}

pub fn render(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 2);
    let mut in_list = false;
    let mut code_lines: Option<usize> = None;

    for raw in text.lines() {
        let line = classify(raw);

        if let Some(count) = code_lines {
            if line == Line::Fence {
                out.push_str("</code></pre>");
                code_lines = None;
            } else {
                if count > 0 {
                    out.push('\n');
                }
                escape_into(&mut out, raw);
                code_lines = Some(count + 1);
            }
            continue;
        }

        if in_list && !matches!(line, Line::Item(_)) {
            out.push_str("</ul>");
            in_list = false;
        }

        match line {
            Line::Blank => {}
            Line::Fence => {
                out.push_str("<pre><code>");
                code_lines = Some(0);
            }
            Line::Heading(level, text) => {
                out.push_str(&format!("<h{level}>"));
                render_inline(&mut out, text);
                out.push_str(&format!("</h{level}>"));
            }
            Line::Item(text) => {
                if !in_list {
                    out.push_str("<ul>");
                    in_list = true;
                }
                out.push_str("<li>");
                render_inline(&mut out, text);
                out.push_str("</li>");
            }
            Line::Text(text) => {
                out.push_str("<p>");
                render_inline(&mut out, text);
                out.push_str("</p>");
            }
        }
    }

    if in_list {
        out.push_str("</ul>");
    }
    if code_lines.is_some() {
        out.push_str("</code></pre>");
    }

    out
}

/// Inline spans of a single line. A line the parser reads as anything other than
/// a plain paragraph (a rule, a quote, an HTML block) is written out verbatim.
fn render_inline(out: &mut String, text: &str) {
    let events: Vec<Event> = Parser::new(text).collect();
    if !matches!(events.first(), Some(Event::Start(Tag::Paragraph))) {
        escape_into(out, text);
        return;
    }

    for event in events {
        match event {
            Event::Start(Tag::Strong) => out.push_str("<strong>"),
            Event::End(TagEnd::Strong) => out.push_str("</strong>"),
            Event::Start(Tag::Emphasis) => out.push_str("<em>"),
            Event::End(TagEnd::Emphasis) => out.push_str("</em>"),
            Event::Code(code) => {
                out.push_str("<code>");
                escape_into(out, &code);
                out.push_str("</code>");
            }
            Event::Text(text) | Event::Html(text) | Event::InlineHtml(text) => escape_into(out, &text),
            Event::SoftBreak | Event::HardBreak => out.push(' '),
            _ => {}
        }
    }
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}
