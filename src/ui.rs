use ratatui::prelude::*;

use crate::catalog::Category;

/// Simple JSON syntax highlighting
pub fn highlight_json(text: &str) -> Vec<Line<'static>> {
    text.lines().map(highlight_line).collect()
}

fn highlight_line(line: &str) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut rest = line;

    while let Some(c) = rest.chars().next() {
        if c == '"' {
            let end = string_end(rest);
            let (string, tail) = rest.split_at(end);
            // A string followed by ':' is an object key
            let color = if tail.trim_start().starts_with(':') {
                Color::Cyan
            } else {
                Color::Green
            };
            spans.push(Span::styled(string.to_string(), Style::default().fg(color)));
            rest = tail;
        } else if c.is_ascii_digit() || c == '-' {
            let end = rest
                .char_indices()
                .find(|&(_, ch)| !matches!(ch, '0'..='9' | '.' | '-' | '+' | 'e' | 'E'))
                .map(|(i, _)| i)
                .unwrap_or(rest.len());
            let (number, tail) = rest.split_at(end.max(1));
            spans.push(Span::styled(
                number.to_string(),
                Style::default().fg(Color::Yellow),
            ));
            rest = tail;
        } else if let Some(keyword) = ["true", "false", "null"]
            .iter()
            .find(|w| rest.starts_with(**w))
        {
            let (word, tail) = rest.split_at(keyword.len());
            spans.push(Span::styled(
                word.to_string(),
                Style::default().fg(Color::Magenta),
            ));
            rest = tail;
        } else if matches!(c, '{' | '}' | '[' | ']') {
            let (brace, tail) = rest.split_at(c.len_utf8());
            spans.push(Span::styled(
                brace.to_string(),
                Style::default().fg(Color::Yellow),
            ));
            rest = tail;
        } else {
            // Plain run up to the next token start
            let end = rest
                .char_indices()
                .skip(1)
                .find(|&(_, ch)| {
                    matches!(ch, '"' | '{' | '}' | '[' | ']' | 't' | 'f' | 'n' | '-')
                        || ch.is_ascii_digit()
                })
                .map(|(i, _)| i)
                .unwrap_or(rest.len());
            let (run, tail) = rest.split_at(end);
            spans.push(Span::raw(run.to_string()));
            rest = tail;
        }
    }

    Line::from(spans)
}

/// Index just past a string literal's closing quote, honoring escapes
fn string_end(rest: &str) -> usize {
    let mut escaped = false;
    for (i, ch) in rest.char_indices().skip(1) {
        if escaped {
            escaped = false;
            continue;
        }
        match ch {
            '\\' => escaped = true,
            '"' => return i + 1,
            _ => {}
        }
    }
    rest.len()
}

/// Status code color
pub fn status_color(code: u16) -> Color {
    match code {
        200..=299 => Color::Green,
        300..=399 => Color::Cyan,
        400..=499 => Color::Red,
        500..=599 => Color::Magenta,
        _ => Color::Yellow,
    }
}

/// Catalogue category color
pub fn category_color(category: Category) -> Color {
    match category {
        Category::Daily => Color::Blue,
        Category::Rankings => Color::Red,
        Category::Utility => Color::Green,
        Category::Fun => Color::Magenta,
        Category::Misc => Color::Gray,
    }
}
