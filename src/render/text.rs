use crate::types::{Block, Comment, CommentStyle, Document, Line, Row};

use super::{Render, RenderOptions};

pub struct TextRenderer {
    options: RenderOptions,
}

struct Column {
    chord: String,
    lyric: String,
    width: usize,
}

impl TextRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Centered heading, letter-spaced when it is short enough.
    fn heading(&self, text: &str) -> String {
        let text = text.trim();
        let text = if text.chars().count() < self.options.width / 2 {
            text.chars()
                .map(String::from)
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            text.to_string()
        };
        let pad = self.options.width.saturating_sub(text.chars().count());
        format!("{}{}", " ".repeat(pad / 2), text)
    }

    fn lines(&self, lines: &[Line], indent: &str, out: &mut Vec<String>) {
        for line in lines {
            match line {
                Line::Row(row) => self.row(row, indent, out),
                Line::Comment(comment) => self.comment(comment, indent, out),
            }
        }
        out.push(String::new());
    }

    fn row(&self, row: &Row, indent: &str, out: &mut Vec<String>) {
        let show_chords = self.options.show_chords;
        let columns: Vec<Column> = row
            .cells
            .iter()
            .map(|cell| {
                let chord = format!("{} ", cell.chord);
                let lyric = if cell.lyric.is_empty() && show_chords {
                    "... ".to_string()
                } else {
                    cell.lyric.clone()
                };
                let mut width = lyric.chars().count();
                if show_chords {
                    width = width.max(chord.chars().count());
                }
                Column {
                    chord,
                    lyric,
                    width,
                }
            })
            .collect();

        let continuation = " ".repeat(self.options.chorus_indent.chars().count());
        let mut start = 0;
        while start < columns.len() {
            let prefix = if start == 0 {
                indent.to_string()
            } else {
                format!("{indent}{continuation}")
            };
            let available = self
                .options
                .width
                .saturating_sub(prefix.chars().count());
            let end = wrap_point(&columns, start, available);
            let segment = &columns[start..end];

            if show_chords && segment.iter().any(|c| !c.chord.trim().is_empty()) {
                out.push(join_padded(&prefix, segment, |c| &c.chord));
            }
            out.push(join_padded(&prefix, segment, |c| &c.lyric));
            start = end;
        }
    }

    fn comment(&self, comment: &Comment, indent: &str, out: &mut Vec<String>) {
        match comment.style {
            CommentStyle::Plain | CommentStyle::Italic => {
                out.push(format!("{indent}{}", comment.text));
            }
            CommentStyle::Boxed => {
                let rule = format!("{indent}+{}+", "-".repeat(comment.text.chars().count() + 2));
                out.push(rule.clone());
                out.push(format!("{indent}| {} |", comment.text));
                out.push(rule);
            }
            CommentStyle::Source => {}
        }
    }
}

impl Render for TextRenderer {
    fn render(&self, doc: &Document) -> String {
        let mut out = Vec::new();

        if let Some(title) = &doc.head.title {
            out.push(self.heading(title));
            out.push(String::new());
        }
        if let Some(subtitle) = &doc.head.subtitle {
            out.push(self.heading(subtitle));
            out.push(String::new());
        }

        for block in &doc.body {
            match block {
                Block::Verse { lines } => self.lines(lines, "", &mut out),
                Block::Chorus { lines } => self.lines(lines, &self.options.chorus_indent, &mut out),
                Block::Comment(comment) => self.comment(comment, "", &mut out),
                Block::Tab { text } => out.extend(text.lines().map(str::to_string)),
            }
        }

        let mut text = out.join("\n");
        text.push('\n');
        text
    }
}

/// End (exclusive) of the segment starting at `start` that fits in
/// `available` columns. Always takes at least one column, and moves the break
/// back to just after a lyric ending in a space when there is one.
fn wrap_point(columns: &[Column], start: usize, available: usize) -> usize {
    let mut end = start;
    let mut used = 0;
    while end < columns.len() && (end == start || used + columns[end].width <= available) {
        used += columns[end].width;
        end += 1;
    }
    if end < columns.len() {
        if let Some(brk) = (start + 1..=end)
            .rev()
            .find(|&i| columns[i - 1].lyric.ends_with(' '))
        {
            end = brk;
        }
    }
    end
}

fn join_padded<F>(prefix: &str, columns: &[Column], field: F) -> String
where
    F: Fn(&Column) -> &String,
{
    let mut line = prefix.to_string();
    for column in columns {
        line.push_str(&format!("{:<width$}", field(column), width = column.width));
    }
    line.trim_end().to_string()
}
