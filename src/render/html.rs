use crate::types::{Block, Comment, CommentStyle, Document, Line, Row};

use super::{escape_cell, escape_html, Render, RenderOptions};

const TABLE_STYLE: &str = r#"
        <style type="text/css">
            h1, h2 { text-align: center }
            div.chorus table { margin-left: 2em }
            div.chorus, div.verse, div.defines { padding-bottom: 1em }
            td.chord { color: #006; font-weight: bold; }
            td.lyric { white-space: pre; font-size: 120% }
            div.comment { font-weight: bold; color: #6f6; margin-bottom: 1em }
            div.italic { font-style: italic }
            div.boxed { border: 1px solid #6f6; display: inline-block; padding: 0 0.5em }
        </style>
"#;

const CSS_STYLE: &str = r#"
        <style type="text/css">
            h1, h2 { text-align: center }
            .chorus { margin-left: 2em }
            .chorus, .verse, .defines { clear: left; margin-bottom: 1em }
            .row { clear: left }
            .chord_lyric { float: left; vertical-align: bottom }
            .chord { color: #006; font-weight: bold }
            .lyric { white-space: pre; vertical-align: bottom; font-size: 120% }
            .comment { font-weight: bold; color: #6f6; margin-bottom: 1em; clear: left }
            .italic { font-style: italic }
            .boxed { border: 1px solid #6f6; display: inline-block; padding: 0 0.5em }
        </style>
"#;

const EMPTY_LYRIC: &str = ". . . ";

/// HTML page laying out each row as a two-row table.
pub struct HtmlTableRenderer {
    options: RenderOptions,
}

/// HTML page laying out each row as floated chord/lyric boxes.
pub struct HtmlCssRenderer {
    options: RenderOptions,
}

impl HtmlTableRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    fn row(&self, row: &Row, out: &mut Vec<String>) {
        out.push("<table border=0 cellpadding=0 cellspacing=0>".to_string());
        if self.options.show_chords {
            out.push("<tr>".to_string());
            out.push(
                row.cells
                    .iter()
                    .map(|cell| format!("<td class=\"chord\">{}</td>", escape_cell(&cell.chord)))
                    .collect(),
            );
            out.push("</tr>".to_string());
        }
        out.push("<tr>".to_string());
        out.push(
            row.cells
                .iter()
                .map(|cell| format!("<td class=\"lyric\">{}</td>", escape_cell(lyric_or_gap(&cell.lyric))))
                .collect(),
        );
        out.push("</tr>".to_string());
        out.push("</table>".to_string());
    }
}

impl Render for HtmlTableRenderer {
    fn render(&self, doc: &Document) -> String {
        page(doc, TABLE_STYLE, |row, out| self.row(row, out))
    }
}

impl HtmlCssRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    fn row(&self, row: &Row, out: &mut Vec<String>) {
        out.push("<div class=\"row\">".to_string());
        for cell in &row.cells {
            let chord = if self.options.show_chords {
                format!("<div class=\"chord\">{}</div>", escape_cell(&cell.chord))
            } else {
                String::new()
            };
            out.push(format!(
                "<div class=\"chord_lyric\">{}<div class=\"lyric\">{}</div></div>",
                chord,
                escape_cell(lyric_or_gap(&cell.lyric))
            ));
        }
        out.push("</div>".to_string());
    }
}

impl Render for HtmlCssRenderer {
    fn render(&self, doc: &Document) -> String {
        page(doc, CSS_STYLE, |row, out| self.row(row, out))
    }
}

fn lyric_or_gap(lyric: &str) -> &str {
    if lyric.is_empty() {
        EMPTY_LYRIC
    } else {
        lyric
    }
}

/// Shared page skeleton; only row layout differs between the two renderers.
fn page<F>(doc: &Document, style: &str, row: F) -> String
where
    F: Fn(&Row, &mut Vec<String>),
{
    let mut out = vec!["<html>".to_string(), "<head>".to_string()];
    if let Some(title) = &doc.head.title {
        out.push(format!("<title>{}</title>", escape_html(title.trim())));
    }
    out.push(style.to_string());
    out.push("</head>".to_string());
    out.push("<body>".to_string());

    if let Some(title) = &doc.head.title {
        out.push(format!("<h1>{}</h1>", escape_html(title.trim())));
    }
    if let Some(subtitle) = &doc.head.subtitle {
        out.push(format!("<h2>{}</h2>", escape_html(subtitle.trim())));
    }
    if !doc.head.defines.is_empty() {
        out.push("<div class=\"defines\">".to_string());
        for define in &doc.head.defines {
            out.push(format!("<span class=\"define\">{}</span>", escape_html(define)));
        }
        out.push("</div>".to_string());
    }

    for block in &doc.body {
        match block {
            Block::Verse { lines } => block_div("verse", lines, &row, &mut out),
            Block::Chorus { lines } => block_div("chorus", lines, &row, &mut out),
            Block::Comment(comment) => comment_html(comment, &mut out),
            Block::Tab { text } => out.push(format!("<pre>{}</pre>", escape_html(text))),
        }
    }

    out.push("</body>".to_string());
    out.push("</html>".to_string());

    let mut html = out.join("\n");
    html.push('\n');
    html
}

fn block_div<F>(class: &str, lines: &[Line], row: &F, out: &mut Vec<String>)
where
    F: Fn(&Row, &mut Vec<String>),
{
    out.push(format!("<div class=\"{class}\">"));
    for line in lines {
        match line {
            Line::Row(r) => row(r, out),
            Line::Comment(comment) => comment_html(comment, out),
        }
    }
    out.push("</div>".to_string());
}

fn comment_html(comment: &Comment, out: &mut Vec<String>) {
    let class = match comment.style {
        CommentStyle::Plain => "comment",
        CommentStyle::Italic => "comment italic",
        CommentStyle::Boxed => "comment boxed",
        CommentStyle::Source => {
            out.push(format!("<!--{}-->", comment.text.replace("--", "- -")));
            return;
        }
    };
    out.push(format!(
        "<div class=\"{class}\">{}</div>",
        escape_html(&comment.text)
    ));
}
