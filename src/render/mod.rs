//! Renderers turning a parsed [`Document`] into text or HTML.

mod html;
mod text;

pub use html::{HtmlCssRenderer, HtmlTableRenderer};
pub use text::TextRenderer;

use clap::ValueEnum;

use crate::error::Error;
use crate::types::Document;

pub trait Render {
    fn render(&self, doc: &Document) -> String;
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Column budget for text output.
    pub width: usize,
    pub chorus_indent: String,
    pub show_chords: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 79,
            chorus_indent: "    ".to_string(),
            show_chords: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Html,
    #[value(alias = "html_css")]
    HtmlCss,
    Json,
}

impl Format {
    /// Looks a format up by its command-line name, ignoring case.
    pub fn from_name(name: &str) -> Result<Self, Error> {
        Self::from_str(name, true).map_err(|_| Error::UnknownFormat(name.to_string()))
    }

    pub fn render(self, doc: &Document, options: &RenderOptions) -> serde_json::Result<String> {
        let out = match self {
            Format::Text => TextRenderer::new(options.clone()).render(doc),
            Format::Html => HtmlTableRenderer::new(options.clone()).render(doc),
            Format::HtmlCss => HtmlCssRenderer::new(options.clone()).render(doc),
            Format::Json => serde_json::to_string_pretty(doc)?,
        };
        Ok(out)
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes for table cells, where runs of spaces must survive.
fn escape_cell(s: &str) -> String {
    escape_html(s).replace(' ', "&nbsp;")
}
