use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Document {
    pub head: Head,
    pub body: Vec<Block>,
}

/// Song metadata. Title and subtitle keep the last value seen, defines keep
/// declaration order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Head {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub defines: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Block {
    Verse { lines: Vec<Line> },
    Chorus { lines: Vec<Line> },
    Comment(Comment),
    Tab { text: String },
}

/// One entry inside a verse or chorus.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Line {
    Row(Row),
    Comment(Comment),
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Row {
    pub cells: Vec<ChordedLyric>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
pub struct ChordedLyric {
    pub chord: String,
    pub lyric: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    pub style: CommentStyle,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CommentStyle {
    Plain,
    Italic,
    Boxed,
    /// A `#` comment from the source file; renderers leave it out.
    Source,
}

impl Document {
    pub fn title(&self) -> Option<&str> {
        self.head.title.as_deref()
    }
}

impl Block {
    /// Lines of a verse or chorus; empty for other blocks.
    pub fn lines(&self) -> &[Line] {
        match self {
            Block::Verse { lines } | Block::Chorus { lines } => lines,
            Block::Comment(_) | Block::Tab { .. } => &[],
        }
    }
}

impl Row {
    pub fn new(cells: Vec<ChordedLyric>) -> Self {
        Self { cells }
    }
}

impl ChordedLyric {
    pub fn new(chord: impl Into<String>, lyric: impl Into<String>) -> Self {
        Self {
            chord: chord.into(),
            lyric: lyric.into(),
        }
    }
}

impl Comment {
    pub fn new(text: impl Into<String>, style: CommentStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}
