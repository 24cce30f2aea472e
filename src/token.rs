#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Directive, // {title: ...}
    Chord,     // [Am]
    Comment,   // # ...
    Lyric,
    StartOfFile,
    EndOfFile,
    StartOfLine,
    EndOfLine,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub line_no: usize,
    pub kind: TokenKind,
    pub value: String,
}

impl Token {
    pub fn new(line_no: usize, kind: TokenKind, value: impl Into<String>) -> Self {
        Self {
            line_no,
            kind,
            value: value.into(),
        }
    }

    /// A token that carries no text: file and line brackets.
    pub fn marker(line_no: usize, kind: TokenKind) -> Self {
        Self::new(line_no, kind, String::new())
    }
}
