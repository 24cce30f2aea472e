//! Stack-based assembly of tokens into a [`Document`].
//!
//! The parser keeps finished blocks in `body` and everything still open on an
//! explicit [`Stack`]: line, verse and chorus markers plus chord cells,
//! comments and rows waiting to be grouped. Line boundaries
//! ([`boundary`](self::boundary)) and directives ([`directive`](self::directive))
//! move content from the stack into `body`.

mod boundary;
mod directive;
mod stack;


use log::{debug, warn};

use crate::error::ParseError;
use crate::token::{Token, TokenKind};
use crate::types::{Block, ChordedLyric, Comment, CommentStyle, Document, Head};

use self::stack::{Marker, Stack, StackItem};

pub fn parse<I>(tokens: I) -> Result<Document, ParseError>
where
    I: IntoIterator<Item = Token>,
{
    ParserState::new().parse(tokens)
}

#[derive(Debug, Default)]
pub struct ParserState {
    head: Head,
    body: Vec<Block>,
    stack: Stack,

    seen_start: bool,
    seen_end: bool,
}

impl ParserState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse<I>(mut self, tokens: I) -> Result<Document, ParseError>
    where
        I: IntoIterator<Item = Token>,
    {
        for token in tokens {
            self.handle_token(token)?;
        }
        Ok(self.finish())
    }

    fn handle_token(&mut self, token: Token) -> Result<(), ParseError> {
        if self.seen_end {
            return Err(bad_formatting(token));
        }

        match token.kind {
            TokenKind::Directive => self.handle_directive(&token.value, token.line_no)?,
            TokenKind::Comment => self.stack.push(StackItem::Comment(Comment::new(
                token.value,
                CommentStyle::Source,
            ))),
            TokenKind::Chord => self
                .stack
                .push(StackItem::Cell(ChordedLyric::new(token.value.trim(), ""))),
            TokenKind::Lyric => self.handle_lyric(&token.value),
            TokenKind::StartOfFile => {
                if self.seen_start {
                    return Err(bad_formatting(token));
                }
                self.seen_start = true;
            }
            TokenKind::StartOfLine => self.stack.push_marker(Marker::LineBegin),
            TokenKind::EndOfLine => self.end_line(),
            TokenKind::EndOfFile => {
                self.end_line();
                self.seen_end = true;
            }
        }
        Ok(())
    }

    /// Lyric text always lands in a chord cell; text before the first chord
    /// of a line gets a cell with an empty chord.
    fn handle_lyric(&mut self, value: &str) {
        let text = value.trim_start();
        if text.is_empty() {
            return;
        }
        if self.stack.top_cell_mut().is_none() {
            self.stack.push(StackItem::Cell(ChordedLyric::default()));
        }
        if let Some(cell) = self.stack.top_cell_mut() {
            cell.lyric.push_str(text);
        }
    }

    fn finish(mut self) -> Document {
        if !self.seen_end {
            self.end_line();
        }
        if let Some(content) = self.stack.pop_to(Marker::ChorusBegin) {
            warn!("chorus is not closed before end of input");
            self.push_chorus(content);
        }
        self.close_verse();

        debug!("parsed document with {} blocks", self.body.len());
        Document {
            head: self.head,
            body: self.body,
        }
    }
}

fn bad_formatting(token: Token) -> ParseError {
    ParseError::BadFormatting {
        kind: token.kind,
        value: token.value,
        line: token.line_no,
    }
}
