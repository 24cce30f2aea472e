use log::{debug, warn};

use crate::error::{DirectiveProblem, ParseError};
use crate::types::{Block, Comment, CommentStyle};

use super::stack::{Marker, StackItem};
use super::ParserState;

impl ParserState {
    pub(super) fn handle_directive(&mut self, value: &str, line: usize) -> Result<(), ParseError> {
        let (tag, raw_arg) = value.split_once(':').unwrap_or((value, ""));
        let tag = tag.trim().to_lowercase();
        let arg = raw_arg.trim();
        debug!("directive {{{}}} at line {}", tag, line);

        match tag.as_str() {
            "t" | "title" => {
                let title = require_argument(&tag, arg, line)?;
                self.head.title = Some(title.to_string());
            }
            "st" | "subtitle" => {
                let subtitle = require_argument(&tag, arg, line)?;
                self.head.subtitle = Some(subtitle.to_string());
            }
            "define" => {
                let define = require_argument(&tag, arg, line)?;
                self.head.defines.push(define.to_string());
            }
            "c" | "comment" => {
                let text = require_argument(&tag, arg, line)?;
                self.place_block(Block::Comment(Comment::new(text, CommentStyle::Plain)));
            }
            "ci" | "comment_italic" => {
                let text = require_argument(&tag, arg, line)?;
                self.stack
                    .push(StackItem::Comment(Comment::new(text, CommentStyle::Italic)));
            }
            "cb" | "comment_box" => {
                let text = require_argument(&tag, arg, line)?;
                self.stack
                    .push(StackItem::Comment(Comment::new(text, CommentStyle::Boxed)));
            }
            "soc" | "start_of_chorus" => {
                forbid_argument(&tag, arg, line)?;
                self.start_chorus(line);
            }
            "eoc" | "end_of_chorus" => {
                forbid_argument(&tag, arg, line)?;
                self.end_chorus(line);
            }
            "tab" => {
                // Captured tab text is kept byte for byte.
                let text = require_argument(&tag, raw_arg, line)?;
                self.place_block(Block::Tab {
                    text: text.to_string(),
                });
            }
            "np" | "new_page" | "npp" | "new_physical_page" | "ns" | "new_song" | "rowname" => {
                debug!("ignoring rendering hint {{{}}}", tag);
            }
            _ => return Err(ParseError::NotFinished { tag, line }),
        }
        Ok(())
    }

    fn start_chorus(&mut self, line: usize) {
        if self.stack.contains(Marker::ChorusBegin) {
            warn!("chorus started at line {} while another is open", line);
            return;
        }
        self.close_line_group();
        self.close_verse();
        self.stack.push_marker(Marker::ChorusBegin);
        self.stack.push_marker(Marker::LineBegin);
    }

    fn end_chorus(&mut self, line: usize) {
        self.close_line_group();
        match self.stack.pop_to(Marker::ChorusBegin) {
            Some(content) => self.push_chorus(content),
            None => warn!("end of chorus at line {} without an open chorus", line),
        }
        self.stack.push_marker(Marker::LineBegin);
    }

    /// Body-level blocks never enter an open chorus; the chorus is appended
    /// after them once it closes.
    fn place_block(&mut self, block: Block) {
        if self.stack.contains(Marker::ChorusBegin) {
            self.body.push(block);
        } else {
            self.append_block(block);
        }
    }

    /// Places a body-level block after everything parsed so far.
    fn append_block(&mut self, block: Block) {
        self.close_line_group();
        self.close_verse();
        self.body.push(block);
        self.stack.push_marker(Marker::LineBegin);
    }
}

fn require_argument<'a>(tag: &str, arg: &'a str, line: usize) -> Result<&'a str, ParseError> {
    if arg.is_empty() {
        return Err(ParseError::BadDirective {
            tag: tag.to_string(),
            line,
            problem: DirectiveProblem::MissingArgument,
        });
    }
    Ok(arg)
}

fn forbid_argument(tag: &str, arg: &str, line: usize) -> Result<(), ParseError> {
    if !arg.is_empty() {
        return Err(ParseError::BadDirective {
            tag: tag.to_string(),
            line,
            problem: DirectiveProblem::UnexpectedArgument(arg.to_string()),
        });
    }
    Ok(())
}
