//! Line scanner for ChordPro source.
//!
//! [`Tokenizer`] is a lazy, single-pass iterator: it reads one source line at
//! a time and only looks further ahead while capturing a `{start_of_tab}`
//! block.

use std::collections::VecDeque;
use std::iter::{Enumerate, FusedIterator};
use std::str::SplitInclusive;

use log::{trace, warn};
use winnow::combinator::{alt, delimited, preceded};
use winnow::token::{take_till, take_while};
use winnow::{ModalResult, Parser};

use crate::token::{Token, TokenKind};

pub fn tokenize(input: &str) -> Tokenizer<'_> {
    Tokenizer::new(input)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Lines,
    Finished,
}

pub struct Tokenizer<'a> {
    lines: Enumerate<SplitInclusive<'a, char>>,
    pending: VecDeque<Token>,
    line_no: usize,
    state: State,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            lines: input.split_inclusive('\n').enumerate(),
            pending: VecDeque::new(),
            line_no: 0,
            state: State::Start,
        }
    }

    fn scan_line(&mut self, idx: usize, raw: &str) {
        let line_no = idx + 1;
        self.line_no = line_no;

        let mut line = raw.trim_end();
        if idx == 0 {
            line = line.trim_start_matches('\u{feff}');
        }

        self.pending
            .push_back(Token::marker(line_no, TokenKind::StartOfLine));
        for (kind, value) in scan_fragments(line) {
            self.pending.push_back(Token::new(line_no, kind, value));
        }
        self.pending
            .push_back(Token::marker(line_no, TokenKind::EndOfLine));
    }

    /// Consumes raw lines up to the end-of-tab marker and folds them into a
    /// single `tab:` directive.
    fn capture_tab(&mut self, line_no: usize) -> Token {
        let mut captured = String::new();
        let mut terminated = false;

        for (idx, raw) in self.lines.by_ref() {
            self.line_no = idx + 1;
            if is_end_of_tab(raw) {
                terminated = true;
                break;
            }
            captured.push_str(raw);
        }

        if !terminated {
            warn!(
                "tab block opened at line {} is not closed before end of input",
                line_no
            );
        }

        Token::new(line_no, TokenKind::Directive, format!("tab:{captured}"))
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                let token = if token.kind == TokenKind::Directive && is_start_of_tab(&token.value)
                {
                    self.capture_tab(token.line_no)
                } else {
                    token
                };
                trace!("token {:?}", token);
                return Some(token);
            }

            match self.state {
                State::Start => {
                    self.state = State::Lines;
                    return Some(Token::marker(1, TokenKind::StartOfFile));
                }
                State::Lines => match self.lines.next() {
                    Some((idx, raw)) => self.scan_line(idx, raw),
                    None => {
                        self.state = State::Finished;
                        return Some(Token::marker(self.line_no.max(1), TokenKind::EndOfFile));
                    }
                },
                State::Finished => return None,
            }
        }
    }
}

impl FusedIterator for Tokenizer<'_> {}

fn is_start_of_tab(value: &str) -> bool {
    value.eq_ignore_ascii_case("sot") || value.eq_ignore_ascii_case("start_of_tab")
}

fn is_end_of_tab(raw: &str) -> bool {
    let line = raw.trim();
    line.eq_ignore_ascii_case("{eot}") || line.eq_ignore_ascii_case("{end_of_tab}")
}

/// Splits one stripped line into classified fragments, left to right.
fn scan_fragments(line: &str) -> Vec<(TokenKind, &str)> {
    let mut input = line;
    let mut fragments = Vec::new();

    while !input.is_empty() {
        let before = input;
        match fragment.parse_next(&mut input) {
            Ok(f) => fragments.push(f),
            Err(_) => {
                // Only a '[' that opens no chord gets here; drop it.
                let mut chars = before.chars();
                chars.next();
                input = chars.as_str();
            }
        }
    }

    fragments
}

fn fragment<'s>(input: &mut &'s str) -> ModalResult<(TokenKind, &'s str)> {
    alt((
        directive.map(|v| (TokenKind::Directive, v)),
        chord.map(|v| (TokenKind::Chord, v)),
        comment.map(|v| (TokenKind::Comment, v)),
        lyric.map(|v| (TokenKind::Lyric, v)),
    ))
    .parse_next(input)
}

fn directive<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    preceded(
        take_while(0.., char::is_whitespace),
        delimited('{', take_till(1.., '}'), '}'),
    )
    .parse_next(input)
}

fn chord<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    delimited('[', take_till(1.., ']'), ']').parse_next(input)
}

fn comment<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    preceded(
        (take_while(0.., char::is_whitespace), '#'),
        take_while(1.., |_: char| true),
    )
    .parse_next(input)
}

fn lyric<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_till(1.., '[').parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use TokenKind::*;

    fn collect(input: &str) -> Vec<(usize, TokenKind, String)> {
        tokenize(input)
            .map(|t| (t.line_no, t.kind, t.value))
            .collect()
    }

    fn tok(line: usize, kind: TokenKind, value: &str) -> (usize, TokenKind, String) {
        (line, kind, value.to_string())
    }

    #[test]
    fn test_chord_lyric_line() {
        assert_eq!(
            collect("[C]Hello [G]world"),
            vec![
                tok(1, StartOfFile, ""),
                tok(1, StartOfLine, ""),
                tok(1, Chord, "C"),
                tok(1, Lyric, "Hello "),
                tok(1, Chord, "G"),
                tok(1, Lyric, "world"),
                tok(1, EndOfLine, ""),
                tok(1, EndOfFile, ""),
            ]
        );
    }

    #[rstest]
    #[case("{title: Test}", vec![(Directive, "title: Test")])]
    #[case("  {soc}", vec![(Directive, "soc")])]
    #[case("la {c:x}", vec![(Lyric, "la {c:x}")])]
    #[case("[C] # note", vec![(Chord, "C"), (Comment, " note")])]
    #[case("# a [C] b", vec![(Comment, " a [C] b")])]
    #[case("[F#m]la#", vec![(Chord, "F#m"), (Lyric, "la#")])]
    #[case("a [ b", vec![(Lyric, "a "), (Lyric, " b")])]
    #[case("[]x", vec![(Lyric, "]x")])]
    #[case("[[C]", vec![(Chord, "[C")])]
    #[case("#", vec![(Lyric, "#")])]
    #[case("{}", vec![(Lyric, "{}")])]
    #[case("{ci: a}{cb: b}", vec![(Directive, "ci: a"), (Directive, "cb: b")])]
    fn test_fragment_precedence(#[case] line: &str, #[case] expected: Vec<(TokenKind, &str)>) {
        assert_eq!(scan_fragments(line), expected);
    }

    #[test]
    fn test_blank_lines_and_trailing_whitespace() {
        assert_eq!(
            collect("la   \n\n"),
            vec![
                tok(1, StartOfFile, ""),
                tok(1, StartOfLine, ""),
                tok(1, Lyric, "la"),
                tok(1, EndOfLine, ""),
                tok(2, StartOfLine, ""),
                tok(2, EndOfLine, ""),
                tok(2, EndOfFile, ""),
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(
            collect(""),
            vec![tok(1, StartOfFile, ""), tok(1, EndOfFile, "")]
        );
    }

    #[test]
    fn test_byte_order_mark_is_dropped() {
        let tokens = collect("\u{feff}{t: x}");
        assert_eq!(tokens[2], tok(1, Directive, "t: x"));
    }

    #[test]
    fn test_tab_capture() {
        let input = "{sot}\n[C]raw # x\n  {EOT}  \n[G]after";
        assert_eq!(
            collect(input),
            vec![
                tok(1, StartOfFile, ""),
                tok(1, StartOfLine, ""),
                tok(1, Directive, "tab:[C]raw # x\n"),
                tok(1, EndOfLine, ""),
                tok(4, StartOfLine, ""),
                tok(4, Chord, "G"),
                tok(4, Lyric, "after"),
                tok(4, EndOfLine, ""),
                tok(4, EndOfFile, ""),
            ]
        );
    }

    #[test]
    fn test_tab_capture_keeps_lines_verbatim() {
        let input = "{Start_Of_Tab}\ne|--0--|  \n\n  B|-1-|\n{end_of_tab}\n";
        let tab = tokenize(input)
            .find(|t| t.kind == Directive)
            .map(|t| t.value);
        assert_eq!(tab.as_deref(), Some("tab:e|--0--|  \n\n  B|-1-|\n"));
    }

    #[test]
    fn test_unterminated_tab_runs_to_end_of_input() {
        assert_eq!(
            collect("{start_of_tab}\na\nb"),
            vec![
                tok(1, StartOfFile, ""),
                tok(1, StartOfLine, ""),
                tok(1, Directive, "tab:a\nb"),
                tok(1, EndOfLine, ""),
                tok(3, EndOfFile, ""),
            ]
        );
    }

    #[test]
    fn test_tokenizer_is_fused() {
        let mut tokens = tokenize("x");
        assert_eq!(tokens.by_ref().count(), 5);
        assert!(tokens.next().is_none());
    }
}
