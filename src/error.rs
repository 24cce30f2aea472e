use thiserror::Error as ThisError;

use crate::token::TokenKind;

#[derive(Clone, Debug, ThisError, PartialEq, Eq)]
pub enum ParseError {
    /// The token stream broke the tokenizer/parser contract.
    #[error("Unrecognized token {kind:?} ({value:?}) at line {line}")]
    BadFormatting {
        kind: TokenKind,
        value: String,
        line: usize,
    },

    #[error("{{{tag}}} directive {problem} at line {line}")]
    BadDirective {
        tag: String,
        line: usize,
        problem: DirectiveProblem,
    },

    #[error("Unimplemented directive {tag} at line {line}")]
    NotFinished { tag: String, line: usize },
}

#[derive(Clone, Debug, ThisError, PartialEq, Eq)]
pub enum DirectiveProblem {
    #[error("needs an argument")]
    MissingArgument,

    #[error("needs no argument {0:?}")]
    UnexpectedArgument(String),
}

/// Failures of the convenience entry points that parse and render in one go.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Unsupported format {0:?}")]
    UnknownFormat(String),
}

impl ParseError {
    pub fn line(&self) -> usize {
        match self {
            ParseError::BadFormatting { line, .. }
            | ParseError::BadDirective { line, .. }
            | ParseError::NotFinished { line, .. } => *line,
        }
    }

    /// True when the input is valid but uses a directive this crate does not
    /// implement yet, as opposed to being malformed.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, ParseError::NotFinished { .. })
    }
}
