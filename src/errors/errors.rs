use std::fmt::Display;
use std::io::{self, Write};

use thiserror::Error;

use crate::Position;

/// A fatal lexical condition. None of these are recoverable: the engine
/// stops at the point of occurrence and the whole run is abandoned.
///
/// Besides the condition itself, the error carries the position it was
/// detected at and the entire remaining unread input, so the caller can
/// dump it for forensic inspection.
#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
    remaining: String,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position, remaining: String) -> Self {
        Error {
            internal_error: error_impl,
            position,
            remaining,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    /// The unread portion of the input, captured when the error was raised.
    pub fn remaining(&self) -> &str {
        &self.remaining
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::ToplevelBackslash => "ToplevelBackslash",
            ErrorImpl::DirectiveBackslash => "DirectiveBackslash",
            ErrorImpl::CommentBackslash => "CommentBackslash",
            ErrorImpl::PasteOutsideMacro => "PasteOutsideMacro",
            ErrorImpl::UnclosedLiteral => "UnclosedLiteral",
            ErrorImpl::EscapeAtEof => "EscapeAtEof",
            ErrorImpl::UnclosedBlockComment => "UnclosedBlockComment",
            ErrorImpl::UnknownCharacter { .. } => "UnknownCharacter",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::ToplevelBackslash
            | ErrorImpl::DirectiveBackslash
            | ErrorImpl::CommentBackslash => ErrorTip::Suggestion(String::from(
                "a line continuation must be followed by whitespace or a newline",
            )),
            ErrorImpl::PasteOutsideMacro => ErrorTip::None,
            ErrorImpl::UnclosedLiteral => {
                ErrorTip::Suggestion(String::from("did you forget a closing quote?"))
            }
            ErrorImpl::EscapeAtEof => ErrorTip::None,
            ErrorImpl::UnclosedBlockComment => {
                ErrorTip::Suggestion(String::from("did you forget a closing */?"))
            }
            ErrorImpl::UnknownCharacter { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    #[error("toplevel backslash not followed by whitespace")]
    ToplevelBackslash,
    #[error("directive-level backslash not followed by whitespace")]
    DirectiveBackslash,
    #[error("comment-level backslash not followed by whitespace")]
    CommentBackslash,
    #[error("'##' is only valid in a macro body")]
    PasteOutsideMacro,
    #[error("unclosed string/char literal")]
    UnclosedLiteral,
    #[error("end of input after backslash in string/char literal")]
    EscapeAtEof,
    #[error("unclosed block comment")]
    UnclosedBlockComment,
    #[error("unknown character: {character:?}")]
    UnknownCharacter { character: char },
}

/// Writes the full diagnostic for a fatal error to the sink: one readable
/// line naming the condition, the location line, the fixed warning line,
/// then the remaining unread input verbatim.
pub fn report<W: Write>(error: &Error, sink: &mut W) -> io::Result<()> {
    if let ErrorTip::None = error.get_tip() {
        writeln!(sink, "Error: {}", error)?;
    } else {
        writeln!(sink, "Error: {} ({})", error, error.get_tip())?;
    }

    let position = error.get_position();
    writeln!(sink, "-> {} at byte {}", position.1, position.0)?;

    writeln!(sink, "This error is fatal. Dumping rest of input ...")?;
    sink.write_all(error.remaining().as_bytes())
}
