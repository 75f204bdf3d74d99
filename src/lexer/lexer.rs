use std::rc::Rc;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, Span,
};

use super::tokens::{flavor, Token, TokenKind, OPERATOR_LOOKUP};

// The exact whitespace set; not a Unicode class.
fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

fn is_word_first(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, '_' | '$' | '@')
}

fn is_word_rest(c: char) -> bool {
    is_word_first(c) || c.is_ascii_digit()
}

/// The lexical engine: an advance-only cursor over the source text.
///
/// `macro_body` changes how `#` and `##` are read. Outside a macro body `#`
/// introduces a directive that runs to end of line and `##` is fatal; inside
/// one both are plain operator tokens. Every current entry point constructs
/// the engine with `macro_body = false`.
pub struct Lexer {
    source: String,
    pos: usize,
    macro_body: bool,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, macro_body: bool, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("<input>"))
        };

        Lexer {
            source,
            pos: 0,
            macro_body,
            file: file_name,
        }
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// The unread portion of the input.
    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    fn position(&self) -> Position {
        Position(self.pos as u32, Rc::clone(&self.file))
    }

    fn fatal(&self, error: ErrorImpl) -> Error {
        Error::new(error, self.position(), self.remainder().to_string())
    }

    // Token text and whitespace are contiguous slices of the source, which
    // is what makes re-emission lossless: nothing is ever normalized away.
    fn token(&self, kind: TokenKind, white_start: usize, start: usize) -> Token {
        Token {
            kind,
            white: self.source[white_start..start].to_string(),
            text: self.source[start..self.pos].to_string(),
            span: Span {
                start: Position(start as u32, Rc::clone(&self.file)),
                end: Position(self.pos as u32, Rc::clone(&self.file)),
            },
        }
    }

    /// Scans and returns the next token, leading whitespace attached.
    ///
    /// At end of input this returns the `Eof` token, which has empty text
    /// and carries any trailing whitespace. Every fatal condition returns an
    /// `Error` holding the position and the remaining unread input.
    pub fn next_token(&mut self) -> Result<Token, Error> {
        let white_start = self.pos;

        // Whitespace, with the continuation rule: a backslash here is only
        // legal if the single next character is itself whitespace, and both
        // are captured verbatim.
        let first = loop {
            match self.peek() {
                None => return Ok(self.token(TokenKind::Eof, white_start, self.pos)),
                Some(c) if is_space(c) => {
                    self.bump();
                }
                Some('\\') => {
                    self.bump();
                    match self.bump() {
                        Some(c) if is_space(c) => {}
                        _ => return Err(self.fatal(ErrorImpl::ToplevelBackslash)),
                    }
                }
                Some(c) => {
                    self.bump();
                    break c;
                }
            }
        };

        let start = self.pos - first.len_utf8();

        if OPERATOR_LOOKUP.contains_key(&self.source[start..self.pos]) {
            // Greedy longest match. Every prefix of a valid operator is
            // itself in the table, so the lookup cannot miss mid-scan.
            loop {
                match self.peek() {
                    Some(c) if OPERATOR_LOOKUP
                        .get(&self.source[start..self.pos])
                        .is_some_and(|extensions| extensions.contains(c)) =>
                    {
                        self.bump();
                    }
                    _ => break,
                }
            }

            let text = &self.source[start..self.pos];
            if text == "##" && !self.macro_body {
                return Err(self.fatal(ErrorImpl::PasteOutsideMacro));
            }
            if text == "#" && !self.macro_body {
                self.scan_to_line_end(ErrorImpl::DirectiveBackslash)?;
                return Ok(self.token(TokenKind::Directive, white_start, start));
            }
            if text == "//" {
                self.scan_to_line_end(ErrorImpl::CommentBackslash)?;
                return Ok(self.token(TokenKind::LineComment, white_start, start));
            }
            if text == "/*" {
                self.scan_block_comment()?;
                return Ok(self.token(TokenKind::BlockComment, white_start, start));
            }
            return Ok(self.token(TokenKind::Operator, white_start, start));
        }

        if first == '"' || first == '\'' {
            self.scan_literal(first)?;
            return Ok(self.token(TokenKind::Literal, white_start, start));
        }

        if first.is_ascii_digit() {
            let mut hex = false;
            if first == '0' {
                if let Some(c) = self.peek() {
                    if c == 'x' || c == 'X' {
                        self.bump();
                        hex = true;
                    }
                }
            }
            while let Some(c) = self.peek() {
                let in_digits = if hex {
                    c.is_ascii_hexdigit()
                } else {
                    c.is_ascii_digit()
                };
                if !in_digits {
                    break;
                }
                self.bump();
            }
            return Ok(self.token(TokenKind::Literal, white_start, start));
        }

        if is_word_first(first) {
            while let Some(c) = self.peek() {
                if !is_word_rest(c) {
                    break;
                }
                self.bump();
            }
            let kind = flavor(&self.source[start..self.pos]);
            return Ok(self.token(kind, white_start, start));
        }

        Err(self.fatal(ErrorImpl::UnknownCharacter { character: first }))
    }

    // Directives and line comments run to the newline, which is left unread
    // so it lands in the next token's whitespace. End of input also ends the
    // token. A backslash continues the line across whatever whitespace
    // follows it, newline included.
    fn scan_to_line_end(&mut self, backslash_error: ErrorImpl) -> Result<(), Error> {
        loop {
            match self.peek() {
                None | Some('\n') => return Ok(()),
                Some('\\') => {
                    self.bump();
                    match self.bump() {
                        Some(c) if is_space(c) => {}
                        _ => return Err(self.fatal(backslash_error)),
                    }
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    // The close check runs before the star flag is updated, so the `*` of
    // the opening `/*` never counts toward `*/`.
    fn scan_block_comment(&mut self) -> Result<(), Error> {
        let mut prev_star = false;
        loop {
            match self.bump() {
                None => return Err(self.fatal(ErrorImpl::UnclosedBlockComment)),
                Some(c) => {
                    if prev_star && c == '/' {
                        return Ok(());
                    }
                    prev_star = c == '*';
                }
            }
        }
    }

    // A backslash consumes the following character unconditionally; escape
    // legality is not this layer's business.
    fn scan_literal(&mut self, matching: char) -> Result<(), Error> {
        loop {
            match self.bump() {
                None => return Err(self.fatal(ErrorImpl::UnclosedLiteral)),
                Some(c) if c == matching => return Ok(()),
                Some('\\') => {
                    if self.bump().is_none() {
                        return Err(self.fatal(ErrorImpl::EscapeAtEof));
                    }
                }
                Some(_) => {}
            }
        }
    }
}
