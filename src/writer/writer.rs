use std::io::{self, Write};
use std::time::Instant;

use thiserror::Error;
use tracing::debug;

use crate::errors::errors::Error as LexError;
use crate::lexer::lexer::Lexer;
use crate::lexer::tokens::Token;

/// A failed rewrite: either the engine hit a fatal lexical condition or the
/// output sink refused a write.
#[derive(Error, Debug)]
pub enum RewriteError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

pub struct Writer<W: Write> {
    out: W,
}

impl<W: Write> Writer<W> {
    pub fn new(out: W) -> Writer<W> {
        Writer { out }
    }

    /// Echoes one token exactly as it appeared: leading whitespace, then text.
    pub fn token(&mut self, token: &Token) -> io::Result<()> {
        self.out.write_all(token.white.as_bytes())?;
        self.out.write_all(token.text.as_bytes())
    }

    /// The unconditional trailing line terminator.
    pub fn finish(&mut self) -> io::Result<()> {
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

/// Pulls tokens until end of stream and echoes them verbatim.
///
/// The `Eof` token's leading whitespace is echoed too, so whitespace at the
/// very end of the input survives. The output is the input byte for byte,
/// plus one trailing newline.
pub fn rewrite<W: Write>(
    source: String,
    file: Option<String>,
    out: W,
) -> Result<(), RewriteError> {
    let start = Instant::now();

    let mut lexer = Lexer::new(source, false, file);
    let mut writer = Writer::new(out);
    let mut count = 0usize;

    loop {
        let token = lexer.next_token()?;
        writer.token(&token)?;
        if token.is_eof() {
            break;
        }
        count += 1;
    }
    writer.finish()?;

    debug!("rewrote {} tokens in {:?}", count, start.elapsed());
    Ok(())
}
