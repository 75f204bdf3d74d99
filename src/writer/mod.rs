//! Re-emission module for the rewriter.
//!
//! This module contains the consumer side of the pipeline: it pulls tokens
//! from the lexical engine and echoes each one's whitespace and text back to
//! the output, unchanged, then appends the single trailing line terminator.
//! The token stream is treated as opaque; no parsing happens here.

pub mod writer;
