//! Lexical analysis module for the turtle command language.
//!
//! This module contains the scanner that converts source text into a
//! stream of tokens for parsing. It handles:
//!
//! - Double-buffered reading of the source in fixed-size chunks
//! - Recognition of reserved words, aliases, identifiers and literals
//! - Multi-character operators resolved with one character of pushback
//! - Line tracking for error reporting
//! - Comments and whitespace handling

pub mod keywords;
pub mod lexer;
pub mod reader;
pub mod tokens;
