//! Lexical analysis module for the compiler.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into tokens for parsing. It handles:
//!
//! - Character-level scanning with one character of pushback
//! - Recognition of keywords, identifiers, strings and comments
//! - Decimal, real, octal and hex number literals
//! - Line/column tracking for error reporting

pub mod lexer;
pub mod tokens;

#[cfg(test)]
mod tests;
