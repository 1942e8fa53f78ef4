//! Utility macros for the compiler.
//!
//! This module defines helper macros used by the lexer and its tests:
//!
//! - `MK_TOKEN!` - Creates a Token carrying owned text
//! - `MK_OPERATOR!` - Creates a Token carrying a fixed TokenKind
//!
//! These macros reduce boilerplate in the lexer implementation.

/// Creates a Token whose value is owned text.
///
/// # Arguments
///
/// * `$class` - The TokenClass
/// * `$text` - The token's text, anything convertible into a `String`
/// * `$location` - The source location of the first character
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenClass::IntLiteral, "42", location);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($class:expr, $text:expr, $location:expr) => {
        $crate::lexer::tokens::Token {
            class: $class,
            value: $crate::lexer::tokens::TokenValue::Text(String::from($text)),
            location: $location,
        }
    };
}

/// Creates a Token whose value is a TokenKind.
///
/// The class is derived from the kind: keywords become `Keyword` tokens,
/// `Eof` becomes the end-of-file token and the rest are operators.
///
/// # Example
///
/// ```ignore
/// let token = MK_OPERATOR!(TokenKind::LParen, location);
/// ```
#[macro_export]
macro_rules! MK_OPERATOR {
    ($kind:expr, $location:expr) => {
        $crate::lexer::tokens::Token {
            class: $kind.class(),
            value: $crate::lexer::tokens::TokenValue::Kind($kind),
            location: $location,
        }
    };
}
