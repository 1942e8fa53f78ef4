use std::{fmt::Display, io, path::PathBuf};

use thiserror::Error;

use crate::Location;

/// A located, user-facing diagnostic.
#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    location: Location,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, location: Location) -> Self {
        Error {
            internal_error: error_impl,
            location,
        }
    }

    pub fn get_location(&self) -> Location {
        self.location
    }

    pub fn get_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnterminatedString => "UnterminatedString",
            ErrorImpl::DigitExpected { .. } => "DigitExpected",
            ErrorImpl::ExponentDigitExpected => "ExponentDigitExpected",
            ErrorImpl::RepeatedExponent => "RepeatedExponent",
            ErrorImpl::RepeatedDot => "RepeatedDot",
            ErrorImpl::InvalidOctalDigit { .. } => "InvalidOctalDigit",
            ErrorImpl::HexDigitExpected => "HexDigitExpected",
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::ModuleAlreadyDefined { .. } => "ModuleAlreadyDefined",
            ErrorImpl::FunctionAlreadyDefined { .. } => "FunctionAlreadyDefined",
            ErrorImpl::EmptyFunction { .. } => "EmptyFunction",
            ErrorImpl::UnbalancedDelimiters { .. } => "UnbalancedDelimiters",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnterminatedString => ErrorTip::Suggestion(String::from(
                "unexpected end of file in the middle of string",
            )),
            ErrorImpl::DigitExpected { found } => {
                ErrorTip::Suggestion(format!("digit expected, `{}` found instead", found))
            }
            ErrorImpl::ExponentDigitExpected => {
                ErrorTip::Suggestion(String::from("digit expected after exponent sign"))
            }
            ErrorImpl::RepeatedExponent => {
                ErrorTip::Suggestion(String::from("exponent is specified more than once"))
            }
            ErrorImpl::RepeatedDot => {
                ErrorTip::Suggestion(String::from("more than one dot in the number"))
            }
            ErrorImpl::InvalidOctalDigit { digit } => {
                ErrorTip::Suggestion(format!("`{}` found in the octal number", digit))
            }
            ErrorImpl::HexDigitExpected => {
                ErrorTip::Suggestion(String::from("hex digit expected after `0x`"))
            }
            ErrorImpl::UnrecognisedToken { token } => {
                ErrorTip::Suggestion(format!("`{}` cannot start a token", token))
            }
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("unexpected token `{}`", token))
            }
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("unexpected token `{}`, {}", token, message))
            }
            ErrorImpl::ModuleAlreadyDefined { module } => {
                ErrorTip::Suggestion(format!("module `{}` is defined already", module))
            }
            ErrorImpl::FunctionAlreadyDefined { function, module } => ErrorTip::Suggestion(
                format!("function `{}` is tested twice in module `{}`", function, module),
            ),
            ErrorImpl::EmptyFunction { function } => {
                ErrorTip::Suggestion(format!("function `{}` has no test cases", function))
            }
            ErrorImpl::UnbalancedDelimiters { parens, braces } => ErrorTip::Suggestion(format!(
                "{} `(` and {} `{{` left open at end of file",
                parens, braces
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.location, self.internal_error)
    }
}

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

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    // Lexical
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("digit expected, found {found:?}")]
    DigitExpected { found: String },
    #[error("digit expected after exponent")]
    ExponentDigitExpected,
    #[error("exponent is specified more than once")]
    RepeatedExponent,
    #[error("more than one dot in the number")]
    RepeatedDot,
    #[error("{digit:?} found in the octal number")]
    InvalidOctalDigit { digit: char },
    #[error("hex digit expected")]
    HexDigitExpected,
    #[error("unrecognised character {token:?}")]
    UnrecognisedToken { token: char },

    // Syntax
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },

    // Semantic
    #[error("module {module:?} is defined already")]
    ModuleAlreadyDefined { module: String },

    // Warnings
    #[error("function {function:?} is tested twice in module {module:?}")]
    FunctionAlreadyDefined { function: String, module: String },
    #[error("function {function:?} has no test cases")]
    EmptyFunction { function: String },
    #[error("unbalanced delimiters at end of file: {parens} `(` and {braces} `{{` left open")]
    UnbalancedDelimiters { parens: i32, braces: i32 },
}

/// Failures of a whole compilation run, as seen by the driver.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error("filename argument required")]
    NoInput,
    #[error("cannot create a lexer for file `{}`", .path.display())]
    CannotOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{count} errors found")]
    ParseFailed { count: usize },
    #[error("can't open file `{}` for writing", .path.display())]
    CannotWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CompileError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            CompileError::NoInput => 1,
            CompileError::CannotOpen { .. } => 2,
            CompileError::ParseFailed { .. } => 3,
            CompileError::CannotWrite { .. } => 4,
        }
    }
}
