//! Error types and error handling for the compiler.
//!
//! This module defines the error types used throughout the compilation
//! process. It includes:
//!
//! - Located diagnostics for lexical, syntax and semantic problems
//! - Driver-level failures with their process exit codes
//! - Helpful error messages and suggestions

pub mod errors;
