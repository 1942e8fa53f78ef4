//! Parser module for building the module trees.
//!
//! This module contains the recursive-descent parser that turns the token
//! stream into `Module`/`Function`/`List`/`Value` trees inside a session.
//! It handles:
//!
//! - Bounded lookahead and pushback over the token source
//! - Module, function, argument group and value rules
//! - Error recovery and reporting
//!
//! Every rule returns a tree id, or the error sentinel once it has reported
//! its failure and skipped past the broken construct.

pub mod buffer;
pub mod decls;
pub mod parser;
