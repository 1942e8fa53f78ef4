//! Code generation module.
//!
//! Turns the modules collected in a session into a Python `unittest` script
//! that checks a compiled shared library against a reference implementation.

pub mod codegen;
