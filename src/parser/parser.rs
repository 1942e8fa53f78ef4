//! Parser implementation for building the module trees.
//!
//! This module contains the main Parser struct, the token-level helpers the
//! grammar rules are written with and the top-level `parse` entry point.
//! The grammar rules themselves live in `decls.rs`.
//!
//! The parser keeps:
//! - A bounded lookahead buffer over the token source
//! - The session it builds trees in and reports diagnostics to
//! - A state describing which construct is being parsed

use std::fmt::Display;

use log::{debug, info, trace};

use crate::{
    ast::ast::TreeId,
    errors::errors::{CompileError, Error, ErrorImpl},
    lexer::tokens::{Token, TokenClass, TokenKind},
    session::Session,
    Location,
};

use super::buffer::{TokenBuffer, TokenSource, DEFAULT_LOOKAHEAD};

/// The construct the parser is currently inside of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    Idle,
    InModule,
    InFunction,
    InArgGroup,
}

impl Display for ParserState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParserState::Idle => write!(f, "idle"),
            ParserState::InModule => write!(f, "module"),
            ParserState::InFunction => write!(f, "function"),
            ParserState::InArgGroup => write!(f, "argument group"),
        }
    }
}

/// The main parser structure that maintains parsing state.
pub struct Parser<'s, S: TokenSource> {
    /// Lookahead over the token source
    buffer: TokenBuffer<S>,
    /// Where trees are built and diagnostics go
    pub(crate) session: &'s mut Session,
    state: ParserState,
    /// Set once error recovery ran into the end of input
    reached_eof: bool,
}

impl<'s, S: TokenSource> Parser<'s, S> {
    /// Creates a new Parser with the default lookahead.
    ///
    /// # Arguments
    ///
    /// * `source` - Where tokens are read from
    /// * `session` - The compilation session trees and diagnostics go to
    pub fn new(source: S, session: &'s mut Session) -> Self {
        Self::with_lookahead(source, session, DEFAULT_LOOKAHEAD)
    }

    /// Creates a new Parser keeping up to `lookahead` tokens for pushback.
    pub fn with_lookahead(source: S, session: &'s mut Session, lookahead: usize) -> Self {
        Parser {
            buffer: TokenBuffer::with_capacity(source, lookahead),
            session,
            state: ParserState::Idle,
            reached_eof: false,
        }
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Switches state. Lexical diagnostics are only wanted inside a module.
    fn set_state(&mut self, state: ParserState) {
        trace!("parser state {} -> {}", self.state, state);
        self.state = state;
        self.buffer
            .source_mut()
            .set_error_notifications(state != ParserState::Idle);
    }

    /// Runs `rule` in `state` and restores the previous state afterwards.
    pub(crate) fn within(&mut self, state: ParserState, rule: fn(&mut Self) -> TreeId) -> TreeId {
        let outer = self.state;
        self.set_state(state);
        let tree = rule(self);
        self.set_state(outer);
        tree
    }

    /// Reads the next token, moving any lexical diagnostics into the session.
    pub(crate) fn next_token(&mut self) -> Token {
        let token = self.buffer.next();
        for err in self.buffer.source_mut().take_errors() {
            self.session.report_error(err);
        }
        token
    }

    /// Looks at the next token without consuming it.
    pub(crate) fn peek(&mut self) -> Token {
        let token = self.next_token();
        self.unget();
        token
    }

    pub(crate) fn unget(&mut self) {
        self.buffer.unget();
    }

    pub(crate) fn depths(&self) -> (i32, i32) {
        self.buffer.depths()
    }

    pub(crate) fn error(&mut self, err: ErrorImpl, location: Location) {
        self.session.report_error(Error::new(err, location));
    }

    pub(crate) fn warning(&mut self, warning: ErrorImpl, location: Location) {
        self.session.report_warning(Error::new(warning, location));
    }

    /// Reports `token` as unexpected.
    ///
    /// An end of input is not reported again once recovery already ran
    /// into it.
    pub(crate) fn unexpected(&mut self, token: &Token, message: Option<&str>) {
        if token.is_eof() && self.reached_eof {
            debug!("unexpected end of input already accounted for");
            return;
        }

        let token_text = token.as_str().to_string();
        let err = match message {
            Some(message) => ErrorImpl::UnexpectedTokenDetailed {
                token: token_text,
                message: message.to_string(),
            },
            None => ErrorImpl::UnexpectedToken { token: token_text },
        };
        self.error(err, token.location);
    }

    /// Expects a token of the specified kind.
    ///
    /// # Arguments
    ///
    /// * `kind` - The expected TokenKind
    ///
    /// # Returns
    ///
    /// The token if it matches. Otherwise the mismatch is reported, the token
    /// is pushed back and `None` is returned.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Option<Token> {
        let token = self.next_token();
        if token.kind() == Some(kind) {
            return Some(token);
        }

        self.unexpected(&token, None);
        self.unget();
        None
    }

    /// Expects an identifier naming a `what`.
    pub(crate) fn expect_identifier(&mut self, what: &str) -> Option<Token> {
        let token = self.next_token();
        if token.class == TokenClass::Identifier {
            return Some(token);
        }

        self.unexpected(&token, Some(&format!("{} name expected", what)));
        self.unget();
        None
    }

    /// Error recovery: discards tokens until a `kind` token closing the
    /// construct that started at depths `start` has been consumed.
    ///
    /// While looking for `)`, a `}` closing the enclosing braces is pushed
    /// back and ends the skip. The end of input always ends it.
    pub(crate) fn skip_until(&mut self, kind: TokenKind, start: (i32, i32)) {
        loop {
            let token = self.next_token();
            if token.is_eof() {
                debug!("recovery reached the end of input");
                self.reached_eof = true;
                self.unget();
                return;
            }

            let (parens, braces) = self.depths();
            if token.is_operator(kind) {
                let (depth, level) = match kind {
                    TokenKind::RParen => (parens, start.0),
                    _ => (braces, start.1),
                };
                if depth <= level {
                    debug!("recovered at `{}` {}", token.as_str(), token.location);
                    return;
                }
            }

            if kind == TokenKind::RParen && token.is_operator(TokenKind::RBrace) && braces < start.1
            {
                debug!("recovery stopped by `}}` at {}", token.location);
                self.unget();
                return;
            }

            debug!("skipping `{}` at {}", token.as_str(), token.location);
        }
    }

    /// Parses a `delim`-separated list of `rule` constructs.
    ///
    /// Each rule returns the tree it built, or `TreeId::ERROR_MARK` once its
    /// failure has been reported.
    /// A failing first element fails the list; failing later elements are
    /// dropped. The token ending the list is pushed back.
    pub(crate) fn parse_list(&mut self, rule: fn(&mut Self) -> TreeId, delim: TokenKind) -> TreeId {
        let first = rule(self);
        if first.is_error() {
            return TreeId::ERROR_MARK;
        }

        let location = self.session.arena().location(first);
        let list = self.session.arena_mut().make_list(location);
        self.session.arena_mut().list_append(list, first);

        loop {
            let token = self.next_token();
            if !token.is_operator(delim) {
                self.unget();
                break;
            }

            let element = rule(self);
            if element.is_error() {
                debug!("dropping a failed list element after {}", token.location);
                continue;
            }
            self.session.arena_mut().list_append(list, element);
        }

        list
    }

    /// Parses the whole input, registering each module in the session.
    ///
    /// # Returns
    ///
    /// `Ok(())` if no error was reported, otherwise
    /// `CompileError::ParseFailed` carrying the error count.
    pub fn parse(&mut self) -> Result<(), CompileError> {
        info!("parsing started");

        loop {
            let token = self.peek();
            if token.is_eof() {
                break;
            }

            let module = self.within(ParserState::InModule, Self::parse_module);
            if module.is_error() {
                continue;
            }

            let name = self.session.arena().name_of(module).to_string();
            if self.session.module_exists(&name).is_some() {
                let location = self.session.arena().location(module);
                self.error(ErrorImpl::ModuleAlreadyDefined { module: name }, location);
                self.session.arena_mut().free_tree(module);
            } else {
                debug!("registered module `{}`", name);
                self.session.register_module(module);
            }
        }

        let (parens, braces) = self.depths();
        if parens != 0 || braces != 0 {
            let location = self.peek().location;
            self.warning(ErrorImpl::UnbalancedDelimiters { parens, braces }, location);
        }

        match self.session.error_count() {
            0 => {
                info!(
                    "parsing finished: {} modules, {} warnings",
                    self.session.modules().len(),
                    self.session.warning_count()
                );
                Ok(())
            }
            count => {
                info!("parsing failed: {} errors found", count);
                Err(CompileError::ParseFailed { count })
            }
        }
    }
}

/// Parses everything `source` produces into `session`.
///
/// # Arguments
///
/// * `source` - The token source, usually a `Lexer`
/// * `session` - The compilation session to build into
/// * `lookahead` - Capacity of the pushback buffer
pub fn parse<S: TokenSource>(
    source: S,
    session: &mut Session,
    lookahead: usize,
) -> Result<(), CompileError> {
    let mut parser = Parser::with_lookahead(source, session, lookahead);
    parser.parse()
}
