//! Bounded lookahead/pushback buffer between the lexer and the parser.

use std::collections::VecDeque;

use log::trace;

use crate::{
    errors::errors::Error,
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenClass, TokenKind, TokenValue},
    },
};

/// Default number of tokens the buffer keeps for pushback.
pub const DEFAULT_LOOKAHEAD: usize = 16;

/// Token texts that get glued to the token following them.
const PASTE_MARKERS: [&str; 2] = ["\\left", "\\right"];

/// Anything the parser can pull tokens from.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;

    fn set_error_notifications(&mut self, _enabled: bool) {}

    /// Drains the lexical diagnostics recorded so far.
    fn take_errors(&mut self) -> Vec<Error> {
        vec![]
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Token {
        Lexer::next_token(self)
    }

    fn set_error_notifications(&mut self, enabled: bool) {
        Lexer::set_error_notifications(self, enabled)
    }

    fn take_errors(&mut self) -> Vec<Error> {
        Lexer::take_errors(self)
    }
}

/// Ring of the most recently read tokens.
///
/// `replay` counts the tokens at the back of `tokens` that were pushed back
/// and will be handed out again before anything new is lexed.
pub struct TokenBuffer<S: TokenSource> {
    source: S,
    tokens: VecDeque<Token>,
    capacity: usize,
    replay: usize,
    paren_count: i32,
    brace_count: i32,
}

impl<S: TokenSource> TokenBuffer<S> {
    pub fn new(source: S) -> Self {
        Self::with_capacity(source, DEFAULT_LOOKAHEAD)
    }

    pub fn with_capacity(source: S, capacity: usize) -> Self {
        assert!(capacity >= 2, "token buffer needs room for at least 2 tokens");

        TokenBuffer {
            source,
            tokens: VecDeque::with_capacity(capacity),
            capacity,
            replay: 0,
            paren_count: 0,
            brace_count: 0,
        }
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of tokens currently held, pending replays included.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn next(&mut self) -> Token {
        if self.replay > 0 {
            let token = self.tokens[self.tokens.len() - self.replay].clone();
            self.replay -= 1;
            return token;
        }

        self.pull();

        let pastes = matches!(
            self.tokens.back(),
            Some(Token { value: TokenValue::Text(text), .. }) if PASTE_MARKERS.contains(&text.as_str())
        );
        if pastes {
            self.next();
            if let Some(del) = self.tokens.pop_back() {
                // The glued token no longer counts as a delimiter.
                let (dp, db) = delimiter_delta(&del);
                self.paren_count -= dp;
                self.brace_count -= db;
                if let Some(Token {
                    value: TokenValue::Text(text),
                    ..
                }) = self.tokens.back_mut()
                {
                    text.push_str(del.as_str());
                    trace!("pasted `{}`", text);
                }
            }
        }

        match self.tokens.back() {
            Some(token) => token.clone(),
            None => unreachable!("token buffer is empty right after a read"),
        }
    }

    /// Pushes the most recently read token back.
    pub fn unget(&mut self) {
        self.replay += 1;
        assert!(
            self.replay <= self.tokens.len(),
            "cannot unget {} tokens, only {} are buffered",
            self.replay,
            self.tokens.len()
        );
    }

    /// Open `(` and `{` counts over the tokens consumed so far.
    pub fn depths(&self) -> (i32, i32) {
        let (mut parens, mut braces) = (self.paren_count, self.brace_count);

        for token in self.tokens.iter().rev().take(self.replay) {
            let (dp, db) = delimiter_delta(token);
            parens -= dp;
            braces -= db;
        }

        (parens, braces)
    }

    fn pull(&mut self) {
        let token = loop {
            let token = self.source.next_token();
            if token.class != TokenClass::Comment {
                break token;
            }
        };

        let (dp, db) = delimiter_delta(&token);
        self.paren_count += dp;
        self.brace_count += db;

        if self.tokens.len() == self.capacity {
            self.tokens.pop_front();
        }
        self.tokens.push_back(token);
    }
}

fn delimiter_delta(token: &Token) -> (i32, i32) {
    match token.kind() {
        Some(TokenKind::LParen) => (1, 0),
        Some(TokenKind::RParen) => (-1, 0),
        Some(TokenKind::LBrace) => (0, 1),
        Some(TokenKind::RBrace) => (0, -1),
        _ => (0, 0),
    }
}
