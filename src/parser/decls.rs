//! Grammar rules for modules, functions, argument groups and values.
//!
//! ```text
//! Module    := 'validate' Ident '{' Function* '}'
//! Function  := 'function' Ident '{' [ ArgGroup (',' ArgGroup)* ] '}'
//! ArgGroup  := '(' Value (',' Value)* ')'
//! Value     := identifier | string | number | unknown
//! ```

use log::debug;

use crate::{
    ast::ast::TreeId,
    errors::errors::ErrorImpl,
    lexer::tokens::TokenKind,
};

use super::{
    buffer::TokenSource,
    parser::{Parser, ParserState},
};

impl<'s, S: TokenSource> Parser<'s, S> {
    pub(crate) fn parse_module(&mut self) -> TreeId {
        let start = self.depths();

        let Some(keyword) = self.expect(TokenKind::Validate) else {
            self.skip_until(TokenKind::RBrace, start);
            return TreeId::ERROR_MARK;
        };
        let Some(name) = self.expect_identifier("module") else {
            self.skip_until(TokenKind::RBrace, start);
            return TreeId::ERROR_MARK;
        };
        let Some(brace) = self.expect(TokenKind::LBrace) else {
            self.skip_until(TokenKind::RBrace, start);
            return TreeId::ERROR_MARK;
        };

        let module_name = name.as_str().to_string();
        let functions = self.session.arena_mut().make_list(brace.location);

        while self.peek().is_keyword(TokenKind::Function) {
            let function = self.within(ParserState::InFunction, Self::parse_function);
            if function.is_error() {
                continue;
            }

            let arena = self.session.arena();
            let function_name = arena.name_of(function);
            let repeated = arena
                .children(functions)
                .iter()
                .any(|other| arena.name_of(*other) == function_name);
            if repeated {
                let warning = ErrorImpl::FunctionAlreadyDefined {
                    function: function_name.to_string(),
                    module: module_name.clone(),
                };
                let location = arena.location(function);
                self.warning(warning, location);
            }

            self.session.arena_mut().list_append(functions, function);
        }

        if self.expect(TokenKind::RBrace).is_none() {
            self.session.arena_mut().free_tree(functions);
            self.skip_until(TokenKind::RBrace, start);
            return TreeId::ERROR_MARK;
        }

        let arena = self.session.arena_mut();
        let name = arena.make_value_token(name);
        arena.make_module(name, functions, keyword.location)
    }

    pub(crate) fn parse_function(&mut self) -> TreeId {
        let start = self.depths();

        let Some(keyword) = self.expect(TokenKind::Function) else {
            self.skip_until(TokenKind::RBrace, start);
            return TreeId::ERROR_MARK;
        };
        let Some(name) = self.expect_identifier("function") else {
            self.skip_until(TokenKind::RBrace, start);
            return TreeId::ERROR_MARK;
        };
        let Some(brace) = self.expect(TokenKind::LBrace) else {
            self.skip_until(TokenKind::RBrace, start);
            return TreeId::ERROR_MARK;
        };

        let arg_groups = if self.peek().is_operator(TokenKind::RBrace) {
            self.warning(
                ErrorImpl::EmptyFunction {
                    function: name.as_str().to_string(),
                },
                name.location,
            );
            self.session.arena_mut().make_list(brace.location)
        } else {
            self.parse_list(Self::parse_arg_group, TokenKind::Comma)
        };

        if arg_groups.is_error() {
            self.skip_until(TokenKind::RBrace, start);
            return TreeId::ERROR_MARK;
        }

        if self.expect(TokenKind::RBrace).is_none() {
            self.session.arena_mut().free_tree(arg_groups);
            self.skip_until(TokenKind::RBrace, start);
            return TreeId::ERROR_MARK;
        }

        let arena = self.session.arena_mut();
        let name = arena.make_value_token(name);
        arena.make_function(name, arg_groups, keyword.location)
    }

    pub(crate) fn parse_arg_group(&mut self) -> TreeId {
        self.within(ParserState::InArgGroup, Self::parse_arg_group_inner)
    }

    fn parse_arg_group_inner(&mut self) -> TreeId {
        let start = self.depths();

        if self.expect(TokenKind::LParen).is_none() {
            self.skip_until(TokenKind::RParen, start);
            return TreeId::ERROR_MARK;
        }

        let values = self.parse_list(Self::parse_value, TokenKind::Comma);
        if values.is_error() {
            // The value was reported already, skip the rest quietly.
            self.skip_until(TokenKind::RParen, start);
            return TreeId::ERROR_MARK;
        }

        if self.expect(TokenKind::RParen).is_none() {
            self.session.arena_mut().free_tree(values);
            self.skip_until(TokenKind::RParen, start);
            return TreeId::ERROR_MARK;
        }

        values
    }

    pub(crate) fn parse_value(&mut self) -> TreeId {
        let token = self.next_token();
        if !token.is_atom() {
            self.unexpected(&token, Some("value expected"));
            self.unget();
            return TreeId::ERROR_MARK;
        }

        debug!("value `{}` at {}", token.as_str(), token.location);
        self.session.arena_mut().make_value_token(token)
    }
}
