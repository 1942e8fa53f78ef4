use lazy_static::lazy_static;
use std::fmt::Display;

use crate::Location;

lazy_static! {
    /// Keyword spellings sorted by text, searched with a binary search.
    pub static ref RESERVED_LOOKUP: Vec<(&'static str, TokenKind)> = {
        let mut table = vec![
            ("validate", TokenKind::Validate),
            ("function", TokenKind::Function),
        ];
        table.sort_by_key(|(text, _)| *text);
        table
    };
}

/// Looks `text` up in the keyword table.
pub fn lookup_keyword(text: &str) -> Option<TokenKind> {
    RESERVED_LOOKUP
        .binary_search_by_key(&text, |(keyword, _)| *keyword)
        .ok()
        .map(|index| RESERVED_LOOKUP[index].1)
}

/// Lexical class of a token.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenClass {
    Identifier,
    Keyword,
    Operator,
    String,
    Comment,
    IntLiteral,
    RealLiteral,
    OctLiteral,
    HexLiteral,
    Unknown,
    Eof,
}

impl Display for TokenClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenClass::Identifier => "identifier",
            TokenClass::Keyword => "keyword",
            TokenClass::Operator => "operator",
            TokenClass::String => "string",
            TokenClass::Comment => "comment",
            TokenClass::IntLiteral => "integer",
            TokenClass::RealLiteral => "real number",
            TokenClass::OctLiteral => "octal number",
            TokenClass::HexLiteral => "hex number",
            TokenClass::Unknown => "unknown",
            TokenClass::Eof => "end of file",
        };
        write!(f, "{}", name)
    }
}

/// Fixed token identities: operators, keywords and end of file.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Eof,

    Comma,
    LParen,
    RParen,
    LBrace,
    RBrace,

    // Reserved
    Function,
    Validate,
}

impl TokenKind {
    /// The source spelling of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Eof => "EOF",
            TokenKind::Comma => ",",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Function => "function",
            TokenKind::Validate => "validate",
        }
    }

    /// The class a token of this kind belongs to.
    pub fn class(&self) -> TokenClass {
        match self {
            TokenKind::Eof => TokenClass::Eof,
            TokenKind::Function | TokenKind::Validate => TokenClass::Keyword,
            _ => TokenClass::Operator,
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payload of a token. Keywords, operators and end of file store their kind,
/// every other class owns its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenValue {
    Text(String),
    Kind(TokenKind),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub class: TokenClass,
    pub value: TokenValue,
    pub location: Location,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{} {} ['{}']",
            self.location.line,
            self.location.column,
            self.class,
            self.as_str()
        )?;
        if self.class == TokenClass::Unknown {
            write!(f, " !unknown")?;
        }
        Ok(())
    }
}

impl Token {
    /// Text of the token, or the spelling of its kind.
    pub fn as_str(&self) -> &str {
        match &self.value {
            TokenValue::Text(text) => text,
            TokenValue::Kind(kind) => kind.as_str(),
        }
    }

    pub fn uses_text(&self) -> bool {
        matches!(self.value, TokenValue::Text(_))
    }

    pub fn kind(&self) -> Option<TokenKind> {
        match self.value {
            TokenValue::Kind(kind) => Some(kind),
            TokenValue::Text(_) => None,
        }
    }

    /// Consumes the token and returns its owned text.
    pub fn into_text(self) -> String {
        match self.value {
            TokenValue::Text(text) => text,
            TokenValue::Kind(kind) => String::from(kind.as_str()),
        }
    }

    pub fn is_operator(&self, kind: TokenKind) -> bool {
        self.class == TokenClass::Operator && self.kind() == Some(kind)
    }

    pub fn is_keyword(&self, kind: TokenKind) -> bool {
        self.class == TokenClass::Keyword && self.kind() == Some(kind)
    }

    pub fn is_eof(&self) -> bool {
        self.class == TokenClass::Eof
    }

    pub fn is_number(&self) -> bool {
        matches!(
            self.class,
            TokenClass::IntLiteral
                | TokenClass::RealLiteral
                | TokenClass::OctLiteral
                | TokenClass::HexLiteral
        )
    }

    /// Whether the token can stand as an argument value.
    pub fn is_atom(&self) -> bool {
        self.is_number()
            || matches!(
                self.class,
                TokenClass::Identifier | TokenClass::String | TokenClass::Unknown
            )
    }
}
