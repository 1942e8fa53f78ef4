use std::{fs, io, path::Path, vec::IntoIter};

use log::trace;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Location, MK_OPERATOR, MK_TOKEN,
};

use super::tokens::{lookup_keyword, Token, TokenClass, TokenKind};

/// Starting capacity of the scratch buffer a token's text is collected in.
const INITIAL_BUFFER_SIZE: usize = 16;

/// Character-level scanner producing one [`Token`] per call.
///
/// The lexer never fails: malformed input becomes an `Unknown` token and,
/// while error notifications are enabled, a diagnostic that the caller
/// collects with [`Lexer::take_errors`].
pub struct Lexer {
    chars: IntoIter<char>,
    /// Single character of pushback.
    pushback: Option<char>,
    is_eof: bool,
    location: Location,
    file: String,
    error_notifications: bool,
    errors: Vec<Error>,
}

impl Lexer {
    pub fn new(source: &str, file: Option<String>) -> Lexer {
        Lexer {
            chars: source.chars().collect::<Vec<char>>().into_iter(),
            pushback: None,
            is_eof: false,
            location: Location::new(1, 0),
            file: file.unwrap_or_else(|| String::from("<input>")),
            error_notifications: false,
            errors: vec![],
        }
    }

    /// Reads `path` and creates a lexer over its contents.
    pub fn from_path(path: &Path) -> io::Result<Lexer> {
        let source = fs::read_to_string(path)?;
        Ok(Lexer::new(
            &source,
            Some(path.to_string_lossy().into_owned()),
        ))
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn set_error_notifications(&mut self, enabled: bool) {
        self.error_notifications = enabled;
    }

    /// Drains the diagnostics recorded since the last call.
    pub fn take_errors(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.errors)
    }

    fn report(&mut self, error: ErrorImpl, location: Location) {
        if self.error_notifications {
            self.errors.push(Error::new(error, location));
        }
    }

    /// Gets one character. Once the end of input is reached every later call
    /// returns `None`.
    fn getch(&mut self) -> Option<char> {
        if self.is_eof {
            return None;
        }

        let ch = match self.pushback.take() {
            Some(ch) => ch,
            None => match self.chars.next() {
                Some(ch) => ch,
                None => {
                    self.is_eof = true;
                    return None;
                }
            },
        };

        if ch == '\n' {
            self.location.line += 1;
            self.location.column = 0;
        } else {
            self.location.column += 1;
        }

        Some(ch)
    }

    /// Puts `ch` back so the next `getch` returns it again.
    ///
    /// The column is only decremented, so after pushing a newline back it
    /// reads `-1` instead of the length of the previous line.
    fn ungetch(&mut self, ch: Option<char>) {
        let Some(ch) = ch else {
            return;
        };

        assert!(
            self.pushback.is_none(),
            "lexer holds a single character of pushback"
        );

        if ch == '\n' {
            self.location.line -= 1;
        }
        self.location.column -= 1;
        self.pushback = Some(ch);
    }

    /// Reads the next token from the stream.
    pub fn next_token(&mut self) -> Token {
        let mut c = self.getch();
        while matches!(c, Some(ch) if ch.is_whitespace()) {
            c = self.getch();
        }
        let location = self.location;

        let token = match c {
            None => MK_OPERATOR!(TokenKind::Eof, location),
            Some('#') => self.read_comment(location),
            Some('"') => self.read_string(location),
            Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => self.read_id(ch, location),
            Some('0') => self.read_zero(location),
            Some(ch) if ch.is_ascii_digit() || ch == '.' => self.read_number(ch, location),
            Some(',') => MK_OPERATOR!(TokenKind::Comma, location),
            Some('(') => MK_OPERATOR!(TokenKind::LParen, location),
            Some(')') => MK_OPERATOR!(TokenKind::RParen, location),
            Some('{') => MK_OPERATOR!(TokenKind::LBrace, location),
            Some('}') => MK_OPERATOR!(TokenKind::RBrace, location),
            Some(ch) => {
                self.report(ErrorImpl::UnrecognisedToken { token: ch }, location);
                MK_TOKEN!(TokenClass::Unknown, ch.to_string(), location)
            }
        };

        trace!("{}:{}", self.file, token);
        token
    }

    fn read_comment(&mut self, location: Location) -> Token {
        let mut buffer = String::with_capacity(INITIAL_BUFFER_SIZE);

        while let Some(c) = self.getch() {
            if c == '\n' {
                break;
            }
            buffer.push(c);
        }

        MK_TOKEN!(TokenClass::Comment, buffer, location)
    }

    /// Reads a string literal verbatim, quotes and escapes included.
    fn read_string(&mut self, location: Location) -> Token {
        let mut buffer = String::with_capacity(INITIAL_BUFFER_SIZE);
        buffer.push('"');

        loop {
            let Some(c) = self.getch() else {
                self.report(ErrorImpl::UnterminatedString, location);
                return MK_TOKEN!(TokenClass::Unknown, buffer, location);
            };

            buffer.push(c);
            if c == '\\' {
                let Some(escaped) = self.getch() else {
                    self.report(ErrorImpl::UnterminatedString, location);
                    return MK_TOKEN!(TokenClass::Unknown, buffer, location);
                };
                buffer.push(escaped);
            } else if c == '"' {
                break;
            }
        }

        MK_TOKEN!(TokenClass::String, buffer, location)
    }

    fn read_id(&mut self, first: char, location: Location) -> Token {
        let mut buffer = String::with_capacity(INITIAL_BUFFER_SIZE);
        buffer.push(first);

        loop {
            let c = self.getch();
            match c {
                Some(ch) if ch.is_ascii_alphanumeric() || ch == '_' => buffer.push(ch),
                _ => {
                    self.ungetch(c);
                    break;
                }
            }
        }

        match lookup_keyword(&buffer) {
            Some(kind) => MK_OPERATOR!(kind, location),
            None => MK_TOKEN!(TokenClass::Identifier, buffer, location),
        }
    }

    /// A leading `0` starts a hex, octal or decimal literal.
    fn read_zero(&mut self, location: Location) -> Token {
        let c = self.getch();
        match c {
            Some(x @ ('x' | 'X')) => self.read_hex(x, location),
            Some(ch) if ch.is_ascii_digit() => {
                self.ungetch(c);
                self.read_octal(location)
            }
            _ => {
                self.ungetch(c);
                self.read_number('0', location)
            }
        }
    }

    fn read_hex(&mut self, x: char, location: Location) -> Token {
        let mut buffer = String::with_capacity(INITIAL_BUFFER_SIZE);
        buffer.push('0');
        buffer.push(x);

        loop {
            let c = self.getch();
            match c {
                Some(ch) if ch.is_ascii_hexdigit() => buffer.push(ch),
                _ => {
                    self.ungetch(c);
                    break;
                }
            }
        }

        if buffer.len() == 2 {
            self.report(ErrorImpl::HexDigitExpected, self.location);
            return MK_TOKEN!(TokenClass::Unknown, buffer, location);
        }

        MK_TOKEN!(TokenClass::HexLiteral, buffer, location)
    }

    fn read_octal(&mut self, location: Location) -> Token {
        let mut buffer = String::with_capacity(INITIAL_BUFFER_SIZE);
        buffer.push('0');

        loop {
            let c = self.getch();
            match c {
                Some(digit @ '0'..='7') => buffer.push(digit),
                Some(digit @ ('8' | '9')) => {
                    buffer.push(digit);
                    self.report(ErrorImpl::InvalidOctalDigit { digit }, self.location);
                    self.read_digit_run(&mut buffer);
                    return MK_TOKEN!(TokenClass::Unknown, buffer, location);
                }
                _ => {
                    self.ungetch(c);
                    break;
                }
            }
        }

        MK_TOKEN!(TokenClass::OctLiteral, buffer, location)
    }

    /// Appends the rest of a decimal digit run to `buffer`.
    fn read_digit_run(&mut self, buffer: &mut String) {
        loop {
            let c = self.getch();
            match c {
                Some(digit) if digit.is_ascii_digit() => buffer.push(digit),
                _ => {
                    self.ungetch(c);
                    break;
                }
            }
        }
    }

    /// Reads a decimal integer or real number starting with `first`.
    ///
    /// A repeated `.` or exponent is consumed into the `Unknown` token it
    /// produces; a character that merely fails to continue the number is
    /// pushed back.
    fn read_number(&mut self, first: char, location: Location) -> Token {
        let mut buffer = String::with_capacity(INITIAL_BUFFER_SIZE);
        let mut saw_dot = false;
        let mut saw_exp = false;

        buffer.push(first);

        if first == '.' {
            saw_dot = true;

            let c = self.getch();
            match c {
                Some(digit) if digit.is_ascii_digit() => buffer.push(digit),
                _ => {
                    let found = c.map(String::from).unwrap_or_else(|| String::from("EOF"));
                    self.report(ErrorImpl::DigitExpected { found }, self.location);
                    self.ungetch(c);
                    return MK_TOKEN!(TokenClass::Unknown, buffer, location);
                }
            }
        }

        loop {
            let c = self.getch();
            match c {
                Some(digit) if digit.is_ascii_digit() => buffer.push(digit),
                Some('.') => {
                    buffer.push('.');
                    if saw_dot {
                        self.report(ErrorImpl::RepeatedDot, self.location);
                        return MK_TOKEN!(TokenClass::Unknown, buffer, location);
                    }
                    if saw_exp {
                        let found = String::from(".");
                        self.report(ErrorImpl::DigitExpected { found }, self.location);
                        return MK_TOKEN!(TokenClass::Unknown, buffer, location);
                    }
                    saw_dot = true;
                }
                Some(exp @ ('e' | 'E')) => {
                    buffer.push(exp);
                    if saw_exp {
                        self.report(ErrorImpl::RepeatedExponent, self.location);
                        return MK_TOKEN!(TokenClass::Unknown, buffer, location);
                    }
                    saw_exp = true;

                    let mut c = self.getch();
                    if let Some(sign @ ('+' | '-')) = c {
                        buffer.push(sign);
                        c = self.getch();
                    }

                    match c {
                        Some(digit) if digit.is_ascii_digit() => buffer.push(digit),
                        _ => {
                            self.report(ErrorImpl::ExponentDigitExpected, self.location);
                            self.ungetch(c);
                            return MK_TOKEN!(TokenClass::Unknown, buffer, location);
                        }
                    }
                }
                _ => {
                    self.ungetch(c);
                    break;
                }
            }
        }

        if saw_dot || saw_exp {
            MK_TOKEN!(TokenClass::RealLiteral, buffer, location)
        } else {
            MK_TOKEN!(TokenClass::IntLiteral, buffer, location)
        }
    }
}

/// Lexes `source` into a vector ending with the first `Eof` token.
pub fn tokenize(source: &str, file: Option<String>) -> Vec<Token> {
    let mut lex = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();
        let done = token.is_eof();
        tokens.push(token);
        if done {
            break;
        }
    }

    tokens
}
