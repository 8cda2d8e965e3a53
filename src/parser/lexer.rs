//! Lexer (tokenizer) for C- source code
//!
//! A hand-written DFA over the characters of a [`CharSource`]. Each call to
//! [`Lexer::next_token`] runs the automaton from its start state until one
//! token is recognised, so the parser pulls tokens lazily, one at a time.
//!
//! # Lexical grammar
//!
//! - identifier: a letter followed by letters or digits; keywords are
//!   identifiers found in the [`ReservedWords`] table
//! - number: one or more digits; a letter directly after the digits is an error
//! - `< <= > >= = == !=`: one character of lookahead, pushed back when unused
//! - `+ - * / ; , ( ) { } [ ]`: single characters
//! - `/* ... */` comments and whitespace separate tokens and are skipped
//!
//! Identifiers and numbers end at the first character outside their alphabet;
//! that character is pushed back and starts the next token. Errors are
//! fail-fast: the first invalid lexeme is returned as a [`LexError`] and the
//! caller is expected to stop.

use super::ast::SourceLocation;
use super::keywords::ReservedWords;
use super::source::CharSource;
use super::token::{Token, TokenKind, MAX_LEXEME_LEN};
use std::fmt;
use thiserror::Error;

/// Why a lexeme was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// A character that cannot start any token
    UnexpectedChar,
    /// `!` not followed by `=`
    LoneBang,
    /// Digits followed directly by a letter, e.g. `12ab`
    MalformedNumber,
    /// Identifier or number longer than [`MAX_LEXEME_LEN`]
    LexemeTooLong,
    /// `/*` without a closing `*/`
    UnterminatedComment,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::UnexpectedChar => write!(f, "invalid character"),
            LexErrorKind::LoneBang => write!(f, "'!' must be followed by '='"),
            LexErrorKind::MalformedNumber => write!(f, "malformed number"),
            LexErrorKind::LexemeTooLong => {
                write!(f, "lexeme longer than {} characters", MAX_LEXEME_LEN)
            }
            LexErrorKind::UnterminatedComment => write!(f, "unterminated comment"),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "lexical error at line {}, column {}: {kind} \"{lexeme}\"",
    .location.line,
    .location.column
)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub lexeme: String,
    pub location: SourceLocation,
}

impl LexError {
    /// The rejected lexeme as an error-class token
    pub fn token(&self) -> Token {
        Token::new(TokenKind::Error, self.lexeme.clone(), self.location)
    }
}

/// DFA states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    InIdent,
    InNumber,
    SawLt,
    SawGt,
    SawEq,
    SawBang,
    SawSlash,
    InComment,
    CommentStar,
}

fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

/// Lexer for C- source code
pub struct Lexer {
    source: CharSource,
    keywords: ReservedWords,
    echo: bool,
    failed: bool,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            source: CharSource::new(input),
            keywords: ReservedWords::new(),
            echo: false,
            failed: false,
        }
    }

    /// Print every token to stdout as it is produced.
    pub fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Current cursor position in the source
    pub fn location(&self) -> SourceLocation {
        self.source.location()
    }

    /// Tokenize the remaining input, stopping at the first error.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        self.by_ref().collect()
    }

    /// Next token, `Ok(None)` at end of input.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        let result = self.scan();

        match &result {
            Ok(Some(token)) => {
                log::trace!(
                    "token {} {:?} at {}:{}",
                    token.kind.class_name(),
                    token.lexeme,
                    token.line(),
                    token.column()
                );
                if self.echo {
                    print_token(token);
                }
            }
            Err(err) => {
                if self.echo {
                    print_token(&err.token());
                }
            }
            Ok(None) => log::trace!("end of input at {:?}", self.location()),
        }

        result
    }

    fn scan(&mut self) -> Result<Option<Token>, LexError> {
        let mut state = State::Start;
        let mut lexeme = String::new();
        let mut comment_start = self.source.location();

        loop {
            let Some(ch) = self.source.next() else {
                return self.finish(state, lexeme, comment_start);
            };

            match state {
                State::Start => {
                    if is_whitespace(ch) {
                        continue;
                    }

                    if ch.is_ascii_alphabetic() {
                        lexeme.push(ch);
                        state = State::InIdent;
                        continue;
                    }

                    if ch.is_ascii_digit() {
                        lexeme.push(ch);
                        state = State::InNumber;
                        continue;
                    }

                    let kind = match ch {
                        '+' => TokenKind::Plus,
                        '-' => TokenKind::Minus,
                        '*' => TokenKind::Star,
                        ';' => TokenKind::Semicolon,
                        ',' => TokenKind::Comma,
                        '(' => TokenKind::LParen,
                        ')' => TokenKind::RParen,
                        '{' => TokenKind::LBrace,
                        '}' => TokenKind::RBrace,
                        '[' => TokenKind::LBracket,
                        ']' => TokenKind::RBracket,
                        '<' => {
                            state = State::SawLt;
                            continue;
                        }
                        '>' => {
                            state = State::SawGt;
                            continue;
                        }
                        '=' => {
                            state = State::SawEq;
                            continue;
                        }
                        '!' => {
                            state = State::SawBang;
                            continue;
                        }
                        '/' => {
                            let here = self.source.location();
                            comment_start = SourceLocation::new(here.line, here.column - 1);
                            state = State::SawSlash;
                            continue;
                        }
                        _ => {
                            return Err(self.error(LexErrorKind::UnexpectedChar, ch.to_string()));
                        }
                    };

                    return Ok(Some(self.emit(kind, ch.to_string())));
                }

                State::InIdent => {
                    if ch.is_ascii_alphanumeric() {
                        self.extend(&mut lexeme, ch)?;
                    } else {
                        self.source.pushback(ch);
                        let kind = self.keywords.lookup(&lexeme);
                        return Ok(Some(self.emit(kind, lexeme)));
                    }
                }

                State::InNumber => {
                    if ch.is_ascii_digit() {
                        self.extend(&mut lexeme, ch)?;
                    } else if ch.is_ascii_alphabetic() {
                        lexeme.push(ch);
                        return Err(self.error(LexErrorKind::MalformedNumber, lexeme));
                    } else {
                        self.source.pushback(ch);
                        return Ok(Some(self.emit(TokenKind::Num, lexeme)));
                    }
                }

                State::SawLt => {
                    return Ok(Some(self.one_or_two(ch, TokenKind::Lt, "<", TokenKind::Le, "<=")));
                }
                State::SawGt => {
                    return Ok(Some(self.one_or_two(ch, TokenKind::Gt, ">", TokenKind::Ge, ">=")));
                }
                State::SawEq => {
                    return Ok(Some(self.one_or_two(ch, TokenKind::Eq, "=", TokenKind::EqEq, "==")));
                }
                State::SawBang => {
                    if ch == '=' {
                        return Ok(Some(self.emit(TokenKind::NotEq, "!=")));
                    }
                    self.source.pushback(ch);
                    return Err(self.error(LexErrorKind::LoneBang, "!".to_string()));
                }

                State::SawSlash => {
                    if ch == '*' {
                        state = State::InComment;
                    } else {
                        self.source.pushback(ch);
                        return Ok(Some(self.emit(TokenKind::Slash, "/")));
                    }
                }
                State::InComment => {
                    if ch == '*' {
                        state = State::CommentStar;
                    }
                }
                State::CommentStar => match ch {
                    '/' => state = State::Start,
                    '*' => {}
                    _ => state = State::InComment,
                },
            }
        }
    }

    /// Resolve a state at end of input; the pending lexeme is terminated by EOF.
    fn finish(
        &mut self,
        state: State,
        lexeme: String,
        comment_start: SourceLocation,
    ) -> Result<Option<Token>, LexError> {
        let token = match state {
            State::Start => return Ok(None),
            State::InIdent => {
                let kind = self.keywords.lookup(&lexeme);
                self.emit(kind, lexeme)
            }
            State::InNumber => self.emit(TokenKind::Num, lexeme),
            State::SawLt => self.emit(TokenKind::Lt, "<"),
            State::SawGt => self.emit(TokenKind::Gt, ">"),
            State::SawEq => self.emit(TokenKind::Eq, "="),
            State::SawSlash => self.emit(TokenKind::Slash, "/"),
            State::SawBang => {
                return Err(self.error(LexErrorKind::LoneBang, "!".to_string()));
            }
            State::InComment | State::CommentStar => {
                return Err(LexError {
                    kind: LexErrorKind::UnterminatedComment,
                    lexeme: "/*".to_string(),
                    location: comment_start,
                });
            }
        };
        Ok(Some(token))
    }

    /// Two-character operator if `next` is `=`, otherwise push `next` back.
    fn one_or_two(
        &mut self,
        next: char,
        single: TokenKind,
        single_text: &str,
        double: TokenKind,
        double_text: &str,
    ) -> Token {
        if next == '=' {
            self.emit(double, double_text)
        } else {
            self.source.pushback(next);
            self.emit(single, single_text)
        }
    }

    fn extend(&self, lexeme: &mut String, ch: char) -> Result<(), LexError> {
        if lexeme.len() >= MAX_LEXEME_LEN {
            // The rejected character has been consumed but is not part of the lexeme
            let here = self.source.location();
            return Err(LexError {
                kind: LexErrorKind::LexemeTooLong,
                lexeme: lexeme.clone(),
                location: SourceLocation::new(
                    here.line,
                    here.column.saturating_sub(lexeme.len() + 1),
                ),
            });
        }
        lexeme.push(ch);
        Ok(())
    }

    /// Build a token positioned at the start of its lexeme.
    fn emit(&self, kind: TokenKind, lexeme: impl Into<String>) -> Token {
        let lexeme = lexeme.into();
        let location = self.start_of(&lexeme);
        Token::new(kind, lexeme, location)
    }

    fn error(&self, kind: LexErrorKind, lexeme: String) -> LexError {
        LexError {
            kind,
            location: self.start_of(&lexeme),
            lexeme,
        }
    }

    // Cursor column minus the lexeme length
    fn start_of(&self, lexeme: &str) -> SourceLocation {
        SourceLocation::new(
            self.source.line(),
            self.source.column().saturating_sub(lexeme.chars().count()),
        )
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_token() {
            Ok(Some(token)) => Some(Ok(token)),
            Ok(None) => None,
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

fn print_token(token: &Token) {
    println!(
        "{} \"{}\" [line: {}]",
        token.kind.class_name(),
        token.lexeme,
        token.line()
    );
}
