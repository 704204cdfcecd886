//! Contains the [`Lexer`], which scans a source unit line by line into a [`TokenStream`].

use std::{fmt::Debug, sync::Arc};

use getset::{CopyGetters, Getters};
use vscript_base::{diagnostic::Handler, source_file::Position};

use crate::{
    error::{self, Expected, UnrecognizedCharacter, UNTERMINATED_STRING_LITERAL},
    token::{KeywordTable, Lexeme, Scan, Token, TokenType},
    token_stream::TokenStream,
};

/// Is what the lexer does with a character that no token can start with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum UnrecognizedPolicy {
    /// Skips the character without a diagnostic.
    #[default]
    Ignore,

    /// Skips the character and reports an [`UnrecognizedCharacter`] error.
    Report,
}

/// The settings of a [`Lexer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Config {
    /// What to do with unrecognized characters.
    pub unrecognized: UnrecognizedPolicy,
}

/// Scans the lines of one source unit, in file order, into a [`TokenStream`].
///
/// Every call to [`Lexer::scan`] moves the lexer to the next row, whether or not the line
/// produced any token.
#[derive(Getters, CopyGetters)]
pub struct Lexer<'a> {
    /// Gets the name of the source unit being scanned.
    #[get = "pub"]
    file_name: Arc<str>,

    keywords: &'a KeywordTable,
    handler: &'a dyn Handler<error::Error>,

    /// Gets the settings of the lexer.
    #[get_copy = "pub"]
    config: Config,

    tokens: TokenStream,

    /// Gets the row the next scanned line will be at.
    #[get_copy = "pub"]
    row: usize,
}

impl<'a> Debug for Lexer<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lexer")
            .field("file_name", &self.file_name)
            .field("config", &self.config)
            .field("tokens", &self.tokens)
            .field("row", &self.row)
            .finish_non_exhaustive()
    }
}

impl<'a> Lexer<'a> {
    /// Creates a lexer for the source unit named `file_name`, positioned at row 0.
    ///
    /// Keywords are looked up in `keywords`, and lexical errors are sent to `handler`.
    pub fn new(
        file_name: impl Into<Arc<str>>,
        keywords: &'a KeywordTable,
        handler: &'a dyn Handler<error::Error>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            keywords,
            handler,
            config: Config::default(),
            tokens: TokenStream::default(),
            row: 0,
        }
    }

    /// Replaces the settings of the lexer.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Scans one line and appends its tokens to the stream.
    ///
    /// `line` must not contain line terminators. Lexical errors are reported to the handler and
    /// the scan carries on to the end of the line.
    pub fn scan(&mut self, line: &str) {
        let mut cursor = 0;

        while let Some(scan) = Token::classify(line, cursor, self.keywords) {
            match scan {
                Scan::Lexeme(lexeme) => self.push_lexeme(lexeme),
                Scan::Whitespace { .. } => {}
                Scan::Unrecognized { character, .. } => {
                    if self.config.unrecognized == UnrecognizedPolicy::Report {
                        self.handler.receive(
                            UnrecognizedCharacter::new(character, self.position_at(cursor)).into(),
                        );
                    }
                }
            }

            cursor = scan.end();
        }

        self.row += 1;
    }

    /// Reports that a token of kind `expected` is missing at `at`.
    pub fn report_error(&self, expected: TokenType, message: impl Into<String>, at: Position) {
        self.handler
            .receive(Expected::new(expected, message.into(), at).into());
    }

    /// Gets the tokens scanned so far.
    #[must_use]
    pub fn tokens(&self) -> &TokenStream { &self.tokens }

    /// Consumes the lexer and returns the tokens it scanned.
    #[must_use]
    pub fn into_token_stream(self) -> TokenStream { self.tokens }

    fn position_at(&self, column: usize) -> Position {
        Position::new(self.file_name.clone(), column, self.row)
    }

    fn push_lexeme(&mut self, lexeme: Lexeme<'_>) {
        if let Some(column) = lexeme.unterminated_at {
            self.report_error(
                TokenType::String,
                UNTERMINATED_STRING_LITERAL,
                self.position_at(column),
            );
        }

        self.tokens.push(Token {
            token_type: lexeme.token_type,
            position: self.position_at(lexeme.start),
            value: lexeme.value.to_owned(),
            is_malformed: lexeme.unterminated_at.is_some(),
        });
    }
}
