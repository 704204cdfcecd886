//! Is a module containing the [`Token`] type, the keyword table, and the classifier that splits a
//! line into lexemes.

use std::{collections::HashMap, fmt::Display, str::FromStr};

use derive_new::new;
use enum_as_inner::EnumAsInner;
use lazy_static::lazy_static;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;
use vscript_base::source_file::Position;

/// Is an enumeration containing all kinds of tokens in the VScript programming language.
///
/// Displays as the variant name, e.g. `Semicolon`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    EnumIter,
    strum_macros::Display,
)]
#[allow(missing_docs)]
pub enum TokenType {
    /// Sentinel for a token that was never classified.
    #[default]
    None,
    Keyword,
    Ident,
    OCurly,
    CCurly,
    OParen,
    CParen,
    Colon,
    Semicolon,
    Arrow,
    String,
    Number,
    Plus,
    Minus,
    Multiply,
    Divide,
    Equals,
}

impl TokenType {
    /// Gets the token type that the given character forms on its own.
    ///
    /// `-` is not included since it may start an [`TokenType::Arrow`].
    #[must_use]
    pub fn from_single_character(character: char) -> Option<Self> {
        match character {
            '{' => Some(Self::OCurly),
            '}' => Some(Self::CCurly),
            '(' => Some(Self::OParen),
            ')' => Some(Self::CParen),
            ';' => Some(Self::Semicolon),
            ':' => Some(Self::Colon),
            '+' => Some(Self::Plus),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            '=' => Some(Self::Equals),
            _ => None,
        }
    }
}

/// Is an enumeration representing keywords in the VScript programming language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[allow(missing_docs)]
pub enum KeywordKind {
    Fn,
    Return,
}

impl KeywordKind {
    /// Gets the string representation of the keyword as a `&str`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fn => "fn",
            Self::Return => "return",
        }
    }
}

impl Display for KeywordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

/// Is an error that is returned when a string cannot be parsed into a [`KeywordKind`] in
/// [`FromStr`] trait implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Error)]
#[error("invalid string representation of keyword.")]
pub struct KeywordParseError;

impl FromStr for KeywordKind {
    type Err = KeywordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeywordTable::global().get(s).ok_or(KeywordParseError)
    }
}

/// Is a read-only mapping from reserved spellings to the keyword they spell.
///
/// Lexers borrow a table instead of reaching for global state; [`KeywordTable::global`] is the
/// instance holding every [`KeywordKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordTable {
    keywords: HashMap<&'static str, KeywordKind>,
}

impl KeywordTable {
    /// Creates a table holding every [`KeywordKind`].
    #[must_use]
    pub fn new() -> Self { KeywordKind::iter().collect() }

    /// Gets the process-wide table, built on first use.
    #[must_use]
    pub fn global() -> &'static Self {
        lazy_static! {
            static ref GLOBAL_KEYWORD_TABLE: KeywordTable = KeywordTable::new();
        }

        &GLOBAL_KEYWORD_TABLE
    }

    /// Looks up the keyword spelled by `word`.
    #[must_use]
    pub fn get(&self, word: &str) -> Option<KeywordKind> { self.keywords.get(word).copied() }
}

impl Default for KeywordTable {
    fn default() -> Self { Self::new() }
}

impl FromIterator<KeywordKind> for KeywordTable {
    fn from_iter<T: IntoIterator<Item = KeywordKind>>(iter: T) -> Self {
        Self {
            keywords: iter
                .into_iter()
                .map(|keyword| (keyword.as_str(), keyword))
                .collect(),
        }
    }
}

/// Represents a classified, positioned lexeme.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token {
    /// The kind of the token.
    pub token_type: TokenType,

    /// Where the lexeme starts.
    pub position: Position,

    /// The matched text. For string literals, the body without the quotes.
    pub value: String,

    /// Whether the lexeme was reported as a lexical error (an unterminated string literal).
    pub is_malformed: bool,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{} {}> {}", self.token_type, self.position, self.value)
    }
}

/// Is a lexeme found by [`Token::classify`], located by byte offsets into its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct Lexeme<'a> {
    /// The kind of token the lexeme forms.
    pub token_type: TokenType,

    /// The offset of the first character of the lexeme.
    pub start: usize,

    /// The offset one past the last character consumed.
    pub end: usize,

    /// The token value.
    pub value: &'a str,

    /// For an unterminated string literal, the offset right after its body.
    pub unterminated_at: Option<usize>,
}

impl<'a> Lexeme<'a> {
    fn spanning(token_type: TokenType, line: &'a str, start: usize, end: usize) -> Self {
        Self::new(token_type, start, end, &line[start..end], None)
    }
}

/// Is the outcome of classifying the character under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner)]
pub enum Scan<'a> {
    /// The cursor starts a lexeme.
    Lexeme(Lexeme<'a>),

    /// The cursor is on a whitespace character, which is skipped.
    Whitespace {
        /// The offset after the whitespace character.
        end: usize,
    },

    /// No token can start with the character under the cursor.
    Unrecognized {
        /// The offending character.
        character: char,

        /// The offset after the character.
        end: usize,
    },
}

impl<'a> Scan<'a> {
    /// Gets the offset the cursor moves to after this outcome.
    #[must_use]
    pub fn end(&self) -> usize {
        match self {
            Self::Lexeme(lexeme) => lexeme.end,
            Self::Whitespace { end } | Self::Unrecognized { end, .. } => *end,
        }
    }
}

impl Token {
    /// Finds the offset of the first character at or after `from` that fails the predicate.
    fn walk(line: &str, from: usize, predicate: impl Fn(char) -> bool) -> usize {
        line[from..]
            .char_indices()
            .find(|&(_, character)| !predicate(character))
            .map_or(line.len(), |(offset, _)| from + offset)
    }

    fn is_identifier_character(character: char) -> bool {
        character.is_ascii_alphanumeric() || character == '_'
    }

    fn handle_string_literal(line: &str, start: usize) -> Lexeme<'_> {
        let body_start = start + 1;
        let body_end = Self::walk(line, body_start, Self::is_identifier_character);
        let value = &line[body_start..body_end];

        if line[body_end..].starts_with('"') {
            Lexeme::new(TokenType::String, start, body_end + 1, value, None)
        } else {
            Lexeme::new(TokenType::String, start, body_end, value, Some(body_end))
        }
    }

    fn handle_numeric_literal(line: &str, start: usize) -> Lexeme<'_> {
        let end = Self::walk(line, start, |character| character.is_ascii_digit());
        Lexeme::spanning(TokenType::Number, line, start, end)
    }

    fn handle_identifier_and_keyword<'a>(
        line: &'a str,
        start: usize,
        keywords: &KeywordTable,
    ) -> Lexeme<'a> {
        let end = Self::walk(line, start, Self::is_identifier_character);
        let token_type = keywords
            .get(&line[start..end])
            .map_or(TokenType::Ident, |_| TokenType::Keyword);

        Lexeme::spanning(token_type, line, start, end)
    }

    /// Classifies the character at `cursor` in `line`.
    ///
    /// This is a pure function: the caller keeps the cursor and moves it to [`Scan::end`], which is
    /// always past at least one character. Returns [`None`] once `cursor` reaches the end of the
    /// line (or does not sit on a character boundary).
    #[must_use]
    pub fn classify<'a>(line: &'a str, cursor: usize, keywords: &KeywordTable) -> Option<Scan<'a>> {
        let character = line.get(cursor..)?.chars().next()?;
        let next = cursor + character.len_utf8();

        // punctuation and single-character operators
        if let Some(token_type) = TokenType::from_single_character(character) {
            return Some(Scan::Lexeme(Lexeme::spanning(
                token_type, line, cursor, next,
            )));
        }

        let scan = match character {
            '-' if line[next..].starts_with('>') => {
                Scan::Lexeme(Lexeme::spanning(TokenType::Arrow, line, cursor, next + 1))
            }
            '-' => Scan::Lexeme(Lexeme::spanning(TokenType::Minus, line, cursor, next)),
            '"' => Scan::Lexeme(Self::handle_string_literal(line, cursor)),
            character if character.is_ascii_digit() => {
                Scan::Lexeme(Self::handle_numeric_literal(line, cursor))
            }
            character if character.is_ascii_alphanumeric() => Scan::Lexeme(
                Self::handle_identifier_and_keyword(line, cursor, keywords),
            ),
            character if character.is_whitespace() => Scan::Whitespace { end: next },
            character => Scan::Unrecognized {
                character,
                end: next,
            },
        };

        Some(scan)
    }
}
