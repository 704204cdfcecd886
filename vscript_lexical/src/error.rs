//! Contains all kinds of lexical errors that can occur while tokenizing the source code.
//!
//! Lexical errors never stop the scan. They are handed to a
//! [`Handler`](vscript_base::diagnostic::Handler) as soon as they are found.

use std::fmt::Display;

use derive_more::From;
use derive_new::new;
use enum_as_inner::EnumAsInner;
use vscript_base::source_file::Position;

use crate::token::TokenType;

/// The message reported when a string literal is not closed before the end of its line.
pub const UNTERMINATED_STRING_LITERAL: &str = "unterminated string literal";

/// A token of a particular kind was expected but the line did not provide it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct Expected {
    /// The kind of token that was expected.
    pub expected: TokenType,

    /// Describes what went wrong.
    pub message: String,

    /// Where the expected token is missing.
    pub position: Position,
}

impl Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, Expected {}, {}",
            self.position, self.expected, self.message
        )
    }
}

/// The line contains a character that no token can start with.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct UnrecognizedCharacter {
    /// The offending character.
    pub character: char,

    /// Where the character is.
    pub position: Position,
}

impl Display for UnrecognizedCharacter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, unrecognized character {:?}",
            self.position, self.character
        )
    }
}

/// Is an enumeration containing all kinds of lexical errors that can occur while tokenizing the
/// source code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner, From)]
#[allow(missing_docs)]
pub enum Error {
    Expected(Expected),
    UnrecognizedCharacter(UnrecognizedCharacter),
}

impl Error {
    /// Gets the position the error points at.
    #[must_use]
    pub fn position(&self) -> &Position {
        match self {
            Self::Expected(err) => &err.position,
            Self::UnrecognizedCharacter(err) => &err.position,
        }
    }

    /// Gets a one-line description of the error, without its position.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Expected(err) => format!("expected {}: {}", err.expected, err.message),
            Self::UnrecognizedCharacter(err) => {
                format!("unrecognized character {:?}", err.character)
            }
        }
    }

    /// Gets a hint on how to fix the error, if there is one.
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            Self::Expected(Expected {
                expected: TokenType::String,
                ..
            }) => Some(
                "string literals hold letters, digits and `_` only, and close with `\"` on the \
                 same line",
            ),
            Self::Expected(_) => None,
            Self::UnrecognizedCharacter(_) => Some("this character is not part of the language"),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expected(err) => write!(f, "{err}"),
            Self::UnrecognizedCharacter(err) => write!(f, "{err}"),
        }
    }
}
