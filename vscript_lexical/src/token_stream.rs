//! Contains the [`TokenStream`] struct, the final output of the lexical analysis phase.

use derive_more::Deref;
use vscript_base::{diagnostic::Handler, source_file::SourceFile};

use crate::{
    error,
    lexer::{Config, Lexer},
    token::{KeywordTable, Token},
};

/// Is the ordered list of tokens of a source unit.
///
/// Tokens are stored in source order: by row, then by column. The stream only ever grows, and
/// only through a [`Lexer`].
///
/// This struct is meant to be used by the next stage of the compilation process.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deref)]
pub struct TokenStream {
    #[deref]
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Tokenizes every line of the given source file, in order.
    ///
    /// The positions of the tokens carry the name of the source file. Scanning the same lines one
    /// by one with [`Lexer::scan`] yields the same stream.
    #[must_use]
    pub fn tokenize(
        source_file: &SourceFile,
        keywords: &KeywordTable,
        config: Config,
        handler: &dyn Handler<error::Error>,
    ) -> Self {
        let mut lexer =
            Lexer::new(source_file.name().clone(), keywords, handler).with_config(config);

        for line in source_file.lines() {
            lexer.scan(line);
        }

        lexer.into_token_stream()
    }

    pub(crate) fn push(&mut self, token: Token) { self.tokens.push(token); }

    /// Dissolves this struct into the underlying vector of tokens.
    #[must_use]
    pub fn dissolve(self) -> Vec<Token> { self.tokens }
}

#[cfg(test)]
mod tests;
