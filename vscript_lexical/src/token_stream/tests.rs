use proptest::{prop_assert_eq, proptest};
use vscript_base::{
    diagnostic::{Dummy, Storage},
    source_file::SourceFile,
};

use super::TokenStream;
use crate::{
    error::Error,
    lexer::{Config, Lexer},
    token::{KeywordTable, TokenType},
};

#[test]
fn tokenize_source_file() {
    let source_file = SourceFile::temp("fn main() -> {\r\n\n    return \"ok\";\n}\n").unwrap();
    let storage: Storage<Error> = Storage::new();

    let token_stream =
        TokenStream::tokenize(&source_file, KeywordTable::global(), Config::default(), &storage);

    let summary = token_stream
        .iter()
        .map(|token| {
            (
                token.token_type,
                token.value.as_str(),
                token.position.row,
                token.position.column,
            )
        })
        .collect::<Vec<_>>();

    assert_eq!(summary, vec![
        (TokenType::Keyword, "fn", 0, 0),
        (TokenType::Ident, "main", 0, 3),
        (TokenType::OParen, "(", 0, 7),
        (TokenType::CParen, ")", 0, 8),
        (TokenType::Arrow, "->", 0, 10),
        (TokenType::OCurly, "{", 0, 13),
        (TokenType::Keyword, "return", 2, 4),
        (TokenType::String, "ok", 2, 11),
        (TokenType::Semicolon, ";", 2, 15),
        (TokenType::CCurly, "}", 3, 0),
    ]);
    assert!(storage.is_empty());
    assert!(token_stream
        .iter()
        .all(|token| token.position.file_name == *source_file.name()));
}

#[test]
fn tokenize_empty_source_file() {
    let source_file = SourceFile::temp("").unwrap();
    let token_stream =
        TokenStream::tokenize(&source_file, KeywordTable::global(), Config::default(), &Dummy);

    assert!(token_stream.is_empty());
    assert!(token_stream.dissolve().is_empty());
}

proptest! {
    #[test]
    fn tokenize_matches_line_by_line_scan(
        lines in proptest::collection::vec("[ -~]{0,24}", 0..8)
    ) {
        let source_file = SourceFile::temp(lines.join("\n"))?;

        let whole_errors: Storage<Error> = Storage::new();
        let whole = TokenStream::tokenize(
            &source_file,
            KeywordTable::global(),
            Config::default(),
            &whole_errors,
        );

        let line_errors: Storage<Error> = Storage::new();
        let mut lexer = Lexer::new(source_file.name().clone(), KeywordTable::global(), &line_errors);
        for line in &lines {
            lexer.scan(line);
        }

        prop_assert_eq!(whole, lexer.into_token_stream());
        prop_assert_eq!(whole_errors.into_vec(), line_errors.into_vec());
    }
}
