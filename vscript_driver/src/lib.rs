//! Runs the VScript lexer over a file and prints the resulting tokens.

use std::{
    cell::Cell,
    fs::File,
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

pub use clap::Parser;
use vscript_base::{
    diagnostic::Handler,
    log::{Message, Severity, SourceCodeDisplay},
    source_file::SourceFile,
};
use vscript_lexical::{
    error,
    lexer::{Config, UnrecognizedPolicy},
    token::KeywordTable,
    token_stream::TokenStream,
};

/// The arguments to the program.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, clap::Parser)]
#[clap(
    name = "vscript",
    version = "v0.1a",
    about = "VScript lexer: prints the tokens of a source file."
)]
pub struct Argument {
    /// The input file to tokenize.
    pub file: PathBuf,

    /// Reports characters that no token can start with instead of skipping them silently.
    #[clap(long = "report-unrecognized")]
    pub report_unrecognized: bool,

    /// Prints diagnostics with the offending source line highlighted.
    #[clap(long = "pretty")]
    pub pretty: bool,
}

impl Argument {
    /// Gets the lexer settings selected by the arguments.
    #[must_use]
    pub fn config(&self) -> Config {
        Config {
            unrecognized: if self.report_unrecognized {
                UnrecognizedPolicy::Report
            } else {
                UnrecognizedPolicy::Ignore
            },
        }
    }
}

/// A struct that implements [`Handler`] by printing every lexical error to the standard output
/// stream, where it interleaves with the token dump.
struct Printer<'a> {
    source_file: &'a SourceFile,
    pretty: bool,
    printed: Cell<usize>,
}

impl<'a> Printer<'a> {
    /// Creates a new [`Printer`].
    fn new(source_file: &'a SourceFile, pretty: bool) -> Self {
        Self {
            source_file,
            pretty,
            printed: Cell::new(0),
        }
    }

    fn printed(&self) -> usize { self.printed.get() }

    /// Renders the text printed for `error`, including the trailing newline.
    fn render(&self, error: &error::Error) -> String {
        if self.pretty {
            let line = self
                .source_file
                .line(error.position().row)
                .unwrap_or_default();

            format!(
                "{}\n{}",
                Message::new(Severity::Error, error.message()),
                SourceCodeDisplay::new(error.position(), line, error.help())
            )
        } else {
            format!("{error}\n")
        }
    }
}

impl<'a> Handler<error::Error> for Printer<'a> {
    fn receive(&self, error: error::Error) {
        print!("{}", self.render(&error));
        self.printed.set(self.printed.get() + 1);
    }
}

/// Writes every token on its own line as `<TypeName file:row:column> value`, followed by the
/// number of tokens.
///
/// # Errors
/// Any error returned by `writer`.
pub fn dump(token_stream: &TokenStream, writer: &mut impl Write) -> io::Result<()> {
    for token in token_stream.iter() {
        writeln!(writer, "{token}")?;
    }

    writeln!(writer, "{}", token_stream.len())
}

/// Runs the program with the given arguments.
///
/// Fails only when the file cannot be read; lexical errors are printed but do not change the
/// exit code.
pub fn run(argument: Argument) -> ExitCode {
    let source_file = match File::open(&argument.file)
        .map_err(vscript_base::source_file::Error::from)
        .and_then(|file| SourceFile::load(file, argument.file.clone()))
    {
        Ok(source_file) => source_file,
        Err(error) => {
            let msg = Message::new(
                Severity::Error,
                format!("{}: {error}", argument.file.display()),
            );

            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let printer = Printer::new(&source_file, argument.pretty);

    let token_stream = TokenStream::tokenize(
        &source_file,
        KeywordTable::global(),
        argument.config(),
        &printer,
    );

    if let Err(error) = dump(&token_stream, &mut io::stdout().lock()) {
        eprintln!("{}", Message::new(Severity::Error, error));
        return ExitCode::FAILURE;
    }

    if printer.printed() > 0 {
        let msg = Message::new(
            Severity::Warning,
            format!(
                "{}: {} lexical error(s) reported",
                argument.file.display(),
                printer.printed()
            ),
        );

        eprintln!("{msg}");
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use std::{io::Write, path::PathBuf, process::ExitCode};

    use vscript_base::{diagnostic::Storage, source_file::SourceFile};
    use vscript_lexical::{
        error::Error,
        lexer::{Config, UnrecognizedPolicy},
        token::KeywordTable,
        token_stream::TokenStream,
    };

    use super::{dump, run, Argument, Parser, Printer};

    const SOURCE_WITH_ERRORS: &str = "x = \"abc\n\t$ \"";

    fn strip_ansi(text: &str) -> String {
        let mut result = String::new();
        let mut chars = text.chars();

        while let Some(char) = chars.next() {
            if char == '\x1B' {
                for char in chars.by_ref() {
                    if char == 'm' {
                        break;
                    }
                }
            } else {
                result.push(char);
            }
        }

        result
    }

    #[test]
    fn dump_tokens_and_count() {
        let source_file = SourceFile::temp("fn f() -> {\n  return \"x;\n}").unwrap();
        let storage: Storage<Error> = Storage::new();
        let token_stream = TokenStream::tokenize(
            &source_file,
            KeywordTable::global(),
            Config::default(),
            &storage,
        );

        let mut output = Vec::new();
        dump(&token_stream, &mut output).unwrap();

        let name = source_file.name();
        let expected = format!(
            "<Keyword {name}:1:1> fn\n\
             <Ident {name}:1:4> f\n\
             <OParen {name}:1:5> (\n\
             <CParen {name}:1:6> )\n\
             <Arrow {name}:1:8> ->\n\
             <OCurly {name}:1:11> {{\n\
             <Keyword {name}:2:3> return\n\
             <String {name}:2:10> x\n\
             <Semicolon {name}:2:12> ;\n\
             <CCurly {name}:3:1> }}\n\
             10\n"
        );

        assert_eq!(String::from_utf8(output).unwrap(), expected);
        assert_eq!(storage.as_vec()[0].to_string(), format!(
            "{name}:2:12, Expected String, unterminated string literal"
        ));
    }

    #[test]
    fn dump_empty_stream() {
        let mut output = Vec::new();
        dump(&TokenStream::default(), &mut output).unwrap();

        assert_eq!(output, b"0\n");
    }

    #[test]
    fn parse_arguments() {
        let argument = Argument::try_parse_from(["vscript", "main.vs"]).unwrap();
        assert_eq!(argument.file.to_str(), Some("main.vs"));
        assert!(!argument.pretty);
        assert_eq!(argument.config().unrecognized, UnrecognizedPolicy::Ignore);

        let argument =
            Argument::try_parse_from(["vscript", "--report-unrecognized", "--pretty", "main.vs"])
                .unwrap();
        assert!(argument.pretty);
        assert_eq!(argument.config().unrecognized, UnrecognizedPolicy::Report);

        assert!(Argument::try_parse_from(["vscript"]).is_err());
    }

    #[test]
    fn version_is_build_id() {
        use clap::CommandFactory;

        assert_eq!(Argument::command().get_version(), Some("v0.1a"));
    }

    #[test]
    fn run_fails_on_unreadable_file() {
        let argument = Argument {
            file: PathBuf::from("/nonexistent/vscript/main.vs"),
            report_unrecognized: false,
            pretty: false,
        };

        assert_eq!(run(argument), ExitCode::FAILURE);
    }

    #[test]
    fn run_succeeds_despite_lexical_errors() {
        let mut file = tempfile::Builder::new()
            .prefix("vscript")
            .suffix(".vs")
            .tempfile()
            .unwrap();
        write!(file, "{SOURCE_WITH_ERRORS}").unwrap();

        let argument = Argument {
            file: file.path().to_owned(),
            report_unrecognized: true,
            pretty: true,
        };
        assert_eq!(run(argument.clone()), ExitCode::SUCCESS);

        let argument = Argument {
            pretty: false,
            ..argument
        };
        assert_eq!(run(argument), ExitCode::SUCCESS);
    }

    #[test]
    fn render_diagnostics() {
        let source_file = SourceFile::temp(SOURCE_WITH_ERRORS).unwrap();
        let storage: Storage<Error> = Storage::new();
        let config = Config {
            unrecognized: UnrecognizedPolicy::Report,
        };
        let token_stream =
            TokenStream::tokenize(&source_file, KeywordTable::global(), config, &storage);
        assert_eq!(token_stream.len(), 4);

        let name = source_file.name();
        let errors = storage.into_vec();
        let string_help = "help: string literals hold letters, digits and `_` only, and close \
                           with `\"` on the same line";

        let plain = Printer::new(&source_file, false);
        assert_eq!(
            plain.render(&errors[0]),
            format!("{name}:1:9, Expected String, unterminated string literal\n")
        );

        let pretty = Printer::new(&source_file, true);
        let rendered = errors
            .iter()
            .map(|error| strip_ansi(&pretty.render(error)))
            .collect::<Vec<_>>();
        assert_eq!(rendered.len(), 3);

        // the caret may sit one past the last character of the line
        assert_eq!(rendered[0].lines().collect::<Vec<_>>(), vec![
            "[error]: expected String: unterminated string literal".to_owned(),
            format!(" --> {name}:1:9"),
            "  ┃ ".to_owned(),
            "1 ┃ x = \"abc".to_owned(),
            format!("  ┃         ^ {string_help}"),
        ]);
        assert_eq!(rendered[1].lines().collect::<Vec<_>>(), vec![
            "[error]: unrecognized character '$'".to_owned(),
            format!(" --> {name}:2:2"),
            "  ┃ ".to_owned(),
            "2 ┃     $ \"".to_owned(),
            "  ┃     ^ help: this character is not part of the language".to_owned(),
        ]);
        assert_eq!(rendered[2].lines().collect::<Vec<_>>(), vec![
            "[error]: expected String: unterminated string literal".to_owned(),
            format!(" --> {name}:2:5"),
            "  ┃ ".to_owned(),
            "2 ┃     $ \"".to_owned(),
            format!("  ┃        ^ {string_help}"),
        ]);
    }
}
