//! Provides the functions related to logging/printing messages to the console.

use std::fmt::Display;

use derive_new::new;

use crate::source_file::Position;

/// Is an ANSI text attribute applied when printing to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Paint {
    Bold,
    Underline,
    Red,
    Green,
    Yellow,
    Cyan,
}

impl Paint {
    /// Applies the attribute to the given displayable object.
    pub fn with<T>(self, display: T) -> Painted<T> {
        Painted {
            paint: self,
            display,
        }
    }

    fn escape_code(self) -> &'static str {
        match self {
            Self::Bold => "\x1B[1m",
            Self::Underline => "\x1B[4m",
            Self::Red => "\x1B[31m",
            Self::Green => "\x1B[32m",
            Self::Yellow => "\x1B[33m",
            Self::Cyan => "\x1B[36m",
        }
    }
}

/// Is a struct implementing [`Display`] that represents a displayable object with a [`Paint`]
/// applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Painted<T> {
    /// The attribute applied to the displayable object.
    pub paint: Paint,

    /// The displayable object.
    pub display: T,
}

impl<T: Display> Display for Painted<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}\x1B[0m", self.paint.escape_code(), self.display)
    }
}

/// Represents the severity of a log message to be printed to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[allow(missing_docs)]
pub enum Severity {
    Error,
    Info,
    Warning,
}

/// Is a struct implementing [`Display`] that represents a log message to be displayed to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct Message<T> {
    /// The severity of the log message.
    pub severity: Severity,

    /// The message to be displayed.
    pub display: T,
}

impl<T: Display> Display for Message<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let log_header = Paint::Bold.with(match self.severity {
            Severity::Error => Paint::Red.with("[error]:"),
            Severity::Info => Paint::Green.with("[info]:"),
            Severity::Warning => Paint::Yellow.with("[warning]:"),
        });

        let message_part = Paint::Bold.with(&self.display);

        write!(f, "{log_header} {message_part}")
    }
}

fn get_digit(mut number: usize) -> usize {
    let mut digit = 0;

    while number > 0 {
        number /= 10;
        digit += 1;
    }

    digit
}

/// Structure implementing [`Display`] that prints the source line a [`Position`] points into,
/// with the character at the position highlighted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct SourceCodeDisplay<'a, T> {
    /// The position to highlight.
    pub position: &'a Position,

    /// The text of the line at `position.row`, without its terminator.
    pub line: &'a str,

    /// The help message to be displayed under the highlighted character.
    pub help_display: Option<T>,
}

impl<'a, T: Display> SourceCodeDisplay<'a, T> {
    fn write_gutter(
        f: &mut std::fmt::Formatter<'_>,
        width: usize,
        line_number: Option<usize>,
    ) -> std::fmt::Result {
        match line_number {
            Some(line_number) => write!(
                f,
                "{}{:pad$} {} ",
                Paint::Bold.with(Paint::Cyan.with(line_number)),
                "",
                Paint::Bold.with(Paint::Cyan.with("┃")),
                pad = width - get_digit(line_number),
            ),
            None => write!(f, "{:width$} {} ", "", Paint::Bold.with(Paint::Cyan.with("┃"))),
        }
    }
}

impl<'a, T: Display> Display for SourceCodeDisplay<'a, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let line_number = self.position.row + 1;
        let width = get_digit(line_number);

        // prints the source location
        writeln!(
            f,
            "{:width$}{} {}",
            "",
            Paint::Bold.with(Paint::Cyan.with("-->")),
            self.position
        )?;

        Self::write_gutter(f, width, None)?;
        writeln!(f)?;

        Self::write_gutter(f, width, Some(line_number))?;
        let mut caret_offset = 0;
        for (index, char) in self.line.char_indices() {
            // if the char is tab, print 4 spaces
            let printed_width = if char == '\t' { 4 } else { 1 };
            if index < self.position.column {
                caret_offset += printed_width;
            }

            if char == '\t' {
                write!(f, "    ")?;
            } else if index == self.position.column {
                write!(
                    f,
                    "{}",
                    Paint::Underline.with(Paint::Bold.with(Paint::Red.with(char)))
                )?;
            } else {
                write!(f, "{char}")?;
            }
        }
        writeln!(f)?;

        Self::write_gutter(f, width, None)?;
        write!(f, "{:caret_offset$}{}", "", Paint::Bold.with(Paint::Red.with("^")))?;
        if let Some(help_display) = &self.help_display {
            write!(f, " {}: {help_display}", Paint::Bold.with("help"))?;
        }
        writeln!(f)
    }
}
