#![allow(clippy::future_not_send)]

//! Contains the code related to the source code input: the memory-mapped [`SourceFile`] split
//! into lines, and the [`Position`] of a lexeme within it.

use std::{
    fmt::{Debug, Display},
    fs::File,
    ops::Range,
    path::{Path, PathBuf},
    sync::Arc,
};

use derive_new::new;
use getset::Getters;
use memmap::MmapOptions;
use ouroboros::self_referencing;
use thiserror::Error;

/// Represents an error that occurs when loading/creating a source file.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Utf8Error(#[from] std::str::Utf8Error),
}

/// Represents a source unit handed to the lexer line by line.
#[derive(Getters)]
pub struct SourceFile {
    source: MappedSource,

    /// Gets the full path to the source file.
    #[get = "pub"]
    full_path: PathBuf,

    /// Gets the name of the source unit, used verbatim in every [`Position`].
    #[get = "pub"]
    name: Arc<str>,

    /// Byte ranges of the lines, line terminators excluded.
    lines: Vec<Range<usize>>,
}

impl Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("full_path", &self.full_path)
            .field("name", &self.name)
            .field("lines", &self.lines)
            .finish()
    }
}

#[self_referencing]
struct MappedSource {
    file: File,
    mapped: Option<memmap::Mmap>,

    #[borrows(mapped)]
    mapped_str: &'this str,
}

impl MappedSource {
    fn create(file: File) -> Result<Self, Error> {
        // zero-length files cannot be mapped
        let mapped = if file.metadata()?.len() == 0 {
            None
        } else {
            Some(unsafe { MmapOptions::new().map(&file)? })
        };

        MappedSourceTryBuilder {
            file,
            mapped,
            mapped_str_builder: |mapped| {
                mapped
                    .as_ref()
                    .map_or(Ok(""), |mapped| std::str::from_utf8(mapped).map_err(Error::from))
            },
        }
        .try_build()
    }

    fn content(&self) -> &str { self.borrow_mapped_str() }
}

impl SourceFile {
    fn new(full_path: PathBuf, source: MappedSource) -> Arc<Self> {
        let lines = get_line_ranges(source.content());
        let name = file_name_of(&full_path);

        Arc::new(Self {
            source,
            full_path,
            name,
            lines,
        })
    }

    /// Gets the whole content of the source file.
    #[must_use]
    pub fn content(&self) -> &str { self.source.content() }

    /// Gets the line at the given row, without its line terminator.
    ///
    /// The row starts at 0.
    #[must_use]
    pub fn line(&self, row: usize) -> Option<&str> {
        self.lines
            .get(row)
            .map(|range| &self.source.content()[range.clone()])
    }

    /// Iterates over the lines of the source file in file order, without their line terminators.
    pub fn lines(&self) -> impl std::iter::Iterator<Item = &str> + '_ {
        self.lines
            .iter()
            .map(|range| &self.source.content()[range.clone()])
    }

    /// Gets the number of lines in the source file.
    #[must_use]
    pub fn line_count(&self) -> usize { self.lines.len() }

    /// Loads the source file from the given file path.
    ///
    /// # Errors
    /// - [`Error::IoError`]: Error occurred when mapping the file to memory.
    /// - [`Error::Utf8Error`]: Error occurred when converting the mapped bytes to a string.
    pub fn load(file: File, path: PathBuf) -> Result<Arc<Self>, Error> {
        let source = MappedSource::create(file)?;
        Ok(Self::new(path, source))
    }

    /// Creates a temporary source file and writes the given displayable object to it.
    ///
    /// # Errors
    /// - [`Error::IoError`]: Error occurred when creating the temporary file, writing to, and
    ///   mapping it to memory.
    /// - [`Error::Utf8Error`]: Error occurred when converting the mapped bytes to a string.
    pub fn temp(display: impl Display) -> Result<Arc<Self>, Error> {
        use std::io::Write;

        let mut tempfile = tempfile::Builder::new()
            .prefix("vscript")
            .suffix(".vs")
            .tempfile()?;

        write!(tempfile.as_file_mut(), "{display}")?;
        let path = tempfile.path().to_owned();

        Self::load(tempfile.into_file(), path)
    }
}

/// Is a point in a source unit where a lexeme starts.
///
/// Both `column` and `row` start at 0; [`Display`] renders them starting at 1.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct Position {
    /// The name of the source unit the position is in.
    pub file_name: Arc<str>,

    /// The byte offset within the line.
    pub column: usize,

    /// The index of the line within the source unit.
    pub row: usize,
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file_name, self.row + 1, self.column + 1)
    }
}

fn file_name_of(path: &Path) -> Arc<str> {
    path.file_name()
        .map_or_else(|| path.to_string_lossy(), |name| name.to_string_lossy())
        .into()
}

fn get_line_ranges(text: &str) -> Vec<Range<usize>> {
    let mut current_position = 0;
    let mut results = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some((byte, char)) = chars.next() {
        match char {
            '\n' => {
                results.push(current_position..byte);
                current_position = byte + 1;
            }
            '\r' => {
                results.push(current_position..byte);

                // crlf
                if let Some((_, '\n')) = chars.peek() {
                    chars.next();
                    current_position = byte + 2;
                } else {
                    current_position = byte + 1;
                }
            }
            _ => {}
        }
    }

    // a trailing terminator does not open another line
    if current_position < text.len() {
        results.push(current_position..text.len());
    }

    results
}

#[cfg(test)]
mod tests;
