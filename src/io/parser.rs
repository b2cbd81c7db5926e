//! Instance file parsing.
//!
//! Input format: a header line `num_books num_libraries num_days`, a line
//! of `num_books` scores, then two lines per library: a header
//! `books_count signup_days books_per_day` and a line of that many book
//! ids. Malformed files are rejected here; the search core assumes a
//! structurally valid [`Instance`].

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use crate::models::{Instance, Library};

/// Why an instance or plan file could not be read.
#[derive(Debug)]
pub enum ParseError {
    /// The underlying reader failed.
    Io(io::Error),
    /// The file content did not match the expected format.
    Malformed {
        /// One-based line number of the offending line.
        line: usize,
        /// What was wrong with it.
        message: String,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "read failed: {err}"),
            Self::Malformed { line, message } => write!(f, "line {line}: {message}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Malformed { .. } => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

pub(crate) struct LineReader<R> {
    inner: R,
    line: usize,
}

impl<R: BufRead> LineReader<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self { inner, line: 0 }
    }

    pub(crate) fn line(&self) -> usize {
        self.line
    }

    /// Next line, trimmed; errors if the file ends first.
    pub(crate) fn next_line(&mut self) -> Result<String, ParseError> {
        let mut buf = String::new();
        let read = self.inner.read_line(&mut buf)?;
        self.line += 1;
        if read == 0 {
            return Err(ParseError::Malformed {
                line: self.line,
                message: "unexpected end of file".into(),
            });
        }
        Ok(buf.trim().to_string())
    }

    /// Parses a line of exactly `count` whitespace-separated integers.
    pub(crate) fn next_fields<T>(&mut self, count: usize, what: &str) -> Result<Vec<T>, ParseError>
    where
        T: FromStr,
    {
        let line = self.next_line()?;
        let fields: Result<Vec<T>, _> = line.split_whitespace().map(str::parse).collect();
        let fields = fields.map_err(|_| ParseError::Malformed {
            line: self.line,
            message: format!("{what}: fields must be non-negative integers"),
        })?;
        if fields.len() != count {
            return Err(ParseError::Malformed {
                line: self.line,
                message: format!("{what}: expected {count} fields, got {}", fields.len()),
            });
        }
        Ok(fields)
    }
}

/// Parses an instance from any buffered reader.
pub fn parse_instance<R: BufRead>(reader: R) -> Result<Instance, ParseError> {
    let mut lines = LineReader::new(reader);

    let header: Vec<usize> = lines.next_fields(3, "header")?;
    let (num_books, num_libraries, num_days) = (header[0], header[1], header[2]);
    let num_days = u32::try_from(num_days).map_err(|_| ParseError::Malformed {
        line: lines.line(),
        message: format!("header: day count {num_days} is out of range"),
    })?;

    let scores: Vec<u32> = lines.next_fields(num_books, "scores")?;

    let mut libraries = Vec::with_capacity(num_libraries);
    for id in 0..num_libraries {
        let header: Vec<u64> = lines.next_fields(3, &format!("library {id} header"))?;
        let books_count = header[0] as usize;
        let signup_days = u32::try_from(header[1]).map_err(|_| ParseError::Malformed {
            line: lines.line(),
            message: format!("library {id}: signup days {} out of range", header[1]),
        })?;
        let books_per_day = u32::try_from(header[2]).map_err(|_| ParseError::Malformed {
            line: lines.line(),
            message: format!("library {id}: books per day {} out of range", header[2]),
        })?;

        let book_ids: Vec<usize> = lines.next_fields(books_count, &format!("library {id} books"))?;
        if let Some(&bad) = book_ids.iter().find(|&&b| b >= num_books) {
            return Err(ParseError::Malformed {
                line: lines.line(),
                message: format!("library {id}: book id {bad} out of range (0..{num_books})"),
            });
        }

        libraries.push(Library::new(
            id,
            signup_days,
            books_per_day,
            &book_ids,
            &scores,
        ));
    }

    Ok(Instance::new(num_days, scores, libraries))
}

/// Opens and parses an instance file.
pub fn load_instance<P: AsRef<Path>>(path: P) -> Result<Instance, ParseError> {
    let file = File::open(path)?;
    parse_instance(BufReader::new(file))
}
