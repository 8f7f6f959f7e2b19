use std::fmt::{self, Display};
use std::io;
use std::str::Utf8Error;

pub type Result<T> = std::result::Result<T, Error>;

/// The construct which the grammar expected when a record failed to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    /// The `@` which introduces a record.
    RecordStart,
    /// A non-empty alphanumeric tag such as `article`.
    Tag,
    /// An opening `{` or `(`.
    OpeningDelimiter,
    /// The closing delimiter matching the opening one.
    ClosingDelimiter(char),
    /// A specific punctuation character, such as `,` or `=`.
    Char(char),
    /// A field name such as `title`.
    FieldName,
    /// A value unit: a braced or quoted group, or a bare run.
    Value,
    /// The end of a `{...}` or `"..."` group.
    GroupEnd,
    /// A `}` without a matching `{` inside a quoted group.
    BalancedBrackets,
}

/// The possible error conditions.
///
/// A grammar failure is always a [`ErrorCode::Mismatch`]: the input at `offset` does not satisfy
/// the construct in `expected`. The other codes can only be produced when reading from a stream
/// or writing to one, never by the grammar itself.
#[derive(Debug)]
pub enum ErrorCode {
    /// The input does not match the grammar.
    Mismatch { expected: Expected, offset: usize },
    /// An underlying reader or writer failed.
    Io(io::Error),
    /// A stream did not contain valid UTF-8.
    InvalidUtf8(Utf8Error),
}

impl PartialEq for ErrorCode {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Mismatch { expected, offset },
                Self::Mismatch {
                    expected: other_expected,
                    offset: other_offset,
                },
            ) => expected == other_expected && offset == other_offset,
            (Self::Io(err), Self::Io(other_err)) => err.kind() == other_err.kind(),
            (Self::InvalidUtf8(err), Self::InvalidUtf8(other_err)) => err == other_err,
            _ => false,
        }
    }
}

/// The error type returned by the parser and the writer.
#[derive(Debug, PartialEq)]
pub struct Error {
    pub(crate) code: ErrorCode,
}

impl Error {
    pub(crate) fn syntax(expected: Expected, offset: usize) -> Self {
        Self {
            code: ErrorCode::Mismatch { expected, offset },
        }
    }

    pub(crate) fn io(err: io::Error) -> Self {
        Self {
            code: ErrorCode::Io(err),
        }
    }

    /// The underlying error code.
    pub fn code(&self) -> &ErrorCode {
        &self.code
    }

    /// Whether this error is a grammar mismatch, as opposed to an I/O or encoding failure.
    pub fn is_mismatch(&self) -> bool {
        matches!(self.code, ErrorCode::Mismatch { .. })
    }

    /// The byte offset into the input at which the grammar failed to match.
    pub fn offset(&self) -> Option<usize> {
        match self.code {
            ErrorCode::Mismatch { offset, .. } => Some(offset),
            _ => None,
        }
    }

    /// Convert the mismatch offset into a 1-based `(line, column)` pair, counting columns in
    /// chars. Returns `None` for non-grammar errors or if the offset does not lie on a char
    /// boundary of `input`.
    pub fn line_col(&self, input: &str) -> Option<(usize, usize)> {
        let offset = self.offset()?;
        let head = input.get(..offset)?;
        let line = memchr::memchr_iter(b'\n', head.as_bytes()).count() + 1;
        let line_start = memchr::memrchr(b'\n', head.as_bytes()).map_or(0, |idx| idx + 1);
        Some((line, head[line_start..].chars().count() + 1))
    }
}

impl Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::RecordStart => f.write_str("'@'"),
            Expected::Tag => f.write_str("record tag"),
            Expected::OpeningDelimiter => f.write_str("'{' or '('"),
            Expected::ClosingDelimiter(ch) => write!(f, "closing '{ch}'"),
            Expected::Char(ch) => write!(f, "'{ch}'"),
            Expected::FieldName => f.write_str("field name"),
            Expected::Value => f.write_str("field value"),
            Expected::GroupEnd => f.write_str("end of group"),
            Expected::BalancedBrackets => f.write_str("balanced brackets"),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            ErrorCode::Mismatch { expected, offset } => {
                write!(f, "grammar mismatch at byte {offset}: expected {expected}")
            }
            ErrorCode::Io(err) => err.fmt(f),
            ErrorCode::InvalidUtf8(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.code {
            ErrorCode::Io(err) => Some(err),
            ErrorCode::InvalidUtf8(err) => Some(err),
            ErrorCode::Mismatch { .. } => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::io(err)
    }
}

impl From<Utf8Error> for Error {
    fn from(err: Utf8Error) -> Self {
        Self {
            code: ErrorCode::InvalidUtf8(err),
        }
    }
}
