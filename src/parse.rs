//! The record grammar and the entry points for parsing.
//!
//! Grammar rules are default methods of [`RecordParse`], composed from the positional primitives
//! of [`Read`]. A rule which fails leaves the cursor wherever the mismatch occurred, except
//! [`RecordParse::record`] which rolls back to where it started.
pub mod read;
mod scan;
pub mod text;

use std::io;

pub use read::{Read, StrReader};
pub use scan::Records;

use crate::error::{Error, Expected, Result};
use crate::record::{Field, Kind, Record, Value};

/// The record grammar, built on top of the primitives in [`Read`].
pub trait RecordParse<'r>: Read<'r> {
    /// Consume the byte `byte`, or fail with `expected`.
    fn take_byte(&mut self, byte: u8, expected: Expected) -> Result<()> {
        match self.peek() {
            Some(b) if b == byte => {
                self.discard();
                Ok(())
            }
            _ => Err(Error::syntax(expected, self.position())),
        }
    }

    /// Consume an opening bracket `(` or `{`, and return the corresponding closing bracket.
    fn take_initial(&mut self) -> Result<u8> {
        self.comment();
        match self.peek() {
            Some(b'{') => {
                self.discard();
                Ok(b'}')
            }
            Some(b'(') => {
                self.discard();
                Ok(b')')
            }
            _ => Err(Error::syntax(Expected::OpeningDelimiter, self.position())),
        }
    }

    /// Consume the closing bracket `closing`.
    fn take_terminal(&mut self, closing: u8) -> Result<()> {
        self.comment();
        self.take_byte(closing, Expected::ClosingDelimiter(closing as char))
    }

    /// Parse a single value unit: a brace group, a quote group, or a bare run such as `2012`.
    fn value_unit(&mut self) -> Result<String> {
        self.comment();
        match self.peek() {
            Some(b'{') => {
                self.discard();
                Ok(self.braced()?.into_owned())
            }
            Some(b'"') => {
                self.discard();
                Ok(self.quoted()?.into_owned())
            }
            Some(_) => Ok(self.bare()?.to_owned()),
            None => Err(Error::syntax(Expected::Value, self.position())),
        }
    }

    /// Parse one or more value units separated by `#`.
    fn value(&mut self) -> Result<Value> {
        let mut fragments = vec![self.value_unit()?];
        loop {
            self.comment();
            if self.peek() != Some(b'#') {
                return Ok(Value(fragments));
            }
            self.discard();
            fragments.push(self.value_unit()?);
        }
    }

    /// Parse `name = value`.
    fn field(&mut self) -> Result<Field> {
        self.comment();
        let name = self.field_name()?;
        self.comment();
        self.take_byte(b'=', Expected::Char('='))?;
        let value = self.value()?;
        Ok(Field::new(name, value))
    }

    /// Parse the body of a generic record up to, but not including, the closing bracket: an
    /// optional key, a comma, and a comma-separated list of fields with an optional trailing
    /// comma.
    fn generic_body(&mut self, closing: u8) -> Result<(Option<String>, Vec<Field>)> {
        self.comment();
        let key = self.key().map(str::to_owned);
        self.comment();
        self.take_byte(b',', Expected::Char(','))?;

        let mut fields = Vec::new();
        loop {
            self.comment();
            if self.peek() == Some(closing) {
                break;
            }
            fields.push(self.field()?);
            self.comment();
            if self.peek() != Some(b',') {
                break;
            }
            self.discard();
        }
        Ok((key, fields))
    }

    /// Parse a complete record, skipping leading whitespace and comments.
    ///
    /// On failure, the cursor is restored to its starting position.
    fn record(&mut self) -> Result<Record> {
        let start = self.position();
        let parsed = parse_record(self);
        if parsed.is_err() {
            self.reset(start);
        }
        parsed
    }
}

fn parse_record<'r, R: RecordParse<'r> + ?Sized>(reader: &mut R) -> Result<Record> {
    reader.comment();
    reader.take_byte(b'@', Expected::RecordStart)?;
    reader.comment();
    let tag = reader.tag()?;
    let closing = reader.take_initial()?;

    let (key, fields) = match Kind::classify(tag) {
        Kind::Generic => reader.generic_body(closing)?,
        Kind::StringDefinition => (None, vec![reader.field()?]),
        Kind::Simple => (None, vec![Field::new("", reader.value()?)]),
    };

    reader.take_terminal(closing)?;
    Ok(Record {
        tag: tag.to_owned(),
        key,
        fields,
    })
}

/// Parse the record at the start of `input`, after any whitespace and comments.
///
/// Text following the closing bracket of the record is not examined.
pub fn parse_one(input: &str) -> Result<Record> {
    StrReader::new(input).record()
}

/// Parse every record in `input`, skipping junk between records and any `@` which does not
/// begin a well-formed record.
pub fn parse_all(input: &str) -> Vec<Record> {
    Records::new(input).collect()
}

/// Read the first record from a stream, ignoring any junk before the first `@`.
pub fn read_one<R: io::Read>(reader: R) -> Result<Record> {
    let input = read_to_string(reader)?;
    let mut reader = StrReader::new(&input);
    if !reader.next_record_or_eof() {
        return Err(Error::syntax(Expected::RecordStart, input.len()));
    }
    reader.record()
}

/// Read every record from a stream. This only fails if the stream itself fails or does not
/// contain valid UTF-8.
pub fn read_all<R: io::Read>(reader: R) -> Result<Vec<Record>> {
    let input = read_to_string(reader)?;
    Ok(parse_all(&input))
}

fn read_to_string<R: io::Read>(mut reader: R) -> Result<String> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    tracing::trace!(bytes = buf.len(), "read input stream");
    String::from_utf8(buf).map_err(|err| Error::from(err.utf8_error()))
}
