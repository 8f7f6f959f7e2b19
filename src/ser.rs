//! Writing records back to text.
//!
//! A [`Writer`] dispatches on the [`Kind`] of each record and delegates every piece of output to
//! a [`Formatter`], which decides the layout.
mod formatter;

use std::io;

pub use self::formatter::{CompactFormatter, DefaultFormatter, Formatter, escape_braces};
use crate::error::{Error, Result};
use crate::record::{Kind, Record, Value};

/// Write a single record in the canonical layout.
#[inline]
pub fn to_writer<W: io::Write>(writer: W, record: &Record) -> Result<()> {
    Writer::new(writer).write_record(record)
}

/// Write a single record in the canonical layout.
pub fn to_string(record: &Record) -> String {
    write_to_string(|writer| writer.write_record(record))
}

/// Write a sequence of records in the canonical layout, separated by line breaks.
pub fn to_string_many(records: &[Record]) -> String {
    write_to_string(|writer| writer.write_records(records))
}

fn write_to_string(write: impl FnOnce(&mut Writer<&mut Vec<u8>>) -> Result<()>) -> String {
    let mut buf = Vec::new();
    if let Err(err) = write(&mut Writer::new(&mut buf)) {
        unreachable!("writing to a Vec<u8> cannot fail: {err}");
    }
    match String::from_utf8(buf) {
        Ok(text) => text,
        Err(err) => unreachable!("records are written as UTF-8: {err}"),
    }
}

/// Writes records to a [`std::io::Write`] using a [`Formatter`].
pub struct Writer<W, F = DefaultFormatter> {
    writer: W,
    formatter: F,
    skip_separator: bool,
}

impl<W> Writer<W>
where
    W: io::Write,
{
    /// Create a new [`Writer`] with the canonical layout.
    pub fn new(writer: W) -> Self {
        Self::with_formatter(writer, DefaultFormatter)
    }
}

impl<W, F> Writer<W, F>
where
    W: io::Write,
    F: Formatter,
{
    /// Create a new [`Writer`] with a custom layout.
    pub fn with_formatter(writer: W, formatter: F) -> Self {
        Self {
            writer,
            formatter,
            skip_separator: true,
        }
    }

    /// Write a record. Every record after the first is preceded by a record separator.
    ///
    /// String definitions and simple records must contain exactly one field, and every value
    /// must contain at least one fragment. A fragment which ends in a backslash parses back
    /// unchanged only if it can be written as a bare unit, which is always the case for a
    /// fragment produced by the parser.
    pub fn write_record(&mut self, record: &Record) -> Result<()> {
        self.write_record_inner(record).map_err(Error::io)
    }

    /// Write every record in `records`.
    pub fn write_records<'a, I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        records
            .into_iter()
            .try_for_each(|record| self.write_record(record))
    }

    /// Flush the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(Error::io)
    }

    /// Unwrap the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_record_inner(&mut self, record: &Record) -> io::Result<()> {
        if self.skip_separator {
            self.skip_separator = false;
        } else {
            self.formatter.write_record_separator(&mut self.writer)?;
        }

        match record.kind() {
            Kind::Generic => self.write_generic(record),
            kind => {
                debug_assert_eq!(record.fields.len(), 1, "malformed {kind:?} record");
                self.formatter.write_keyword_tag(&mut self.writer, &record.tag)?;
                self.formatter.write_body_start(&mut self.writer)?;
                if let Some(field) = record.fields.first() {
                    if kind == Kind::StringDefinition {
                        self.formatter.write_field_name(&mut self.writer, &field.name)?;
                        self.formatter.write_field_separator(&mut self.writer)?;
                    }
                    self.write_value(&field.value)?;
                }
                self.formatter.write_body_end(&mut self.writer)
            }
        }
    }

    fn write_generic(&mut self, record: &Record) -> io::Result<()> {
        self.formatter.write_tag(&mut self.writer, &record.tag)?;
        self.formatter.write_body_start(&mut self.writer)?;
        if let Some(key) = &record.key {
            self.formatter.write_key(&mut self.writer, key)?;
        }
        self.formatter.write_key_end(&mut self.writer)?;

        for (idx, field) in record.fields.iter().enumerate() {
            if idx > 0 {
                self.formatter.write_field_delimiter(&mut self.writer)?;
            }
            self.formatter.write_field_start(&mut self.writer)?;
            self.formatter.write_field_name(&mut self.writer, &field.name)?;
            self.formatter.write_field_separator(&mut self.writer)?;
            self.write_value(&field.value)?;
        }
        if !record.fields.is_empty() {
            self.formatter.write_fields_end(&mut self.writer)?;
        }

        self.formatter.write_body_end(&mut self.writer)
    }

    fn write_value(&mut self, value: &Value) -> io::Result<()> {
        debug_assert!(!value.0.is_empty(), "empty value");
        for (idx, text) in value.0.iter().enumerate() {
            if idx > 0 {
                self.formatter.write_token_separator(&mut self.writer)?;
            }
            self.formatter.write_text_token(&mut self.writer, text)?;
        }
        Ok(())
    }
}
