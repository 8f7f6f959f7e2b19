//! # A custom formatter implementation
//!
//! This demo reads records from standard input and writes them back to standard output with a
//! custom formatter, which normalizes tags to lower case and indents fields by two spaces.
use std::io;

use bibtex_records::{Error, Writer, read_all, ser::Formatter};

/// An implementation of [`Formatter`] which converts the tag of every record to lower case.
#[derive(Default)]
struct NormalizingFormatter {
    buffer: String,
}

impl Formatter for NormalizingFormatter {
    #[inline]
    fn write_tag<W>(&mut self, writer: &mut W, tag: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.buffer.clear();
        self.buffer.extend(tag.chars().flat_map(char::to_lowercase));
        writer.write_all(b"@")?;
        writer.write_all(self.buffer.as_bytes())
    }

    #[inline]
    fn write_field_start<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b"  ")
    }

    #[inline]
    fn write_record_separator<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b"\n\n")
    }
}

fn main() -> Result<(), Error> {
    let records = read_all(io::stdin().lock())?;

    let mut writer = Writer::with_formatter(io::stdout().lock(), NormalizingFormatter::default());
    writer.write_records(&records)?;
    writer.flush()
}
