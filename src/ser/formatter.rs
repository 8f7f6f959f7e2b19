use std::borrow::Cow;
use std::io;

use memchr::memchr2_iter;

/// Escape every `{` and `}` in `text` with a backslash.
pub fn escape_braces(text: &str) -> Cow<'_, str> {
    let mut escaped = String::new();
    let mut copied = 0;
    for idx in memchr2_iter(b'{', b'}', text.as_bytes()) {
        escaped.push_str(&text[copied..idx]);
        escaped.push('\\');
        copied = idx;
    }

    if escaped.is_empty() {
        Cow::Borrowed(text)
    } else {
        escaped.push_str(&text[copied..]);
        Cow::Owned(escaped)
    }
}

/// Whether `text` can be written as a bare unit, such as `2012`, which parses back unchanged.
fn is_bare(text: &str) -> bool {
    let bytes = text.as_bytes();
    let is_space = |b: &u8| matches!(b, b'\t' | b'\n' | b'\x0C' | b'\r' | b' ');
    match (bytes.first(), bytes.last()) {
        (Some(first), Some(last)) => {
            !matches!(first, b'{' | b'"')
                && !is_space(first)
                && !is_space(last)
                && !bytes
                    .iter()
                    .any(|b| matches!(b, b',' | b'}' | b')' | b'#' | b'%'))
        }
        _ => false,
    }
}

/// The layout used when writing the canonical form: fields on their own lines, indented by four
/// spaces.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFormatter;

impl Formatter for DefaultFormatter {}

/// A layout which writes every record on a single line, with no optional whitespace.
#[derive(Debug, Default, Clone, Copy)]
pub struct CompactFormatter;

impl Formatter for CompactFormatter {
    #[inline]
    fn write_key_end<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b",")
    }

    #[inline]
    fn write_field_start<W>(&mut self, _writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        Ok(())
    }

    #[inline]
    fn write_field_separator<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b"=")
    }

    #[inline]
    fn write_token_separator<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b"#")
    }

    #[inline]
    fn write_field_delimiter<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b",")
    }

    #[inline]
    fn write_fields_end<W>(&mut self, _writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        Ok(())
    }
}

/// The output produced for each piece of a record.
///
/// Every method has a default implementation which produces the canonical layout, so that an
/// implementation only needs to override the pieces it changes. Whatever an implementation
/// writes must still parse back to the same record.
pub trait Formatter {
    /// Written between two consecutive records.
    #[inline]
    fn write_record_separator<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b"\n")
    }

    /// The `@` and tag of a generic record.
    #[inline]
    fn write_tag<W>(&mut self, writer: &mut W, tag: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b"@")?;
        writer.write_all(tag.as_bytes())
    }

    /// The `@` and tag of a string definition or a simple record. The keyword is written in
    /// lower case.
    #[inline]
    fn write_keyword_tag<W>(&mut self, writer: &mut W, tag: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b"@")?;
        writer.write_all(tag.to_ascii_lowercase().as_bytes())
    }

    #[inline]
    fn write_body_start<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b"{")
    }

    #[inline]
    fn write_key<W>(&mut self, writer: &mut W, key: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(key.as_bytes())
    }

    /// The comma following the (possibly absent) key of a generic record.
    #[inline]
    fn write_key_end<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b",\n")
    }

    /// Written before each field of a generic record.
    #[inline]
    fn write_field_start<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b"    ")
    }

    #[inline]
    fn write_field_name<W>(&mut self, writer: &mut W, name: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(name.as_bytes())
    }

    #[inline]
    fn write_field_separator<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b" = ")
    }

    /// Written between the fragments of a concatenated value.
    #[inline]
    fn write_token_separator<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b" # ")
    }

    /// A single value fragment, which must be written so that it parses back unchanged.
    ///
    /// The fragment is written as a brace group with escaped braces, unless it ends in a
    /// backslash, which would escape the closing brace; such a fragment is written bare when
    /// possible.
    #[inline]
    fn write_text_token<W>(&mut self, writer: &mut W, text: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if text.ends_with('\\') && is_bare(text) {
            return writer.write_all(text.as_bytes());
        }
        writer.write_all(b"{")?;
        writer.write_all(escape_braces(text).as_bytes())?;
        writer.write_all(b"}")
    }

    /// Written between two fields of a generic record.
    #[inline]
    fn write_field_delimiter<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b",\n")
    }

    /// Written after the last field of a generic record with at least one field.
    #[inline]
    fn write_fields_end<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b"\n")
    }

    #[inline]
    fn write_body_end<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b"}")
    }
}
