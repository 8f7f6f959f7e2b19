//! Positional primitives and the cursor type the grammar runs on.
//!
//! Every primitive has the shape `fn(input: &str, pos: usize) -> (usize, T)`, returning the
//! position after the consumed input. All of the cuts are performed immediately before or after
//! an ASCII byte, so every returned slice lies on char boundaries.
use std::borrow::Cow;

use memchr::{memchr_iter, memchr2};

use super::{RecordParse, text};
use crate::error::{Error, Expected, Result};

/// Whitespace skipped between tokens.
///
/// This follows the same convention as the built-in `u8::is_ascii_whitespace`, and in particular
/// does not consider U+000B VERTICAL TAB to be whitespace.
#[inline]
fn is_space(b: u8) -> bool {
    matches!(b, b'\t' | b'\n' | b'\x0C' | b'\r' | b' ')
}

/// Skip a `%` comment starting at `pos`, returning the position after the line break, or the end
/// of input if the comment is not terminated.
#[inline]
fn skip_line(input: &[u8], pos: usize) -> usize {
    match memchr::memchr(b'\n', &input[pos..]) {
        Some(offset) => pos + offset + 1,
        None => input.len(),
    }
}

/// Ignore whitespace and `%` comments between tokens.
pub fn comment(input: &str, mut pos: usize) -> usize {
    let bytes = input.as_bytes();
    while pos < bytes.len() {
        match bytes[pos] {
            b if is_space(b) => pos += 1,
            b'%' => pos = skip_line(bytes, pos + 1),
            _ => return pos,
        }
    }
    bytes.len()
}

/// Ignore junk characters between records.
///
/// Returns `(pos, true)` with `pos` the position of the next `@` if one was found, and
/// `(input.len(), false)` otherwise. An `@` inside a `%` comment does not count.
pub fn next_record_or_eof(input: &str, mut pos: usize) -> (usize, bool) {
    let bytes = input.as_bytes();
    while let Some(offset) = memchr2(b'@', b'%', &bytes[pos..]) {
        pos += offset;
        if bytes[pos] == b'@' {
            return (pos, true);
        }
        pos = skip_line(bytes, pos + 1);
    }
    (bytes.len(), false)
}

/// Skip the span of a record which starts with the `@` before `start` and failed to parse at
/// `end`. An `@` inside the span which is preceded on its line only by whitespace is not
/// skipped; its position is returned instead of `end`.
pub fn skip_failed(input: &str, start: usize, end: usize) -> usize {
    let bytes = input.as_bytes();
    memchr_iter(b'@', &bytes[start..end])
        .map(|offset| start + offset)
        .find(|&idx| {
            bytes[..idx]
                .iter()
                .rev()
                .take_while(|&&b| b != b'\n')
                .all(|&b| is_space(b))
        })
        .unwrap_or(end)
}

/// Consume a non-empty run of alphanumeric chars.
pub fn tag(input: &str, start: usize) -> Result<(usize, &str)> {
    let end = input[start..]
        .char_indices()
        .find(|(_, ch)| !ch.is_alphanumeric())
        .map_or(input.len(), |(offset, _)| start + offset);

    if end == start {
        return Err(Error::syntax(Expected::Tag, start));
    }
    Ok((end, &input[start..end]))
}

/// Consume until the first byte which satisfies `stop`, or the end of input.
#[inline]
fn run_until(input: &str, start: usize, stop: impl Fn(u8) -> bool) -> usize {
    input.as_bytes()[start..]
        .iter()
        .position(|&b| stop(b))
        .map_or(input.len(), |offset| start + offset)
}

/// Cut trailing whitespace from `input[start..end]`, returning the new end.
#[inline]
fn trim_end(input: &str, start: usize, mut end: usize) -> usize {
    let bytes = input.as_bytes();
    while end > start && is_space(bytes[end - 1]) {
        end -= 1;
    }
    end
}

/// Consume a record key, which runs until the next `,` or whitespace and may be empty. A `%`
/// also ends the key so that a comment can follow it.
pub fn key(input: &str, start: usize) -> (usize, Option<&str>) {
    let end = run_until(input, start, |b| is_space(b) || matches!(b, b',' | b'%'));
    if end == start {
        (start, None)
    } else {
        (end, Some(&input[start..end]))
    }
}

/// Consume a non-empty field name, which runs until whitespace or one of `=,)}%`.
pub fn field_name(input: &str, start: usize) -> Result<(usize, &str)> {
    let end = run_until(input, start, |b| {
        is_space(b) || matches!(b, b'=' | b',' | b')' | b'}' | b'%')
    });

    if end == start {
        return Err(Error::syntax(Expected::FieldName, start));
    }
    Ok((end, &input[start..end]))
}

/// Consume a bare value unit such as `2012` or `jan`, which runs until one of `,})#%`. Trailing
/// whitespace is not part of the unit, which must be non-empty.
pub fn bare(input: &str, start: usize) -> Result<(usize, &str)> {
    let end = trim_end(
        input,
        start,
        run_until(input, start, |b| {
            matches!(b, b',' | b'}' | b')' | b'#' | b'%')
        }),
    );

    if end == start {
        return Err(Error::syntax(Expected::Value, start));
    }
    Ok((end, &input[start..end]))
}

/// The low-level operations which the grammar in [`RecordParse`] is built from.
pub trait Read<'r> {
    /// The current byte offset into the input.
    fn position(&self) -> usize;

    /// Move the cursor back to a position previously returned by [`Read::position`].
    fn reset(&mut self, pos: usize);

    /// Peek a single byte.
    fn peek(&self) -> Option<u8>;

    /// Discard a single byte. This is only valid after a previous .peek() returned an ASCII
    /// byte!
    fn discard(&mut self);

    /// Discard comments and whitespace.
    fn comment(&mut self);

    /// Discard junk characters between records, and return true if a record start `@` is found
    /// and false otherwise. The `@` itself is not consumed.
    fn next_record_or_eof(&mut self) -> bool;

    /// Skip past the `@` at the cursor after the record it begins failed to parse at `end`.
    fn skip_failed(&mut self, end: usize);

    /// Parse a record tag.
    fn tag(&mut self) -> Result<&'r str>;

    /// Parse a possibly empty record key.
    fn key(&mut self) -> Option<&'r str>;

    /// Parse a field name.
    fn field_name(&mut self) -> Result<&'r str>;

    /// Parse a bare value unit.
    fn bare(&mut self) -> Result<&'r str>;

    /// Parse the rest of a brace group whose opening `{` was already consumed.
    fn braced(&mut self) -> Result<Cow<'r, str>>;

    /// Parse the rest of a quote group whose opening `"` was already consumed.
    fn quoted(&mut self) -> Result<Cow<'r, str>>;
}

/// A cursor over a string buffer.
#[derive(Debug, Clone)]
pub struct StrReader<'r> {
    input: &'r str,
    pos: usize,
}

impl<'r> StrReader<'r> {
    /// Create a new reader from the provided input buffer.
    pub fn new(input: &'r str) -> Self {
        Self { input, pos: 0 }
    }

    /// The input which has not yet been consumed.
    pub fn remaining(&self) -> &'r str {
        &self.input[self.pos..]
    }

    /// Apply `parser` to `self.input` and `self.pos`, updating `self.pos` and returning `O`.
    #[inline]
    fn apply<O>(
        &mut self,
        parser: impl FnOnce(&'r str, usize) -> Result<(usize, O)>,
    ) -> Result<O> {
        let (new, ret) = parser(self.input, self.pos)?;
        self.pos = new;
        Ok(ret)
    }
}

impl<'r> Read<'r> for StrReader<'r> {
    #[inline]
    fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn reset(&mut self, pos: usize) {
        debug_assert!(self.input.is_char_boundary(pos));
        self.pos = pos;
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    #[inline]
    fn discard(&mut self) {
        self.pos += 1
    }

    #[inline]
    fn comment(&mut self) {
        self.pos = comment(self.input, self.pos)
    }

    #[inline]
    fn next_record_or_eof(&mut self) -> bool {
        let (new, res) = next_record_or_eof(self.input, self.pos);
        self.pos = new;
        res
    }

    #[inline]
    fn skip_failed(&mut self, end: usize) {
        let start = self.pos + 1;
        self.pos = skip_failed(self.input, start, end.clamp(start, self.input.len()));
    }

    #[inline]
    fn tag(&mut self) -> Result<&'r str> {
        self.apply(tag)
    }

    #[inline]
    fn key(&mut self) -> Option<&'r str> {
        let (new, res) = key(self.input, self.pos);
        self.pos = new;
        res
    }

    #[inline]
    fn field_name(&mut self) -> Result<&'r str> {
        self.apply(field_name)
    }

    #[inline]
    fn bare(&mut self) -> Result<&'r str> {
        self.apply(bare)
    }

    #[inline]
    fn braced(&mut self) -> Result<Cow<'r, str>> {
        self.apply(text::braced)
    }

    #[inline]
    fn quoted(&mut self) -> Result<Cow<'r, str>> {
        self.apply(text::quoted)
    }
}

impl<'r> RecordParse<'r> for StrReader<'r> {}
