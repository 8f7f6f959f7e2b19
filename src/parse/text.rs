//! Brace and quote groups.
//!
//! Both functions start immediately after the opening delimiter and return the position after
//! the closing one. The text is borrowed from the input unless an escape had to be removed.
//!
//! Inside a brace group, `\{` and `\}` stand for literal braces and do not count towards the
//! nesting. Inside a quote group, `\"` stands for a literal quote, and every `{` opens a nested
//! group which is kept together with its braces. The nested group still uses the quote escape:
//! `\"` is a literal quote and `\}` is a backslash followed by a closing brace. Once an
//! unescaped `"` appears in a nested group, the text up to the next unescaped brace uses the
//! brace escapes instead. Since no escape ends in a backslash, a delimiter is escaped exactly
//! when the byte before it is a backslash.
use std::borrow::Cow;

use memchr::{memchr2_iter, memchr3_iter};

use crate::error::{Error, Expected, Result};

/// Accumulates the text of a group, copying only when an escape must be removed.
struct Unescape<'r> {
    input: &'r str,
    start: usize,
    copied: usize,
    buf: Option<String>,
}

impl<'r> Unescape<'r> {
    fn new(input: &'r str, start: usize) -> Self {
        Self {
            input,
            start,
            copied: start,
            buf: None,
        }
    }

    /// Replace `input[self.copied..resume]` with `input[self.copied..from]` followed by `text`.
    fn splice(&mut self, from: usize, text: &str, resume: usize) {
        let buf = self.buf.get_or_insert_with(String::new);
        buf.push_str(&self.input[self.copied..from]);
        buf.push_str(text);
        self.copied = resume;
    }

    /// Leave out the (ASCII) byte at `idx`.
    fn drop_byte(&mut self, idx: usize) {
        self.splice(idx, "", idx + 1);
    }

    fn finish(self, end: usize) -> Cow<'r, str> {
        match self.buf {
            None => Cow::Borrowed(&self.input[self.start..end]),
            Some(mut buf) => {
                buf.push_str(&self.input[self.copied..end]);
                Cow::Owned(buf)
            }
        }
    }
}

#[inline]
fn is_escaped(input: &[u8], start: usize, idx: usize) -> bool {
    idx > start && input[idx - 1] == b'\\'
}

/// Consume the rest of a brace group, up to and including the `}` which makes it unbalanced.
pub fn braced(input: &str, start: usize) -> Result<(usize, Cow<'_, str>)> {
    let bytes = input.as_bytes();
    let mut text = Unescape::new(input, start);
    let mut depth = 0usize;

    for offset in memchr2_iter(b'{', b'}', &bytes[start..]) {
        let idx = start + offset;
        if is_escaped(bytes, start, idx) {
            text.drop_byte(idx - 1);
        } else if bytes[idx] == b'{' {
            depth += 1;
        } else if depth == 0 {
            return Ok((idx + 1, text.finish(idx)));
        } else {
            depth -= 1;
        }
    }

    Err(Error::syntax(Expected::GroupEnd, input.len()))
}

/// Consume the rest of a group opened by a `{` inside a quote group, up to and including the
/// matching `}`.
fn quote_nested(input: &str, start: usize) -> Result<(usize, Cow<'_, str>)> {
    let bytes = input.as_bytes();
    let mut text = Unescape::new(input, start);
    let mut depth = 0usize;
    // whether the current run of text follows an unescaped `"`
    let mut brace_escapes = false;

    for offset in memchr3_iter(b'"', b'{', b'}', &bytes[start..]) {
        let idx = start + offset;
        let escaped = is_escaped(bytes, start, idx);
        match bytes[idx] {
            b'"' if brace_escapes => {}
            b'"' if escaped => text.drop_byte(idx - 1),
            b'"' => brace_escapes = true,
            _ if brace_escapes && escaped => text.drop_byte(idx - 1),
            b'{' => {
                depth += 1;
                brace_escapes = false;
            }
            _ if depth == 0 => return Ok((idx + 1, text.finish(idx))),
            _ => {
                depth -= 1;
                brace_escapes = false;
            }
        }
    }

    Err(Error::syntax(Expected::GroupEnd, input.len()))
}

/// Consume the rest of a quote group, up to and including the first unescaped `"` outside of
/// any nested brace group.
pub fn quoted(input: &str, start: usize) -> Result<(usize, Cow<'_, str>)> {
    let bytes = input.as_bytes();
    let mut text = Unescape::new(input, start);
    // the end of the last nested group; delimiters before it were already handled
    let mut resume = start;

    for offset in memchr3_iter(b'"', b'{', b'}', &bytes[start..]) {
        let idx = start + offset;
        if idx < resume {
            continue;
        }
        match bytes[idx] {
            b'"' if is_escaped(bytes, start, idx) => text.drop_byte(idx - 1),
            b'"' => return Ok((idx + 1, text.finish(idx))),
            b'{' => {
                let (end, inner) = quote_nested(input, idx + 1)?;
                if let Cow::Owned(inner) = inner {
                    text.splice(idx + 1, &inner, end - 1);
                }
                resume = end;
            }
            _ => return Err(Error::syntax(Expected::BalancedBrackets, idx)),
        }
    }

    Err(Error::syntax(Expected::GroupEnd, input.len()))
}
