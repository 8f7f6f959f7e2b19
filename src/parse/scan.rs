use std::iter::FusedIterator;

use tracing::{debug, trace};

use super::{Read, RecordParse, StrReader};
use crate::record::Record;

/// An iterator over the records in a buffer.
///
/// Junk between records is skipped. When the text following an `@` does not form a record,
/// scanning resumes where the parse failed rather than immediately after the `@`. An `@` within
/// the failed text which begins a line is still tried as a record start.
#[derive(Debug, Clone)]
pub struct Records<'r> {
    reader: StrReader<'r>,
}

impl<'r> Records<'r> {
    pub fn new(input: &'r str) -> Self {
        Self {
            reader: StrReader::new(input),
        }
    }

    /// The byte offset at which scanning will continue.
    pub fn position(&self) -> usize {
        self.reader.position()
    }
}

impl<'r> From<StrReader<'r>> for Records<'r> {
    fn from(reader: StrReader<'r>) -> Self {
        Self { reader }
    }
}

impl Iterator for Records<'_> {
    type Item = Record;

    fn next(&mut self) -> Option<Self::Item> {
        while self.reader.next_record_or_eof() {
            let offset = self.reader.position();
            match self.reader.record() {
                Ok(record) => {
                    trace!(offset, tag = %record.tag, "collected record");
                    return Some(record);
                }
                Err(err) => {
                    debug!(offset, error = %err, "skipping malformed record");
                    // the reader was rolled back to the `@`
                    self.reader.skip_failed(err.offset().unwrap_or(offset));
                }
            }
        }
        None
    }
}

impl FusedIterator for Records<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Field, Value};

    #[test]
    fn test_records() {
        let input = "preamble text\n@book{a,}\n@@misc{b, t = {x}}\n@broken(\n@c{d,}trailing";
        let mut records = Records::new(input);
        assert_eq!(records.next().map(|r| r.key), Some(Some("a".into())));
        assert_eq!(records.next().map(|r| r.key), Some(Some("b".into())));
        assert_eq!(records.next().map(|r| r.key), Some(Some("d".into())));
        assert_eq!(records.next(), None);
        assert_eq!(records.position(), input.len());
        assert_eq!(records.next(), None);
    }

    #[test]
    fn test_missing_comma_after_key() {
        let records: Vec<_> = Records::new("@misc{k}\n@book{b, t = x}").collect();
        assert_eq!(
            records,
            [Record::generic(
                "book",
                Some("b"),
                vec![Field::new("t", Value::single("x"))]
            )]
        );
    }

    #[test]
    fn test_resume_after_failure() {
        // an unterminated group hides a record on the same line
        let input = "@a{x, t = {open @b{y,}\n@c{z,}";
        let keys: Vec<_> = Records::new(input).map(|r| r.key).collect();
        assert_eq!(keys, [Some("z".to_owned())]);

        // the failed text is not scanned again
        let input = "@a{".repeat(1000);
        let mut records = Records::new(&input);
        assert_eq!(records.next(), None);
        assert_eq!(records.position(), input.len());

        let input = "@misc{broken, title = {never closed\nStray @ signs.\n@misc{k,}";
        let keys: Vec<_> = Records::new(input).map(|r| r.key).collect();
        assert_eq!(keys, [Some("k".to_owned())]);
    }

    #[test]
    fn test_records_order() {
        let input = "@string{a = 1}\n@comment{c}\n@article{k, t = a}";
        let tags: Vec<_> = Records::new(input).map(|r| r.tag).collect();
        assert_eq!(tags, ["string", "comment", "article"]);
    }

    #[test]
    fn test_records_resume_from_reader() {
        let input = "@first{a,} @second{b,}";
        let mut reader = StrReader::new(input);
        assert_eq!(reader.record().map(|r| r.tag), Ok("first".to_owned()));
        let rest: Vec<_> = Records::from(reader).map(|r| r.tag).collect();
        assert_eq!(rest, ["second"]);
    }
}
