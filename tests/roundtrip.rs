use std::io;

use bibtex_records::ser::{CompactFormatter, Formatter};
use bibtex_records::{Field, Kind, Record, Value, Writer, parse_all, parse_one, to_string};
use proptest::prelude::*;

/// Writes `sep` around every token, to check that ignored characters are ignored.
struct SpacedFormatter {
    sep: &'static str,
}

impl SpacedFormatter {
    fn around<W>(&self, writer: &mut W, token: &[u8]) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(self.sep.as_bytes())?;
        writer.write_all(token)?;
        writer.write_all(self.sep.as_bytes())
    }
}

impl Formatter for SpacedFormatter {
    fn write_tag<W>(&mut self, writer: &mut W, tag: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b"@")?;
        writer.write_all(self.sep.as_bytes())?;
        writer.write_all(tag.as_bytes())
    }

    fn write_body_start<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.around(writer, b"{")
    }

    fn write_key_end<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.around(writer, b",")
    }

    fn write_field_separator<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.around(writer, b"=")
    }

    fn write_token_separator<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.around(writer, b"#")
    }

    fn write_field_delimiter<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.around(writer, b",")
    }

    fn write_body_end<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.around(writer, b"}")
    }
}

fn write_with<F: Formatter>(record: &Record, formatter: F) -> String {
    let mut writer = Writer::with_formatter(Vec::new(), formatter);
    writer.write_record(record).unwrap();
    String::from_utf8(writer.into_inner()).unwrap()
}

fn fragment() -> impl Strategy<Value = String> {
    // a fragment ending in a backslash is only representable as a bare unit
    "[a-zA-Z0-9 ,#%@=()\"{}\n\\\\]{0,12}".prop_filter("trailing backslash", |text| {
        !text.ends_with('\\')
    })
}

/// The source text of a single value unit, possibly malformed.
fn unit_source() -> impl Strategy<Value = String> {
    prop_oneof![
        r"[a-z0-9\\]{1,4}( [a-z0-9\\]{1,4})?",
        r#"\{[a-z\\{}" ]{0,8}\}"#,
        r#""[a-z\\{}" ]{0,8}""#,
    ]
}

fn value() -> impl Strategy<Value = Value> {
    prop::collection::vec(fragment(), 1..4).prop_map(Value)
}

fn field() -> impl Strategy<Value = Field> {
    ("[a-zA-Z][a-zA-Z0-9_:-]{0,8}", value()).prop_map(|(name, value)| Field::new(name, value))
}

fn generic_record() -> impl Strategy<Value = Record> {
    (
        "[a-zA-Z][a-zA-Z0-9]{0,8}".prop_filter("keyword tag", |tag| {
            Kind::classify(tag) == Kind::Generic
        }),
        prop::option::of("[a-zA-Z0-9:_-]{1,10}"),
        prop::collection::vec(field(), 0..5),
    )
        .prop_map(|(tag, key, fields)| Record::generic(tag, key, fields))
}

fn special_record() -> impl Strategy<Value = Record> {
    prop_oneof![
        ("[a-zA-Z][a-zA-Z0-9_-]{0,8}", value())
            .prop_map(|(name, value)| Record::string_definition(name, value)),
        (prop_oneof!["comment", "include", "preamble"], value())
            .prop_map(|(tag, value)| Record::simple(tag, value)),
    ]
}

proptest! {
    #[test]
    fn generic_roundtrip(record in generic_record()) {
        prop_assert_eq!(parse_one(&to_string(&record)).unwrap(), record.clone());
        prop_assert_eq!(parse_one(&write_with(&record, CompactFormatter)).unwrap(), record);
    }

    #[test]
    fn special_roundtrip(record in special_record()) {
        prop_assert_eq!(parse_one(&to_string(&record)).unwrap(), record);
    }

    #[test]
    fn ignored_characters(
        record in generic_record(),
        sep in prop::sample::select(vec![" ", "\n\t", " % note\n ", "%\n", "\r\n  %% x\n"]),
    ) {
        let spaced = write_with(&record, SpacedFormatter { sep });
        prop_assert_eq!(parse_one(&spaced).unwrap(), record);
    }

    #[test]
    fn parsed_roundtrip(units in prop::collection::vec(unit_source(), 1..4)) {
        let input = format!("@misc{{k, a = {}, b = {}}}", units.join(" # "), units[0]);
        if let Ok(record) = parse_one(&input) {
            prop_assert_eq!(parse_one(&to_string(&record)).unwrap(), record.clone());
            prop_assert_eq!(parse_one(&write_with(&record, CompactFormatter)).unwrap(), record);
        }
    }

    #[test]
    fn escape_symmetry(text in "[{}\"a ]*") {
        let record = Record::simple("comment", Value::single(text));
        prop_assert_eq!(parse_one(&to_string(&record)).unwrap(), record);
    }

    #[test]
    fn many_roundtrip(records in prop::collection::vec(generic_record(), 0..6)) {
        let text = bibtex_records::to_string_many(&records);
        prop_assert_eq!(parse_all(&text), records);
    }

    #[test]
    fn no_panic(s in "\\PC*") {
        let _ = parse_one(&s);
        let _ = parse_all(&s);
    }

    #[test]
    fn junk_is_ignored(record in generic_record(), junk in "[a-z ,{}()\n]*") {
        let text = format!("{junk}{}{junk}", to_string(&record));
        prop_assert_eq!(parse_all(&text), vec![record]);
    }
}
