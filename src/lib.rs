//! # bibtex_records
//!
//! A parser and generator for BibTeX-style reference records such as
//! ```bib
//! @article{key,
//!     title = {A {Nested} Title},
//!     year = 2024,
//!     note = "part one" # {part two},
//! }
//! ```
//! A record has a tag, an optional key, and an ordered list of `name = value` fields. A value is
//! a list of text fragments: the `#` concatenations are preserved rather than joined.
//!
//! Two tags are special. A `@string{name = value}` record holds exactly one field, and the
//! `@comment`, `@include` and `@preamble` records hold exactly one value, stored as a field with
//! an empty name. Tags are matched against these keywords ignoring ASCII case.
//!
//! ## Parsing
//! Use [`parse_one`] to parse the record at the start of a buffer, or [`parse_all`] to collect
//! every record in a buffer, skipping any text between records. [`read_one`] and [`read_all`] do
//! the same for a [`std::io::Read`].
//! ```
//! use bibtex_records::{parse_all, parse_one, Kind};
//!
//! let record = parse_one("@book{knuth, title = {The {TeX}book}, year = 1984}").unwrap();
//! assert_eq!(record.key.as_deref(), Some("knuth"));
//! assert_eq!(record.field("title").unwrap().joined(), "The {TeX}book");
//!
//! let records = parse_all("junk @string{a = {b}} more junk @misc{k,}");
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[0].kind(), Kind::StringDefinition);
//! ```
//!
//! ## Writing
//! [`to_string`] writes a record in the canonical layout, which parses back to the same record.
//! The layout can be changed with a custom [`ser::Formatter`].
//! ```
//! use bibtex_records::{parse_one, to_string, Field, Record, Value};
//!
//! let record = Record::generic(
//!     "misc",
//!     Some("key"),
//!     vec![Field::new("note", Value(vec!["a".into(), "{b".into()]))],
//! );
//! let text = to_string(&record);
//! assert_eq!(text, "@misc{key,\n    note = {a} # {\\{b}\n}");
//! assert_eq!(parse_one(&text).unwrap(), record);
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
pub mod parse;
pub mod record;
pub mod ser;

#[cfg(feature = "syntax")]
#[cfg_attr(docsrs, doc(cfg(feature = "syntax")))]
pub mod syntax;

pub use error::{Error, ErrorCode, Expected, Result};
pub use parse::{RecordParse, Records, StrReader, parse_all, parse_one, read_all, read_one};
pub use record::{Field, Kind, Record, Value};
pub use ser::{Writer, to_string, to_string_many, to_writer};
