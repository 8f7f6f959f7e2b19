//! # Description of the record syntax
//! This module gives an explicit description of the notation accepted by the parser in
//! [`crate::parse`], as a [pest](https://pest.rs) grammar. The grammar is only used for
//! documentation and testing.
//!
//! ## Ignored characters and junk
//! 1. Whitespace is any ASCII char accepted by `u8::is_ascii_whitespace`. A comment is started
//!    by `%` and runs to the end of the line, or the end of input.
//!    ```ignore
//!    ws = _{ (" " | "\t" | "\n" | "\r" | "\x0C")+ }
//!    tex_comment = _{ "%" ~ (!"\n" ~ ANY)* ~ ("\n" | EOI) }
//!    ign = _{ (tex_comment | ws)* }
//!    ```
//!    Ignored characters may appear between any two tokens of a record, but never inside a
//!    tag, key, field name or value unit.
//! 2. Junk characters are any characters which are either commented or are not `@`.
//!    ```ignore
//!    junk = _{ (tex_comment | !("@" | "%") ~ ANY)* }
//!    ```
//!
//! ## Tags, keys and field names
//! 1. A tag is a non-empty run of alphanumeric chars. The tags `string`, `comment`, `include`
//!    and `preamble` are keywords, matched ignoring ASCII case, which select a different record
//!    shape.
//!    ```ignore
//!    keyword_string = _{ ^"string" ~ !alnum }
//!    keyword_simple = _{ (^"comment" | ^"include" | ^"preamble") ~ !alnum }
//!    tag = @{ !(keyword_string | keyword_simple) ~ alnum+ }
//!    ```
//! 2. A key runs until the next `,` or whitespace. A `%` also ends the key, so that it can be
//!    followed by a comment.
//!    ```ignore
//!    key = @{ (!("," | "%" | " " | "\t" | "\n" | "\r" | "\x0C") ~ ANY)+ }
//!    ```
//! 3. A field name is any non-empty run of chars other than whitespace and `=,)}%`.
//!
//! ## Values
//! 1. A brace group is delimited by `{}` and contains balanced brackets. The escapes `\{` and
//!    `\}` stand for literal brackets which do not count towards the balance.
//!    ```ignore
//!    brace_char = _{ "\\" ~ ("{" | "}") | "{" ~ brace_char* ~ "}" | !("{" | "}") ~ ANY }
//!    braced = @{ brace_char* }
//!    ```
//! 2. A quote group is delimited by `"`. The escape `\"` stands for a literal quote, and a `{`
//!    opens a nested group with balanced brackets. The nested group keeps the escape `\"`, so
//!    that `\}` closes it; text following an unescaped `"` inside it uses the escapes `\{` and
//!    `\}` up to the next bracket.
//!    ```ignore
//!    quote_text = _{ ("\\\"" | !("\"" | "{" | "}") ~ ANY)+ }
//!    brace_text = _{ ("\\" ~ ("{" | "}") | !("{" | "}") ~ ANY)+ }
//!    quote_group = _{ "{" ~ (quote_group | quote_text | brace_text)* ~ "}" }
//!    quote_char = _{ "\\\"" | quote_group | !("\"" | "{" | "}") ~ ANY }
//!    quoted = @{ quote_char* }
//!    ```
//! 3. A bare unit, such as `2012` or `jan`, is any run of chars other than `,})#%`.
//! 4. A value is a sequence of units separated by `#`.
//!    ```ignore
//!    unit = _{ "{" ~ braced ~ "}" | "\"" ~ quoted ~ "\"" | bare }
//!    value = { unit ~ (ign ~ "#" ~ ign ~ unit)* }
//!    field = { field_name ~ ign ~ "=" ~ ign ~ value }
//!    ```
//!
//! ## Records
//! A record is delimited either by `{}` or by `()`.
//! 1. A generic record has a possibly empty key, a comma, and a possibly empty list of fields
//!    with an optional trailing comma.
//!    ```ignore
//!    generic_body = _{ ign ~ key? ~ ign ~ "," ~ ign ~ (field ~ ign ~ ("," ~ ign ~ field ~ ign)* ~ ("," ~ ign)?)? }
//!    ```
//! 2. A `string` record contains exactly one field, and a `comment`, `include` or `preamble`
//!    record contains exactly one value. There is no trailing comma.
//!    ```ignore
//!    record = { "@" ~ ign ~ (string_record | simple_record | generic_record) }
//!    ```
//!
//! ## Documents
//! A document is a list of records separated by junk.
//! ```ignore
//! bib = _{ SOI ~ junk ~ (record ~ junk)* ~ EOI }
//! ```
//! The [`Records`](crate::Records) iterator is more lenient than `bib`: an `@` which does not
//! begin a record is skipped as junk.
use pest_derive::Parser;

/// A parser derived from the grammar in `syntax/record.pest`.
#[derive(Parser)]
#[grammar = "syntax/record.pest"] // relative to src
pub struct RecordSyntax;
