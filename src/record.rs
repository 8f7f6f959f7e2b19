//! The record data model.
use serde::{Deserialize, Serialize};
use unicase::Ascii;

/// The shape of a record, determined by its tag.
///
/// Classification compares the tag against a closed set of keywords, ignoring ASCII case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Any tag which is not a keyword, such as `article`. Has a key and a list of fields.
    Generic,
    /// The `string` keyword: a single `name = value` definition.
    StringDefinition,
    /// The `comment`, `include` and `preamble` keywords: a single value.
    Simple,
}

impl Kind {
    /// Classify a tag. String definitions take priority over simple records, and everything
    /// else is generic.
    pub fn classify(tag: &str) -> Self {
        let tag = Ascii::new(tag);
        if tag == Ascii::new("string") {
            Self::StringDefinition
        } else if tag == Ascii::new("comment")
            || tag == Ascii::new("include")
            || tag == Ascii::new("preamble")
        {
            Self::Simple
        } else {
            Self::Generic
        }
    }
}

/// A field value: one or more text fragments joined by `#` in the source.
///
/// Fragments are stored unescaped and are never joined eagerly, so that the concatenation
/// structure survives a parse and generate cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Value(pub Vec<String>);

impl Value {
    /// A value consisting of a single fragment.
    pub fn single<S: Into<String>>(text: S) -> Self {
        Self(vec![text.into()])
    }

    /// The fragments in source order.
    pub fn fragments(&self) -> &[String] {
        &self.0
    }

    /// Whether the value was written as a concatenation of more than one fragment.
    pub fn is_concatenated(&self) -> bool {
        self.0.len() > 1
    }

    /// Resolve the concatenation into a single string.
    pub fn joined(&self) -> String {
        self.0.concat()
    }
}

impl<S: Into<String>> FromIterator<S> for Value {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// A `name = value` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: Value,
}

impl Field {
    pub fn new<S: Into<String>>(name: S, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// A single `@tag{...}` record.
///
/// String definitions and simple records always contain exactly one field and never a key. The
/// field of a simple record has an empty name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    pub tag: String,
    pub key: Option<String>,
    pub fields: Vec<Field>,
}

impl Record {
    /// Construct a generic record such as `@article{key, ...}`.
    pub fn generic<T, K>(tag: T, key: Option<K>, fields: Vec<Field>) -> Self
    where
        T: Into<String>,
        K: Into<String>,
    {
        Self {
            tag: tag.into(),
            key: key.map(Into::into),
            fields,
        }
    }

    /// Construct a string definition `@string{name = value}`.
    pub fn string_definition<N: Into<String>>(name: N, value: Value) -> Self {
        Self {
            tag: "string".to_owned(),
            key: None,
            fields: vec![Field::new(name, value)],
        }
    }

    /// Construct a simple record such as `@preamble{value}`.
    pub fn simple<T: Into<String>>(tag: T, value: Value) -> Self {
        Self {
            tag: tag.into(),
            key: None,
            fields: vec![Field::new("", value)],
        }
    }

    /// The shape of this record.
    pub fn kind(&self) -> Kind {
        Kind::classify(&self.tag)
    }

    /// The first field with the given name. Names are compared exactly.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(Kind::classify("string"), Kind::StringDefinition);
        assert_eq!(Kind::classify("STRING"), Kind::StringDefinition);
        assert_eq!(Kind::classify("String"), Kind::StringDefinition);
        assert_eq!(Kind::classify("comment"), Kind::Simple);
        assert_eq!(Kind::classify("InClUdE"), Kind::Simple);
        assert_eq!(Kind::classify("PREAMBLE"), Kind::Simple);
        assert_eq!(Kind::classify("article"), Kind::Generic);
        assert_eq!(Kind::classify("strings"), Kind::Generic);
        assert_eq!(Kind::classify("comments"), Kind::Generic);
        // long s folds to 's' under full Unicode case folding
        assert_eq!(Kind::classify("ſtring"), Kind::Generic);
    }

    #[test]
    fn test_value() {
        let value: Value = ["a", "b", "c"].into_iter().collect();
        assert!(value.is_concatenated());
        assert_eq!(value.joined(), "abc");
        assert_eq!(value.fragments(), ["a", "b", "c"]);

        let value = Value::single("x");
        assert!(!value.is_concatenated());
        assert_eq!(value.joined(), "x");
    }

    #[test]
    fn test_record_accessors() {
        let record = Record::generic(
            "article",
            Some("key"),
            vec![
                Field::new("title", Value::single("first")),
                Field::new("title", Value::single("second")),
            ],
        );
        assert_eq!(record.kind(), Kind::Generic);
        assert_eq!(record.field("title"), Some(&Value::single("first")));
        assert_eq!(record.field("Title"), None);

        let record = Record::simple("Preamble", Value::single("x"));
        assert_eq!(record.kind(), Kind::Simple);
        assert_eq!(record.field(""), Some(&Value::single("x")));
        assert_eq!(record.key, None);

        let record = Record::string_definition("a", Value::single("b"));
        assert_eq!(record.kind(), Kind::StringDefinition);
        assert_eq!(record.fields.len(), 1);
    }

    #[test]
    fn test_serde_representation() {
        let record = Record::generic(
            "book",
            None::<String>,
            vec![Field::new("a", ["x", "y"].into_iter().collect())],
        );
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"tag":"book","key":null,"fields":[{"name":"a","value":["x","y"]}]}"#
        );
        let back: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }
}
