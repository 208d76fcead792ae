//! Phrase requests and translation results.

use std::fmt;

/// A unit of translation input: a phrase, optionally with a count used to
/// pick a plural form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phrase {
    pub text: String,
    pub count: Option<i64>,
}

impl Phrase {
    pub fn new<S: Into<String>>(text: S) -> Self {
        Self {
            text: text.into(),
            count: None,
        }
    }

    pub fn with_count<S: Into<String>>(text: S, count: i64) -> Self {
        Self {
            text: text.into(),
            count: Some(count),
        }
    }
}

impl From<&str> for Phrase {
    fn from(text: &str) -> Self {
        Phrase::new(text)
    }
}

impl From<String> for Phrase {
    fn from(text: String) -> Self {
        Phrase::new(text)
    }
}

impl From<(&str, i64)> for Phrase {
    fn from((text, count): (&str, i64)) -> Self {
        Phrase::with_count(text, count)
    }
}

impl From<(String, i64)> for Phrase {
    fn from((text, count): (String, i64)) -> Self {
        Phrase::with_count(text, count)
    }
}

impl From<&Phrase> for Phrase {
    fn from(phrase: &Phrase) -> Self {
        phrase.clone()
    }
}

/// Result of a translation call.
///
/// A single requested phrase yields `Single`; several yield `Many` in the
/// order they were requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    Single(String),
    Many(Vec<String>),
}

impl Translation {
    /// Shape `values` after the request: one value becomes `Single`.
    pub(crate) fn from_values(mut values: Vec<String>) -> Self {
        if values.len() == 1 {
            Translation::Single(values.remove(0))
        } else {
            Translation::Many(values)
        }
    }

    pub fn as_single(&self) -> Option<&str> {
        match self {
            Translation::Single(value) => Some(value),
            Translation::Many(_) => None,
        }
    }

    pub fn as_many(&self) -> Option<&[String]> {
        match self {
            Translation::Single(_) => None,
            Translation::Many(values) => Some(values),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Translation::Single(_) => 1,
            Translation::Many(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_vec(self) -> Vec<String> {
        match self {
            Translation::Single(value) => vec![value],
            Translation::Many(values) => values,
        }
    }
}

impl fmt::Display for Translation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Translation::Single(value) => f.write_str(value),
            Translation::Many(values) => write!(f, "[{}]", values.join(", ")),
        }
    }
}

impl PartialEq<&str> for Translation {
    fn eq(&self, other: &&str) -> bool {
        self.as_single() == Some(*other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_conversions() {
        assert_eq!(Phrase::from("hello"), Phrase::new("hello"));
        assert_eq!(Phrase::from(("hello", 2)), Phrase::with_count("hello", 2));
        assert_eq!(
            Phrase::from(("hello".to_string(), 0)).count,
            Some(0)
        );
        assert_eq!(Phrase::from("hello".to_string()).count, None);
    }

    #[test]
    fn test_translation_shape_follows_value_count() {
        let single = Translation::from_values(vec!["Hej".into()]);
        assert_eq!(single, Translation::Single("Hej".into()));
        assert_eq!(single, "Hej");

        let many = Translation::from_values(vec!["a".into(), "b".into()]);
        assert_eq!(many.as_many(), Some(&["a".to_string(), "b".to_string()][..]));
        assert_eq!(many.len(), 2);
        assert!(many.as_single().is_none());
    }

    #[test]
    fn test_translation_into_vec_and_display() {
        assert_eq!(Translation::Single("x".into()).into_vec(), vec!["x"]);
        let many = Translation::Many(vec!["Jag har många".into(), "översättningar".into()]);
        assert_eq!(many.to_string(), "[Jag har många, översättningar]");
    }
}
