//! Normalized cache keys.

use std::fmt;

use crate::phrase::Phrase;

/// Key under which one translated phrase is cached.
///
/// An absent context and an empty context are the same key, as they are on
/// the wire. An absent count and an explicit count are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    language: String,
    context: String,
    text: String,
    count: Option<i64>,
}

impl CacheKey {
    pub fn new(language: &str, context: Option<&str>, phrase: &Phrase) -> Self {
        Self {
            language: language.to_string(),
            context: context.unwrap_or_default().to_string(),
            text: phrase.text.clone(),
            count: phrase.count,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn context(&self) -> Option<&str> {
        (!self.context.is_empty()).then_some(self.context.as_str())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn count(&self) -> Option<i64> {
        self.count
    }

    /// Flat string form for external stores.
    ///
    /// Language and context are length-prefixed and the count never contains
    /// `:`, so distinct keys never collide.
    pub fn storage_key(&self) -> String {
        let count = match self.count {
            Some(count) => count.to_string(),
            None => "_".to_string(),
        };
        format!(
            "{}:{}{}:{}{}:{}",
            self.language.len(),
            self.language,
            self.context.len(),
            self.context,
            count,
            self.text
        )
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.storage_key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_count_presence_changes_key() {
        let bare = CacheKey::new("se", None, &Phrase::from("I have many"));
        let one = CacheKey::new("se", None, &Phrase::from(("I have many", 1)));
        let zero = CacheKey::new("se", None, &Phrase::from(("I have many", 0)));

        assert_ne!(bare, one);
        assert_ne!(bare, zero);
        assert_ne!(one, zero);
        assert_ne!(bare.storage_key(), one.storage_key());
        assert_ne!(one.storage_key(), zero.storage_key());
    }

    #[test]
    fn test_missing_context_equals_empty_context() {
        let phrase = Phrase::from("hello");
        let none = CacheKey::new("de", None, &phrase);
        let empty = CacheKey::new("de", Some(""), &phrase);
        assert_eq!(none, empty);
        assert_eq!(none.context(), None);

        let menu = CacheKey::new("de", Some("menu"), &phrase);
        assert_ne!(none, menu);
        assert_eq!(menu.context(), Some("menu"));
    }

    #[test]
    fn test_storage_key_layout() {
        let key = CacheKey::new("se", Some("ui"), &Phrase::from(("apples", 3)));
        assert_eq!(key.storage_key(), "2:se2:ui3:apples");

        let bare = CacheKey::new("se", None, &Phrase::from("apples"));
        assert_eq!(bare.storage_key(), "2:se0:_:apples");
    }

    #[test]
    fn test_storage_key_separator_in_components() {
        let a = CacheKey::new("a:b", Some("c"), &Phrase::from("d"));
        let b = CacheKey::new("a", Some("b:c"), &Phrase::from("d"));
        assert_ne!(a.storage_key(), b.storage_key());
    }

    proptest! {
        #[test]
        fn prop_storage_key_is_injective(
            lang_a in "[a-z:]{0,4}", ctx_a in proptest::option::of("[a-z:0-9]{0,4}"),
            text_a in "[a-z:0-9 ]{0,6}", count_a in proptest::option::of(-2i64..3),
            lang_b in "[a-z:]{0,4}", ctx_b in proptest::option::of("[a-z:0-9]{0,4}"),
            text_b in "[a-z:0-9 ]{0,6}", count_b in proptest::option::of(-2i64..3),
        ) {
            let a = CacheKey::new(&lang_a, ctx_a.as_deref(), &Phrase { text: text_a, count: count_a });
            let b = CacheKey::new(&lang_b, ctx_b.as_deref(), &Phrase { text: text_b, count: count_b });
            prop_assert_eq!(a == b, a.storage_key() == b.storage_key());
        }
    }
}
