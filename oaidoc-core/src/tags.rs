//! The `oai` annotation mini-language.
//!
//! An annotation is a `;`-separated list of `key` or `key=value` entries:
//!
//! ```text
//! minLength=1;maxLength=64;pattern=^[a-z]+$;deprecated
//! ```
//!
//! A bare key carries an empty value, which boolean properties read as
//! `true`. The annotation `-` on its own marks the field as ignored.

use std::collections::HashMap;
use std::str::FromStr;

/// Annotation that removes a field from schemas and parameter lists.
pub const IGNORE: &str = "-";

/// Result of parsing one field's annotation.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldTags {
    /// The field is skipped entirely.
    Ignored,
    /// Parsed entries; empty when the field had no annotation.
    Set(TagSet),
}

impl FieldTags {
    pub fn is_ignored(&self) -> bool {
        matches!(self, FieldTags::Ignored)
    }

    /// The parsed set, or `None` for an ignored field.
    pub fn into_set(self) -> Option<TagSet> {
        match self {
            FieldTags::Ignored => None,
            FieldTags::Set(set) => Some(set),
        }
    }
}

/// Parse a raw annotation. `None` yields an empty set.
pub fn parse(raw: Option<&str>) -> FieldTags {
    let Some(raw) = raw else {
        return FieldTags::Set(TagSet::default());
    };
    if raw.trim() == IGNORE {
        return FieldTags::Ignored;
    }

    let mut entries = HashMap::new();
    for entry in raw.split(';') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let (key, value) = match entry.split_once('=') {
            Some((k, v)) => (k.trim(), v.trim()),
            None => (entry, ""),
        };
        if key.is_empty() {
            continue;
        }
        // Later entries overwrite earlier ones.
        entries.insert(key.to_string(), value.to_string());
    }
    FieldTags::Set(TagSet { entries })
}

/// Key to raw value mapping for a single field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagSet {
    entries: HashMap<String, String>,
}

impl TagSet {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Boolean value of `key`. A bare key means `true`; an unparseable value
    /// is logged and treated as absent.
    pub fn flag(&self, key: &str) -> Option<bool> {
        let raw = self.get(key)?;
        if raw.is_empty() {
            return Some(true);
        }
        parse_bool(raw).or_else(|| {
            tracing::warn!(key, value = raw, "ignoring malformed boolean annotation");
            None
        })
    }

    /// Typed value of `key`; an unparseable value is logged and treated as
    /// absent.
    pub fn parsed<T: FromStr>(&self, key: &str) -> Option<T> {
        let raw = self.get(key)?;
        match raw.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(
                    key,
                    value = raw,
                    expected = std::any::type_name::<T>(),
                    "ignoring malformed annotation value"
                );
                None
            }
        }
    }

    /// Comma-separated list value of `key`, trimmed, empty items dropped.
    pub fn list(&self, key: &str) -> Option<Vec<&str>> {
        let raw = self.get(key)?;
        Some(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }
}

/// Boolean literal parser accepting the usual spellings (`true`, `1`, `yes`, ...).
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "true" | "t" | "1" | "yes" | "on" => Some(true),
        "false" | "f" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_annotation_is_empty_not_ignored() {
        let tags = parse(None);
        assert!(!tags.is_ignored());
        assert!(tags.into_set().unwrap().is_empty());
    }

    #[test]
    fn ignore_sentinel_short_circuits() {
        assert_eq!(parse(Some("-")), FieldTags::Ignored);
        assert_eq!(parse(Some("  -  ")), FieldTags::Ignored);
    }

    #[test]
    fn dash_inside_a_list_is_not_the_sentinel() {
        let set = parse(Some("-;minLength=2")).into_set().unwrap();
        assert_eq!(set.get("-"), Some(""));
        assert_eq!(set.get("minLength"), Some("2"));
    }

    #[test]
    fn entries_are_trimmed() {
        let set = parse(Some(" minLength = 1 ; maxLength= 5 ;deprecated "))
            .into_set()
            .unwrap();
        assert_eq!(set.get("minLength"), Some("1"));
        assert_eq!(set.get("maxLength"), Some("5"));
        assert_eq!(set.get("deprecated"), Some(""));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn last_duplicate_wins() {
        let set = parse(Some("minimum=1;minimum=7")).into_set().unwrap();
        assert_eq!(set.get("minimum"), Some("7"));
    }

    #[test]
    fn value_keeps_equals_signs() {
        let set = parse(Some("pattern=^a=b$")).into_set().unwrap();
        assert_eq!(set.get("pattern"), Some("^a=b$"));
    }

    #[test]
    fn flag_reads_bare_key_as_true() {
        let set = parse(Some("deprecated;nullable=false;readOnly=oops"))
            .into_set()
            .unwrap();
        assert_eq!(set.flag("deprecated"), Some(true));
        assert_eq!(set.flag("nullable"), Some(false));
        assert_eq!(set.flag("readOnly"), None);
        assert_eq!(set.flag("missing"), None);
    }

    #[test]
    fn parsed_ignores_malformed_numbers() {
        let set = parse(Some("minimum=abc;maximum=10")).into_set().unwrap();
        assert_eq!(set.parsed::<f64>("minimum"), None);
        assert_eq!(set.parsed::<f64>("maximum"), Some(10.0));
    }

    #[test]
    fn list_splits_on_commas() {
        let set = parse(Some("enum=a, b,,c")).into_set().unwrap();
        assert_eq!(set.list("enum"), Some(vec!["a", "b", "c"]));
    }
}
