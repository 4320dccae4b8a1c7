//! The loaded property store and its typed accessors.
//!
//! Every stored value is the trimmed text found after `=` in the source file.
//! Types are only applied when an accessor asks for one. Accessors with a
//! natural fallback (string, integer, boolean, path) never fail; the date
//! accessor reports an error because there is no sensible date to substitute.

use std::collections::hash_map;
use std::collections::HashMap;
use std::path::MAIN_SEPARATOR;

use chrono::NaiveDate;
use tracing::debug;

use crate::date_format::DateFormat;
use crate::error::{PropsError, Result};

/// Tokens that make [`Props::get_bool`] return `true`, compared case-insensitively.
pub const TRUTH_SET: [&str; 4] = ["TRUE", "YES", "Y", "1"];

const FORMAT_MARKER: &str = "format:";

/// An immutable map of property keys to their raw text values.
///
/// Built by [`crate::load`] or [`crate::parse`]; there is no way to change it
/// afterwards, so a shared reference can be handed to any number of threads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Props {
    entries: HashMap<String, String>,
}

impl Props {
    pub(crate) fn from_entries(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Keys in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    /// The stored value, or `None` if the key was never assigned.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// The stored value, or `""` if the key is absent.
    pub fn get(&self, key: &str) -> &str {
        self.value(key).unwrap_or("")
    }

    pub fn try_int(&self, key: &str) -> Option<i64> {
        self.value(key)?.parse().ok()
    }

    /// Base-10 integer value of `key`, or `default` when absent or unparsable.
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.try_int(key).unwrap_or(default)
    }

    /// `Some(true)` when the value is in [`TRUTH_SET`]; `None` for anything else,
    /// including values such as `false` or `no`.
    pub fn try_bool(&self, key: &str) -> Option<bool> {
        let value = self.value(key)?.to_uppercase();
        TRUTH_SET.contains(&value.as_str()).then_some(true)
    }

    /// `true` if the value is one of `TRUE`, `YES`, `Y`, `1` (any case);
    /// otherwise `default`. An explicit `false` does not override a `true` default.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.try_bool(key).unwrap_or(default)
    }

    /// The value trimmed, with repeated host path separators collapsed to one.
    pub fn get_clean_file_path(&self, key: &str) -> String {
        self.get_clean_file_path_with(key, MAIN_SEPARATOR)
    }

    /// Like [`Props::get_clean_file_path`] but collapsing `separator` instead of
    /// the host separator. Other separator characters are left alone.
    pub fn get_clean_file_path_with(&self, key: &str, separator: char) -> String {
        let path = self.get(key).trim();
        let mut cleaned = String::with_capacity(path.len());
        let mut previous = None;
        for c in path.chars() {
            if c == separator && previous == Some(separator) {
                continue;
            }
            cleaned.push(c);
            previous = Some(c);
        }
        cleaned
    }

    /// Resolves a value of the form `<date> format:<code>`, e.g.
    /// `08/21/2023 format:MM/DD/YYYY`. See [`DateFormat`] for the codes.
    pub fn get_date(&self, key: &str) -> Result<NaiveDate> {
        let result = self.resolve_date(key);
        if let Err(err) = &result {
            debug!(key, error = %err, "date property did not resolve");
        }
        result
    }

    fn resolve_date(&self, key: &str) -> Result<NaiveDate> {
        let value = self.get(key);
        if value.is_empty() {
            return Err(PropsError::NoSuchKey {
                key: key.to_string(),
            });
        }

        let (text, code) = split_format_directive(value).ok_or_else(|| PropsError::MalformedDate {
            key: key.to_string(),
        })?;

        let format = DateFormat::from_code(code).ok_or_else(|| PropsError::UnrecognizedFormat {
            key: key.to_string(),
            format: code.to_string(),
        })?;

        format.parse(text).map_err(|source| PropsError::DateParse {
            key: key.to_string(),
            source,
        })
    }
}

/// Splits at the first case-insensitive `format:`; both halves are trimmed.
fn split_format_directive(value: &str) -> Option<(&str, &str)> {
    // ASCII lowering keeps byte offsets aligned with `value`
    let start = value.to_ascii_lowercase().find(FORMAT_MARKER)?;
    let text = &value[..start];
    let code = &value[start + FORMAT_MARKER.len()..];
    Some((text.trim(), code.trim()))
}

/// Iterator over `(key, value)` pairs, in arbitrary order.
pub struct Iter<'a> {
    inner: hash_map::Iter<'a, String, String>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a Props {
    type Item = (&'a str, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
