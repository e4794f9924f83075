//! Dynamic placeholder store and resolver
//!
//! A placeholder is the marker [`DYNAMIC_MARKER`] followed by a key, e.g.
//! `dyn:userId`. In outgoing request text the token is replaced by the value
//! currently bound to the key. In an expected response the same marker instead
//! asks the comparator to *capture* a binding from the actual response: the
//! actual leaf is read as `key:value` and stored for later tests.
//!
//! The store is an explicit run-scoped context. It is threaded through the
//! suite runner and every executor, so tests later in a suite see values
//! captured by tests earlier in it.

use crate::logging::{log_debug, log_trace};
use serde::Serialize;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Prefix that marks a dynamic value.
pub const DYNAMIC_MARKER: &str = "dyn:";

/// Run-scoped table of resolved placeholder values.
///
/// Last writer wins when a key is captured twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlaceholderStore {
    values: BTreeMap<String, String>,
}

/// A `key:value` binding read from an actual response leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub key: String,
    pub value: String,
}

impl PlaceholderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `key` to `value`, replacing any earlier binding.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        log_debug!(key = %key, value = %value, "Placeholder bound");
        self.values.insert(key, value);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Replace every `dyn:<key>` in `input` with the bound value.
    ///
    /// Unknown keys are left as literal text. Input without the marker is
    /// returned borrowed and untouched.
    pub fn resolve_str<'a>(&self, input: &'a str) -> Cow<'a, str> {
        if !input.contains(DYNAMIC_MARKER) {
            return Cow::Borrowed(input);
        }

        let mut resolved = input.to_string();
        for (key, value) in self.keys_longest_first() {
            let token = format!("{DYNAMIC_MARKER}{key}");
            if resolved.contains(&token) {
                resolved = resolved.replace(&token, value);
            }
        }

        log_trace!(input = %input, resolved = %resolved, "Resolved placeholders");
        Cow::Owned(resolved)
    }

    /// Byte-buffer counterpart of [`resolve_str`](Self::resolve_str).
    pub fn resolve_bytes<'a>(&self, input: &'a [u8]) -> Cow<'a, [u8]> {
        if !contains_bytes(input, DYNAMIC_MARKER.as_bytes()) {
            return Cow::Borrowed(input);
        }

        if let Ok(text) = std::str::from_utf8(input) {
            return match self.resolve_str(text) {
                Cow::Borrowed(_) => Cow::Borrowed(input),
                Cow::Owned(resolved) => Cow::Owned(resolved.into_bytes()),
            };
        }

        let mut resolved = input.to_vec();
        for (key, value) in self.keys_longest_first() {
            let token = format!("{DYNAMIC_MARKER}{key}");
            resolved = replace_bytes(&resolved, token.as_bytes(), value.as_bytes());
        }
        Cow::Owned(resolved)
    }

    // Longer keys first so `dyn:idx` is not clobbered by a binding for `id`.
    fn keys_longest_first(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self.iter().collect();
        pairs.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(b.0)));
        pairs
    }
}

/// Whether a serialized expected leaf declares a placeholder.
pub fn is_placeholder(expected: &[u8]) -> bool {
    contains_bytes(expected, DYNAMIC_MARKER.as_bytes())
}

/// Parse an actual leaf as a `key:value` binding.
///
/// Only string leaves can carry a binding. A leading `dyn:` marker is dropped,
/// then the decoded text is split at the first `:`. Returns `None` when there
/// is no separator or the key is empty.
pub fn parse_capture(actual: &Value) -> Option<Capture> {
    let text = actual.as_str()?;
    let text = text.strip_prefix(DYNAMIC_MARKER).unwrap_or(text);
    let (key, value) = text.split_once(':')?;
    if key.is_empty() {
        return None;
    }
    Some(Capture {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    find_bytes(haystack, needle, 0).is_some()
}

fn find_bytes(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    (from..=haystack.len() - needle.len()).find(|&i| &haystack[i..i + needle.len()] == needle)
}

fn replace_bytes(haystack: &[u8], needle: &[u8], replacement: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(haystack.len());
    let mut cursor = 0;
    while let Some(pos) = find_bytes(haystack, needle, cursor) {
        out.extend_from_slice(&haystack[cursor..pos]);
        out.extend_from_slice(replacement);
        cursor = pos + needle.len();
    }
    out.extend_from_slice(&haystack[cursor..]);
    out
}
