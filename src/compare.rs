//! Structural comparison of an expected JSON body against an actual one
//!
//! The expected document drives the walk: every leaf it contains must be
//! present with identical serialized bytes in the actual document, while
//! anything extra in the actual document is ignored. Numbers compare by value
//! when either side is a float, so `3` matches `3.0`. Expected leaves that
//! carry the `dyn:` marker are not compared at all; they capture a binding
//! into the [`PlaceholderStore`] instead.
//!
//! ## Path semantics
//!
//! Each expected node is looked up in the actual document by a [`JsonPath`]
//! anchored at the actual root. Object children extend their parent's path.
//! Array elements restart from a single `[index]` segment, so an array nested
//! under an object addresses the actual *root* by index rather than the
//! sibling array. This asymmetry is long-standing behavior that suites depend
//! on, and the diagnostics carry the path so it stays visible.

use crate::logging::log_debug;
use crate::placeholder::{is_placeholder, parse_capture, PlaceholderStore};
use serde_json::{Map, Value};
use std::fmt;

/// One step into a JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{key}"),
            PathSegment::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Ordered location of a node, relative to the actual document root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonPath(Vec<PathSegment>);

impl JsonPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Single-segment path addressing an object key at the root.
    pub fn key(key: impl Into<String>) -> Self {
        Self(vec![PathSegment::Key(key.into())])
    }

    /// Single-segment path addressing an array index at the root.
    pub fn index(index: usize) -> Self {
        Self(vec![PathSegment::Index(index)])
    }

    /// This path extended by an object key.
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key.into()));
        Self(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Resolve this path against `root`.
    ///
    /// Keys that parse as integers also index arrays, and indices also match
    /// object keys spelled as numbers.
    pub fn lookup<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        self.0.iter().try_fold(root, |node, segment| match (segment, node) {
            (PathSegment::Key(key), Value::Object(map)) => map.get(key),
            (PathSegment::Key(key), Value::Array(items)) => {
                key.parse::<usize>().ok().and_then(|i| items.get(i))
            }
            (PathSegment::Index(index), Value::Array(items)) => items.get(*index),
            (PathSegment::Index(index), Value::Object(map)) => map.get(&index.to_string()),
            _ => None,
        })
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "$");
        }
        let joined: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", joined.join("."))
    }
}

/// Shape of an expected node, decided once when the node is visited.
///
/// Empty objects and arrays are leaves: below the root they must match the
/// actual value exactly.
#[derive(Debug, Clone, Copy)]
pub enum JsonNode<'a> {
    Object(&'a Map<String, Value>),
    Array(&'a [Value]),
    Scalar(&'a Value),
}

impl<'a> From<&'a Value> for JsonNode<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Object(map) if !map.is_empty() => JsonNode::Object(map),
            Value::Array(items) if !items.is_empty() => JsonNode::Array(items),
            other => JsonNode::Scalar(other),
        }
    }
}

/// A comparison failure and where it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub path: JsonPath,
    pub message: String,
}

/// Compare `expected` against `actual`, returning diagnostic messages.
///
/// Placeholder captures are written into `store` as a side effect.
pub fn compare(expected: &Value, actual: &Value, store: &mut PlaceholderStore) -> Vec<String> {
    compare_detailed(expected, actual, store)
        .into_iter()
        .map(|diagnostic| diagnostic.message)
        .collect()
}

/// Like [`compare`] but keeps the path of each diagnostic.
pub fn compare_detailed(
    expected: &Value,
    actual: &Value,
    store: &mut PlaceholderStore,
) -> Vec<Diagnostic> {
    let mut comparator = Comparator {
        actual,
        store,
        diagnostics: Vec::new(),
    };
    comparator.compare_root(expected);
    comparator.diagnostics
}

struct Comparator<'a> {
    actual: &'a Value,
    store: &'a mut PlaceholderStore,
    diagnostics: Vec<Diagnostic>,
}

impl Comparator<'_> {
    fn compare_root(&mut self, expected: &Value) {
        match expected {
            Value::Null => {}
            Value::Object(map) => {
                for (key, value) in map {
                    let path = JsonPath::key(key.as_str());
                    if path.lookup(self.actual).is_none() {
                        self.push(path.clone(), format!("Error: key not found: {key}"));
                    }
                    self.compare_node(path, value);
                }
            }
            Value::Array(items) => {
                for (index, value) in items.iter().enumerate() {
                    self.compare_node(JsonPath::index(index), value);
                }
            }
            _ => self.push(
                JsonPath::root(),
                "Error: expected body is neither an object nor an array".to_string(),
            ),
        }
    }

    fn compare_node(&mut self, path: JsonPath, expected: &Value) {
        match JsonNode::from(expected) {
            JsonNode::Object(map) => {
                for (key, value) in map {
                    self.compare_node(path.child(key.as_str()), value);
                }
            }
            JsonNode::Array(items) => {
                for (index, value) in items.iter().enumerate() {
                    self.compare_node(JsonPath::index(index), value);
                }
            }
            JsonNode::Scalar(leaf) => self.compare_leaf(path, leaf),
        }
    }

    fn compare_leaf(&mut self, path: JsonPath, expected: &Value) {
        let found = path.lookup(self.actual);
        let want = expected.to_string();
        let got = found.map_or_else(|| Value::Null.to_string(), Value::to_string);

        if is_placeholder(want.as_bytes()) {
            match found.and_then(parse_capture) {
                Some(capture) => {
                    log_debug!(path = %path, key = %capture.key, "Captured dynamic value");
                    self.store.insert(capture.key, capture.value);
                }
                None => self.push(
                    path,
                    format!("Error: unable to capture dynamic value => want: {want}; got: {got}"),
                ),
            }
            return;
        }

        if want != got && !same_number(expected, found) {
            self.push(path, format!("Mismatch => want: {want}; got: {got}"));
        }
    }

    fn push(&mut self, path: JsonPath, message: String) {
        log_debug!(path = %path, message = %message, "Body comparison diagnostic");
        self.diagnostics.push(Diagnostic { path, message });
    }
}

// `3` and `3.0` are the same number. Integer pairs keep exact comparison.
fn same_number(expected: &Value, actual: Option<&Value>) -> bool {
    match (expected, actual) {
        (Value::Number(want), Some(Value::Number(got))) if want.is_f64() || got.is_f64() => {
            want.as_f64() == got.as_f64()
        }
        _ => false,
    }
}
