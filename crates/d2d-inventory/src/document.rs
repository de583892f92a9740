//! Read-only navigation over a merged data model
//!
//! The data model is held as a [`serde_json::Value`] regardless of the format it
//! was loaded from. Navigation here never fails: a missing key, a `null` or a
//! value of the wrong shape all read as "nothing there".

use serde_json::Value;

/// Borrowed view of one device entry found in a data model
///
/// Carries the document root alongside the fragment so that adapters can fall
/// back to architecture-wide settings without keeping any state of their own.
#[derive(Debug, Clone, Copy)]
pub struct RawDevice<'a> {
    root: &'a Value,
    data: &'a Value,
}

impl<'a> RawDevice<'a> {
    /// Create a view of `data` found inside `root`
    pub fn new(root: &'a Value, data: &'a Value) -> Self {
        Self { root, data }
    }

    /// Document the device was found in
    pub fn root(&self) -> &'a Value {
        self.root
    }

    /// Raw device fragment
    pub fn data(&self) -> &'a Value {
        self.data
    }

    /// Field of the fragment, if the fragment is a mapping and holds the key
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.data.get(key)
    }

    /// Check whether the fragment holds `key` at all (even as `null`)
    pub fn contains(&self, key: &str) -> bool {
        self.data.as_object().is_some_and(|map| map.contains_key(key))
    }

    /// Non-empty scalar field rendered as a string
    pub fn str_field(&self, key: &str) -> Option<String> {
        self.get(key).and_then(scalar_string)
    }

    /// Non-empty scalar at a nested key path below the fragment
    pub fn nested_str(&self, path: &[&str]) -> Option<String> {
        navigate_path(self.data, path).and_then(scalar_string)
    }
}

/// Value at `path` below `root`
pub fn navigate_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(root, |node, key| node.get(*key))
}

/// Elements of the sequence at `path`, empty when anything along the way is missing
pub fn sequence_at<'a>(root: &'a Value, path: &[&str]) -> &'a [Value] {
    navigate_path(root, path)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Render a scalar as a string
///
/// Strings are taken verbatim, numbers and booleans via their display form.
/// `null`, empty strings, sequences and mappings yield `None`.
pub fn scalar_string(value: &Value) -> Option<String> {
    let rendered = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };

    if rendered.is_empty() {
        None
    } else {
        Some(rendered)
    }
}

/// Strip a CIDR prefix length from an address
///
/// Returns everything before the first `/`, or the input unchanged.
pub fn strip_cidr(address: &str) -> &str {
    match address.split_once('/') {
        Some((host, _)) => host,
        None => address,
    }
}
