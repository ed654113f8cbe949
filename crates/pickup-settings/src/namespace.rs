//! Form field naming, so the settings form can be embedded in a larger one.

use serde::Deserialize;

/// Where the plugin's fields live inside the host's settings form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Namespace {
    /// A ready-made prefix such as `"shipping[settings]"`.
    Name(String),
    /// Nested keys such as `["shipping", "settings"]`.
    Path(Vec<String>),
}

impl Namespace {
    /// The field-name prefix: the first path segment bare, the rest
    /// bracketed (`["shipping", "settings"]` is `shipping[settings]`).
    #[must_use]
    pub fn prefix(&self) -> String {
        match self {
            Namespace::Name(name) => name.clone(),
            Namespace::Path(parts) => bracketed("", parts.iter().map(String::as_str)),
        }
    }
}

/// Full field name for `keys` under `namespace`.
#[must_use]
pub fn field_name(namespace: Option<&Namespace>, keys: &[&str]) -> String {
    let prefix = namespace.map(Namespace::prefix).unwrap_or_default();
    bracketed(&prefix, keys.iter().copied())
}

fn bracketed<'a>(prefix: &str, keys: impl Iterator<Item = &'a str>) -> String {
    let mut name = prefix.to_string();
    for key in keys {
        if name.is_empty() {
            name.push_str(key);
        } else {
            name.push('[');
            name.push_str(key);
            name.push(']');
        }
    }
    name
}

/// DOM id derived from a field name: each run of one or two brackets becomes
/// `-`, and a single trailing `-` is removed (`a[b][c]` is `a-b-c`).
#[must_use]
pub fn container_id(name: &str) -> String {
    let mut id = String::with_capacity(name.len());
    let mut run = 0usize;

    for c in name.chars() {
        if c == '[' || c == ']' {
            if run % 2 == 0 {
                id.push('-');
            }
            run += 1;
        } else {
            run = 0;
            id.push(c);
        }
    }

    if id.ends_with('-') {
        id.pop();
    }
    id
}
