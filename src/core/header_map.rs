//! Multi-valued header storage keyed by canonical field name.

use serde::Serialize;
use std::collections::BTreeMap;

/// Decoded IEPG header fields.
///
/// Each field keeps every occurrence in document order. Names are stored in
/// MIME canonical form and lookups canonicalize the requested name, so
/// `get("program-title")` and `get("Program-Title")` are equivalent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HeaderMap {
    fields: BTreeMap<String, Vec<String>>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of a field.
    pub(crate) fn append(&mut self, name: &str, value: String) {
        self.fields.entry(canonical_key(name)).or_default().push(value);
    }

    /// All values of a field, in document order.
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.fields.get(&canonical_key(name)).map(Vec::as_slice)
    }

    /// The first value of a field.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name)?.first().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(&canonical_key(name))
    }

    /// Number of distinct field names.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl FromIterator<(String, Vec<String>)> for HeaderMap {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        let mut map = HeaderMap::new();
        for (name, values) in iter {
            map.fields.entry(canonical_key(&name)).or_default().extend(values);
        }
        map
    }
}

/// Canonical MIME form of a field name: `content-type` becomes `Content-Type`.
///
/// Names containing anything other than token characters are returned unchanged.
pub fn canonical_key(name: &str) -> String {
    if !name.bytes().all(is_token_byte) {
        return name.to_string();
    }

    let mut upper = true;
    name.chars()
        .map(|c| {
            let out = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            out
        })
        .collect()
}

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}
