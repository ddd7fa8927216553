//! Ordered, case-sensitive header storage.
//!
//! # Design
//! `HeaderMap` is a small vector of pairs. Names are unique and compared
//! exactly; inserting an existing name replaces its value in place, so
//! iteration order is the order in which each name was first inserted.
//! Request headers start from `Connection: close` and a `User-Agent`
//! carrying the crate version, then caller entries are laid over them.

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

use crate::error::HttpError;

/// Client identifier sent with every request unless overridden.
pub const USER_AGENT: &str = concat!("minihttp/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// The defaults every request carries: `Connection: close` and the
    /// client identifier.
    pub fn request_defaults() -> Self {
        let mut map = Self::new();
        map.insert("Connection", "close");
        map.insert("User-Agent", USER_AGENT);
        map
    }

    /// Build a map from alternating name/value entries.
    pub fn from_flat<S: AsRef<str>>(items: &[S]) -> Result<Self, HttpError> {
        if items.len() % 2 != 0 {
            return Err(HttpError::MalformedHeaderList(items.len()));
        }
        Ok(items
            .chunks_exact(2)
            .map(|pair| (pair[0].as_ref(), pair[1].as_ref()))
            .collect())
    }

    /// Set `name` to `value`. An existing entry keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Exact-match lookup.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Overlay every entry of `other`, its values winning on collision.
    pub fn extend_from(&mut self, other: &HeaderMap) {
        for (name, value) in other.iter() {
            self.insert(name, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `"Name: Value"` lines in iteration order.
    pub fn lines(&self) -> Vec<String> {
        self.iter().map(|(n, v)| format!("{n}: {v}")).collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for HeaderMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = HeaderMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}

/// Caller-supplied request headers, either as a map or as a flat list of
/// alternating names and values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderList {
    Map(HeaderMap),
    Flat(Vec<String>),
}

impl Default for HeaderList {
    fn default() -> Self {
        HeaderList::Map(HeaderMap::new())
    }
}

impl HeaderList {
    /// Merge onto the request defaults. Fails on an odd-length flat list.
    pub fn with_defaults(&self) -> Result<HeaderMap, HttpError> {
        let overrides = match self {
            HeaderList::Map(map) => map.clone(),
            HeaderList::Flat(items) => HeaderMap::from_flat(items)?,
        };
        let mut headers = HeaderMap::request_defaults();
        headers.extend_from(&overrides);
        Ok(headers)
    }
}

impl From<HeaderMap> for HeaderList {
    fn from(map: HeaderMap) -> Self {
        HeaderList::Map(map)
    }
}

impl From<Vec<String>> for HeaderList {
    fn from(items: Vec<String>) -> Self {
        HeaderList::Flat(items)
    }
}

impl From<&[&str]> for HeaderList {
    fn from(items: &[&str]) -> Self {
        HeaderList::Flat(items.iter().map(|s| s.to_string()).collect())
    }
}

impl<'de> Deserialize<'de> for HeaderList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HeaderListVisitor;

        impl<'de> Visitor<'de> for HeaderListVisitor {
            type Value = HeaderList;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of header values or a flat array of names and values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = HeaderMap::new();
                while let Some((name, value)) = access.next_entry::<String, String>()? {
                    map.insert(name, value);
                }
                Ok(HeaderList::Map(map))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut items = Vec::new();
                while let Some(item) = access.next_element::<String>()? {
                    items.push(item);
                }
                Ok(HeaderList::Flat(items))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(HeaderList::default())
            }
        }

        deserializer.deserialize_any(HeaderListVisitor)
    }
}
