use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

// canonical non-negative decimal, no leading zero
static INDEX_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:0|[1-9]\d*)$").expect("valid index key pattern"));

/// Numeric value of a key that iterates as an array index, if it is one.
///
/// Such keys are canonical decimals below `u32::MAX`; `"48201"` is one,
/// `"06037"` is not.
pub fn index_key(key: &str) -> Option<u32> {
    if !INDEX_KEY.is_match(key) {
        return None;
    }
    key.parse::<u32>().ok().filter(|&n| n != u32::MAX)
}

/// Smoking-rate source row after keying.
#[derive(Debug, Clone, PartialEq)]
pub struct SmokingEntry {
    pub value: f64,
    pub state: String,
}

/// Foreign-born source row after keying.
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignBornEntry {
    pub value: f64,
    pub state: String,
    pub county: String,
}

/// Entries keyed by county identifier.
///
/// Iteration visits index-like keys (see [`index_key`]) in ascending numeric
/// order, then every other key in first-seen order. Re-inserting a key
/// replaces its entry without moving it.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyedTable<T> {
    order: Vec<String>,
    entries: HashMap<String, T>,
}

impl<T> Default for KeyedTable<T> {
    fn default() -> Self {
        Self {
            order: Vec::new(),
            entries: HashMap::new(),
        }
    }
}

impl<T> KeyedTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            order: Vec::with_capacity(n),
            entries: HashMap::with_capacity(n),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: T) {
        let key = key.into();
        if !self.entries.contains_key(&key) {
            self.order.push(key.clone());
        }
        self.entries.insert(key, entry);
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        let mut indexed: Vec<(u32, &str)> = Vec::new();
        let mut named: Vec<&str> = Vec::new();
        for k in &self.order {
            match index_key(k) {
                Some(n) => indexed.push((n, k.as_str())),
                None => named.push(k.as_str()),
            }
        }
        indexed.sort_unstable_by_key(|&(n, _)| n);
        indexed.into_iter().map(|(_, k)| k).chain(named)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.keys()
            .filter_map(move |k| self.entries.get(k).map(|v| (k, v)))
    }
}
