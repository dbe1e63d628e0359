//! fact sets ("roll options") that predicates are tested against
//!
//! a fact is an opaque string; facts of the form `<path>:<integer>` additionally
//! carry a numeric value addressable by `<path>` in comparisons.

use std::collections::{BTreeSet, HashSet};
use std::hash::BuildHasher;

use serde::{Deserialize, Serialize};

/// read-only view of the facts active during one evaluation
pub trait FactSet {
    /// membership test
    fn contains(&self, fact: &str) -> bool;

    /// every fact, in no particular order
    fn iter(&self) -> Box<dyn Iterator<Item = &str> + '_>;

    /// value of the single fact `<path>:<integer>`
    ///
    /// `None` when there is no such fact or more than one.
    fn numeric_value(&self, path: &str) -> Option<i64> {
        unique_numeric_value(self.iter(), path)
    }
}

/// integer carried by `fact` if it is exactly `<path>:<integer>`
///
/// the integer is a run of ASCII digits with an optional leading `-`.
pub fn numeric_suffix(fact: &str, path: &str) -> Option<i64> {
    let suffix = fact.strip_prefix(path)?.strip_prefix(':')?;
    let digits = suffix.strip_prefix('-').unwrap_or(suffix);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse().ok()
}

fn unique_numeric_value<'a>(facts: impl Iterator<Item = &'a str>, path: &str) -> Option<i64> {
    let mut found: Option<(&str, i64)> = None;
    for fact in facts {
        let Some(value) = numeric_suffix(fact, path) else {
            continue;
        };
        match found {
            // a repeated entry is still one fact
            Some((seen, _)) if seen == fact => {}
            Some(_) => {
                tracing::trace!(path, "field path matches more than one roll option");
                return None;
            }
            None => found = Some((fact, value)),
        }
    }
    found.map(|(_, value)| value)
}

impl<S: BuildHasher> FactSet for HashSet<String, S> {
    fn contains(&self, fact: &str) -> bool {
        HashSet::contains(self, fact)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(HashSet::iter(self).map(String::as_str))
    }
}

impl FactSet for BTreeSet<String> {
    fn contains(&self, fact: &str) -> bool {
        BTreeSet::contains(self, fact)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(BTreeSet::iter(self).map(String::as_str))
    }

    // candidates share the `<path>:` prefix, so only that range is scanned
    fn numeric_value(&self, path: &str) -> Option<i64> {
        let prefix = format!("{}:", path);
        let candidates = self
            .range(prefix.clone()..)
            .take_while(|fact| fact.starts_with(&prefix))
            .map(String::as_str);
        unique_numeric_value(candidates, path)
    }
}

/// owned set of roll options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RollOptions {
    options: HashSet<String>,
}

impl RollOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// add a roll option, returning false if it was already present
    pub fn insert(&mut self, option: impl Into<String>) -> bool {
        self.options.insert(option.into())
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// options in lexical order, for stable output
    pub fn sorted(&self) -> Vec<&str> {
        let mut options: Vec<&str> = self.options.iter().map(String::as_str).collect();
        options.sort_unstable();
        options
    }
}

impl FactSet for RollOptions {
    fn contains(&self, fact: &str) -> bool {
        self.options.contains(fact)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        Box::new(self.options.iter().map(String::as_str))
    }
}

impl<S: Into<String>> FromIterator<S> for RollOptions {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            options: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for RollOptions {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.options.extend(iter.into_iter().map(Into::into));
    }
}
