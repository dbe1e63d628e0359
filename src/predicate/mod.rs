//! predicate evaluation engine for rule conditions
//!
//! a predicate is an ordered list of statements tested as a conjunction
//! against a set of roll options:
//! - atomic roll options: `"self:trait:agile"`
//! - logical operators: not, and, or, nor, xor, if/then
//! - numeric comparisons: gt, gte, lt, lte over literals and `<path>:<n>` options
//!
//! statements are validated once when the predicate is built; testing a
//! built predicate cannot fail.

mod error;
mod eval;
mod facts;
mod parser;
mod types;

#[cfg(test)]
mod proptests;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value as JsonValue;

pub use error::InvalidStatementError;
pub use eval::{evaluate, resolve_operand};
pub use facts::{numeric_suffix, FactSet, RollOptions};
pub use parser::{parse_statement, STATEMENT_KEYS};
pub use types::{CompareOp, Operand, Statement};

/// raw, not yet validated statement as found in configuration
pub type RawStatement = JsonValue;

/// a validated condition: the conjunction of its statements
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicate {
    statements: Vec<Statement>,
}

impl Predicate {
    /// build a predicate, validating every raw statement
    ///
    /// fails on the first malformed statement; the error path starts with the
    /// statement's index, e.g. `[2].or[0]`.
    pub fn new<I>(statements: I) -> Result<Self, InvalidStatementError>
    where
        I: IntoIterator<Item = RawStatement>,
    {
        let statements = statements
            .into_iter()
            .enumerate()
            .map(|(i, raw)| parser::parse_statement_at(&raw, &format!("[{}]", i)))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::trace!(count = statements.len(), "built predicate");
        Ok(Self { statements })
    }

    /// build a predicate from a single raw value
    ///
    /// a list is taken as the predicate's statements; anything else is a
    /// single statement.
    pub fn from_json(json: &JsonValue) -> Result<Self, InvalidStatementError> {
        match json {
            JsonValue::Array(items) => Self::new(items.iter().cloned()),
            single => Self::new(std::iter::once(single.clone())),
        }
    }

    /// wrap statements that were built directly rather than parsed
    pub fn from_statements(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// test the predicate against a fact set
    pub fn test<F: FactSet + ?Sized>(&self, facts: &F) -> bool {
        // no statements: nothing to violate
        if self.statements.is_empty() {
            return true;
        }
        self.statements.iter().all(|s| evaluate(s, facts))
    }

    /// raw form of the predicate: a list of statements
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Array(self.statements.iter().map(Statement::to_json).collect())
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.statements.as_slice() {
            [single] => write!(f, "{}", single),
            statements => {
                write!(f, "and(")?;
                for (i, s) in statements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", s)?;
                }
                write!(f, ")")
            }
        }
    }
}

const NON_FINITE_LITERAL: &str = "comparison literal is not a finite number";

impl Serialize for Statement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if !self.has_finite_literals() {
            return Err(serde::ser::Error::custom(NON_FINITE_LITERAL));
        }
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Statement {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = JsonValue::deserialize(deserializer)?;
        parse_statement(&raw).map_err(serde::de::Error::custom)
    }
}

impl Serialize for Predicate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if !self.statements.iter().all(Statement::has_finite_literals) {
            return Err(serde::ser::Error::custom(NON_FINITE_LITERAL));
        }
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Predicate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = JsonValue::deserialize(deserializer)?;
        Predicate::from_json(&raw).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<JsonValue> for Predicate {
    type Error = InvalidStatementError;

    fn try_from(json: JsonValue) -> Result<Self, Self::Error> {
        Predicate::from_json(&json)
    }
}
