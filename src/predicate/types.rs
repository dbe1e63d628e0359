//! core types for the predicate system

use std::fmt;

use serde_json::{json, Value as JsonValue};

/// numeric comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// greater than: gt
    Gt,
    /// greater than or equal: gte
    Gte,
    /// less than: lt
    Lt,
    /// less than or equal: lte
    Lte,
}

impl CompareOp {
    pub const ALL: [CompareOp; 4] = [CompareOp::Gt, CompareOp::Gte, CompareOp::Lt, CompareOp::Lte];

    /// parse operator from its statement key
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "gt" => Some(CompareOp::Gt),
            "gte" => Some(CompareOp::Gte),
            "lt" => Some(CompareOp::Lt),
            "lte" => Some(CompareOp::Lte),
            _ => None,
        }
    }

    /// the key this operator is written with in a raw statement
    pub fn key(self) -> &'static str {
        match self {
            CompareOp::Gt => "gt",
            CompareOp::Gte => "gte",
            CompareOp::Lt => "lt",
            CompareOp::Lte => "lte",
        }
    }

    pub fn apply(self, lhs: f64, rhs: f64) -> bool {
        match self {
            CompareOp::Gt => lhs > rhs,
            CompareOp::Gte => lhs >= rhs,
            CompareOp::Lt => lhs < rhs,
            CompareOp::Lte => lhs <= rhs,
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompareOp::Gt => write!(f, ">"),
            CompareOp::Gte => write!(f, ">="),
            CompareOp::Lt => write!(f, "<"),
            CompareOp::Lte => write!(f, "<="),
        }
    }
}

/// one side of a numeric comparison
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// literal number
    Number(f64),
    /// field path resolved against `<path>:<integer>` roll options
    Field(String),
}

impl Operand {
    /// literal operand; only finite values have a raw form
    pub fn number(n: impl Into<f64>) -> Self {
        Operand::Number(n.into())
    }

    pub fn field(path: impl Into<String>) -> Self {
        Operand::Field(path.into())
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Operand::Number(n) => n.is_finite(),
            Operand::Field(_) => true,
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            // keep integral literals integral so `2` does not come back as `2.0`
            Operand::Number(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
                json!(*n as i64)
            }
            Operand::Number(n) => json!(n),
            Operand::Field(path) => JsonValue::String(path.clone()),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Number(n) => write!(f, "{}", n),
            Operand::Field(path) => write!(f, "{}", path),
        }
    }
}

/// one node of a predicate's statement tree
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// true iff the roll option is present
    Atomic(String),
    /// negation
    Not(Box<Statement>),
    /// conjunction; empty is true
    And(Vec<Statement>),
    /// inclusive disjunction; empty is false
    Or(Vec<Statement>),
    /// joint denial; empty is true
    Nor(Vec<Statement>),
    /// exactly one item true
    Xor(Vec<Statement>),
    /// material conditional
    Conditional {
        antecedent: Box<Statement>,
        consequent: Box<Statement>,
    },
    /// numeric comparison between two operands
    Comparison {
        op: CompareOp,
        lhs: Operand,
        rhs: Operand,
    },
}

impl Statement {
    pub fn atom(option: impl Into<String>) -> Self {
        Statement::Atomic(option.into())
    }

    pub fn negate(statement: Statement) -> Self {
        Statement::Not(Box::new(statement))
    }

    pub fn and(statements: Vec<Statement>) -> Self {
        Statement::And(statements)
    }

    pub fn or(statements: Vec<Statement>) -> Self {
        Statement::Or(statements)
    }

    pub fn nor(statements: Vec<Statement>) -> Self {
        Statement::Nor(statements)
    }

    pub fn xor(statements: Vec<Statement>) -> Self {
        Statement::Xor(statements)
    }

    pub fn conditional(antecedent: Statement, consequent: Statement) -> Self {
        Statement::Conditional {
            antecedent: Box::new(antecedent),
            consequent: Box::new(consequent),
        }
    }

    pub fn compare(op: CompareOp, lhs: Operand, rhs: Operand) -> Self {
        Statement::Comparison { op, lhs, rhs }
    }

    /// false when a comparison somewhere in the tree has a NaN or infinite literal
    pub fn has_finite_literals(&self) -> bool {
        match self {
            Statement::Atomic(_) => true,
            Statement::Not(inner) => inner.has_finite_literals(),
            Statement::And(items)
            | Statement::Or(items)
            | Statement::Nor(items)
            | Statement::Xor(items) => items.iter().all(Statement::has_finite_literals),
            Statement::Conditional {
                antecedent,
                consequent,
            } => antecedent.has_finite_literals() && consequent.has_finite_literals(),
            Statement::Comparison { lhs, rhs, .. } => lhs.is_finite() && rhs.is_finite(),
        }
    }

    /// convert back to the raw shape this statement is authored in
    ///
    /// a non-finite literal has no JSON form and comes out as `null`; check
    /// [`Statement::has_finite_literals`] first when the result must re-validate.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Statement::Atomic(option) => JsonValue::String(option.clone()),
            Statement::Not(inner) => json!({ "not": inner.to_json() }),
            Statement::And(items) => json!({ "and": list_to_json(items) }),
            Statement::Or(items) => json!({ "or": list_to_json(items) }),
            Statement::Nor(items) => json!({ "nor": list_to_json(items) }),
            Statement::Xor(items) => json!({ "xor": list_to_json(items) }),
            Statement::Conditional {
                antecedent,
                consequent,
            } => json!({ "if": antecedent.to_json(), "then": consequent.to_json() }),
            Statement::Comparison { op, lhs, rhs } => {
                let mut obj = serde_json::Map::new();
                obj.insert(
                    op.key().to_string(),
                    JsonValue::Array(vec![lhs.to_json(), rhs.to_json()]),
                );
                JsonValue::Object(obj)
            }
        }
    }
}

fn list_to_json(items: &[Statement]) -> JsonValue {
    JsonValue::Array(items.iter().map(Statement::to_json).collect())
}

fn write_list(f: &mut fmt::Formatter<'_>, name: &str, items: &[Statement]) -> fmt::Result {
    write!(f, "{}(", name)?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    write!(f, ")")
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Atomic(option) => write!(f, "{}", option),
            Statement::Not(inner) => write!(f, "not({})", inner),
            Statement::And(items) => write_list(f, "and", items),
            Statement::Or(items) => write_list(f, "or", items),
            Statement::Nor(items) => write_list(f, "nor", items),
            Statement::Xor(items) => write_list(f, "xor", items),
            Statement::Conditional {
                antecedent,
                consequent,
            } => write!(f, "if({}, then: {})", antecedent, consequent),
            Statement::Comparison { op, lhs, rhs } => write!(f, "{} {} {}", lhs, op, rhs),
        }
    }
}
