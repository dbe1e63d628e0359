//! statement evaluator
//!
//! evaluates statement trees against a fact set. evaluation never fails:
//! missing facts and unresolved operands simply leave a condition unsatisfied.

use super::facts::FactSet;
use super::types::{CompareOp, Operand, Statement};

/// evaluate a statement against the given facts
pub fn evaluate<F: FactSet + ?Sized>(statement: &Statement, facts: &F) -> bool {
    match statement {
        Statement::Atomic(option) => facts.contains(option),
        Statement::Not(inner) => !evaluate(inner, facts),
        // empty And = true (vacuous truth)
        Statement::And(items) => items.iter().all(|s| evaluate(s, facts)),
        // empty Or = false
        Statement::Or(items) => items.iter().any(|s| evaluate(s, facts)),
        Statement::Nor(items) => !items.iter().any(|s| evaluate(s, facts)),
        Statement::Xor(items) => exactly_one(items, facts),
        Statement::Conditional {
            antecedent,
            consequent,
        } => !evaluate(antecedent, facts) || evaluate(consequent, facts),
        Statement::Comparison { op, lhs, rhs } => compare(*op, lhs, rhs, facts),
    }
}

fn exactly_one<F: FactSet + ?Sized>(items: &[Statement], facts: &F) -> bool {
    let mut found = false;
    for item in items {
        if evaluate(item, facts) {
            if found {
                return false;
            }
            found = true;
        }
    }
    found
}

fn compare<F: FactSet + ?Sized>(op: CompareOp, lhs: &Operand, rhs: &Operand, facts: &F) -> bool {
    match (resolve_operand(lhs, facts), resolve_operand(rhs, facts)) {
        (Some(l), Some(r)) => op.apply(l, r),
        _ => {
            tracing::trace!(%lhs, %rhs, "comparison operand unresolved");
            false
        }
    }
}

/// resolve an operand to a number
///
/// literals resolve to themselves; field paths resolve through
/// [`FactSet::numeric_value`].
pub fn resolve_operand<F: FactSet + ?Sized>(operand: &Operand, facts: &F) -> Option<f64> {
    match operand {
        Operand::Number(n) => Some(*n),
        Operand::Field(path) => facts.numeric_value(path).map(|n| n as f64),
    }
}
