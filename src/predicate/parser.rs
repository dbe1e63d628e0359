//! statement validator - converts raw JSON into the statement tree
//!
//! accepted shapes:
//! - bare string: atomic roll option
//! - `{ "not": statement }`
//! - `{ "and" | "or" | "nor" | "xor": [statement, ...] }`
//! - `{ "if": statement, "then": statement }`
//! - `{ "gt" | "gte" | "lt" | "lte": [operand, operand] }`
//!
//! everything else is rejected with the path of the offending value.

use serde_json::{Map, Value as JsonValue};

use super::error::InvalidStatementError;
use super::types::{CompareOp, Operand, Statement};

/// every key a statement object may use
pub const STATEMENT_KEYS: [&str; 11] = [
    "not", "and", "or", "nor", "xor", "if", "then", "gt", "gte", "lt", "lte",
];

/// parse a single raw statement
pub fn parse_statement(json: &JsonValue) -> Result<Statement, InvalidStatementError> {
    parse_statement_at(json, "")
}

/// parse a raw statement whose location in the enclosing document is `path`
pub(crate) fn parse_statement_at(
    json: &JsonValue,
    path: &str,
) -> Result<Statement, InvalidStatementError> {
    match json {
        JsonValue::String(s) => Ok(Statement::Atomic(s.clone())),
        JsonValue::Object(obj) => parse_object(json, obj, path),
        JsonValue::Array(_) => Err(InvalidStatementError::new(
            path,
            "a list is only allowed as the value of 'and', 'or', 'nor' or 'xor'",
            json,
        )),
        _ => Err(InvalidStatementError::new(
            path,
            "expected a string or an object",
            json,
        )),
    }
}

fn parse_object(
    json: &JsonValue,
    obj: &Map<String, JsonValue>,
    path: &str,
) -> Result<Statement, InvalidStatementError> {
    if obj.contains_key("if") || obj.contains_key("then") {
        return parse_conditional(json, obj, path);
    }

    let mut entries = obj.iter();
    let (key, value) = match (entries.next(), entries.next()) {
        (Some(entry), None) => entry,
        (None, _) => return Err(InvalidStatementError::new(path, "empty object", json)),
        (Some(_), Some(_)) => {
            return Err(InvalidStatementError::new(
                path,
                format!(
                    "expected exactly one operator, found keys {}",
                    quoted_keys(obj)
                ),
                json,
            ))
        }
    };

    match key.as_str() {
        "not" => parse_not(value, path),
        "and" => parse_list(key, value, path).map(Statement::And),
        "or" => parse_list(key, value, path).map(Statement::Or),
        "nor" => parse_list(key, value, path).map(Statement::Nor),
        "xor" => parse_list(key, value, path).map(Statement::Xor),
        other => match CompareOp::parse(other) {
            Some(op) => parse_comparison(op, value, path),
            None => Err(unknown_key(other, json, path)),
        },
    }
}

fn parse_not(value: &JsonValue, path: &str) -> Result<Statement, InvalidStatementError> {
    let inner = parse_statement_at(value, &child_path(path, "not"))?;
    Ok(Statement::Not(Box::new(inner)))
}

fn parse_list(
    key: &str,
    value: &JsonValue,
    path: &str,
) -> Result<Vec<Statement>, InvalidStatementError> {
    let arr = value.as_array().ok_or_else(|| {
        InvalidStatementError::new(
            child_path(path, key),
            format!("'{}' must be a list of statements", key),
            value,
        )
    })?;

    arr.iter()
        .enumerate()
        .map(|(i, v)| parse_statement_at(v, &format!("{}[{}]", child_path(path, key), i)))
        .collect()
}

fn parse_conditional(
    json: &JsonValue,
    obj: &Map<String, JsonValue>,
    path: &str,
) -> Result<Statement, InvalidStatementError> {
    if let Some(extra) = obj.keys().find(|k| *k != "if" && *k != "then") {
        return Err(InvalidStatementError::new(
            path,
            format!("unexpected key '{}' alongside 'if'/'then'", extra),
            json,
        ));
    }

    let (antecedent, consequent) = match (obj.get("if"), obj.get("then")) {
        (Some(antecedent), Some(consequent)) => (antecedent, consequent),
        (Some(_), None) => {
            return Err(InvalidStatementError::new(
                path,
                "'if' requires a matching 'then'",
                json,
            ))
        }
        _ => {
            return Err(InvalidStatementError::new(
                path,
                "'then' requires a matching 'if'",
                json,
            ))
        }
    };

    Ok(Statement::conditional(
        parse_statement_at(antecedent, &child_path(path, "if"))?,
        parse_statement_at(consequent, &child_path(path, "then"))?,
    ))
}

fn parse_comparison(
    op: CompareOp,
    value: &JsonValue,
    path: &str,
) -> Result<Statement, InvalidStatementError> {
    let op_path = child_path(path, op.key());
    let operands = match value.as_array() {
        Some(arr) if arr.len() == 2 => arr,
        Some(arr) => {
            return Err(InvalidStatementError::new(
                op_path,
                format!("'{}' takes exactly 2 operands, got {}", op.key(), arr.len()),
                value,
            ))
        }
        None => {
            return Err(InvalidStatementError::new(
                op_path,
                format!("'{}' must be a list of 2 operands", op.key()),
                value,
            ))
        }
    };

    let lhs = parse_operand(&operands[0], &format!("{}[0]", op_path))?;
    let rhs = parse_operand(&operands[1], &format!("{}[1]", op_path))?;
    Ok(Statement::Comparison { op, lhs, rhs })
}

fn parse_operand(json: &JsonValue, path: &str) -> Result<Operand, InvalidStatementError> {
    match json {
        JsonValue::String(s) => Ok(Operand::Field(s.clone())),
        JsonValue::Number(n) => n
            .as_f64()
            .map(Operand::Number)
            .ok_or_else(|| InvalidStatementError::new(path, "invalid number", json)),
        _ => Err(InvalidStatementError::new(
            path,
            "operand must be a number or a field path",
            json,
        )),
    }
}

fn unknown_key(key: &str, json: &JsonValue, path: &str) -> InvalidStatementError {
    let reason = match suggest_key(key) {
        Some(suggestion) => format!("unknown key '{}', did you mean '{}'?", key, suggestion),
        None => format!("unknown key '{}'", key),
    };
    InvalidStatementError::new(path, reason, json)
}

/// closest recognized key within a small edit distance
fn suggest_key(key: &str) -> Option<&'static str> {
    STATEMENT_KEYS
        .iter()
        .map(|candidate| (*candidate, strsim::levenshtein(key, candidate)))
        .filter(|(_, distance)| *distance <= 2 && *distance < key.len())
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

fn quoted_keys(obj: &Map<String, JsonValue>) -> String {
    obj.keys()
        .map(|k| format!("'{}'", k))
        .collect::<Vec<_>>()
        .join(", ")
}

fn child_path(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", path, key)
    }
}
