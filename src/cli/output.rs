//! how `rollpred` reports results
//!
//! JSON mode wraps every result in a JSON-RPC 2.0 envelope:
//! `{"jsonrpc": "2.0", "result": {...}, "id": null}` on success and
//! `{"jsonrpc": "2.0", "error": {"code": N, "message": "...", "data": {...}}, "id": null}`
//! on failure.

use serde::Serialize;
use std::io::IsTerminal;

const JSONRPC_VERSION: &str = "2.0";

/// where and how command results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// one line per result, for a terminal
    Text,
    /// JSON-RPC envelopes on stdout
    Json,
    /// only the exit code on success
    Quiet,
}

impl OutputMode {
    /// `--quiet` beats `--json` beats `--no-json`; with none of them, piped stdout means JSON
    pub fn from_flags(json: bool, no_json: bool, quiet: bool) -> Self {
        if quiet {
            return Self::Quiet;
        }
        if json {
            return Self::Json;
        }
        if no_json {
            return Self::Text;
        }
        if std::io::stdout().is_terminal() {
            Self::Text
        } else {
            Self::Json
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    pub fn is_quiet(&self) -> bool {
        matches!(self, Self::Quiet)
    }
}

/// envelope for a successful command
#[derive(Serialize)]
pub struct JsonRpcResponse<T: Serialize> {
    pub jsonrpc: &'static str,
    pub result: T,
    /// always null, there is no request to answer
    pub id: Option<String>,
}

impl<T: Serialize> JsonRpcResponse<T> {
    pub fn new(result: T) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            result,
            id: None,
        }
    }
}

/// envelope for a failed command
#[derive(Serialize)]
pub struct JsonRpcError {
    pub jsonrpc: &'static str,
    pub error: RpcError,
    pub id: Option<String>,
}

#[derive(Serialize)]
pub struct RpcError {
    /// `-32000 - exit_code`
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ErrorData>,
}

/// structured detail for statement and config errors
#[derive(Serialize)]
pub struct ErrorData {
    /// location of the offending statement, e.g. `[0].or[1]`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl JsonRpcError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            error: RpcError {
                code: to_jsonrpc_code(code),
                message: message.into(),
                data: None,
            },
            id: None,
        }
    }

    pub fn with_data(code: i32, message: impl Into<String>, data: ErrorData) -> Self {
        let mut error = Self::new(code, message);
        error.error.data = Some(data);
        error
    }
}

// exit codes map into the -32000..-32099 server error range
fn to_jsonrpc_code(code: i32) -> i32 {
    -32000 - code
}

/// result data for the test command
#[derive(Serialize)]
pub struct TestData {
    pub predicate: String,
    pub satisfied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facts: Option<Vec<String>>,
}

/// result data for the validate command
#[derive(Serialize)]
pub struct ValidateData {
    pub source: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statements: Option<usize>,
    pub errors: Vec<String>,
}

/// result data for the list command
#[derive(Serialize)]
pub struct ListData {
    pub predicates: Vec<PredicateEntry>,
    pub facts: Vec<FactSetEntry>,
}

#[derive(Serialize)]
pub struct PredicateEntry {
    pub name: String,
    /// compact rendering, absent when the entry does not validate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct FactSetEntry {
    pub name: String,
    pub options: Vec<String>,
}

/// print `data` as a success envelope
pub fn print_json<T: Serialize>(data: &T) {
    let response = JsonRpcResponse::new(data);
    if let Ok(json) = serde_json::to_string(&response) {
        println!("{}", json);
    }
}

/// print an error envelope, on stdout like successes
pub fn print_json_error(code: i32, message: &str) {
    print_error_response(&JsonRpcError::new(code, message));
}

pub fn print_json_error_with_data(code: i32, message: &str, data: ErrorData) {
    print_error_response(&JsonRpcError::with_data(code, message, data));
}

fn print_error_response(error: &JsonRpcError) {
    if let Ok(json) = serde_json::to_string(error) {
        println!("{}", json);
    }
}
