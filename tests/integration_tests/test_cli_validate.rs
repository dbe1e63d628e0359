// integration tests for `rollpred validate`

use crate::common::{json_line, path_str, stderr, stdout, TestEnv};

#[test]
fn test_validate_inline_predicate() {
    let env = TestEnv::new();

    let output = env.run(&["validate", r#"{ xor: ["a", { lte: ["b", 3] }] }"#, "--no-json"]);
    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert!(stdout(&output).contains("✓ Predicate is valid: xor(a, b <= 3)"));

    let output = env.run(&["validate", r#"["a", "b"]"#, "--json"]);
    let json = json_line(&output);
    assert_eq!(json["result"]["valid"], true);
    assert_eq!(json["result"]["statements"], 2);
}

#[test]
fn test_validate_inline_rejects_bad_arity() {
    let env = TestEnv::new();

    let output = env.run(&["validate", r#"{ gt: ["foo"] }"#, "--no-json"]);
    assert_eq!(output.status.code(), Some(5));
    assert!(stderr(&output).contains("'gt' takes exactly 2 operands, got 1"));
}

#[test]
fn test_validate_config_file() {
    let env = TestEnv::new();
    let config = env.write_config(
        r#"{
            "predicates": {
                "docked": { "if": "a", "then": "b" },
                "striking": ["attack", { "gte": ["item:runes:striking", 1] }]
            }
        }"#,
    );

    let output = env.run(&["--config", path_str(&config), "validate", "--no-json"]);
    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert!(stdout(&output).contains("✓ Configuration is valid"));
}

#[test]
fn test_validate_config_reports_every_error() {
    let env = TestEnv::new();
    let config = env.write_config(
        r#"{
            "predicates": {
                "good": "a",
                "bad_list": { "or": "a" },
                "bad_key": { "nand": ["a"] }
            }
        }"#,
    );

    let output = env.run(&["--config", path_str(&config), "validate", "--no-json"]);
    assert_eq!(output.status.code(), Some(4));
    let err = stderr(&output);
    assert!(err.contains("configuration has 2 error(s)"), "{}", err);
    assert!(err.contains("predicates.bad_list[0].or"));
    assert!(err.contains("predicates.bad_key[0]: unknown key 'nand'"));

    let output = env.run(&["--config", path_str(&config), "validate", "--json"]);
    let json = json_line(&output);
    assert_eq!(json["error"]["code"], -32004);
    assert_eq!(json["error"]["data"]["errors"].as_array().unwrap().len(), 2);
}

#[test]
fn test_validate_unparseable_config() {
    let env = TestEnv::new();
    let config = env.write_config("{ predicates: ");

    let output = env.run(&["--config", path_str(&config), "validate", "--no-json"]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("Failed to parse config file"));
}

#[test]
fn test_validate_without_default_config_uses_defaults() {
    let env = TestEnv::new();

    let output = env.run(&["validate", "--no-json"]);
    assert!(output.status.success(), "stderr={}", stderr(&output));
    assert!(stdout(&output).contains("No config file, using defaults"));

    let output = env.run(&["validate", "--json"]);
    let json = json_line(&output);
    assert_eq!(json["result"]["valid"], true);
    assert_eq!(json["result"]["source"], "defaults");
}

#[test]
fn test_validate_missing_explicit_config_is_error() {
    let env = TestEnv::new();
    let missing = env.dir.path().join("missing.json");

    let output = env.run(&["--config", path_str(&missing), "validate", "--no-json"]);
    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("config file not found"));

    let output = env.run_with_env(&["validate", "--no-json"], &[("ROLLPRED_CONFIG", path_str(&missing))]);
    assert_eq!(output.status.code(), Some(4));
}
