// integration tests for `rollpred list` and `rollpred completions`

use crate::common::{json_line, path_str, stderr, stdout, TestEnv};

#[test]
fn test_list_without_config() {
    let env = TestEnv::new();

    let output = env.run(&["list", "--no-json"]);
    assert!(output.status.success(), "stderr={}", stderr(&output));
    let out = stdout(&output);
    assert!(out.contains("Predicates:"));
    assert!(out.contains("(none)"));
}

#[test]
fn test_list_config_entries() {
    let env = TestEnv::new();
    let config = env.write_config(
        r#"{
            "predicates": {
                "flanking": ["target:condition:off-guard"],
                "broken": { "xor": 1 }
            },
            "facts": { "veteran": ["self:level:12", "self:trait:human"] }
        }"#,
    );

    let output = env.run(&["--config", path_str(&config), "list", "--no-json"]);
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("target:condition:off-guard"));
    assert!(out.contains("✗ invalid statement at predicates.broken[0].xor"));
    assert!(out.contains("self:level:12, self:trait:human"));

    let output = env.run(&["--config", path_str(&config), "list", "--json"]);
    let json = json_line(&output);
    let predicates = json["result"]["predicates"].as_array().unwrap();
    assert_eq!(predicates.len(), 2);
    // BTreeMap order
    assert_eq!(predicates[0]["name"], "broken");
    assert!(predicates[0].get("error").is_some());
    assert_eq!(predicates[1]["predicate"], "target:condition:off-guard");
}

#[test]
fn test_completions() {
    let env = TestEnv::new();

    let output = env.run(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("rollpred"));
}
