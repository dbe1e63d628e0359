// shared utilities for integration tests

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// a scratch HOME so the default config location never leaks in from the host
pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create test directory"),
        }
    }

    /// write a config file into the scratch directory and return its path
    pub fn write_config(&self, content: &str) -> PathBuf {
        self.write_file("config.json", content)
    }

    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// run rollpred with HOME pointed at the scratch directory
    pub fn run(&self, args: &[&str]) -> Output {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> Output {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_rollpred"));
        cmd.args(args);
        cmd.env("HOME", self.dir.path());
        cmd.env_remove("ROLLPRED_CONFIG");
        cmd.env_remove("RUST_LOG");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        cmd.output().expect("Failed to run rollpred")
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// parse the single JSON-RPC line printed in --json mode
pub fn json_line(output: &Output) -> serde_json::Value {
    serde_json::from_str(stdout(output).trim()).expect("stdout is not a JSON-RPC line")
}

pub fn path_str(path: &Path) -> &str {
    path.to_str().expect("non-UTF-8 temp path")
}
