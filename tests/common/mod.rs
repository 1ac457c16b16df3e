//! Common test utilities

#![allow(dead_code)]

use readme_update::config::{Config, ToolConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const SAMPLE_README: &str = "A\n<pre><code>\nOLD\n</pre></code>\nB\n";

/// Create a temporary project holding a README.mkdn
pub fn create_test_project(readme: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let readme_path = temp_dir.path().join("README.mkdn");
    fs::write(&readme_path, readme).unwrap();
    (temp_dir, readme_path)
}

/// Configuration whose tool is `sh -c <script>`
pub fn shell_config(script: &str) -> Config {
    Config {
        tool: ToolConfig {
            command: vec!["sh".to_string(), "-c".to_string(), script.to_string()],
            search_path: None,
            ..ToolConfig::default()
        },
        ..Config::default()
    }
}

/// Write a shell tool config file into `dir`
pub fn write_shell_config(dir: &Path, script: &str) -> PathBuf {
    let config_path = dir.join(".readme-update.yml");
    let yaml = serde_yaml::to_string(&shell_config(script)).unwrap();
    fs::write(&config_path, yaml).unwrap();
    config_path
}

pub fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}
