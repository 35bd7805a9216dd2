use assert_cmd::{cargo::cargo_bin_cmd, Command};
use std::path::Path;

/// Get a Command for qu, with no ambient store or editor leaking in
pub fn qu() -> Command {
    let mut cmd = cargo_bin_cmd!("qu");
    cmd.env_remove("QU_DIR").env("EDITOR", "true");
    cmd
}

/// A qu Command pointed at `store`
pub fn qu_at(store: &Path) -> Command {
    let mut cmd = qu();
    cmd.arg("--store").arg(store);
    cmd
}

/// Initialize a store at `store`
pub fn init_store(store: &Path) {
    qu_at(store).arg("init").assert().success();
}

/// Create a text idea and return its filename (the first stdout line)
#[allow(dead_code)]
pub fn new_idea(store: &Path, tags: &str, content: &str) -> String {
    let output = qu_at(store)
        .args(["new", tags, "--content", content])
        .output()
        .unwrap();
    assert!(output.status.success(), "new failed: {output:?}");
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(|s| s.to_string())
        .unwrap_or_default()
}

/// Filenames currently in the store's idea directory, sorted
#[allow(dead_code)]
pub fn idea_files(store: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(store.join("ideas"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
