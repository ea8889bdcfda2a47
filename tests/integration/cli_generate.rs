//! Integration tests driving the `mf` binary.

use super::test_utils::TemplateTree;
use std::process::Command;

fn mf() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mf"));
    cmd.env_remove("MTA_FORGE_LOG");
    cmd
}

fn fixture() -> TemplateTree {
    let tree = TemplateTree::new();
    tree.write("base.yml", "ID: app1\nversion: 1.0.0\n")
        .write("modules/web.yml", "name: web\ntype: nodejs\n")
        .write("extensions/dev/base.yml", "ID: app1.dev\nextends: app1\n");
    tree
}

#[test]
fn test_generate_writes_deployment_and_extensions() {
    let tree = fixture();

    let output = mf()
        .arg("--base-dir")
        .arg(tree.root())
        .arg("generate")
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "mf generate should succeed: stderr={:?}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(tree.output().join("mta.yaml").exists());
    assert!(tree.output().join("descriptors").join("dev.mtaext").exists());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("mta.yaml"), "summary should list files: {stdout}");
}

#[test]
fn test_generate_deployment_only() {
    let tree = fixture();
    let out = tree.root().join("dist");

    let output = mf()
        .arg("generate")
        .arg("deployment")
        .arg("-b")
        .arg(tree.root())
        .arg("-o")
        .arg(&out)
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(out.join("mta.yaml").exists());
    assert!(!out.join("descriptors").exists());
}

#[test]
fn test_missing_base_fails_with_exit_code() {
    let tree = TemplateTree::new();

    let output = mf()
        .arg("-b")
        .arg(tree.root())
        .arg("generate")
        .arg("deployment")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("base.yml"), "stderr should name the file: {stderr}");
    assert!(!tree.output().join("mta.yaml").exists());
}

#[test]
fn test_local_verbose_logs_are_text() {
    let tree = fixture();

    let output = mf()
        .arg("-b")
        .arg(tree.root())
        .arg("--local")
        .arg("--verbose")
        .arg("generate")
        .arg("deployment")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("DEBUG"), "verbose should emit debug events: {stderr}");
    assert!(!stderr.trim_start().starts_with('{'), "local output is not JSON");
}

#[test]
fn test_default_logs_are_json() {
    let tree = fixture();

    let output = mf()
        .arg("-b")
        .arg(tree.root())
        .arg("generate")
        .arg("deployment")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let first = stderr.lines().next().unwrap_or_default();
    let event: serde_json::Value = serde_json::from_str(first).unwrap();
    assert!(event.get("fields").is_some());
}
