//! Integration tests for composing descriptors from template trees

use super::test_utils::{yaml, TemplateTree};
use mta_forge::composer::Scope;
use mta_forge::error::ForgeError;
use mta_forge::generate::{GenerationKind, Generator, DEPLOYMENT_FILE, DESCRIPTORS_DIR};
use mta_forge::loader::FsLoader;
use mta_forge::serializer::{render, OutputFormat};
use std::fs;

fn sample_tree() -> TemplateTree {
    let tree = TemplateTree::new();
    tree.write("base.yml", "_schema-version: '3.1'\nID: app1\nversion: 1.0.0\n")
        .write(
            "modules/web.yml",
            "name: web\ntype: nodejs\npath: app/web\nrequires:\n  - name: uaa\n",
        )
        .write("modules/srv.yml", "name: srv\ntype: java\n")
        .write("resources/uaa.yml", "name: uaa\ntype: org.cloudfoundry.managed-service\n")
        .write(
            "shared/parameters.yml",
            "small:\n  applies-to: [web, srv]\n  values:\n    memory: 256M\n",
        )
        .write(
            "shared/requires.yml",
            "logging:\n  applies-to: [web, srv]\n  values:\n    - name: app-logs\n",
        );
    tree
}

#[test]
fn test_end_to_end_descriptor() {
    let tree = TemplateTree::new();
    tree.write("base.yml", "ID: app1\nversion: '1.0'\n")
        .write("modules/web.yml", "type: node\n")
        .write(
            "shared/parameters.yml",
            "web-memory:\n  applies-to: [web]\n  values:\n    memory: 512m\n",
        );

    let descriptor = tree.compose(&Scope::Deployment).unwrap();

    assert_eq!(
        descriptor.get("modules"),
        Some(&yaml("- type: node\n  parameters:\n    memory: 512m\n"))
    );
    assert_eq!(descriptor.get("ID").and_then(|d| d.as_str()), Some("app1"));
    assert_eq!(descriptor.get("version").and_then(|d| d.as_str()), Some("1.0"));
}

#[test]
fn test_full_tree_composition() {
    let descriptor = sample_tree().compose(&Scope::Deployment).unwrap();

    assert_eq!(
        descriptor,
        yaml(
            r#"
_schema-version: '3.1'
ID: app1
version: 1.0.0
modules:
  - name: srv
    type: java
    parameters:
      memory: 256M
    requires:
      - name: app-logs
  - name: web
    type: nodejs
    path: app/web
    requires:
      - name: uaa
      - name: app-logs
    parameters:
      memory: 256M
resources:
  - name: uaa
    type: org.cloudfoundry.managed-service
"#
        )
    );
}

#[test]
fn test_recompose_is_byte_identical() {
    let tree = sample_tree();

    let first = render(&tree.compose(&Scope::Deployment).unwrap(), OutputFormat::Yaml).unwrap();
    let second = render(&tree.compose(&Scope::Deployment).unwrap(), OutputFormat::Yaml).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_generated_files_are_byte_identical_across_runs() {
    let tree = sample_tree();
    let generator = Generator::new(tree.root(), tree.output(), FsLoader::new(), OutputFormat::Yaml);

    generator.generate(GenerationKind::Deployment).unwrap();
    let first = fs::read(tree.output().join(DEPLOYMENT_FILE)).unwrap();
    generator.generate(GenerationKind::Deployment).unwrap();
    let second = fs::read(tree.output().join(DEPLOYMENT_FILE)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_overlay_for_missing_module_is_ignored() {
    let tree = TemplateTree::new();
    tree.write("base.yml", "ID: app1\n")
        .write("modules/web.yml", "name: web\n")
        .write(
            "shared/parameters.yml",
            "future:\n  applies-to: [not-yet-there]\n  values:\n    memory: 1G\n",
        );

    let descriptor = tree.compose(&Scope::Deployment).unwrap();

    assert_eq!(descriptor.get("modules"), Some(&yaml("- name: web\n")));
}

#[test]
fn test_kind_mismatch_leaves_module_untouched() {
    let tree = TemplateTree::new();
    tree.write("base.yml", "ID: app1\n")
        .write("modules/web.yml", "name: web\nrequires:\n  - name: uaa\n")
        .write(
            "shared/requires.yml",
            "wrong-shape:\n  applies-to: [web]\n  values:\n    name: db\n",
        );

    let descriptor = tree.compose(&Scope::Deployment).unwrap();

    assert_eq!(
        descriptor.get("modules"),
        Some(&yaml("- name: web\n  requires:\n    - name: uaa\n"))
    );
}

#[test]
fn test_malformed_shared_group_does_not_abort() {
    let tree = TemplateTree::new();
    tree.write("base.yml", "ID: app1\n")
        .write("modules/web.yml", "name: web\n")
        .write("shared/parameters.yml", "- this is\n- not a group\n")
        .write("shared/properties.yml", "broken:\n  applies-to: web\n  values: {A: 1}\n");

    let descriptor = tree.compose(&Scope::Deployment).unwrap();

    assert_eq!(descriptor.get("modules"), Some(&yaml("- name: web\n")));
}

#[test]
fn test_missing_resources_directory() {
    let tree = TemplateTree::new();
    tree.write("base.yml", "ID: app1\n")
        .write("modules/web.yml", "name: web\n");

    let descriptor = tree.compose(&Scope::Deployment).unwrap();

    assert_eq!(descriptor.get("resources"), Some(&yaml("[]")));
}

#[test]
fn test_missing_base_config_writes_nothing() {
    let tree = TemplateTree::new();
    tree.write("modules/web.yml", "name: web\n");
    let generator = Generator::new(tree.root(), tree.output(), FsLoader::new(), OutputFormat::Yaml);

    let err = generator.generate(GenerationKind::Deployment).unwrap_err();

    assert!(matches!(err, ForgeError::MissingBaseConfig { .. }));
    assert!(!tree.output().join(DEPLOYMENT_FILE).exists());
}

#[test]
fn test_parse_error_aborts_scope_and_names_file() {
    let tree = TemplateTree::new();
    tree.write("base.yml", "ID: app1\n")
        .write("modules/web.yml", "name: web\n")
        .write("resources/db.yml", "name: [db\n");

    let err = tree.compose(&Scope::Deployment).unwrap_err();

    match err {
        ForgeError::FragmentParse { path, .. } => {
            assert_eq!(path, tree.root().join("resources").join("db.yml"))
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_extension_descriptors_written_per_directory() {
    let tree = sample_tree();
    tree.write("extensions/dev/base.yml", "_schema-version: '3.1'\nID: app1.dev\nextends: app1\n")
        .write("extensions/dev/modules/web.yml", "name: web\n")
        .write(
            "extensions/dev/shared/parameters.yml",
            "debug:\n  applies-to: [web]\n  values:\n    memory: 1G\n",
        )
        .write("extensions/prod/base.yml", "ID: app1.prod\nextends: app1\n");

    let generator = Generator::new(tree.root(), tree.output(), FsLoader::new(), OutputFormat::Yaml);
    let summary = generator.generate(GenerationKind::All).unwrap();

    let descriptors = tree.output().join(DESCRIPTORS_DIR);
    assert_eq!(
        summary.written,
        vec![
            tree.output().join(DEPLOYMENT_FILE),
            descriptors.join("dev.mtaext"),
            descriptors.join("prod.mtaext"),
        ]
    );

    let dev = fs::read_to_string(descriptors.join("dev.mtaext")).unwrap();
    let dev = yaml(&dev);
    assert_eq!(
        dev.get("modules"),
        Some(&yaml("- name: web\n  parameters:\n    memory: 1G\n"))
    );
    assert_eq!(dev.get("resources"), Some(&yaml("[]")));

    // Deployment overlays do not leak into extensions.
    let prod = yaml(&fs::read_to_string(descriptors.join("prod.mtaext")).unwrap());
    assert_eq!(prod.get("modules"), Some(&yaml("[]")));
}

#[cfg(unix)]
#[test]
fn test_symlinked_fragments_are_composed() {
    let tree = TemplateTree::new();
    tree.write("base.yml", "ID: app1\n")
        .write("modules/srv.yml", "name: srv\n")
        .write("common/web.yml", "name: web\n");
    std::os::unix::fs::symlink(
        tree.root().join("common").join("web.yml"),
        tree.root().join("modules").join("web.yml"),
    )
    .unwrap();

    let descriptor = tree.compose(&Scope::Deployment).unwrap();

    assert_eq!(
        descriptor.get("modules"),
        Some(&yaml("- name: srv\n- name: web\n"))
    );
}

#[cfg(unix)]
#[test]
fn test_dangling_fragment_symlink_fails_scope() {
    let tree = TemplateTree::new();
    tree.write("base.yml", "ID: app1\n").write("modules/srv.yml", "name: srv\n");
    std::os::unix::fs::symlink(
        tree.root().join("missing.yml"),
        tree.root().join("modules").join("web.yml"),
    )
    .unwrap();

    let err = tree.compose(&Scope::Deployment).unwrap_err();

    assert!(matches!(err, ForgeError::Io { .. }));
}
