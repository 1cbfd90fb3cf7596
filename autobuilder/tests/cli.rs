use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn autobuilder(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_autobuilder"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("AUTOBUILDER_CONFIG")
        .output()
        .expect("failed to run autobuilder")
}

fn rust_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("autobuilder.toml"), "[output]\npath = \"generated\"\n").unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::write(
        dir.path().join("src").join("lib.rs"),
        r#"
#[derive(Debug, Default, AutoBuilder)]
pub struct Person {
    pub(crate) name: String,
    pub(crate) age: i32,
    secret: String,
}
"#,
    )
    .unwrap();
    dir
}

fn descriptor_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("autobuilder.toml"),
        "[general]\nsource = \"descriptors\"\n\n[output]\npath = \"generated\"\n",
    )
    .unwrap();
    fs::create_dir_all(dir.path().join("descriptors")).unwrap();
    fs::write(
        dir.path().join("descriptors").join("types.toml"),
        r#"
[[types]]
package = "shapes"
name = "Shape"
modifiers = ["abstract"]
constructors = [{}]

[[types]]
package = "shapes"
name = "Circle"
constructors = [{}]
fields = [{ name = "radius", type = "f64" }]
"#,
    )
    .unwrap();
    dir
}

#[test]
fn init_writes_config_once() {
    let dir = TempDir::new().unwrap();

    let first = autobuilder(dir.path(), &["init"]);
    assert!(first.status.success());
    let written = fs::read_to_string(dir.path().join("autobuilder.toml")).unwrap();
    assert!(written.contains("[driver]"));

    let second = autobuilder(dir.path(), &["init"]);
    assert_eq!(second.status.code(), Some(1));

    let forced = autobuilder(dir.path(), &["init", "--force"]);
    assert!(forced.status.success());
}

#[test]
fn generate_writes_builder_file() {
    let dir = rust_project();

    let output = autobuilder(dir.path(), &["-q", "generate"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let generated = fs::read_to_string(dir.path().join("generated").join("person_builder.rs")).unwrap();
    assert!(generated.contains("use crate::*;"));
    assert!(generated.contains("pub struct PersonBuilder"));
    assert!(generated.contains("pub fn age(mut self, age: i32) -> Self"));
    assert!(!generated.contains("fn secret"));
}

#[test]
fn no_subcommand_runs_generate() {
    let dir = rust_project();
    let output = autobuilder(dir.path(), &["-q"]);
    assert!(output.status.success());
    assert!(dir.path().join("generated").join("person_builder.rs").exists());
}

#[test]
fn validate_fails_on_violation() {
    let dir = descriptor_project();

    let output = autobuilder(dir.path(), &["validate"]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("shapes::Shape"));
    assert!(stdout.contains("abstract"));
    assert!(!dir.path().join("generated").exists());
}

#[test]
fn generate_aborts_without_writing() {
    let dir = descriptor_project();
    let output = autobuilder(dir.path(), &["generate"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("generated").exists());
}

#[test]
fn keep_going_writes_valid_types() {
    let dir = descriptor_project();
    let output = autobuilder(dir.path(), &["generate", "--keep-going", "--sequential"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(dir.path().join("generated").join("circle_builder.rs").exists());
    assert!(!dir.path().join("generated").join("shape_builder.rs").exists());
}

#[test]
fn source_flag_overrides_config() {
    let dir = descriptor_project();
    fs::write(
        dir.path().join("autobuilder.toml"),
        "[output]\npath = \"generated\"\n",
    )
    .unwrap();

    let output = autobuilder(dir.path(), &["--source", "descriptors", "validate"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn info_json_lists_builder_models() {
    let dir = rust_project();

    let output = autobuilder(dir.path(), &["-q", "info", "--json"]);
    assert!(output.status.success());
    let models: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let first = &models[0];
    assert_eq!(first["name"]["name"], "PersonBuilder");
    assert_eq!(first["fields"].as_array().unwrap().len(), 2);
}
