use std::fs;
use std::path::Path;

use tempfile::TempDir;
use tg::{
    catalog::{filter_templates, find_templates, resolve_template},
    Error,
};

fn add_template(root: &Path, dir: &str, descriptor: &str) {
    let template_dir = root.join(dir);
    fs::create_dir_all(&template_dir).unwrap();
    fs::write(template_dir.join("template.toml"), descriptor).unwrap();
}

fn catalog() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    add_template(
        temp_dir.path(),
        "web",
        "version = \"1.2.0\"\n[metadata]\nname = \"web-app\"\ndescription = \"React frontend\"\nauthor = \"Ada\"\n[variables.name]\ndefault = \"x\"\n",
    );
    add_template(temp_dir.path(), "cli", "[metadata]\ndescription = \"Rust command line tool\"\n");
    fs::create_dir(temp_dir.path().join("not-a-template")).unwrap();
    fs::write(temp_dir.path().join("stray.txt"), "").unwrap();
    temp_dir
}

#[test]
fn test_find_templates() {
    let temp_dir = catalog();

    let templates = find_templates(temp_dir.path()).unwrap();

    let names: Vec<&str> = templates.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["cli", "web-app"]);
    assert_eq!(templates[1].version, "1.2.0");
    assert_eq!(templates[1].author, "Ada");
    assert_eq!(templates[1].variables, 1);
    assert_eq!(templates[1].path, temp_dir.path().join("web"));
}

#[test]
fn test_filter_templates_is_case_insensitive() {
    let temp_dir = catalog();
    let templates = find_templates(temp_dir.path()).unwrap();

    let by_name = filter_templates(templates.clone(), "WEB");
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].name, "web-app");

    let by_description = filter_templates(templates.clone(), "rust");
    assert_eq!(by_description[0].name, "cli");

    assert!(filter_templates(templates, "python").is_empty());
}

#[test]
fn test_resolve_template() {
    let temp_dir = catalog();

    let (dir, template) = resolve_template(temp_dir.path(), "web").unwrap();
    assert_eq!(dir, temp_dir.path().join("web"));
    assert_eq!(template.metadata.name, "web-app");

    let (dir, _) = resolve_template(temp_dir.path(), "web-app").unwrap();
    assert_eq!(dir, temp_dir.path().join("web"));

    match resolve_template(temp_dir.path(), "missing") {
        Err(Error::TemplateNotFound { name, .. }) => assert_eq!(name, "missing"),
        other => panic!("Expected TemplateNotFound, got {other:?}"),
    }
}

#[test]
fn test_broken_descriptor_fails_listing() {
    let temp_dir = catalog();
    add_template(temp_dir.path(), "broken", "[metadata\n");

    assert!(matches!(find_templates(temp_dir.path()), Err(Error::Config(_))));
}
