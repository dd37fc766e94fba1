use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tg::{
    cli::{ApplyArgs, NewArgs, ValidateArgs},
    commands::{apply, new, validate, Context},
    config::initial_config,
    renderer::EngineKind,
    Error,
};

struct Workspace {
    root: TempDir,
    ctx: Context,
}

impl Workspace {
    fn new() -> Self {
        let root = TempDir::new().unwrap();
        let config_path = root.path().join("tg.config.toml");
        fs::write(&config_path, initial_config("templates")).unwrap();
        fs::create_dir(root.path().join("templates")).unwrap();
        Self { ctx: Context { verbose: true, config_path }, root }
    }

    fn templates(&self) -> PathBuf {
        self.root.path().join("templates")
    }

    fn write(&self, relative: &str, content: &str) {
        let path = self.templates().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn apply_args(&self, template: &str, output: &Path, vars: &[(&str, &str)]) -> ApplyArgs {
        ApplyArgs {
            template: template.to_string(),
            output_dir: Some(output.to_path_buf()),
            output: PathBuf::from("."),
            vars: vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect(),
            engine: None,
        }
    }
}

#[test_log::test]
fn test_apply_uses_defaults_and_overrides() {
    let ws = Workspace::new();
    ws.write(
        "service/template.toml",
        r#"
[metadata]
name = "service"

[variables.project]
default = "demo"
type = "string"

[variables.port]
default = 8080
type = "number"

[variables.features]
default = ["http", "metrics"]
type = "array"
"#,
    );
    ws.write("service/{{.project}}/config.txt", "port={{.port}}\n{{range .features}}- {{.}}\n{{end}}");
    let output = ws.root.path().join("out");

    let result = apply::run(&ws.ctx, ws.apply_args("service", &output, &[("project", "billing")])).unwrap();

    assert_eq!(
        fs::read_to_string(output.join("billing/config.txt")).unwrap(),
        "port=8080\n- http\n- metrics\n"
    );
    assert_eq!(result.created_files, vec![PathBuf::from("{{.project}}/config.txt")]);
    assert!(!output.join("template.toml").exists());
}

#[test]
fn test_apply_rejects_invalid_descriptor() {
    let ws = Workspace::new();
    ws.write("bad/template.toml", "[variables.port]\ndefault = \"80\"\ntype = \"number\"\n");
    ws.write("bad/a.txt", "a");
    let output = ws.root.path().join("out");

    let err = apply::run(&ws.ctx, ws.apply_args("bad", &output, &[])).unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert!(!output.join("a.txt").exists());
}

#[test]
fn test_apply_unknown_template() {
    let ws = Workspace::new();
    let output = ws.root.path().join("out");

    let err = apply::run(&ws.ctx, ws.apply_args("nope", &output, &[])).unwrap_err();

    assert!(matches!(err, Error::TemplateNotFound { .. }));
}

#[test]
fn test_apply_and_validate_require_templates_dir() {
    let ws = Workspace::new();
    fs::remove_dir(ws.templates()).unwrap();
    let output = ws.root.path().join("out");

    let err = apply::run(&ws.ctx, ws.apply_args("any", &output, &[])).unwrap_err();
    assert!(matches!(err, Error::Validation(_)), "got {err:?}");
    assert!(!output.exists());

    let err = validate::run(&ws.ctx, ValidateArgs { template: "any".to_string() }).unwrap_err();
    assert!(matches!(err, Error::Validation(_)), "got {err:?}");
}

#[test]
fn test_apply_ignores_rules() {
    let ws = Workspace::new();
    ws.write(
        "ruled/template.toml",
        "[metadata]\nname = \"ruled\"\n[rules]\nignores = [\"*.log\"]\n[rules.renames]\n\"a.txt\" = \"b.txt\"\n",
    );
    ws.write("ruled/a.txt", "a");
    ws.write("ruled/debug.log", "log");
    let output = ws.root.path().join("out");

    let result = apply::run(&ws.ctx, ws.apply_args("ruled", &output, &[])).unwrap();

    assert_eq!(result.files_created, 2);
    assert!(output.join("a.txt").exists());
    assert!(output.join("debug.log").exists());
    assert!(!output.join("b.txt").exists());
}

#[test]
fn test_new_then_validate_then_apply() {
    let ws = Workspace::new();

    new::run(
        &ws.ctx,
        NewArgs { name: "starter".to_string(), description: Some("A starter".to_string()), author: None },
    )
    .unwrap();
    assert!(ws.templates().join("starter/template.toml").is_file());

    validate::run(&ws.ctx, ValidateArgs { template: "starter".to_string() }).unwrap();

    let output = ws.root.path().join("out");
    let mut args = ws.apply_args("starter", &output, &[]);
    args.engine = Some(EngineKind::Go);
    apply::run(&ws.ctx, args).unwrap();
    assert_eq!(fs::read_to_string(output.join("README.md")).unwrap(), "# starter\n");

    let again = new::run(&ws.ctx, NewArgs { name: "starter".to_string(), description: None, author: None });
    assert!(matches!(again, Err(Error::Config(_))));
}
