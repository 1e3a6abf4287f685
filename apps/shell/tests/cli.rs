use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn databind(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_databind"));
    cmd.current_dir(dir).env_remove("RUST_LOG");
    cmd
}

fn workspace(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).unwrap();
    }
    dir
}

#[test]
fn list_shows_every_model() {
    let dir = workspace(&[]);
    databind(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Git "))
        .stdout(predicate::str::contains("Pipeline Stage"))
        .stdout(predicate::str::contains("Subversion(remote) (deprecated)"));
}

#[test]
fn describe_accepts_display_names() {
    let dir = workspace(&[]);
    databind(dir.path())
        .args(["describe", "Git"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("GitScm(url, branch?, credentials_id?, shallow?)\n"))
        .stdout(predicate::str::contains("Display name: Git"))
        .stdout(predicate::str::contains("Checks out a Git repository."))
        .stdout(predicate::str::contains("  url: string - "))
        .stdout(predicate::str::contains("  shallow: boolean (optional)"));
}

#[test]
fn describe_unknown_model_fails() {
    let dir = workspace(&[]);
    databind(dir.path())
        .args(["describe", "Maven"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no model named 'Maven'"));
}

#[test]
fn check_reports_deprecation_warnings() {
    let dir = workspace(&[(
        "pipeline.json",
        r#"{"agent": "linux", "node": "master", "stages": [{"name": "build", "steps": ["make"]}]}"#,
    )]);
    databind(dir.path())
        .args(["check", "Pipeline", "pipeline.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pipeline.json: OK (Pipeline)"))
        .stdout(predicate::str::contains("warning: parameter 'node' of Pipeline is deprecated"));
}

#[test]
fn check_names_the_missing_parameter() {
    let dir = workspace(&[("pipeline.toml", "agent = \"linux\"\n\n[[stages]]\nwhen = \"main\"\n")]);
    databind(dir.path())
        .args(["check", "Pipeline", "pipeline.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not bind to Pipeline"))
        .stderr(predicate::str::contains("missing mandatory parameter 'stages[0].name'"));
}

#[test]
fn unknown_parameters_follow_the_config_file() {
    let document = r#"{"url": "https://example.com/repo.git", "depth": 1}"#;
    let dir = workspace(&[("scm.json", document)]);
    databind(dir.path())
        .args(["check", "Git", "scm.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown parameter(s) 'depth'"));

    let dir = workspace(&[("scm.json", document), ("databind.toml", "[binding]\nunknown_parameters = \"ignore\"\n")]);
    databind(dir.path()).args(["check", "Git", "scm.json"]).assert().success();
}

#[test]
fn explicit_config_must_exist() {
    let dir = workspace(&[]);
    databind(dir.path()).args(["--config", "missing.toml", "list"]).assert().failure();
}

#[test]
fn normalize_expands_shorthand_and_drops_defaults() {
    let dir = workspace(&[(
        "pipeline.json",
        r#"{"stages": [{"steps": ["make", {"script": "make test", "returnStatus": false}], "name": "build"}],
            "retries": 0, "agent": "linux"}"#,
    )]);
    let expected = r#"{
  "agent": "linux",
  "stages": [
    {
      "name": "build",
      "steps": [
        {
          "script": "make"
        },
        {
          "script": "make test"
        }
      ]
    }
  ]
}
"#;
    databind(dir.path())
        .args(["normalize", "Pipeline", "pipeline.json"])
        .assert()
        .success()
        .stdout(predicate::eq(expected));
}

#[test]
fn normalize_keeps_toml_documents_in_toml() {
    let dir = workspace(&[("shell.toml", "returnStatus = true\nscript = \"ls\"\n")]);
    databind(dir.path())
        .args(["normalize", "Shell", "shell.toml"])
        .assert()
        .success()
        .stdout(predicate::eq("script = \"ls\"\nreturnStatus = true\n"));
}

#[test]
fn unsupported_document_format_is_rejected() {
    let dir = workspace(&[("pipeline.yaml", "agent: linux\n")]);
    databind(dir.path())
        .args(["check", "Pipeline", "pipeline.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported document format"));
}
