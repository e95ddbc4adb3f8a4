use std::path::Path;
use std::process::{Command, Output};

const INPUT_VARS: [&str; 5] = [
    "INPUT_SECRETS",
    "INPUT_PATH",
    "INPUT_INCLUDE_REGEXP",
    "INPUT_EXCLUDE_REGEXP",
    "INPUT_REPLACE_REGEXP",
];

/// `senv` with a clean host environment plus `envs`.
fn senv(args: &[&str], envs: &[(&str, &str)]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_senv"));
    for var in INPUT_VARS.iter().chain(&["RUST_LOG", "RUNNER_DEBUG"]) {
        cmd.env_remove(var);
    }
    cmd.args(args).envs(envs.iter().copied());
    cmd.output().unwrap()
}

fn path_str(path: &Path) -> &str {
    path.to_str().unwrap()
}

#[test]
fn test_logs_on_stderr_only() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join(".env");

    let output = senv(
        &[],
        &[
            ("INPUT_SECRETS", r#"{"A":"1","GITHUB_TOKEN":"t"}"#),
            ("INPUT_PATH", path_str(&path)),
            ("RUNNER_DEBUG", "1"),
        ],
    );

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert!(stdout.is_empty(), "unexpected stdout: {stdout}");
    assert!(stderr.contains("keys after exclude"));
    assert!(stderr.contains("Generated file to"));
    assert!(!stderr.contains('\u{1b}'));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "A=\"1\"\n");
}

#[test]
fn test_failure_reported_on_stdout() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join(".env");

    let output = senv(
        &["--secrets", "{not json}", "--path", path_str(&path)],
        &[],
    );

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("::error::Cannot parse JSON secrets"));
    assert_eq!(stdout.lines().count(), 1);
    assert!(!path.exists());
}

#[test]
fn test_env_overrides_config_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    let file_out = temp_dir.path().join("file.env");
    let env_out = temp_dir.path().join("env.env");

    let config = temp_dir.path().join("senv.toml");
    std::fs::write(
        &config,
        format!(
            "secrets = '{{\"A\":\"1\"}}'\npath = '{}'\n",
            path_str(&file_out)
        ),
    )
    .unwrap();

    let output = senv(
        &["--config", path_str(&config)],
        &[("INPUT_PATH", path_str(&env_out))],
    );

    assert!(output.status.success());
    assert!(env_out.exists());
    assert!(!file_out.exists());
}

#[test]
fn test_flag_overrides_env() {
    let temp_dir = tempfile::tempdir().unwrap();
    let env_out = temp_dir.path().join("env.env");
    let flag_out = temp_dir.path().join("flag.env");

    let output = senv(
        &["--path", path_str(&flag_out)],
        &[
            ("INPUT_SECRETS", r#"{"A":"1"}"#),
            ("INPUT_PATH", path_str(&env_out)),
        ],
    );

    assert!(output.status.success());
    assert!(flag_out.exists());
    assert!(!env_out.exists());
}

#[test]
fn test_env_inputs_trimmed() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join(".env");
    let padded = format!("{}\n", path_str(&path));

    let output = senv(
        &[],
        &[
            ("INPUT_SECRETS", "{\"APP_X\":\"1\"}\n"),
            ("INPUT_PATH", padded.as_str()),
            ("INPUT_REPLACE_REGEXP", " ^(\\w+)_X$=$1_Y \n"),
        ],
    );

    assert!(output.status.success());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "APP_Y=\"1\"\n");
}
