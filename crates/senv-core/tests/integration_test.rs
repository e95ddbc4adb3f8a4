use senv_core::{CoreError, PipelineOptions, generate};

fn run(secrets: &str, include: &str, exclude: &str, replace: &str) -> String {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join(".env");

    let options = PipelineOptions::parse(include, exclude, replace).unwrap();
    generate(secrets, &path, options).unwrap();

    std::fs::read_to_string(&path).unwrap()
}

#[test]
fn test_passthrough_keeps_order() {
    let content = run(r#"{"FOO":"1","BAR":"2"}"#, "", "", "");
    assert_eq!(content, "FOO=\"1\"\nBAR=\"2\"\n");
}

#[test]
fn test_github_token_always_dropped() {
    let content = run(r#"{"GITHUB_TOKEN":"x","API_KEY":"y"}"#, "", "", "");
    assert_eq!(content, "API_KEY=\"y\"\n");
}

#[test]
fn test_include_prefix() {
    let content = run(r#"{"DB_HOST":"h","DB_PORT":"5432"}"#, "^DB_", "", "");
    assert_eq!(content, "DB_HOST=\"h\"\nDB_PORT=\"5432\"\n");
}

#[test]
fn test_replace_prefix() {
    let content = run(r#"{"APP_SECRET":"z"}"#, "", "", "APP_=SERVICE_");
    assert_eq!(content, "SERVICE_SECRET=\"z\"\n");
}

#[test]
fn test_full_pipeline() {
    let secrets = r#"{
        "GITHUB_TOKEN": "t",
        "PROD_DB_URL": "postgres://prod",
        "PROD_API_KEY": "k",
        "STAGING_DB_URL": "postgres://staging",
        "PROD_DEBUG_TOKEN": "d"
    }"#;
    let content = run(secrets, "^PROD_, TOKEN", "DEBUG", "^PROD_=, _URL$=_DSN");
    assert_eq!(content, "DB_DSN=\"postgres://prod\"\nAPI_KEY=\"k\"\n");
}

#[test]
fn test_malformed_secrets_writes_nothing() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join(".env");

    let err = generate("{not json}", &path, PipelineOptions::default()).unwrap_err();

    assert!(matches!(err, CoreError::MalformedSecretsInput(_)));
    assert!(!path.exists());
}

#[test]
fn test_unwritable_path_reports_write_failure() {
    let temp_dir = tempfile::tempdir().unwrap();

    // A directory cannot be overwritten as a file
    let err = generate(r#"{"A":"1"}"#, temp_dir.path(), PipelineOptions::default()).unwrap_err();

    assert!(matches!(err, CoreError::WriteFailure { .. }));
}

#[test]
fn test_report_lists_written_keys() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("out.env");

    let options = PipelineOptions::parse("", "", "^A$=Z").unwrap();
    let report = generate(r#"{"A":"1","B":"2"}"#, &path, options).unwrap();

    assert_eq!(report.path, path);
    assert_eq!(report.keys, vec!["Z".to_string(), "B".to_string()]);
}

#[test]
fn test_replace_group_followed_by_suffix() {
    let content = run(r#"{"APP_X":"1"}"#, "", "", r"^(\w+)_X$=$1_Y");
    assert_eq!(content, "APP_Y=\"1\"\n");
}
