//! Configuration loading tests

use safenote_rs::config::Config;
use safenote_rs::GatewayError;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_minimal_file_uses_defaults() {
    let file = write_config(
        r#"
auth:
  jwt_secret: "Integration-Test-Secret-0123456789-ABCDEF"
"#,
    );

    let config = Config::from_file(file.path()).await.unwrap();
    assert_eq!(config.server().port, Config::default().server().port);
    assert!(!config.storage().database.enabled);
    assert_eq!(config.logging().level, Config::default().logging().level);
}

#[tokio::test]
async fn test_invalid_yaml_is_config_error() {
    let file = write_config("server: [unclosed");
    let result = Config::from_file(file.path()).await;
    assert!(matches!(result, Err(GatewayError::Config(_))));
}

#[tokio::test]
async fn test_unsupported_database_url_is_rejected() {
    let file = write_config(
        r#"
storage:
  database:
    url: "mysql://localhost/safenote"
    enabled: true
auth:
  jwt_secret: "Integration-Test-Secret-0123456789-ABCDEF"
"#,
    );

    let result = Config::from_file(file.path()).await;
    assert!(matches!(result, Err(GatewayError::Config(_))));
}

#[tokio::test]
async fn test_zero_port_is_rejected() {
    let file = write_config(
        r#"
server:
  port: 0
auth:
  jwt_secret: "Integration-Test-Secret-0123456789-ABCDEF"
"#,
    );

    assert!(Config::from_file(file.path()).await.is_err());
}
