//! Settings loaded from YAML files

use rentdesk::core::error::ConfigError;
use rentdesk::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(yaml: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_file() {
    let file = write_config(
        r#"
property:
  name: Nhà trọ Hồng
  address: 45 Lê Lợi, Huế
owner:
  name: Cô Lan
  email: lan@example.com
localization:
  currency: USD
  locale: en-US
  date_format: MM/dd/yyyy
  time_format: 12h
notifications:
  email: false
  sms: true
  overdue: false
billing:
  auto_generate_invoices: false
  auto_reminder_days: 5
  contract_warning_days: 60
"#,
    );

    let config = DashboardConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();

    assert_eq!(config.property.address, "45 Lê Lợi, Huế");
    assert_eq!(config.owner.name, "Cô Lan");
    assert_eq!(config.localization.time_format, "12h");
    assert!(config.notifications.sms);
    assert!(!config.billing.auto_generate_invoices);
    assert_eq!(config.billing.contract_warning_days, 60);
    assert_eq!(config.number_format().format(2_500_000), "2,500,000");
}

#[test]
fn test_missing_sections_fall_back() {
    let file = write_config("owner:\n  email: chu@example.com\n");

    let config = DashboardConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();

    assert_eq!(config.owner.email, "chu@example.com");
    assert_eq!(config.owner.name, "Chủ trọ");
    assert_eq!(config.property.name, "Nhà trọ Xanh");
    assert_eq!(config.number_format().format(2_500_000), "2.500.000");
}

#[test]
fn test_malformed_file() {
    let file = write_config("property: [unterminated");

    let err = DashboardConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));

    let err = DeskError::from(err);
    assert_eq!(err.error_code(), "CONFIG_ERROR");
}

#[tokio::test]
async fn test_settings_endpoint_serves_loaded_config() {
    let file = write_config("property:\n  name: Nhà trọ Hồng\n");
    let config = DashboardConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();

    let router = ServerBuilder::new().with_config(config).build().unwrap();
    let server = axum_test::TestServer::new(router);

    let body: serde_json::Value = server.get("/settings").await.json();
    assert_eq!(body["property"]["name"], "Nhà trọ Hồng");
    assert_eq!(body["billing"]["auto_reminder_days"], 3);
}
