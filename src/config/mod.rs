//! Dashboard settings loading and management

use crate::core::NumberFormat;
use crate::core::error::{ConfigError, ValidationError};
use crate::core::form::merge_json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The rental property being managed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyConfig {
    pub name: String,
    pub address: String,
}

impl Default for PropertyConfig {
    fn default() -> Self {
        Self {
            name: "Nhà trọ Xanh".to_string(),
            address: "123 Đường ABC, Quận 1, TP.HCM".to_string(),
        }
    }
}

/// Landlord contact
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnerConfig {
    pub name: String,
    pub email: String,
}

impl Default for OwnerConfig {
    fn default() -> Self {
        Self {
            name: "Chủ trọ".to_string(),
            email: "admin@example.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppearanceConfig {
    /// "light", "dark" or "system"
    pub theme: String,
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            theme: "system".to_string(),
        }
    }
}

/// Currency, number and date presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizationConfig {
    pub currency: String,
    /// BCP 47 tag, decides the thousands separator
    pub locale: String,
    pub date_format: String,
    /// "24h" or "12h"
    pub time_format: String,
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            currency: "VND".to_string(),
            locale: "vi-VN".to_string(),
            date_format: "dd/MM/yyyy".to_string(),
            time_format: "24h".to_string(),
        }
    }
}

/// Which reminder channels are enabled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub email: bool,
    pub sms: bool,
    /// Remind tenants about overdue invoices
    pub overdue: bool,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            email: true,
            sms: false,
            overdue: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BillingConfig {
    pub auto_generate_invoices: bool,
    /// Days before the due date to send a reminder
    pub auto_reminder_days: u32,
    /// Contracts ending within this many days are flagged on the dashboard
    pub contract_warning_days: u64,
}

impl Default for BillingConfig {
    fn default() -> Self {
        Self {
            auto_generate_invoices: true,
            auto_reminder_days: 3,
            contract_warning_days: 30,
        }
    }
}

/// Complete dashboard settings
///
/// Every section is optional in YAML; missing sections and fields take
/// their defaults.
///
/// ```yaml
/// property:
///   name: Nhà trọ Hồng
/// localization:
///   locale: en-US
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub property: PropertyConfig,
    pub owner: OwnerConfig,
    pub appearance: AppearanceConfig,
    pub localization: LocalizationConfig,
    pub notifications: NotificationConfig,
    pub billing: BillingConfig,
}

impl DashboardConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        let config = Self::from_yaml_str(&content)?;

        tracing::info!(path, property = %config.property.name, "loaded dashboard config");
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document is null, which serde_yaml refuses for a struct
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// The built-in settings
    pub fn default_config() -> Self {
        Self::default()
    }

    /// Thousands grouping for the configured locale
    pub fn number_format(&self) -> NumberFormat {
        NumberFormat::for_locale(&self.localization.locale)
    }

    /// A copy with the fields in `patch` written over `section`
    pub fn with_section(&self, section: SettingsSection, patch: Value) -> Result<Self, ValidationError> {
        let mut next = self.clone();
        match section {
            SettingsSection::General => next.property = merge_json(&self.property, patch)?,
            SettingsSection::Appearance => next.appearance = merge_json(&self.appearance, patch)?,
            SettingsSection::Localization => next.localization = merge_json(&self.localization, patch)?,
            SettingsSection::Notifications => next.notifications = merge_json(&self.notifications, patch)?,
            SettingsSection::Billing => next.billing = merge_json(&self.billing, patch)?,
            SettingsSection::Account => next.owner = merge_json(&self.owner, patch)?,
        }
        Ok(next)
    }
}

/// One independently saved group of settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsSection {
    /// Property name and address
    General,
    Appearance,
    Localization,
    Notifications,
    Billing,
    /// Owner name and email
    Account,
}

impl SettingsSection {
    pub const ALL: [SettingsSection; 6] = [
        SettingsSection::General,
        SettingsSection::Appearance,
        SettingsSection::Localization,
        SettingsSection::Notifications,
        SettingsSection::Billing,
        SettingsSection::Account,
    ];

    /// Name used in `/settings/{section}`
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingsSection::General => "general",
            SettingsSection::Appearance => "appearance",
            SettingsSection::Localization => "localization",
            SettingsSection::Notifications => "notifications",
            SettingsSection::Billing => "billing",
            SettingsSection::Account => "account",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str().eq_ignore_ascii_case(name))
    }

    /// Notice shown after the section is saved
    pub fn saved_notice(&self) -> &'static str {
        match self {
            SettingsSection::General => "Đã lưu thông tin chung",
            SettingsSection::Appearance => "Đã lưu cài đặt giao diện",
            SettingsSection::Localization => "Đã lưu cài đặt ngôn ngữ & định dạng",
            SettingsSection::Notifications => "Đã lưu cài đặt thông báo",
            SettingsSection::Billing => "Đã lưu cài đặt hóa đơn",
            SettingsSection::Account => "Đã lưu thông tin tài khoản",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default_config();
        assert_eq!(config.property.name, "Nhà trọ Xanh");
        assert_eq!(config.localization.currency, "VND");
        assert_eq!(config.localization.date_format, "dd/MM/yyyy");
        assert!(config.notifications.email);
        assert!(!config.notifications.sms);
        assert_eq!(config.billing.auto_reminder_days, 3);
        assert_eq!(config.appearance.theme, "system");
        assert_eq!(config.number_format(), NumberFormat::VI_VN);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
property:
  name: Nhà trọ Hồng
localization:
  locale: en-US
billing:
  contract_warning_days: 45
"#;

        let config = DashboardConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.property.name, "Nhà trọ Hồng");
        assert_eq!(config.property.address, "123 Đường ABC, Quận 1, TP.HCM");
        assert_eq!(config.owner, OwnerConfig::default());
        assert_eq!(config.localization.currency, "VND");
        assert_eq!(config.billing.contract_warning_days, 45);
        assert!(config.billing.auto_generate_invoices);
        assert_eq!(config.number_format(), NumberFormat::EN_US);
    }

    #[test]
    fn test_empty_yaml() {
        let config = DashboardConfig::from_yaml_str("").unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_yaml_serialization() {
        let config = DashboardConfig::default_config();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed = DashboardConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_yaml() {
        let err = DashboardConfig::from_yaml_str("billing: [1, 2").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_with_section_merges_fields() {
        let config = DashboardConfig::default_config();

        let next = config
            .with_section(SettingsSection::Localization, serde_json::json!({"locale": "en-US"}))
            .unwrap();

        assert_eq!(next.localization.locale, "en-US");
        assert_eq!(next.localization.currency, "VND");
        assert_eq!(next.number_format(), NumberFormat::EN_US);
        assert_eq!(config.localization.locale, "vi-VN");
    }

    #[test]
    fn test_account_section_is_the_owner() {
        let next = DashboardConfig::default_config()
            .with_section(SettingsSection::Account, serde_json::json!({"name": "Cô Lan"}))
            .unwrap();

        assert_eq!(next.owner.name, "Cô Lan");
        assert_eq!(next.owner.email, "admin@example.com");
        assert_eq!(next.property, PropertyConfig::default());
    }

    #[test]
    fn test_with_section_rejects_bad_values() {
        let config = DashboardConfig::default_config();
        let err = config
            .with_section(SettingsSection::Billing, serde_json::json!({"auto_reminder_days": "soon"}))
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_VALUE");
    }

    #[test]
    fn test_section_names_and_notices() {
        assert_eq!(SettingsSection::parse("general"), Some(SettingsSection::General));
        assert_eq!(SettingsSection::parse("Billing"), Some(SettingsSection::Billing));
        assert_eq!(SettingsSection::parse("theme"), None);
        assert_eq!(
            SettingsSection::Localization.saved_notice(),
            "Đã lưu cài đặt ngôn ngữ & định dạng"
        );
        assert_eq!(SettingsSection::Account.saved_notice(), "Đã lưu thông tin tài khoản");
    }

    #[test]
    fn test_missing_file() {
        let err = DashboardConfig::from_yaml_file("/nonexistent/rentdesk.yaml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/rentdesk.yaml"));
    }
}
