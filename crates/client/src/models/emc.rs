//! Management console (EMC2) models.
//!
//! Server-assigned fields (`id`, timestamps) are optional so the same types
//! serve as request payloads and responses. Timestamps are epoch milliseconds
//! on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::enums::{AppId, AppRoleName, DataSourceContentType, DataSourceType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub name: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub create_time: Option<DateTime<Utc>>,
}

impl Group {
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            id: None,
            create_time: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRole {
    pub role_name: AppRoleName,
    pub app_id: AppId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Login name: letters, digits and underscore.
    pub name: String,
    pub display_name: String,
    /// Only sent when creating a user; never returned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub mail: String,
    #[serde(default)]
    pub roles: Vec<UserRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub last_update_time: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            password: None,
            department: String::new(),
            mail: String::new(),
            roles: Vec::new(),
            id: None,
            create_time: None,
            last_update_time: None,
        }
    }

    /// Role of this user in `app`, if any.
    pub fn role_in(&self, app: &AppId) -> Option<&AppRoleName> {
        self.roles
            .iter()
            .find(|r| &r.app_id == app)
            .map(|r| &r.role_name)
    }
}

/// An installed application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppInfo {
    pub id: AppId,
    pub version: String,
    #[serde(default)]
    pub console: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Permission level: 0 forbidden, 1 view, 2 save, 3 delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppPermission {
    pub category: String,
    pub id: String,
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppRole {
    pub name: AppRoleName,
    #[serde(default)]
    pub permissions: Vec<AppPermission>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCollector {
    /// Accepted origin host; `*` accepts all.
    pub host_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub app_ids: Vec<AppId>,
    pub content_type: DataSourceContentType,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub source_type: Option<DataSourceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_collector: Option<EventCollector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
}

impl DataSource {
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        app_ids: Vec<AppId>,
        content_type: DataSourceContentType,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            app_ids,
            content_type,
            source_type: None,
            event_collector: None,
            id: None,
            group_id: None,
        }
    }

    /// Make this an event collector data source accepting `host_name`.
    pub fn with_event_collector(mut self, host_name: impl Into<String>) -> Self {
        self.source_type = Some(DataSourceType::EventCollector);
        self.event_collector = Some(EventCollector {
            host_name: host_name.into(),
        });
        self
    }
}

/// One exported field. `link` is the tuple key to explode, empty for
/// first-level collector parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExporterSchemaField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExporterSetting {
    pub enabled: bool,
    #[serde(
        rename = "initalConvetTime",
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub initial_convert_time: Option<DateTime<Utc>>,
    #[serde(default = "default_tuple_key")]
    pub tuple_key: String,
    #[serde(default, with = "crate::serde_helpers::json_string_list")]
    pub extra_schema: Vec<ExporterSchemaField>,
    #[serde(default = "default_parsing_format")]
    pub parsing_format: String,
    #[serde(default, with = "crate::serde_helpers::json_string_list")]
    pub base_schema: Vec<ExporterSchemaField>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub update_time: Option<DateTime<Utc>>,
}

fn default_tuple_key() -> String {
    "ptuple".to_string()
}

fn default_parsing_format() -> String {
    "NginxPlusLogParserDriver".to_string()
}

impl ExporterSetting {
    /// A setting starting conversion now with the default parser.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            initial_convert_time: Some(Utc::now()),
            tuple_key: default_tuple_key(),
            extra_schema: Vec::new(),
            parsing_format: default_parsing_format(),
            base_schema: Vec::new(),
            update_time: None,
        }
    }
}

/// Field of a data source content type. `link` applies to behavior data,
/// `key` to item, profile and rank data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemInfo {
    pub version: String,
    pub build: String,
    pub branch: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEvent {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub event_time: DateTime<Utc>,
    #[serde(default, deserialize_with = "crate::serde_helpers::opt_i64_from_string_or_number")]
    pub user_id: Option<i64>,
    pub group_user: String,
    /// `[Method]...;[Arguments]...;`
    pub msg: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLog {
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub events: Vec<AuditLogEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::load_fixture;
    use serde_json::json;

    #[test]
    fn test_new_group_omits_server_fields() {
        let value = serde_json::to_value(Group::new("acme", "Acme Corp")).unwrap();
        assert_eq!(value, json!({"name": "acme", "displayName": "Acme Corp"}));
    }

    #[test]
    fn test_deserialize_users_fixture() {
        let users: Vec<User> = serde_json::from_value(load_fixture("emc/users.json")).unwrap();

        assert_eq!(users.len(), 2);
        let bob = &users[0];
        assert_eq!(bob.name, "bob");
        assert_eq!(bob.id, Some(12));
        assert_eq!(bob.role_in(&AppId::Insight), Some(&AppRoleName::Operator));
        assert_eq!(bob.role_in(&AppId::Emc), Some(&AppRoleName::Admin));
        assert!(bob.password.is_none());
        assert_eq!(
            bob.create_time.map(|t| t.timestamp_millis()),
            Some(1_500_000_000_000)
        );
        assert_eq!(users[1].department, "");
    }

    #[test]
    fn test_event_collector_data_source_shape() {
        let source = DataSource::new(
            "web",
            "Web events",
            vec![AppId::Insight, AppId::Recommender],
            DataSourceContentType::Behavior,
        )
        .with_event_collector("*");

        let value = serde_json::to_value(&source).unwrap();
        assert_eq!(value["type"], "EVENT_COLLECTOR");
        assert_eq!(value["eventCollector"]["hostName"], "*");
        assert_eq!(value["contentType"], "behavior");
        assert_eq!(value["appIds"], json!(["ETU-INSIGHT", "ETU-RECOMMENDER"]));
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_exporter_setting_schema_travels_as_string() {
        let setting: ExporterSetting =
            serde_json::from_value(load_fixture("emc/exporter_setting.json")).unwrap();

        assert!(setting.enabled);
        assert_eq!(setting.extra_schema.len(), 1);
        assert_eq!(setting.extra_schema[0].name, "campaign");
        assert_eq!(setting.base_schema.len(), 2);

        let value = serde_json::to_value(&setting).unwrap();
        assert!(value["extraSchema"].is_string());
        assert!(value["initalConvetTime"].is_i64());
    }

    #[test]
    fn test_exporter_setting_defaults() {
        let setting: ExporterSetting = serde_json::from_value(json!({"enabled": false})).unwrap();
        assert_eq!(setting.tuple_key, "ptuple");
        assert_eq!(setting.parsing_format, "NginxPlusLogParserDriver");
        assert!(setting.base_schema.is_empty());

        assert!(ExporterSetting::new(true).initial_convert_time.is_some());
    }

    #[test]
    fn test_audit_log_accepts_string_user_id() {
        let log: AuditLog = serde_json::from_value(json!({
            "startTime": 1_600_000_000_000i64,
            "endTime": 1_600_000_360_000i64,
            "events": [{
                "eventTime": 1_600_000_100_000i64,
                "userId": "12",
                "groupUser": "acme/bob",
                "msg": "[Method]addGroup;[Arguments]acme;"
            }]
        }))
        .unwrap();

        assert_eq!(log.events[0].user_id, Some(12));
        assert_eq!(log.end_time.timestamp_millis(), 1_600_000_360_000);
    }
}
