//! Management console (EMC2) facade.
//!
//! # What this module handles:
//! - Groups, users, applications and roles
//! - Data sources, exporter settings and content schemas
//! - System information and audit logs
//!
//! # What this module does NOT handle:
//! - Sessions (in [`crate::client::session`]); call `login()` first

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::apps::AppKind;
use crate::client::AppClient;
use crate::error::{ClientError, Result};
use crate::models::{
    AppId, AppInfo, AppPermission, AppRole, AuditLog, DataSource, DataSourceContentType,
    DataSourceSchema, ExporterSetting, Group, SystemInfo, User,
};

/// Typed client for EMC2.
#[derive(Debug)]
pub struct EmcClient(AppClient);

app_facade!(EmcClient, AppKind::Emc);

fn require_id(id: Option<i64>, what: &str) -> Result<i64> {
    id.ok_or_else(|| ClientError::InvalidRequest(format!("{what} has no id")))
}

impl EmcClient {
    pub async fn get_groups(&self) -> Result<Vec<Group>> {
        let path = "/group";
        let res = self.request_get(path).await?;
        self.decode(path, res)
    }

    pub async fn add_group(&self, group: &Group) -> Result<Group> {
        let path = "/group";
        let res = self.request_post(path, group).await?;
        self.decode(path, res)
    }

    pub async fn update_group(&self, group: &Group) -> Result<Group> {
        let path = format!("/group/{}", require_id(group.id, "group")?);
        let res = self.request_post(&path, group).await?;
        self.decode(&path, res)
    }

    /// Delete a group and return its id.
    pub async fn del_group(&self, group_id: i64) -> Result<i64> {
        let path = format!("/group/{group_id}");
        let res = self.request_del(&path).await?;
        self.echoed_id(&path, &res, group_id)
    }

    /// The logged-in user, or the impersonated one.
    pub async fn me(&self) -> Result<User> {
        let path = "/user/me";
        let res = self.request_get(path).await?;
        self.decode(path, res)
    }

    pub async fn get_users(&self, group_id: i64) -> Result<Vec<User>> {
        let path = format!("/group/{group_id}/user");
        let res = self.request_get(&path).await?;
        self.decode(&path, res)
    }

    pub async fn add_user(&self, group_id: i64, user: &User) -> Result<User> {
        let path = format!("/group/{group_id}/user");
        let res = self.request_post(&path, user).await?;
        self.decode(&path, res)
    }

    /// Update a user's profile. Passwords change through
    /// [`change_user_password()`](Self::change_user_password).
    pub async fn update_user(&self, user: &User) -> Result<User> {
        let path = format!("/user/{}", require_id(user.id, "user")?);
        let res = self.request_post(&path, user).await?;
        self.decode(&path, res)
    }

    pub async fn del_user(&self, user_id: i64) -> Result<i64> {
        let path = format!("/user/{user_id}");
        let res = self.request_del(&path).await?;
        self.echoed_id(&path, &res, user_id)
    }

    /// Operators may change passwords within their group, admins anywhere.
    pub async fn change_user_password(&self, user_id: i64, password: &str) -> Result<i64> {
        let path = format!("/user/{user_id}/password");
        let res = self
            .request_post(&path, &json!({ "password": password }))
            .await?;
        self.echoed_id(&path, &res, user_id)
    }

    pub async fn get_apps(&self) -> Result<Vec<AppInfo>> {
        let path = "/app";
        let res = self.request_get(path).await?;
        self.decode(path, res)
    }

    pub async fn get_app_permissions(&self, app_id: &AppId) -> Result<Vec<AppPermission>> {
        let path = format!("/app/{app_id}/permission");
        let res = self.request_get(&path).await?;
        self.decode(&path, res)
    }

    pub async fn get_app_roles(&self, app_id: &AppId) -> Result<Vec<AppRole>> {
        let path = format!("/app/{app_id}/role");
        let res = self.request_get(&path).await?;
        self.decode(&path, res)
    }

    pub async fn update_app_role(&self, app_id: &AppId, role: &AppRole) -> Result<AppRole> {
        let path = format!("/app/{app_id}/role");
        let res = self.request_post(&path, role).await?;
        self.decode(&path, res)
    }

    pub async fn get_data_sources(&self, group_id: i64) -> Result<Vec<DataSource>> {
        let path = format!("/group/{group_id}/data-source");
        let res = self.request_get(&path).await?;
        self.decode(&path, res)
    }

    pub async fn add_data_source(&self, group_id: i64, source: &DataSource) -> Result<DataSource> {
        let path = format!("/group/{group_id}/data-source");
        let res = self.request_post(&path, source).await?;
        self.decode(&path, res)
    }

    pub async fn update_data_source(&self, source: &DataSource) -> Result<DataSource> {
        let path = format!("/data-source/{}", require_id(source.id, "data source")?);
        let res = self.request_post(&path, source).await?;
        self.decode(&path, res)
    }

    pub async fn del_data_source(&self, source_id: i64) -> Result<i64> {
        let path = format!("/data-source/{source_id}");
        let res = self.request_del(&path).await?;
        self.echoed_id(&path, &res, source_id)
    }

    pub async fn get_exporter_setting(&self, source_id: i64) -> Result<ExporterSetting> {
        let path = format!("/data-source/{source_id}/exporter");
        let res = self.request_get(&path).await?;
        self.decode(&path, res)
    }

    pub async fn update_exporter_setting(
        &self,
        source_id: i64,
        setting: &ExporterSetting,
    ) -> Result<ExporterSetting> {
        let path = format!("/data-source/{source_id}/exporter");
        let res = self.request_post(&path, setting).await?;
        self.decode(&path, res)
    }

    pub async fn get_data_source_schema(
        &self,
        content_type: &DataSourceContentType,
    ) -> Result<Vec<DataSourceSchema>> {
        let path = format!("/data-source/schema/{content_type}");
        let res = self.request_get(&path).await?;
        self.decode(&path, res)
    }

    pub async fn get_system_info(&self) -> Result<SystemInfo> {
        let path = "/system/version";
        let res = self.request_get(path).await?;
        self.decode(path, res)
    }

    /// Audit events between `start` and `end`.
    pub async fn get_audit_logs(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<AuditLog> {
        if start >= end {
            return Err(ClientError::InvalidRequest(
                "audit log start must precede end".to_string(),
            ));
        }
        let path = format!(
            "/audit?startTime={}&endTime={}",
            start.timestamp_millis(),
            end.timestamp_millis()
        );
        let res = self.request_get(&path).await?;
        self.decode(&path, res)
    }
}
