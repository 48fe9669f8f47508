//! Insight (EI3) facade.
//!
//! # What this module handles:
//! - Band categories, bands, snapshots and uid list exports
//! - Item data uploads and usage statistics
//! - Impersonation ("su") for admins and operators
//!
//! # Invariants
//! - Results are unwrapped from the `{"data": ...}` envelope.
//! - Band category writes send only the name, form encoded.
//! - Band writes are multipart; nested values travel as JSON text.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::apps::AppKind;
use crate::client::{ApiRequest, AppClient, Impersonation};
use crate::endpoints::FileAttachment;
use crate::error::{ClientError, Result};
use crate::models::{
    Band, BandCategory, BandType, DailyStatistics, EiUser, Envelope, ItemUploadResult,
    StatisticsItem, UidListExport,
};

/// Typed client for EI3.
#[derive(Debug)]
pub struct InsightClient(AppClient);

app_facade!(InsightClient, AppKind::Insight);

const DATE_FORMAT: &str = "%Y-%m-%d";

impl InsightClient {
    fn unwrap_data<T: DeserializeOwned>(&self, path: &str, res: Value) -> Result<T> {
        self.decode::<Envelope<T>>(path, res).map(|envelope| envelope.data)
    }

    fn echoed_data_id(&self, path: &str, res: &Value, expected: i64) -> Result<i64> {
        self.echoed_id(path, &res["data"]["id"], expected)
    }

    /// The effective user; the impersonated one while "su" is active.
    pub async fn get_me(&self) -> Result<EiUser> {
        let path = "/user/me";
        let res = self.request_get(path).await?;
        self.unwrap_data(path, res)
    }

    /// The user that actually logged in, regardless of impersonation.
    pub async fn get_superme(&self) -> Result<EiUser> {
        let path = "/user/superme";
        let res = self.request_get(path).await?;
        self.unwrap_data(path, res)
    }

    pub async fn get_band_categories(&self) -> Result<Vec<BandCategory>> {
        let path = "/bandcategory";
        let res = self.request_get(path).await?;
        self.unwrap_data(path, res)
    }

    pub async fn add_band_category(&self, name: &str) -> Result<BandCategory> {
        let path = "/bandcategory";
        let res = self
            .request_post_form(path, &json!({ "name": name }))
            .await?;
        self.unwrap_data(path, res)
    }

    /// Rename a category. Bands are managed through the band operations.
    pub async fn update_band_category(&self, category_id: i64, name: &str) -> Result<BandCategory> {
        let path = format!("/bandcategory/{category_id}");
        let res = self
            .request_post_form(&path, &json!({ "name": name }))
            .await?;
        self.unwrap_data(&path, res)
    }

    /// Delete an empty category and return its id.
    pub async fn del_band_category(&self, category_id: i64) -> Result<i64> {
        let path = format!("/bandcategory/{category_id}");
        let res = self.request_del(&path).await?;
        self.echoed_data_id(&path, &res, category_id)
    }

    async fn write_band(&self, path: &str, band: &Band, file: Option<FileAttachment>) -> Result<Band> {
        if file.is_some() && band.band_type != BandType::Upload {
            return Err(ClientError::InvalidRequest(
                "only upload bands take a uid file".to_string(),
            ));
        }

        let mut request = ApiRequest::post(path).payload(band)?.multipart();
        if let Some(file) = file {
            request = request.file(file);
        }

        let res = self.execute(request).await?;
        let mut saved: Band = self.unwrap_data(path, res)?;
        if saved.category_id.is_none() {
            saved.category_id = band.category_id;
        }
        Ok(saved)
    }

    /// Create a band. Upload bands take a CSV with a `uid` column.
    pub async fn add_band(&self, band: &Band, file: Option<FileAttachment>) -> Result<Band> {
        self.write_band("/band", band, file).await
    }

    pub async fn update_band(&self, band: &Band, file: Option<FileAttachment>) -> Result<Band> {
        let band_id = band
            .id
            .ok_or_else(|| ClientError::InvalidRequest("band has no id".to_string()))?;
        self.write_band(&format!("/band/{band_id}"), band, file).await
    }

    pub async fn del_band(&self, band_id: i64) -> Result<i64> {
        let path = format!("/band/{band_id}");
        let res = self.request_del(&path).await?;
        self.echoed_data_id(&path, &res, band_id)
    }

    /// Clone a band; the server names the copy.
    pub async fn do_snapshot(&self, band_id: i64) -> Result<Band> {
        let path = format!("/band/{band_id}/snapshot");
        let res = self
            .execute(ApiRequest::new(path.as_str()).method(Method::POST))
            .await?;
        self.unwrap_data(&path, res)
    }

    /// Export a band's uid list and download it to `destination`.
    pub async fn get_uid_list(&self, band_id: i64, destination: impl AsRef<Path>) -> Result<PathBuf> {
        let path = format!("/band/{band_id}/uidlist");
        let res = self.request_get(&path).await?;
        let export: UidListExport = self.unwrap_data(&path, res)?;
        self.download(&export.download_link, destination).await
    }

    /// Upload item information (CSV) and return the number of items stored.
    pub async fn upload_item_data(&self, group_id: i64, file: FileAttachment) -> Result<u64> {
        let path = "/item";
        let res = self
            .request_upload(path, file, Some(&json!({ "groupId": group_id })))
            .await?;
        let result: ItemUploadResult = self.unwrap_data(path, res)?;
        Ok(result.pid_number)
    }

    /// Daily counters for `items` between two dates, inclusive.
    pub async fn get_statistics(
        &self,
        group_id: i64,
        items: &[StatisticsItem],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<DailyStatistics> {
        if items.is_empty() {
            return Err(ClientError::InvalidRequest(
                "at least one statistics item is required".to_string(),
            ));
        }

        let names = items
            .iter()
            .map(|item| item.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let path = "/statistics/query";
        let request = ApiRequest::get(path)
            .query("groupId", group_id.to_string())
            .query("startDate", start.format(DATE_FORMAT).to_string())
            .query("endDate", end.format(DATE_FORMAT).to_string())
            .query("itemName", names);

        let res = self.execute(request).await?;
        self.unwrap_data(path, res)
    }

    /// Act as `user_name` of `group_name` (admins and operators only).
    pub async fn su_login(&mut self, group_name: &str, user_name: &str) -> Result<Value> {
        let res = self.enter_impersonation(group_name, user_name).await?;
        Ok(res.get("data").cloned().unwrap_or(Value::Null))
    }

    pub async fn su_logout(&mut self) -> Result<Impersonation> {
        self.exit_impersonation().await
    }
}
