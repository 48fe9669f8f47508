//! Recommender (ER3) facade: logics, campaigns and user filters.

use serde_json::Value;

use crate::apps::AppKind;
use crate::client::AppClient;
use crate::endpoints::FileAttachment;
use crate::error::{ClientError, Result};
use crate::models::{Campaign, Logic, UserFilter};

/// Typed client for ER3.
#[derive(Debug)]
pub struct RecommenderClient(AppClient);

app_facade!(RecommenderClient, AppKind::Recommender);

fn require_id(id: Option<i64>, what: &str) -> Result<i64> {
    id.ok_or_else(|| ClientError::InvalidRequest(format!("{what} has no id")))
}

impl RecommenderClient {
    pub async fn get_logics(&self, group_id: i64) -> Result<Vec<Logic>> {
        let path = format!("/group/{group_id}/logic");
        let res = self.request_get(&path).await?;
        self.decode(&path, res)
    }

    pub async fn add_logic(&self, group_id: i64, logic: &Logic) -> Result<Logic> {
        let path = format!("/group/{group_id}/logic");
        let res = self.request_post(&path, logic).await?;
        self.decode(&path, res)
    }

    pub async fn update_logic(&self, logic: &Logic) -> Result<Logic> {
        let path = format!("/logic/{}", require_id(logic.id, "logic")?);
        let res = self.request_post(&path, logic).await?;
        self.decode(&path, res)
    }

    /// Delete a logic; returns the server's answer as is.
    pub async fn del_logic(&self, logic_id: i64) -> Result<Value> {
        self.request_del(&format!("/logic/{logic_id}")).await
    }

    pub async fn get_campaigns(&self, group_id: i64) -> Result<Vec<Campaign>> {
        let path = format!("/group/{group_id}/campaign");
        let res = self.request_get(&path).await?;
        self.decode(&path, res)
    }

    /// Create a campaign in its `group_id`.
    pub async fn add_campaign(&self, campaign: &Campaign) -> Result<Campaign> {
        if campaign.start_time >= campaign.end_time {
            return Err(ClientError::InvalidRequest(
                "campaign must start before it ends".to_string(),
            ));
        }
        let path = format!("/group/{}/campaign", campaign.group_id);
        let res = self.request_post(&path, campaign).await?;
        self.decode(&path, res)
    }

    pub async fn update_campaign(&self, campaign: &Campaign) -> Result<Campaign> {
        let path = format!("/campaign/{}", require_id(campaign.id, "campaign")?);
        let res = self.request_post(&path, campaign).await?;
        self.decode(&path, res)
    }

    pub async fn del_campaign(&self, campaign_id: i64) -> Result<Value> {
        self.request_del(&format!("/campaign/{campaign_id}")).await
    }

    pub async fn get_user_filters(&self, group_id: i64) -> Result<Vec<UserFilter>> {
        let path = format!("/group/{group_id}/userfilter");
        let res = self.request_get(&path).await?;
        self.decode(&path, res)
    }

    /// Create a user filter from a uid file.
    pub async fn add_user_filter(
        &self,
        group_id: i64,
        filter: &UserFilter,
        file: FileAttachment,
    ) -> Result<UserFilter> {
        let path = format!("/group/{group_id}/userfilter");
        let payload = serde_json::to_value(filter)
            .map_err(|e| ClientError::InvalidRequest(format!("payload is not serializable: {e}")))?;
        let res = self.request_upload(&path, file, Some(&payload)).await?;
        self.decode(&path, res)
    }

    pub async fn del_user_filter(&self, filter_id: i64) -> Result<Value> {
        self.request_del(&format!("/userfilter/{filter_id}")).await
    }
}
