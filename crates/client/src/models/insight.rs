//! Insight (EI3) models.
//!
//! Every EI3 response wraps its result as `{"data": ...}`; see [`Envelope`].

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::enums::{AppRoleName, BandCombineOperator, BandGeneOperator, BandType};

/// The `{"data": ...}` wrapper around EI3 results.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EiGroup {
    pub name: String,
    pub display_name: String,
    #[serde(default)]
    pub id: Option<i64>,
}

/// A user as EI3 sees it: one role, one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EiUser {
    pub name: String,
    pub display_name: String,
    pub role: AppRoleName,
    pub group: EiGroup,
    #[serde(default)]
    pub id: Option<i64>,
}

/// Band category. Only `name` is sent when creating or renaming.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandCategory {
    pub name: String,
    #[serde(default)]
    pub bands: Vec<Band>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl BandCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bands: Vec::new(),
            id: None,
        }
    }
}

/// Gene condition of a `gene` or `fixedgene` band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandGene {
    pub gene_id: String,
    /// Data source the band is computed from.
    pub cid: i64,
    pub operator: BandGeneOperator,
    pub operand: String,
}

/// Bands combined into a `combine` band. Only the first operator is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BandCombine {
    pub band_ids: Vec<i64>,
    pub operators: Vec<BandCombineOperator>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotInfo {
    #[serde(default)]
    pub parent: Option<i64>,
    #[serde(default)]
    pub children: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Band {
    /// Responses embedded in a category omit it.
    #[serde(default)]
    pub category_id: Option<i64>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub band_type: BandType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_gene: Option<BandGene>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_band: Option<BandCombine>,
    #[serde(default = "default_need_refresh")]
    pub need_refresh: bool,
    #[serde(default)]
    pub snapshot_info: SnapshotInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub update_time: Option<DateTime<Utc>>,
}

fn default_need_refresh() -> bool {
    true
}

impl Band {
    fn new(category_id: i64, name: impl Into<String>, band_type: BandType) -> Self {
        Self {
            category_id: Some(category_id),
            name: name.into(),
            description: String::new(),
            band_type,
            target_gene: None,
            target_band: None,
            need_refresh: true,
            snapshot_info: SnapshotInfo::default(),
            id: None,
            amount: None,
            update_time: None,
        }
    }

    /// A band of users whose gene value satisfies `gene`.
    pub fn gene(category_id: i64, name: impl Into<String>, gene: BandGene) -> Self {
        Self {
            target_gene: Some(gene),
            ..Self::new(category_id, name, BandType::Gene)
        }
    }

    /// A band combining existing bands.
    pub fn combine(category_id: i64, name: impl Into<String>, combine: BandCombine) -> Self {
        Self {
            target_band: Some(combine),
            ..Self::new(category_id, name, BandType::Combine)
        }
    }

    /// A band filled from an uploaded CSV with a `uid` column.
    pub fn upload(category_id: i64, name: impl Into<String>) -> Self {
        Self::new(category_id, name, BandType::Upload)
    }
}

/// Where to fetch a band's uid list, relative to the application host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UidListExport {
    pub download_link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUploadResult {
    pub pid_number: u64,
}

/// Statistic counters available from `/statistics/query`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatisticsItem {
    DownloadUidList,
    AddBand,
    UpdateBand,
    BandCount,
}

impl StatisticsItem {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DownloadUidList => "downloadUidList",
            Self::AddBand => "addBand",
            Self::UpdateBand => "updateBand",
            Self::BandCount => "bandCount",
        }
    }
}

/// Counters per day (`yyyy-mm-dd`), ordered by date.
pub type DailyStatistics = BTreeMap<String, BTreeMap<String, i64>>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::load_fixture;
    use serde_json::json;

    #[test]
    fn test_band_categories_fixture() {
        let envelope: Envelope<Vec<BandCategory>> =
            serde_json::from_value(load_fixture("ei/band_categories.json")).unwrap();
        let categories = envelope.data;

        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].name, "VIP");
        let band = &categories[0].bands[0];
        assert_eq!(band.band_type, BandType::Gene);
        assert_eq!(band.category_id, None);
        assert_eq!(
            band.target_gene.as_ref().map(|g| &g.operator),
            Some(&BandGeneOperator::Ge)
        );
        assert_eq!(band.snapshot_info.children, vec![31]);
        assert_eq!(band.amount, Some(1200));
    }

    #[test]
    fn test_combine_band_payload() {
        let band = Band::combine(
            7,
            "VIP or loyal",
            BandCombine {
                band_ids: vec![1, 2],
                operators: vec![BandCombineOperator::Union],
            },
        );
        let value = serde_json::to_value(&band).unwrap();

        assert_eq!(value["categoryId"], 7);
        assert_eq!(value["type"], "combine");
        assert_eq!(value["needRefresh"], true);
        assert_eq!(value["targetBand"], json!({"bandIds": [1, 2], "operators": ["UNION"]}));
        assert_eq!(value["snapshotInfo"], json!({"parent": null, "children": []}));
        assert!(value.get("targetGene").is_none());
    }

    #[test]
    fn test_ei_user_single_role() {
        let user: EiUser = serde_json::from_value(json!({
            "name": "bob",
            "displayName": "Bob",
            "role": "Operator",
            "group": {"name": "acme", "displayName": "Acme", "id": 3},
            "id": 12
        }))
        .unwrap();

        assert_eq!(user.role, AppRoleName::Operator);
        assert_eq!(user.group.id, Some(3));
    }

    #[test]
    fn test_statistics_item_names() {
        assert_eq!(StatisticsItem::DownloadUidList.as_str(), "downloadUidList");
        assert_eq!(
            serde_json::to_string(&StatisticsItem::BandCount).unwrap(),
            r#""bandCount""#
        );
    }
}
