//! Recommender (ER3) models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::enums::{LogicAlgType, LogicAvlItemFilterMode};

/// One algorithm in a logic's linear combination. `setting` depends on the
/// algorithm and is kept as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlgInstance {
    pub alg_id: String,
    pub weight: f64,
    #[serde(default)]
    pub setting: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilter {
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
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub update_time: Option<DateTime<Utc>>,
}

/// A recommendation logic.
///
/// The item filtering fields (`enable_last_viewed_item`, `item_filter_src`,
/// `enable_same_category`, `avl_item_filter_mode`) only apply to
/// [`LogicAlgType::ItemBase`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Logic {
    pub name: String,
    pub display_name: String,
    pub active: bool,
    pub number_of_rec: u32,
    pub alg_type: LogicAlgType,
    pub alg_instances: Vec<AlgInstance>,
    #[serde(default)]
    pub user_filter: Option<UserFilter>,
    #[serde(default)]
    pub use_location: bool,
    #[serde(default)]
    pub enable_last_viewed_item: bool,
    /// Complementary logic(s) consulted when this one runs short.
    #[serde(default)]
    pub delegate_logic_name: Option<String>,
    #[serde(default = "default_enable_updating")]
    pub enable_updating: bool,
    #[serde(default)]
    pub item_filter_src: Option<String>,
    #[serde(default)]
    pub enable_same_category: bool,
    #[serde(default)]
    pub avl_item_filter_mode: LogicAvlItemFilterMode,
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
    pub update_time: Option<DateTime<Utc>>,
}

fn default_enable_updating() -> bool {
    true
}

impl Logic {
    pub fn new(
        name: impl Into<String>,
        display_name: impl Into<String>,
        number_of_rec: u32,
        alg_type: LogicAlgType,
        alg_instances: Vec<AlgInstance>,
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.into(),
            active: true,
            number_of_rec,
            alg_type,
            alg_instances,
            user_filter: None,
            use_location: false,
            enable_last_viewed_item: false,
            delegate_logic_name: None,
            enable_updating: true,
            item_filter_src: None,
            enable_same_category: false,
            avl_item_filter_mode: LogicAvlItemFilterMode::Disabled,
            id: None,
            create_time: None,
            update_time: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    pub group_id: i64,
    pub name: String,
    pub display_name: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start_time: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub logics: Vec<Logic>,
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
    pub update_time: Option<DateTime<Utc>>,
}
