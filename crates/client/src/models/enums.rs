//! Wire vocabularies shared by the application models.
//!
//! Where the server vocabulary is open, unrecognized values land in an
//! `Other` variant and serialize back unchanged.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Application identifiers used in role assignments and data source grants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppId {
    #[serde(rename = "ETU-SHIELD")]
    Emc,
    #[serde(rename = "ETU-RECOMMENDER")]
    Recommender,
    #[serde(rename = "ETU-INSIGHT")]
    Insight,
    #[serde(untagged)]
    Other(String),
}

impl AppId {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Emc => "ETU-SHIELD",
            Self::Recommender => "ETU-RECOMMENDER",
            Self::Insight => "ETU-INSIGHT",
            Self::Other(value) => value,
        }
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role of a user within one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppRoleName {
    Viewer,
    Operator,
    /// Upper case on the wire, unlike the other roles.
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSourceContentType {
    #[serde(rename = "behavior")]
    Behavior,
    #[serde(rename = "item")]
    ItemInfo,
    #[serde(rename = "profile")]
    UserProfile,
    #[serde(rename = "user_rank")]
    UserRank,
    #[serde(untagged)]
    Other(String),
}

impl DataSourceContentType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Behavior => "behavior",
            Self::ItemInfo => "item",
            Self::UserProfile => "profile",
            Self::UserRank => "user_rank",
            Self::Other(value) => value,
        }
    }
}

impl fmt::Display for DataSourceContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a data source receives its data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataSourceType {
    EventCollector,
    Importer,
    Fetch,
    Upload,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandType {
    Gene,
    Combine,
    Upload,
    #[serde(rename = "fixedgene")]
    FixedGene,
    #[serde(untagged)]
    Other(String),
}

/// Comparison applied to a gene value.
///
/// `Inc*` operate on lists, `Rinc*` on range lists and `Kinc*` on partial
/// matches within lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BandGeneOperator {
    Lt,
    Le,
    Eq,
    Ge,
    Gt,
    In,
    Between,
    Inc,
    IncAll,
    IncNone,
    Rinc,
    RincAll,
    RincNone,
    Kinc,
    KincAll,
    KincNone,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BandCombineOperator {
    Union,
    Intersect,
    Except,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogicAlgType {
    UserBase,
    ItemBase,
    Rank,
    Keyword,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicAvlItemFilterMode {
    #[default]
    Disabled,
    Include,
    Exclude,
}
