//! Data models for the Nexus applications.
//!
//! Types are organized by application in submodules and re-exported here
//! for convenient access.

pub mod emc;
pub mod enums;
pub mod insight;
pub mod recommender;

pub use emc::{
    AppInfo, AppPermission, AppRole, AuditLog, AuditLogEvent, DataSource, DataSourceSchema,
    EventCollector, ExporterSchemaField, ExporterSetting, Group, SystemInfo, User, UserRole,
};
pub use enums::{
    AppId, AppRoleName, BandCombineOperator, BandGeneOperator, BandType, DataSourceContentType,
    DataSourceType, LogicAlgType, LogicAvlItemFilterMode,
};
pub use insight::{
    Band, BandCategory, BandCombine, BandGene, DailyStatistics, EiGroup, EiUser, Envelope,
    ItemUploadResult, SnapshotInfo, StatisticsItem, UidListExport,
};
pub use recommender::{AlgInstance, Campaign, Logic, UserFilter};
