mod client;
mod commands;
mod config;
mod engine;
mod share;
mod store;

pub use client::{
    ClientNotification, GameClient, GroupStatus, InstanceKind, Location, DIFFICULTY_HEROIC_RAID,
    DIFFICULTY_KEYSTONE, DIFFICULTY_LFR, DIFFICULTY_MYTHIC_RAID, DIFFICULTY_NORMAL_RAID,
    LEGACY_RAID_DIFFICULTIES,
};
pub use commands::dispatch;
pub use config::{LoggingConfig, LoggingMode, ManualPolicy, RaidDifficultyFilter};
pub use engine::{AutoLogger, LocationSignature, Owner, StatusReport};
pub use share::{export_string, import_string, SHARE_PREFIX};
pub use store::{load_config, save_config};
