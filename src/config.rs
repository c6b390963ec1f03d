use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::client::{
    DIFFICULTY_HEROIC_RAID, DIFFICULTY_LFR, DIFFICULTY_MYTHIC_RAID, DIFFICULTY_NORMAL_RAID,
    LEGACY_RAID_DIFFICULTIES,
};

pub(crate) const DEFAULT_DEBOUNCE_SECONDS: f64 = 0.35;
pub(crate) const DEFAULT_ENABLE_DELAY_SECONDS: f64 = 1.0;
pub(crate) const DEFAULT_DISABLE_DELAY_SECONDS: f64 = 0.5;
pub(crate) const DEFAULT_RECHECK_SECONDS: f64 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoggingMode {
    Raids,
    Dungeons,
    All,
}

impl LoggingMode {
    pub fn includes_raids(self) -> bool {
        matches!(self, LoggingMode::Raids | LoggingMode::All)
    }

    pub fn includes_dungeons(self) -> bool {
        matches!(self, LoggingMode::Dungeons | LoggingMode::All)
    }

    pub fn label(self) -> &'static str {
        match self {
            LoggingMode::Raids => "raids",
            LoggingMode::Dungeons => "dungeons",
            LoggingMode::All => "all",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "raids" => Some(LoggingMode::Raids),
            "dungeons" => Some(LoggingMode::Dungeons),
            "all" => Some(LoggingMode::All),
            _ => None,
        }
    }
}

/// How manually enabled logging is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ManualPolicy {
    /// Manual logging is not tracked; the engine toggles freely.
    Override,
    /// A flag the user raised is never touched.
    Respect,
    /// Like Respect, but instance boundaries reclaim the flag.
    ForceBoundary,
}

impl ManualPolicy {
    pub fn respects_manual(self) -> bool {
        matches!(self, ManualPolicy::Respect | ManualPolicy::ForceBoundary)
    }

    pub fn forces_boundary(self) -> bool {
        matches!(self, ManualPolicy::ForceBoundary)
    }

    pub fn label(self) -> &'static str {
        match self {
            ManualPolicy::Override => "override",
            ManualPolicy::Respect => "respect",
            ManualPolicy::ForceBoundary => "force",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "override" => Some(ManualPolicy::Override),
            "respect" => Some(ManualPolicy::Respect),
            "force" | "forceboundary" => Some(ManualPolicy::ForceBoundary),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RaidDifficultyFilter {
    pub lfr: bool,
    pub normal: bool,
    pub heroic: bool,
    pub mythic: bool,
    pub legacy: bool,
}

impl Default for RaidDifficultyFilter {
    fn default() -> Self {
        Self {
            lfr: true,
            normal: true,
            heroic: true,
            mythic: true,
            legacy: true,
        }
    }
}

impl RaidDifficultyFilter {
    /// Unrecognized difficulty ids are allowed.
    pub fn allows(&self, difficulty_id: u32) -> bool {
        match difficulty_id {
            DIFFICULTY_LFR => self.lfr,
            DIFFICULTY_NORMAL_RAID => self.normal,
            DIFFICULTY_HEROIC_RAID => self.heroic,
            DIFFICULTY_MYTHIC_RAID => self.mythic,
            id if LEGACY_RAID_DIFFICULTIES.contains(&id) => self.legacy,
            _ => true,
        }
    }

    pub fn set_bucket(&mut self, bucket: &str, allowed: bool) -> bool {
        match bucket.trim().to_ascii_lowercase().as_str() {
            "lfr" => self.lfr = allowed,
            "normal" => self.normal = allowed,
            "heroic" => self.heroic = allowed,
            "mythic" => self.mythic = allowed,
            "legacy" => self.legacy = allowed,
            _ => return false,
        }
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub character_enabled: bool,
    pub mode: LoggingMode,
    pub max_level_only: bool,
    pub grouped_only: bool,
    pub keystone_only: bool,
    pub log_scenarios: bool,
    pub log_battlegrounds: bool,
    pub log_arenas: bool,
    pub raid_difficulties: RaidDifficultyFilter,
    pub manual_policy: ManualPolicy,
    pub reset_between_instances: bool,
    pub disable_only_owned: bool,
    pub advanced_logging: bool,
    pub debounce_seconds: f64,
    pub enable_delay_seconds: f64,
    pub disable_delay_seconds: f64,
    pub recheck_seconds: f64,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            character_enabled: true,
            mode: LoggingMode::All,
            max_level_only: false,
            grouped_only: false,
            keystone_only: false,
            log_scenarios: false,
            log_battlegrounds: false,
            log_arenas: false,
            raid_difficulties: RaidDifficultyFilter::default(),
            manual_policy: ManualPolicy::Respect,
            reset_between_instances: false,
            disable_only_owned: false,
            advanced_logging: true,
            debounce_seconds: DEFAULT_DEBOUNCE_SECONDS,
            enable_delay_seconds: DEFAULT_ENABLE_DELAY_SECONDS,
            disable_delay_seconds: DEFAULT_DISABLE_DELAY_SECONDS,
            recheck_seconds: DEFAULT_RECHECK_SECONDS,
        }
    }
}

impl LoggingConfig {
    pub fn debounce(&self) -> Duration {
        duration_from_seconds(self.debounce_seconds, DEFAULT_DEBOUNCE_SECONDS)
    }

    pub fn enable_delay(&self) -> Duration {
        duration_from_seconds(self.enable_delay_seconds, DEFAULT_ENABLE_DELAY_SECONDS)
    }

    pub fn disable_delay(&self) -> Duration {
        duration_from_seconds(self.disable_delay_seconds, DEFAULT_DISABLE_DELAY_SECONDS)
    }

    /// None when the periodic recheck is disabled.
    pub fn recheck_period(&self) -> Option<Duration> {
        if !self.recheck_seconds.is_finite() || self.recheck_seconds <= 0.0 {
            return None;
        }
        Some(Duration::from_secs_f64(self.recheck_seconds))
    }
}

fn duration_from_seconds(value: f64, fallback: f64) -> Duration {
    let seconds = if value.is_finite() && value >= 0.0 {
        value
    } else {
        fallback
    };
    Duration::from_secs_f64(seconds)
}

#[cfg(test)]
mod tests {
    use super::{LoggingConfig, LoggingMode, ManualPolicy, RaidDifficultyFilter};
    use crate::client::{DIFFICULTY_HEROIC_RAID, DIFFICULTY_LFR};
    use std::time::Duration;

    #[test]
    fn mode_inclusion() {
        assert!(LoggingMode::Raids.includes_raids());
        assert!(!LoggingMode::Raids.includes_dungeons());
        assert!(LoggingMode::Dungeons.includes_dungeons());
        assert!(!LoggingMode::Dungeons.includes_raids());
        assert!(LoggingMode::All.includes_raids());
        assert!(LoggingMode::All.includes_dungeons());
    }

    #[test]
    fn difficulty_filter_buckets_and_unknown_ids() {
        let mut filter = RaidDifficultyFilter::default();
        filter.heroic = false;
        filter.lfr = false;

        assert!(!filter.allows(DIFFICULTY_HEROIC_RAID));
        assert!(!filter.allows(DIFFICULTY_LFR));
        assert!(filter.allows(14));
        assert!(filter.allows(3), "legacy bucket should cover id 3");
        assert!(filter.allows(99), "unknown ids default to allowed");
    }

    #[test]
    fn set_bucket_rejects_unknown_names() {
        let mut filter = RaidDifficultyFilter::default();
        assert!(filter.set_bucket("mythic", false));
        assert!(!filter.mythic);
        assert!(!filter.set_bucket("mythical", false));
    }

    #[test]
    fn delay_accessors_fall_back_on_invalid_values() {
        let mut config = LoggingConfig::default();
        config.enable_delay_seconds = f64::NAN;
        config.disable_delay_seconds = -2.0;

        assert_eq!(config.enable_delay(), Duration::from_secs_f64(1.0));
        assert_eq!(config.disable_delay(), Duration::from_secs_f64(0.5));
    }

    #[test]
    fn zero_recheck_disables_the_period() {
        let mut config = LoggingConfig::default();
        assert!(config.recheck_period().is_some());
        config.recheck_seconds = 0.0;
        assert!(config.recheck_period().is_none());
    }

    #[test]
    fn manual_policy_parsing() {
        assert_eq!(ManualPolicy::parse("respect"), Some(ManualPolicy::Respect));
        assert_eq!(
            ManualPolicy::parse("FORCE"),
            Some(ManualPolicy::ForceBoundary)
        );
        assert_eq!(ManualPolicy::parse("ignore"), None);
    }
}
