use crate::client::{GameClient, GroupStatus, InstanceKind, Location, DIFFICULTY_KEYSTONE};
use crate::config::LoggingConfig;

/// Point-in-time view of everything the eligibility decision reads from the
/// host. Captured once per evaluation so a single pass sees consistent data.
#[derive(Debug, Clone)]
pub(crate) struct EvaluationSnapshot {
    pub(crate) location: Location,
    pub(crate) group: GroupStatus,
    pub(crate) player_level: u32,
    pub(crate) max_player_level: u32,
    pub(crate) keystone_level_active: bool,
    pub(crate) challenge_mode_active: bool,
}

impl EvaluationSnapshot {
    pub(crate) fn capture(client: &dyn GameClient) -> Self {
        Self {
            location: client.current_location(),
            group: client.group_status(),
            player_level: client.player_level(),
            max_player_level: client.max_player_level(),
            keystone_level_active: client
                .active_keystone_level()
                .map_or(false, |level| level > 0),
            challenge_mode_active: client.challenge_mode_active(),
        }
    }
}

/// Whether combat logging should be active for the captured snapshot.
/// Pure gate chain; the first failing gate wins.
pub(crate) fn desired(config: &LoggingConfig, snapshot: &EvaluationSnapshot) -> bool {
    if !config.enabled {
        return false;
    }
    if !config.character_enabled {
        return false;
    }
    if config.max_level_only && snapshot.player_level != snapshot.max_player_level {
        return false;
    }
    if config.grouped_only && !snapshot.group.is_grouped() {
        return false;
    }

    let location = &snapshot.location;
    if !location.in_instance {
        return false;
    }

    match location.kind {
        InstanceKind::Raid => {
            config.mode.includes_raids() && config.raid_difficulties.allows(location.difficulty_id)
        }
        InstanceKind::Party => {
            config.mode.includes_dungeons()
                && (!config.keystone_only || keystone_content(snapshot))
        }
        InstanceKind::Scenario => config.log_scenarios,
        InstanceKind::Battleground => config.log_battlegrounds,
        InstanceKind::Arena => config.log_arenas,
        InstanceKind::None => false,
    }
}

/// Keystone runs are detected from three independent host signals because
/// the difficulty id alone lags right after a load screen.
fn keystone_content(snapshot: &EvaluationSnapshot) -> bool {
    snapshot.location.difficulty_id == DIFFICULTY_KEYSTONE
        || snapshot.keystone_level_active
        || snapshot.challenge_mode_active
}

#[cfg(test)]
mod tests {
    use super::{desired, EvaluationSnapshot};
    use crate::client::{
        GroupStatus, InstanceKind, Location, DIFFICULTY_HEROIC_RAID, DIFFICULTY_KEYSTONE,
        DIFFICULTY_LFR,
    };
    use crate::config::{LoggingConfig, LoggingMode};

    fn snapshot_at(location: Location) -> EvaluationSnapshot {
        EvaluationSnapshot {
            location,
            group: GroupStatus::Raid,
            player_level: 80,
            max_player_level: 80,
            keystone_level_active: false,
            challenge_mode_active: false,
        }
    }

    #[test]
    fn disabled_system_is_never_eligible() {
        let mut config = LoggingConfig::default();
        config.enabled = false;
        config.log_scenarios = true;
        config.log_battlegrounds = true;
        config.log_arenas = true;

        let locations = [
            Location::world(),
            Location::instance(InstanceKind::Raid, 2657, DIFFICULTY_HEROIC_RAID),
            Location::instance(InstanceKind::Party, 1763, DIFFICULTY_KEYSTONE),
            Location::instance(InstanceKind::Scenario, 2516, 1),
            Location::instance(InstanceKind::Battleground, 2107, 0),
            Location::instance(InstanceKind::Arena, 1911, 0),
        ];
        for location in locations {
            assert!(!desired(&config, &snapshot_at(location)));
        }
    }

    #[test]
    fn disabled_character_is_never_eligible() {
        let mut config = LoggingConfig::default();
        config.character_enabled = false;
        let raid = snapshot_at(Location::instance(
            InstanceKind::Raid,
            2657,
            DIFFICULTY_HEROIC_RAID,
        ));
        assert!(!desired(&config, &raid));
    }

    #[test]
    fn heroic_raid_eligible_in_raid_mode() {
        let mut config = LoggingConfig::default();
        config.mode = LoggingMode::Raids;
        config.raid_difficulties.heroic = true;

        let heroic = snapshot_at(Location::instance(
            InstanceKind::Raid,
            2657,
            DIFFICULTY_HEROIC_RAID,
        ));
        assert!(desired(&config, &heroic));
    }

    #[test]
    fn lfr_raid_filtered_out_when_bucket_disallowed() {
        let mut config = LoggingConfig::default();
        config.mode = LoggingMode::Raids;
        config.raid_difficulties.lfr = false;

        let lfr = snapshot_at(Location::instance(InstanceKind::Raid, 2657, DIFFICULTY_LFR));
        assert!(!desired(&config, &lfr));
    }

    #[test]
    fn unrecognized_raid_difficulty_defaults_to_allowed() {
        let mut config = LoggingConfig::default();
        config.mode = LoggingMode::Raids;

        let unknown = snapshot_at(Location::instance(InstanceKind::Raid, 2657, 99));
        assert!(desired(&config, &unknown));
    }

    #[test]
    fn raid_mode_excludes_dungeons() {
        let mut config = LoggingConfig::default();
        config.mode = LoggingMode::Raids;

        let dungeon = snapshot_at(Location::instance(InstanceKind::Party, 1763, 23));
        assert!(!desired(&config, &dungeon));
    }

    #[test]
    fn keystone_only_accepts_any_of_the_three_signals() {
        let mut config = LoggingConfig::default();
        config.mode = LoggingMode::Dungeons;
        config.keystone_only = true;

        let by_difficulty = snapshot_at(Location::instance(
            InstanceKind::Party,
            1763,
            DIFFICULTY_KEYSTONE,
        ));
        assert!(desired(&config, &by_difficulty));

        let mut by_keystone_level = snapshot_at(Location::instance(InstanceKind::Party, 1763, 23));
        by_keystone_level.keystone_level_active = true;
        assert!(desired(&config, &by_keystone_level));

        let mut by_challenge_flag = snapshot_at(Location::instance(InstanceKind::Party, 1763, 23));
        by_challenge_flag.challenge_mode_active = true;
        assert!(desired(&config, &by_challenge_flag));

        let no_signal = snapshot_at(Location::instance(InstanceKind::Party, 1763, 23));
        assert!(!desired(&config, &no_signal));
    }

    #[test]
    fn grouped_only_blocks_solo_players() {
        let mut config = LoggingConfig::default();
        config.grouped_only = true;

        let mut solo = snapshot_at(Location::instance(
            InstanceKind::Raid,
            2657,
            DIFFICULTY_HEROIC_RAID,
        ));
        solo.group = GroupStatus::Solo;
        assert!(!desired(&config, &solo));

        let mut grouped = solo.clone();
        grouped.group = GroupStatus::Party;
        assert!(desired(&config, &grouped));
    }

    #[test]
    fn max_level_only_blocks_leveling_characters() {
        let mut config = LoggingConfig::default();
        config.max_level_only = true;

        let mut leveling = snapshot_at(Location::instance(
            InstanceKind::Raid,
            2657,
            DIFFICULTY_HEROIC_RAID,
        ));
        leveling.player_level = 71;
        assert!(!desired(&config, &leveling));

        let capped = snapshot_at(Location::instance(
            InstanceKind::Raid,
            2657,
            DIFFICULTY_HEROIC_RAID,
        ));
        assert!(desired(&config, &capped));
    }

    #[test]
    fn optional_instance_kinds_follow_their_toggles() {
        let mut config = LoggingConfig::default();
        let scenario = snapshot_at(Location::instance(InstanceKind::Scenario, 2516, 1));
        let battleground = snapshot_at(Location::instance(InstanceKind::Battleground, 2107, 0));
        let arena = snapshot_at(Location::instance(InstanceKind::Arena, 1911, 0));

        assert!(!desired(&config, &scenario));
        assert!(!desired(&config, &battleground));
        assert!(!desired(&config, &arena));

        config.log_scenarios = true;
        config.log_battlegrounds = true;
        config.log_arenas = true;
        assert!(desired(&config, &scenario));
        assert!(desired(&config, &battleground));
        assert!(desired(&config, &arena));
    }

    #[test]
    fn open_world_is_never_eligible() {
        let config = LoggingConfig::default();
        assert!(!desired(&config, &snapshot_at(Location::world())));
    }
}
