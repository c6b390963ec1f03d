pub const DIFFICULTY_KEYSTONE: u32 = 8;
pub const DIFFICULTY_NORMAL_RAID: u32 = 14;
pub const DIFFICULTY_HEROIC_RAID: u32 = 15;
pub const DIFFICULTY_MYTHIC_RAID: u32 = 16;
pub const DIFFICULTY_LFR: u32 = 17;
pub const LEGACY_RAID_DIFFICULTIES: &[u32] = &[3, 4, 5, 6, 7, 9];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstanceKind {
    None,
    Party,
    Raid,
    Scenario,
    Battleground,
    Arena,
}

impl InstanceKind {
    pub fn label(self) -> &'static str {
        match self {
            InstanceKind::None => "none",
            InstanceKind::Party => "party",
            InstanceKind::Raid => "raid",
            InstanceKind::Scenario => "scenario",
            InstanceKind::Battleground => "pvp",
            InstanceKind::Arena => "arena",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupStatus {
    Solo,
    Party,
    Raid,
}

impl GroupStatus {
    pub fn is_grouped(self) -> bool {
        !matches!(self, GroupStatus::Solo)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub in_instance: bool,
    pub kind: InstanceKind,
    pub map_id: u64,
    pub difficulty_id: u32,
}

impl Location {
    pub fn world() -> Self {
        Self {
            in_instance: false,
            kind: InstanceKind::None,
            map_id: 0,
            difficulty_id: 0,
        }
    }

    pub fn instance(kind: InstanceKind, map_id: u64, difficulty_id: u32) -> Self {
        Self {
            in_instance: true,
            kind,
            map_id,
            difficulty_id,
        }
    }
}

/// Host notifications that can change the logging decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientNotification {
    EnteringWorld,
    ZoneChanged,
    DifficultyChanged,
    ChallengeModeStarted,
    ChallengeModeEnded,
    GroupRosterChanged,
}

/// Query/mutation surface of the host game client. All queries are
/// best-effort snapshots; implementations must not block.
pub trait GameClient: Send + Sync {
    fn current_location(&self) -> Location;
    fn group_status(&self) -> GroupStatus;
    fn player_level(&self) -> u32;
    fn max_player_level(&self) -> u32;
    fn logging_active(&self) -> bool;
    fn set_logging(&self, active: bool);
    fn advanced_logging_active(&self) -> bool;
    fn set_advanced_logging(&self, active: bool);
    fn active_keystone_level(&self) -> Option<u32>;
    fn challenge_mode_active(&self) -> bool;
}
