use std::time::Duration;

use crate::config::LoggingConfig;

use super::ownership::Owner;
use super::scheduler::TimerSlots;
use super::signature::LocationSignature;

/// Hosts report stale instance data for a moment after a load screen, so a
/// swap waits this long before re-reading eligibility.
pub(crate) const INSTANCE_SETTLE_DELAY: Duration = Duration::from_millis(750);

#[derive(Debug, Clone)]
pub(crate) struct LastToggle {
    pub(crate) enabled: bool,
    pub(crate) at: chrono::DateTime<chrono::Local>,
}

pub(crate) struct EngineState {
    pub(crate) config: LoggingConfig,
    pub(crate) signature: LocationSignature,
    pub(crate) owner: Owner,
    pub(crate) timers: TimerSlots,
    pub(crate) started: bool,
    pub(crate) last_toggle: Option<LastToggle>,
}

impl EngineState {
    pub(crate) fn new(config: LoggingConfig) -> Self {
        Self {
            config,
            signature: LocationSignature::World,
            owner: Owner::None,
            timers: TimerSlots::default(),
            started: false,
            last_toggle: None,
        }
    }
}
