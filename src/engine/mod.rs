mod eligibility;
mod model;
mod ownership;
mod scheduler;
mod signature;

pub use ownership::Owner;
pub use signature::LocationSignature;

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::client::{ClientNotification, GameClient};
use crate::config::{LoggingConfig, LoggingMode, ManualPolicy};

use self::eligibility::{desired, EvaluationSnapshot};
use self::model::{EngineState, LastToggle, INSTANCE_SETTLE_DELAY};
use self::ownership::owner_on_entry;
use self::scheduler::TimerKind;
use self::signature::{transition_between, SignatureTransition};

/// Drives the host's combat-logging flag from location changes. All runtime
/// state lives behind this handle; clones share the same engine.
#[derive(Clone)]
pub struct AutoLogger {
    shared: Arc<EngineShared>,
}

struct EngineShared {
    client: Arc<dyn GameClient>,
    state: Mutex<EngineState>,
}

impl EngineShared {
    fn lock_state(&self) -> MutexGuard<'_, EngineState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub running: bool,
    pub logging_active: bool,
    pub eligible: bool,
    pub owner: &'static str,
    pub signature: String,
    pub mode: LoggingMode,
    pub manual_policy: ManualPolicy,
    pub last_toggle: Option<String>,
}

impl AutoLogger {
    pub fn new(client: Arc<dyn GameClient>, config: LoggingConfig) -> Self {
        Self {
            shared: Arc::new(EngineShared {
                client,
                state: Mutex::new(EngineState::new(config)),
            }),
        }
    }

    /// Must be called from within a tokio runtime; timers are spawned tasks.
    pub fn start(&self) {
        let mut state = self.shared.lock_state();
        if state.started {
            return;
        }
        state.started = true;

        let location = self.shared.client.current_location();
        state.signature = LocationSignature::of(&location);
        state.owner = owner_on_entry(
            state.config.manual_policy,
            self.shared.client.logging_active(),
            Owner::None,
        );
        tracing::info!(
            signature = %state.signature.label(),
            owner = state.owner.label(),
            "Automatic combat logging started"
        );
        arm_recheck(&self.shared, &mut state);
        drop(state);

        evaluate(&self.shared);
    }

    pub fn shutdown(&self) {
        let mut state = self.shared.lock_state();
        if !state.started {
            return;
        }
        state.started = false;
        state.timers.cancel_all();
        tracing::info!("Automatic combat logging stopped");
    }

    pub fn notify(&self, notification: ClientNotification) {
        let mut state = self.shared.lock_state();
        if !state.started {
            return;
        }
        tracing::debug!(?notification, "Location-relevant client notification");
        let delay = state.config.debounce();
        arm_debounce(&self.shared, &mut state, delay);
    }

    /// Drains host notifications into the debouncer until the sender drops.
    pub fn spawn_notification_pump(
        &self,
        mut receiver: mpsc::UnboundedReceiver<ClientNotification>,
    ) -> JoinHandle<()> {
        let logger = self.clone();
        tokio::spawn(async move {
            while let Some(notification) = receiver.recv().await {
                logger.notify(notification);
            }
            tracing::debug!("Notification channel closed");
        })
    }

    /// Applies a config mutation and re-evaluates immediately; a pending
    /// debounced evaluation is superseded.
    pub fn update_config(&self, apply: impl FnOnce(&mut LoggingConfig)) {
        let mut state = self.shared.lock_state();
        apply(&mut state.config);
        if !state.started {
            return;
        }
        state.timers.cancel(TimerKind::Debounce);
        arm_recheck(&self.shared, &mut state);
        drop(state);

        evaluate(&self.shared);
    }

    pub fn config(&self) -> LoggingConfig {
        self.shared.lock_state().config.clone()
    }

    pub fn current_owner(&self) -> Owner {
        self.shared.lock_state().owner
    }

    pub fn status(&self) -> StatusReport {
        let snapshot = EvaluationSnapshot::capture(self.shared.client.as_ref());
        let state = self.shared.lock_state();
        StatusReport {
            running: state.started,
            logging_active: self.shared.client.logging_active(),
            eligible: desired(&state.config, &snapshot),
            owner: state.owner.label(),
            signature: state.signature.label(),
            mode: state.config.mode,
            manual_policy: state.config.manual_policy,
            last_toggle: state.last_toggle.as_ref().map(|toggle| {
                format!(
                    "{} at {}",
                    if toggle.enabled { "enabled" } else { "disabled" },
                    toggle.at.format("%H:%M:%S")
                )
            }),
        }
    }
}

fn arm_debounce(shared: &Arc<EngineShared>, state: &mut EngineState, delay: Duration) {
    let task_shared = Arc::clone(shared);
    let handle = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        task_shared
            .lock_state()
            .timers
            .clear_fired(TimerKind::Debounce);
        evaluate(&task_shared);
    });
    state.timers.arm(TimerKind::Debounce, handle);
}

fn arm_enable(shared: &Arc<EngineShared>, state: &mut EngineState, delay: Duration) {
    let task_shared = Arc::clone(shared);
    let handle = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        run_enable(&task_shared);
    });
    state.timers.arm(TimerKind::Enable, handle);
}

fn arm_disable(shared: &Arc<EngineShared>, state: &mut EngineState, delay: Duration) {
    let task_shared = Arc::clone(shared);
    let handle = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        run_disable(&task_shared);
    });
    state.timers.arm(TimerKind::Disable, handle);
}

fn arm_recheck(shared: &Arc<EngineShared>, state: &mut EngineState) {
    state.timers.cancel(TimerKind::Recheck);
    let Some(period) = state.config.recheck_period() else {
        return;
    };

    let task_shared = Arc::clone(shared);
    let handle = tokio::spawn(async move {
        loop {
            tokio::time::sleep(period).await;
            run_recheck(&task_shared);
        }
    });
    state.timers.arm(TimerKind::Recheck, handle);
}

/// One debounced evaluation pass: read the host once, handle a signature
/// transition if the player actually relocated, then converge the flag
/// towards eligibility through the delay timers.
fn evaluate(shared: &Arc<EngineShared>) {
    let snapshot = EvaluationSnapshot::capture(shared.client.as_ref());
    let next_signature = LocationSignature::of(&snapshot.location);

    let mut state = shared.lock_state();
    if !state.started {
        return;
    }

    match transition_between(state.signature, next_signature) {
        SignatureTransition::Unchanged => {}
        SignatureTransition::SwappedInstance => {
            state.signature = next_signature;
            handle_instance_swap(shared, &mut state, &snapshot);
            return;
        }
        SignatureTransition::EnteredInstance | SignatureTransition::LeftInstance => {
            state.signature = next_signature;
            state.owner = owner_on_entry(
                state.config.manual_policy,
                shared.client.logging_active(),
                state.owner,
            );
            tracing::debug!(
                signature = %next_signature.label(),
                owner = state.owner.label(),
                "Location signature changed"
            );
        }
    }

    decide(shared, &mut state, &snapshot);
}

fn decide(shared: &Arc<EngineShared>, state: &mut EngineState, snapshot: &EvaluationSnapshot) {
    let eligible = desired(&state.config, snapshot);
    let logging = shared.client.logging_active();

    if eligible {
        state.timers.cancel(TimerKind::Disable);
        if state.owner == Owner::User || logging {
            return;
        }
        let delay = state.config.enable_delay();
        arm_enable(shared, state, delay);
    } else {
        state.timers.cancel(TimerKind::Enable);
        if !logging || state.owner == Owner::User {
            return;
        }
        if state.config.disable_only_owned && state.owner != Owner::Auto {
            return;
        }
        let delay = state.config.disable_delay();
        arm_disable(shared, state, delay);
    }
}

/// Direct instance-to-instance swap (no world in between). In-flight timers
/// are stale for the new destination and are dropped before anything else.
fn handle_instance_swap(
    shared: &Arc<EngineShared>,
    state: &mut EngineState,
    snapshot: &EvaluationSnapshot,
) {
    state.timers.cancel(TimerKind::Enable);
    state.timers.cancel(TimerKind::Disable);
    arm_recheck(shared, state);

    let policy = state.config.manual_policy;
    let logging = shared.client.logging_active();

    if !state.config.reset_between_instances {
        state.owner = owner_on_entry(policy, logging, state.owner);
        tracing::debug!(
            signature = %state.signature.label(),
            owner = state.owner.label(),
            "Instance swap without boundary reset"
        );
        decide(shared, state, snapshot);
        return;
    }

    let keep_manual = policy.respects_manual()
        && logging
        && state.owner != Owner::Auto
        && !policy.forces_boundary();
    if keep_manual {
        state.owner = Owner::User;
        tracing::debug!("Instance swap left manually enabled logging untouched");
        return;
    }

    disable_logging(shared, state);
    tracing::debug!(
        signature = %state.signature.label(),
        "Boundary reset at instance swap"
    );
    if desired(&state.config, snapshot) {
        arm_debounce(shared, state, INSTANCE_SETTLE_DELAY);
    }
}

/// Enable-delay callback. Eligibility and ownership are re-read here; the
/// decision that scheduled this timer may be stale by now.
fn run_enable(shared: &Arc<EngineShared>) {
    let snapshot = EvaluationSnapshot::capture(shared.client.as_ref());
    let mut state = shared.lock_state();
    state.timers.clear_fired(TimerKind::Enable);
    if !state.started {
        return;
    }
    if state.owner == Owner::User {
        return;
    }
    if !desired(&state.config, &snapshot) {
        return;
    }
    enable_logging(shared, &mut state);
}

fn run_disable(shared: &Arc<EngineShared>) {
    let snapshot = EvaluationSnapshot::capture(shared.client.as_ref());
    let mut state = shared.lock_state();
    state.timers.clear_fired(TimerKind::Disable);
    if !state.started {
        return;
    }
    if desired(&state.config, &snapshot) {
        return;
    }
    if state.owner == Owner::User {
        return;
    }
    if state.config.disable_only_owned && state.owner != Owner::Auto {
        return;
    }
    disable_logging(shared, &mut state);
}

fn run_recheck(shared: &Arc<EngineShared>) {
    let snapshot = EvaluationSnapshot::capture(shared.client.as_ref());
    let mut state = shared.lock_state();
    if !state.started {
        return;
    }
    if state.owner == Owner::User {
        return;
    }
    if !desired(&state.config, &snapshot) {
        return;
    }
    if shared.client.logging_active() {
        return;
    }
    tracing::debug!("Recheck re-asserting combat logging");
    enable_logging(shared, &mut state);
}

fn enable_logging(shared: &EngineShared, state: &mut EngineState) {
    if state.config.advanced_logging && !shared.client.advanced_logging_active() {
        shared.client.set_advanced_logging(true);
        tracing::debug!("Raised advanced combat logging capability");
    }

    if shared.client.logging_active() {
        return;
    }

    shared.client.set_logging(true);
    state.owner = Owner::Auto;
    state.last_toggle = Some(LastToggle {
        enabled: true,
        at: chrono::Local::now(),
    });
    tracing::info!(signature = %state.signature.label(), "Enabled combat logging");
}

fn disable_logging(shared: &EngineShared, state: &mut EngineState) {
    if shared.client.logging_active() {
        shared.client.set_logging(false);
        state.last_toggle = Some(LastToggle {
            enabled: false,
            at: chrono::Local::now(),
        });
        tracing::info!(signature = %state.signature.label(), "Disabled combat logging");
    }
    state.owner = Owner::None;
}
