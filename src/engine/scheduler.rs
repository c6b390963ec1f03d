use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TimerKind {
    Debounce,
    Enable,
    Disable,
    Recheck,
}

const ALL_KINDS: [TimerKind; 4] = [
    TimerKind::Debounce,
    TimerKind::Enable,
    TimerKind::Disable,
    TimerKind::Recheck,
];

/// One slot per timer kind. Arming a kind aborts whatever was pending for
/// it, so at most one timer of each kind is ever live and the most recent
/// request wins.
#[derive(Debug, Default)]
pub(crate) struct TimerSlots {
    debounce: Option<JoinHandle<()>>,
    enable: Option<JoinHandle<()>>,
    disable: Option<JoinHandle<()>>,
    recheck: Option<JoinHandle<()>>,
}

impl TimerSlots {
    fn slot(&mut self, kind: TimerKind) -> &mut Option<JoinHandle<()>> {
        match kind {
            TimerKind::Debounce => &mut self.debounce,
            TimerKind::Enable => &mut self.enable,
            TimerKind::Disable => &mut self.disable,
            TimerKind::Recheck => &mut self.recheck,
        }
    }

    pub(crate) fn arm(&mut self, kind: TimerKind, handle: JoinHandle<()>) {
        let slot = self.slot(kind);
        if let Some(previous) = slot.take() {
            previous.abort();
        }
        *slot = Some(handle);
    }

    pub(crate) fn cancel(&mut self, kind: TimerKind) {
        if let Some(handle) = self.slot(kind).take() {
            handle.abort();
        }
    }

    /// A fired timer retires its own handle without aborting itself.
    pub(crate) fn clear_fired(&mut self, kind: TimerKind) {
        self.slot(kind).take();
    }

    pub(crate) fn cancel_all(&mut self) {
        for kind in ALL_KINDS {
            self.cancel(kind);
        }
    }

    #[cfg(test)]
    pub(crate) fn is_armed(&mut self, kind: TimerKind) -> bool {
        self.slot(kind).is_some()
    }
}
