use crate::config::ManualPolicy;

/// Attribution of who most recently caused the recording flag's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    None,
    Auto,
    User,
}

impl Owner {
    pub fn label(self) -> &'static str {
        match self {
            Owner::None => "none",
            Owner::Auto => "auto",
            Owner::User => "user",
        }
    }
}

/// Ownership after entering a new location signature. A flag the engine
/// raised stays attributed to it until a disable succeeds; otherwise an
/// already-active flag belongs to the user when the policy respects manual
/// logging.
pub(crate) fn owner_on_entry(policy: ManualPolicy, logging_active: bool, previous: Owner) -> Owner {
    if previous == Owner::Auto {
        return Owner::Auto;
    }

    if policy.respects_manual() && logging_active {
        return Owner::User;
    }

    Owner::None
}
