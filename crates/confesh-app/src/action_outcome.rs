/// What happened to a user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action ran to completion
    Completed,
    /// Nothing was done: another action is in flight, or there was nothing to act on
    Ignored,
    /// The action was rejected or the backend failed; a notice was queued
    Failed,
    /// A destructive action is waiting for the user to confirm it
    AwaitingConfirmation,
}

impl ActionOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}
