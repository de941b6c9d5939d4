/// Where the contact form is in its (simulated) submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionEvent {
    Submit,
    Validated { valid: bool },
    Sent,
    Reset,
}

impl SubmissionState {
    /// Applies `event`; events that make no sense in the current state leave it unchanged.
    pub fn on(self, event: SubmissionEvent) -> Self {
        use SubmissionEvent::*;
        use SubmissionState::*;
        match (self, event) {
            (Idle, Submit) => Validating,
            (Validating, Validated { valid: false }) => Idle,
            (Validating, Validated { valid: true }) => Submitting,
            (Submitting, Sent) => Succeeded,
            (Succeeded, Reset) => Idle,
            (state, _) => state,
        }
    }

    /// The submit control is only usable while idle.
    pub fn control_enabled(self) -> bool {
        matches!(self, SubmissionState::Idle | SubmissionState::Validating)
    }
}
