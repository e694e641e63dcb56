//! Per-container consent state.

/// Consent state of one container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsentState {
    /// No allow action seen yet.
    #[default]
    NotGiven,
    /// The user allowed third-party media. Terminal.
    Given,
}

/// A user activation of the allow control.
///
/// The only way to move a [`ConsentGate`] to [`ConsentState::Given`].
#[derive(Debug, Clone, Copy)]
pub struct AllowClicked;

/// Tracks whether a container may load third-party content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsentGate {
    required: bool,
    state: ConsentState,
}

impl ConsentGate {
    /// Create a gate in the `NotGiven` state.
    pub fn new(required: bool) -> Self {
        Self {
            required,
            state: ConsentState::NotGiven,
        }
    }

    /// Record an allow action. Returns `true` if this changed the state.
    pub fn grant(&mut self, _action: AllowClicked) -> bool {
        let changed = self.state == ConsentState::NotGiven;
        self.state = ConsentState::Given;
        changed
    }

    /// Current state.
    pub fn state(&self) -> ConsentState {
        self.state
    }

    /// Whether consent is needed at all.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the user has given consent.
    pub fn is_given(&self) -> bool {
        self.state == ConsentState::Given
    }

    /// Whether a mount may proceed.
    pub fn permits_mount(&self) -> bool {
        !self.required || self.is_given()
    }
}
